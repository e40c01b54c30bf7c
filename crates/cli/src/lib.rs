use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use command::{CommandHandler, CommandRequest};
use config::{Overrides, Settings};
use directory_app::SubmissionForm;
use directory_protocol::{serialize_json, CreatePayload};
use directory_search::{CompanyFilter, SectorFilter};
use directory_store::DirectoryStore;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

mod browse;
mod command;
mod config;
mod http_api;
mod render;
mod server_security;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "directory")]
#[command(about = "B2B company directory: browse, search and add companies", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (default: ./directory.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// External store URL (overrides DIRECTORY_STORE_URL)
    #[arg(long, global = true)]
    store_url: Option<String>,

    /// External store API key (overrides DIRECTORY_STORE_KEY)
    #[arg(long, global = true)]
    store_key: Option<String>,

    /// Ignore any configured store and serve the built-in directory
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List companies, optionally filtered
    List(ListArgs),

    /// Show one company profile
    Show(ShowArgs),

    /// Print the sectors, sizes and company types offered by the form
    Catalog(CatalogArgs),

    /// Submit a new company
    Add(AddArgs),

    /// Execute a JSON Command API request
    Command(CommandArgs),

    /// Serve Command API over HTTP (POST /command)
    ServeHttp(ServeArgs),

    /// Interactive line-mode browser on stdin/stdout
    Browse,
}

#[derive(Args)]
struct ListArgs {
    /// Match against name and short description
    #[arg(long)]
    query: Option<String>,

    /// Match against location
    #[arg(long)]
    location: Option<String>,

    /// Sector label, or "All"
    #[arg(long)]
    sector: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ShowArgs {
    id: String,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CatalogArgs {
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    name: String,

    /// Company type label (default: Produttore)
    #[arg(long = "type")]
    company_type: Option<String>,

    /// Sector label (default: the first sector)
    #[arg(long)]
    sector: Option<String>,

    /// Size label (default: 1-10 dipendenti)
    #[arg(long)]
    size: Option<String>,

    #[arg(long, default_value = "")]
    short_description: String,

    #[arg(long, default_value = "")]
    full_description: String,

    /// Comma-separated list
    #[arg(long, default_value = "")]
    products: String,

    /// Comma-separated list
    #[arg(long, default_value = "")]
    services: String,

    /// Comma-separated list
    #[arg(long, default_value = "")]
    markets_served: String,

    #[arg(long, default_value = "")]
    location: String,

    #[arg(long)]
    logo: Option<String>,

    #[arg(long)]
    cover: Option<String>,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    website: String,

    #[arg(long, default_value = "")]
    whatsapp: String,

    #[arg(long)]
    json: bool,
}

impl From<AddArgs> for CreatePayload {
    fn from(args: AddArgs) -> Self {
        Self {
            name: args.name,
            company_type: args.company_type,
            sector: args.sector,
            size: args.size,
            short_description: args.short_description,
            full_description: args.full_description,
            products: args.products,
            services: args.services,
            markets_served: args.markets_served,
            location: args.location,
            logo: args.logo,
            cover: args.cover,
            email: args.email,
            phone: args.phone,
            website: args.website,
            whatsapp: args.whatsapp,
        }
    }
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON payload (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing JSON payload
    #[arg(long)]
    file: Option<PathBuf>,

    /// Pretty-print JSON response
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address (default: [server] bind, else 127.0.0.1:7700)
    #[arg(long)]
    bind: Option<String>,

    /// Allow binding to non-loopback addresses
    #[arg(long)]
    public: bool,
}

impl Commands {
    /// Commands whose stdout must stay machine-readable
    fn wants_json(&self) -> bool {
        match self {
            Commands::List(args) => args.json,
            Commands::Show(args) => args.json,
            Commands::Catalog(args) => args.json,
            Commands::Add(args) => args.json,
            Commands::Command(_) => true,
            Commands::ServeHttp(_) | Commands::Browse => false,
        }
    }
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet || cli.command.wants_json() {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let overrides = Overrides {
        store_url: cli.store_url.clone(),
        store_key: cli.store_key.clone(),
        offline: cli.offline,
    };
    let settings = Settings::resolve(cli.config.as_deref(), &overrides)?;
    let store = DirectoryStore::from_config(settings.store.as_ref())
        .context("Failed to set up the directory store")?;

    match cli.command {
        Commands::List(args) => run_list(args, store).await?,
        Commands::Show(args) => run_show(args, store).await?,
        Commands::Catalog(args) => run_catalog(&args)?,
        Commands::Add(args) => run_add(args, store).await?,
        Commands::Command(args) => run_command(args, store).await?,
        Commands::ServeHttp(args) => {
            let bind = args.bind.unwrap_or(settings.bind);
            http_api::serve_http(&bind, args.public, store).await?;
        }
        Commands::Browse => {
            let stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            browse::run_browse(store, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}

async fn run_list(args: ListArgs, store: DirectoryStore) -> Result<()> {
    let sector = match args.sector.as_deref() {
        Some(label) => SectorFilter::parse(label).context("Invalid --sector")?,
        None => SectorFilter::All,
    };
    let filter = CompanyFilter::new(
        args.query.unwrap_or_default(),
        args.location.unwrap_or_default(),
        sector,
    );

    let snapshot = store.load().await;
    let matched = filter.apply(&snapshot.companies);

    if args.json {
        let meta = command::meta_for(Some(&snapshot.origin));
        let value = serde_json::json!({
            "total": snapshot.companies.len(),
            "count": matched.len(),
            "filter": filter,
            "companies": matched,
            "meta": meta,
        });
        return print_stdout(&serialize_json(&value)?);
    }

    print_stdout(&render::origin_line(&snapshot.origin))?;
    print_stdout(&format!(
        "{} of {} companies",
        matched.len(),
        snapshot.companies.len()
    ))?;
    print_stdout(render::listing(matched).trim_end())
}

async fn run_show(args: ShowArgs, store: DirectoryStore) -> Result<()> {
    store.load().await;
    let company = store
        .find(args.id.trim())
        .await
        .with_context(|| format!("No company with id {:?}", args.id.trim()))?;

    if args.json {
        return print_stdout(&serialize_json(&company)?);
    }
    print_stdout(render::profile(&company).trim_end())
}

fn run_catalog(args: &CatalogArgs) -> Result<()> {
    let catalog = command::catalog();
    if args.json {
        return print_stdout(&serialize_json(&catalog)?);
    }
    print_stdout(render::catalog(&catalog).trim_end())
}

async fn run_add(args: AddArgs, store: DirectoryStore) -> Result<()> {
    let json = args.json;
    let form: SubmissionForm = command::form_from_payload(CreatePayload::from(args))?;
    let company = form.build()?;

    store.load().await;
    let created = store.create(company).await.map_err(command::save_failure)?;

    if json {
        return print_stdout(&serialize_json(&created)?);
    }
    print_stdout(&format!("Saved {} ({})", created.name, created.id))?;
    if !store.is_configured() {
        print_stdout("No external store configured: the company lives only in this process.")?;
    }
    Ok(())
}

async fn run_command(args: CommandArgs, store: DirectoryStore) -> Result<()> {
    let raw = read_payload(&args)?;
    let request: CommandRequest =
        serde_json::from_str(&raw).context("Invalid JSON passed to --json/--file")?;

    let response = CommandHandler::new(store).execute(request).await;

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serialize_json(&response)?
    };
    print_stdout(&output)?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn read_payload(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;

    if buffer.trim().is_empty() {
        anyhow::bail!("Command request is empty. Provide --json, --file, or pipe JSON via stdin.");
    }

    Ok(buffer)
}
