use crate::render;
use anyhow::Result;
use directory_app::{
    FormField, ListingSeed, Navigation, Screen, Session, SubmitOutcome, ViewKind,
};
use directory_model::Sector;
use directory_search::SectorFilter;
use directory_store::DirectoryStore;
use std::fmt::Write as _;
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  home                  back to the home view
  list [query]          open the listing, optionally searching by name
  where <location>      filter the listing by location
  sector <n|all|label>  filter the listing by sector
  clear                 reset every listing filter
  open <n|id>           open a company from the current view, or by id
  add                   open the submission form
  set <field> <value>   fill a form field (type `fields` for the list)
  submit                save the form
  cancel                leave the form
  reload                fetch the directory again
  quit                  exit";

enum Step {
    /// Show the current view, after an optional note
    Continue(Option<String>),
    /// Print text without redrawing the view
    Info(String),
    Quit,
}

/// Line-mode browser: one command per line, the current view after each
pub(crate) async fn run_browse<R: BufRead, W: Write>(
    store: DirectoryStore,
    input: R,
    out: &mut W,
) -> Result<()> {
    let mut session = Session::new(store);
    session.load().await;
    if let Some(origin) = session.origin() {
        writeln!(out, "{}", render::origin_line(origin))?;
    }
    write!(out, "{}", render_screen(&session))?;
    writeln!(out, "Type `help` for commands.")?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match execute_line(&mut session, line).await {
            Ok(Step::Quit) => break,
            Ok(Step::Continue(note)) => {
                if let Some(note) = note {
                    writeln!(out, "{note}")?;
                }
                write!(out, "{}", render_screen(&session))?;
            }
            Ok(Step::Info(text)) => writeln!(out, "{text}")?,
            Err(message) => writeln!(out, "! {message}")?,
        }
        out.flush()?;
    }
    Ok(())
}

async fn execute_line(session: &mut Session, line: &str) -> std::result::Result<Step, String> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => return Ok(Step::Quit),
        "help" | "?" => return Ok(Step::Info(HELP.to_string())),
        "fields" => {
            let names: Vec<_> = FormField::ALL
                .iter()
                .map(|field| {
                    if field.is_list() {
                        format!("{field} (comma separated)")
                    } else {
                        field.to_string()
                    }
                })
                .collect();
            return Ok(Step::Info(format!("Fields: {}", names.join(", "))));
        }
        "home" => navigate(session, Navigation::Home)?,
        "list" => {
            let seed = if rest.is_empty() {
                ListingSeed::default()
            } else {
                ListingSeed::query(rest)
            };
            navigate(session, Navigation::Listing(seed))?;
        }
        "where" => {
            session.set_location(rest);
            ensure_listing(session)?;
        }
        "sector" => {
            let sector = parse_sector(rest)?;
            navigate(session, Navigation::Listing(ListingSeed::sector(sector)))?;
        }
        "clear" => {
            session.clear_filters();
            ensure_listing(session)?;
        }
        "open" => open(session, rest)?,
        "add" => navigate(session, Navigation::AddCompany)?,
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field: FormField = field.parse().map_err(|err| format!("{err}"))?;
            session
                .set_field(field, value.trim())
                .map_err(|err| err.to_string())?;
        }
        "submit" => match session.submit().await.map_err(|err| err.to_string())? {
            SubmitOutcome::Created { company, .. } => {
                return Ok(Step::Continue(Some(format!(
                    "Saved {} ({})",
                    company.name, company.id
                ))));
            }
            SubmitOutcome::Failed { message } => return Err(message.to_string()),
        },
        "cancel" => navigate(session, Navigation::Cancelled)?,
        "reload" => {
            session.load().await;
        }
        other => return Err(format!("Unknown command `{other}`. Type `help`.")),
    }
    Ok(Step::Continue(None))
}

fn navigate(session: &mut Session, navigation: Navigation) -> std::result::Result<(), String> {
    let transition = session.navigate(navigation).map_err(|err| err.to_string())?;
    if transition.redirected {
        return Err("Company not found; showing the listing.".to_string());
    }
    Ok(())
}

fn ensure_listing(session: &mut Session) -> std::result::Result<(), String> {
    if session.view_kind() == ViewKind::Listing {
        return Ok(());
    }
    navigate(session, Navigation::Listing(ListingSeed::default()))
}

fn parse_sector(raw: &str) -> std::result::Result<SectorFilter, String> {
    if let Ok(n) = raw.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|idx| Sector::ALL.get(idx).copied())
            .map(SectorFilter::Only)
            .ok_or_else(|| format!("Sector number must be 1-{}", Sector::ALL.len()));
    }
    SectorFilter::parse(raw).map_err(|err| err.to_string())
}

fn open(session: &mut Session, arg: &str) -> std::result::Result<(), String> {
    if arg.is_empty() {
        return Err("Usage: open <n|id>".to_string());
    }
    let Ok(n) = arg.parse::<usize>() else {
        return navigate(session, Navigation::ProfileById(arg.to_string()));
    };
    let idx = n.checked_sub(1).ok_or("Numbers start at 1")?;

    if session.view_kind() == ViewKind::Home {
        let company = session
            .featured()
            .get(idx)
            .cloned()
            .ok_or_else(|| format!("No company number {n}"))?;
        return navigate(session, Navigation::Profile(company));
    }
    match session.open_listed(idx) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(format!("No company number {n} in the listing")),
        Err(err) => Err(err.to_string()),
    }
}

pub(crate) fn render_screen(session: &Session) -> String {
    let mut out = String::new();
    match session.screen() {
        Screen::Home { sectors, featured } => {
            let _ = writeln!(out, "== Home ==\nSectors:");
            for (idx, sector) in sectors.iter().enumerate() {
                let _ = writeln!(out, "  {}. {sector}", idx + 1);
            }
            let _ = writeln!(out, "Featured:");
            out.push_str(&render::listing(featured));
        }
        Screen::Listing {
            total,
            companies,
            filter,
        } => {
            let _ = writeln!(
                out,
                "== Listing: {} of {total} (query {:?}, location {:?}, sector {}) ==",
                companies.len(),
                filter.query,
                filter.location,
                filter.sector
            );
            if companies.is_empty() {
                let _ = writeln!(out, "No companies match. Type `clear` to reset the filters.");
            }
            out.push_str(&render::listing(companies));
        }
        Screen::Profile(company) => {
            let _ = writeln!(out, "== Profile ==");
            out.push_str(&render::profile(company));
        }
        Screen::AddCompany { form, error } => {
            let _ = writeln!(out, "== New company ==");
            for field in FormField::ALL {
                let _ = writeln!(out, "  {:<17} {}", field.as_str(), form.get(field));
            }
            if let Some(error) = error {
                let _ = writeln!(out, "! {error}");
            }
        }
    }
    out
}
