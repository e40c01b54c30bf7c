use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    directory_cli::main_entry().await
}
