use anyhow::Result;
use chatlog::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
