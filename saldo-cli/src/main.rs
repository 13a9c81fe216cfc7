use anyhow::Result;
use saldo_cli::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
