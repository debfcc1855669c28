#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ledger_dash::app::bootstrap::run().await?;
    Ok(())
}
