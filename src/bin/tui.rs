use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    daycal::tui::run().await
}
