use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    attest_lens_cli::main_entry().await
}
