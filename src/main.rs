#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists; this must happen before any config is read
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    cfgplane::cli::run_cli().await
}
