use anyhow::Result;

mod app;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = fs_manager::cli::parse();
    app::run(args).await
}
