use std::process::ExitCode;

use gracitecture_tools::{app_state::AppState, config::Config, errors::AppResult};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("[{}] {}", err.error_code(), err);
            println!("❌ Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    let state = AppState::new(Config::from_env());
    let buildings = state.building_repository.load_all().await?;
    let pipeline = state.image_pipeline()?;

    let report = pipeline.run(&buildings).await?;
    log::info!(
        "Image run finished: {} successful, {} failed, {} already present",
        report.successful,
        report.failed,
        report.skipped
    );
    Ok(())
}
