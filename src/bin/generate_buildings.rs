use std::process::ExitCode;

use gracitecture_tools::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    repositories::load_worklist,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::MissingCredential(msg)) => {
            println!("❌ Error: {}", msg);
            println!("Run: export ANTHROPIC_API_KEY='your-key-here'");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("[{}] {}", err.error_code(), err);
            println!("❌ Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    let state = AppState::new(Config::from_env());
    // Credential check comes first so a bad setup costs no API calls.
    let pipeline = state.content_pipeline()?;
    let worklist = load_worklist(&state.config.worklist_path).await?;

    let report = pipeline.run(&worklist).await?;
    log::info!(
        "Generation run finished: {} added, {} failed",
        report.generated.len(),
        report.failed.len()
    );
    Ok(())
}
