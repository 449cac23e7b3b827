use clap::Parser;
use hand_gesture_detector::cli::{self, Cli, Command};
use hand_gesture_detector::config::Settings;
use hand_gesture_detector::error::AppError;
use tracing::Level;

fn init_logging(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Cli::parse();
    let settings = Settings::load(&args.config)?;
    init_logging(settings.log_level()?);
    tracing::debug!("Loaded settings: {:?}", settings);

    cli::execute(args.command.unwrap_or(Command::Gui), settings).await
}
