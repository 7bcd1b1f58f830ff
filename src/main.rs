//! tintlog - Live Log Filter and Colorizer
//!
//! Reads log lines from standard input or a file and keeps redrawing the
//! filtered, colorized history as lines arrive and the rules file changes.

use anyhow::Result;
use log::info;
use tintlog::options::{command, ViewerOptions};
use tintlog::render::TerminalScreen;
use tintlog::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout belongs to the rendered screen
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = command().get_matches();
    let options = ViewerOptions::from_matches(&matches);

    let app = Application::new(options, Box::new(TerminalScreen::stdout()));

    let shutdown = app.shutdown_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            shutdown.cancel();
        }
    });

    app.run().await?;

    // A pending stdin read parks a blocking thread the runtime would wait on
    std::process::exit(0);
}
