// main.rs - regionshot Entry Point
//
// Takes one screenshot and prints where it ended up: the saved file path
// (macOS/Windows) or the portal's file URI (Linux). Logs go to stderr.

use anyhow::{Context, Result};
use log::info;

use regionshot::{capture, Config};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    info!(
        "regionshot starting (interactive={}, output dir {})",
        config.interactive,
        config.output_dir.display()
    );

    let outcome = match capture(&config) {
        Ok(outcome) => outcome,
        Err(e) => {
            // anyhow prints the error itself on exit
            if e.is_cancellation() {
                info!("Nothing captured");
            }
            return Err(e).context("Screenshot failed");
        }
    };

    println!("{outcome}");
    Ok(())
}
