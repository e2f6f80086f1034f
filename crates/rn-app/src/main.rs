//! Remote navigation shell: replays a recorded session against a console host

use anyhow::{Context, Result};
use clap::Parser;
use rn_core::ControllerConfig;
use tracing::info;

mod cli;
mod session;
mod shell;

use cli::CliOptions;
use session::SessionScript;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let options = CliOptions::parse();

    let config = match &options.config {
        Some(path) => ControllerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ControllerConfig::default(),
    };

    if options.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let Some(path) = options.session.as_deref() else {
        anyhow::bail!("a session script is required");
    };

    info!(session = %path.display(), force_tv = options.force_tv, "replaying session");
    let script = SessionScript::from_file(path)?;
    let summary = session::replay(&script, &config, options.force_tv)?;

    info!(
        mode = ?summary.mode,
        focused = ?summary.focused,
        history_depth = summary.history_depth,
        exited = summary.exited,
        events = summary.events,
        handled = summary.handled,
        "session finished"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
