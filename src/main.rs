use anyhow::{Context, Result};

use visafeed::cli::{Command, Flags};
use visafeed::logging::init_logging;
use visafeed::{load_feed, replay, start_app, Config};

#[tokio::main]
async fn main() -> Result<()> {
    //Get Flags
    let flags = Flags::from_args();

    let mut config = Config::load(flags.config.as_deref())
        .context("Failed to load configuration")?;
    flags.apply_to(&mut config);

    let log_path = init_logging(config.log_path.as_deref())
        .context("Failed to set up logging")?;
    log::info!("logging to {:?}", log_path);

    match flags.command() {
        Command::Feed => {
            start_app(config).await.context("Feed screen failed")?;
        }
        Command::Seed => {
            let feed = load_feed(&config)?;
            println!("{}", serde_json::to_string_pretty(feed.store().posts())?);
        }
        Command::Replay => {
            let feed = load_feed(&config)?;
            let feed = replay(feed, &flags.actions).context("Replay stopped")?;
            println!("{}", serde_json::to_string_pretty(&feed)?);
        }
    }
    Ok(())
}
