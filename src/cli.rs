use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Command {
    Feed,
    Seed,
    Replay,
}

#[derive(Parser, Debug, Default)]
#[command(about = concat!(env!("CARGO_CRATE_NAME"), " - immigration Q&A feed"))]
pub struct Flags {
    /// what to run, defaults to the feed screen
    pub command: Option<Command>,

    /// actions for `replay`: like:<id>, helpful:<id>, unhelpful:<id>
    pub actions: Vec<String>,

    /// config file to read instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON seed file to load instead of the built-in posts
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// delay before the feed stops loading
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// delay between consecutive posts appearing
    #[arg(long)]
    pub stagger_ms: Option<u64>,
}

impl Flags {
    /// Parse from `std::env::args_os()`, [exit][clap::Error::exit] on error.
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Feed)
    }

    pub fn apply_to(&self, config: &mut crate::models::Config) {
        if let Some(seed) = &self.seed {
            config.seed_path = Some(seed.clone());
        }
        if let Some(delay) = self.delay_ms {
            config.initial_delay_ms = delay;
        }
        if let Some(stagger) = self.stagger_ms {
            config.stagger_ms = stagger;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Config;

    #[test]
    fn defaults_to_feed() {
        let flags = Flags::try_parse_from(["visafeed"]).unwrap();
        assert_eq!(flags.command(), Command::Feed);
        assert!(flags.actions.is_empty());
    }

    #[test]
    fn replay_collects_actions() {
        let flags = Flags::try_parse_from(["visafeed", "replay", "like:1", "helpful:1"]).unwrap();
        assert_eq!(flags.command(), Command::Replay);
        assert_eq!(flags.actions, vec!["like:1", "helpful:1"]);
    }

    #[test]
    fn flags_override_config() {
        let flags = Flags::try_parse_from(["visafeed", "--delay-ms", "10", "--stagger-ms", "5"]).unwrap();
        let mut config = Config::default();
        flags.apply_to(&mut config);
        assert_eq!(config.initial_delay_ms, 10);
        assert_eq!(config.stagger_ms, 5);
        assert_eq!(config.seed_path, None);
    }
}
