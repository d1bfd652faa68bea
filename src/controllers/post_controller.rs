use crate::error::FeedError;
use crate::models::{Action, Config, FeedState, PostStore};

/// Seeds a fresh feed from the configured source.
pub fn load_feed(config: &Config) -> Result<FeedState, FeedError> {
    let posts = config.seed()?;
    let store = PostStore::seeded(posts)?;
    Ok(FeedState::new(store))
}

/// Runs textual actions through the reaction engine, stopping at the first failure.
pub fn replay<S: AsRef<str>>(mut state: FeedState, actions: &[S]) -> Result<FeedState, FeedError> {
    for raw in actions {
        let action: Action = raw.as_ref().parse()?;
        state.dispatch(action)?;
        log::info!("replayed {}", action);
    }
    Ok(state)
}
