pub mod models;
pub mod views;
pub mod controllers;
pub mod cli;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use models::{Action, AiVote, Config, FeedState, Post, PostId, PostStore, VoteChoice};
pub use models::reaction::{cast_ai_vote, reduce, toggle_like};
pub use controllers::{start_app, load_feed, replay};
pub use error::{FeedError, NotFoundError};
