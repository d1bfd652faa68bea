pub mod post;
pub mod store;
pub mod reaction;
pub mod reveal;
pub mod gate;
pub mod config;

// Re-export important structs for convenience
pub use post::{Post, PostId};
pub use store::PostStore;
pub use reaction::{Action, AiVote, FeedState, ViewerReactions, VoteChoice};
pub use reveal::{RevealEvent, RevealHandle, RevealScheduler, RevealState, RevealTiming};
pub use gate::Feature;
pub use config::Config;
