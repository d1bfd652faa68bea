pub mod app_controller;
pub mod post_controller;
pub mod screen;
pub mod signup;

// Re-export key functions
pub use app_controller::start_app;
pub use post_controller::{load_feed, replay};
pub use screen::{FeedScreen, Flow};
pub use signup::SignupModal;
