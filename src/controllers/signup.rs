use std::time::{Duration, Instant};

use crate::models::Feature;

pub const DISMISS_AFTER: Duration = Duration::from_millis(2500);

/// "Coming soon" modal shown for any gated feature. The address is only logged.
#[derive(Debug, Clone)]
pub struct SignupModal {
    pub feature: Feature,
    pub email: String,
    submitted_at: Option<Instant>,
}

impl SignupModal {
    pub fn open(feature: Feature) -> Self {
        log::info!("{:?} is not yet available, showing signup", feature);
        SignupModal {
            feature,
            email: String::new(),
            submitted_at: None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    pub fn push_char(&mut self, c: char) {
        if !self.is_submitted() {
            self.email.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if !self.is_submitted() {
            self.email.pop();
        }
    }

    /// Accepts the address when it is non-empty and has an `@`; otherwise does nothing.
    pub fn submit(&mut self, now: Instant) -> bool {
        let email = self.email.trim();
        if self.is_submitted() || email.is_empty() || !email.contains('@') {
            return false;
        }
        log::info!("signup for {:?}: {}", self.feature, email);
        self.submitted_at = Some(now);
        true
    }

    pub fn should_close(&self, now: Instant) -> bool {
        self.submitted_at
            .map_or(false, |at| now.saturating_duration_since(at) >= DISMISS_AFTER)
    }
}
