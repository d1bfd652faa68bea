//! Load-then-stagger reveal of the feed.
//!
//! [`RevealScheduler::mount`] spawns one timer task per screen. The task never
//! touches screen state; it sends [`RevealEvent`]s that the screen's own loop
//! folds into its [`RevealState`]. Dropping the returned [`RevealHandle`]
//! aborts whatever is still pending.

use std::collections::BTreeSet;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{sleep_until, Instant};

use crate::models::post::PostId;

pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTiming {
    pub initial_delay: Duration,
    pub stagger: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        RevealTiming {
            initial_delay: DEFAULT_INITIAL_DELAY,
            stagger: DEFAULT_STAGGER,
        }
    }
}

impl RevealTiming {
    /// Offset from mount at which the last post becomes visible.
    pub fn completes_after(&self, post_count: usize) -> Duration {
        let steps = post_count.saturating_sub(1) as u32;
        self.initial_delay + self.stagger * steps
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealEvent {
    Loaded,
    Revealed(PostId),
}

/// Every event of one mount with its offset from the mount instant, in firing order.
pub fn plan(timing: RevealTiming, post_ids: &[PostId]) -> Vec<(Duration, RevealEvent)> {
    let mut events = Vec::with_capacity(post_ids.len() + 1);
    events.push((timing.initial_delay, RevealEvent::Loaded));
    for (index, id) in post_ids.iter().enumerate() {
        let offset = timing.initial_delay + timing.stagger * index as u32;
        events.push((offset, RevealEvent::Revealed(*id)));
    }
    events
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealState {
    is_loading: bool,
    visible: BTreeSet<PostId>,
}

impl Default for RevealState {
    fn default() -> Self {
        RevealState {
            is_loading: true,
            visible: BTreeSet::new(),
        }
    }
}

impl RevealState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_visible(&self, post_id: PostId) -> bool {
        self.visible.contains(&post_id)
    }

    pub fn visible(&self) -> &BTreeSet<PostId> {
        &self.visible
    }

    pub fn is_complete(&self, post_ids: &[PostId]) -> bool {
        !self.is_loading && post_ids.iter().all(|id| self.visible.contains(id))
    }

    /// Loading only ever ends and the visible set only ever grows.
    pub fn apply(&mut self, event: RevealEvent) {
        match event {
            RevealEvent::Loaded => self.is_loading = false,
            RevealEvent::Revealed(id) => {
                if self.is_loading {
                    log::warn!("post {} revealed before loading finished, ignoring", id);
                    return;
                }
                self.visible.insert(id);
            }
        }
    }
}

pub struct RevealScheduler;

impl RevealScheduler {
    /// Starts the one-shot schedule for a screen. Must be called inside a tokio runtime.
    pub fn mount(timing: RevealTiming, post_ids: Vec<PostId>) -> (RevealHandle, mpsc::UnboundedReceiver<RevealEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let events = plan(timing, &post_ids);
        let start = Instant::now();

        log::debug!("reveal scheduled for {} posts", post_ids.len());
        let task = tokio::spawn(async move {
            for (offset, event) in events {
                sleep_until(start + offset).await;
                if tx.send(event).is_err() {
                    // Screen is gone.
                    break;
                }
            }
        });

        (RevealHandle { task: Some(task) }, rx)
    }
}

/// Owns the pending reveal timers of one mounted screen.
#[derive(Debug)]
pub struct RevealHandle {
    task: Option<JoinHandle<()>>,
}

impl RevealHandle {
    /// Aborts pending timers. Safe to call after completion or more than once.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                log::debug!("cancelling pending reveal timers");
            }
            task.abort();
        }
    }

    pub(crate) fn abort_handle(&self) -> Option<AbortHandle> {
        self.task.as_ref().map(|t| t.abort_handle())
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().map_or(false, |t| !t.is_finished())
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
