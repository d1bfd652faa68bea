use std::time::Instant;

use crossterm::event::KeyCode;
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::controllers::signup::SignupModal;
use crate::error::NotFoundError;
use crate::models::{
    Action, FeedState, Feature, PostId, RevealEvent, RevealHandle, RevealScheduler,
    RevealState, RevealTiming, VoteChoice,
};
use crate::views::StatefulList;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One mounted feed screen: the feed state, its reveal schedule and the
/// presentation bits around them. Dropping it cancels pending reveals.
pub struct FeedScreen {
    feed: FeedState,
    reveal: RevealState,
    pub list: StatefulList<PostId>,
    pub modal: Option<SignupModal>,
    reveal_rx: mpsc::UnboundedReceiver<RevealEvent>,
    reveal_handle: RevealHandle,
}

impl FeedScreen {
    /// Must be called inside a tokio runtime.
    pub fn mount(feed: FeedState, timing: RevealTiming) -> Self {
        let (reveal_handle, reveal_rx) = RevealScheduler::mount(timing, feed.store().ids());
        log::info!("feed mounted with {} posts", feed.store().len());
        FeedScreen {
            feed,
            reveal: RevealState::new(),
            list: StatefulList::with_items(Vec::new()),
            modal: None,
            reveal_rx,
            reveal_handle,
        }
    }

    pub fn feed(&self) -> &FeedState {
        &self.feed
    }

    pub fn reveal(&self) -> &RevealState {
        &self.reveal
    }

    fn apply_reveal(&mut self, event: RevealEvent) {
        let was_visible = match event {
            RevealEvent::Revealed(id) => self.reveal.is_visible(id),
            RevealEvent::Loaded => false,
        };
        self.reveal.apply(event);
        if let RevealEvent::Revealed(id) = event {
            if !was_visible && self.reveal.is_visible(id) {
                self.list.add_items(vec![id]);
            }
        }
    }

    /// Folds every reveal event that has already fired. Returns whether anything changed.
    pub fn pump_reveal(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.reveal_rx.try_recv() {
                Ok(event) => {
                    self.apply_reveal(event);
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    /// Awaits the next reveal event; `None` once the schedule is done or cancelled.
    pub async fn next_reveal(&mut self) -> Option<RevealEvent> {
        let event = self.reveal_rx.recv().await?;
        self.apply_reveal(event);
        Some(event)
    }

    /// Dispatches a viewer action. Posts that are not revealed yet ignore gestures.
    pub fn react(&mut self, action: Action) -> Result<bool, NotFoundError> {
        let post_id = action.post_id();
        self.feed.store().get(post_id)?;
        if !self.reveal.is_visible(post_id) {
            log::debug!("ignoring {} on hidden post", action);
            return Ok(false);
        }
        self.feed.dispatch(action)?;
        Ok(true)
    }

    pub fn open_gated(&mut self, feature: Feature) {
        if !feature.is_available() {
            self.modal = Some(SignupModal::open(feature));
        }
    }

    /// Closes a confirmed signup once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.modal.as_ref().map_or(false, |m| m.should_close(now)) {
            self.modal = None;
        }
    }

    pub fn unmount(&mut self) {
        self.reveal_handle.cancel();
    }

    pub fn reveal_pending(&self) -> bool {
        self.reveal_handle.is_active()
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) -> Flow {
        if code == KeyCode::Esc && self.modal.is_some() {
            self.modal = None;
            return Flow::Continue;
        }
        if let Some(modal) = self.modal.as_mut() {
            match code {
                KeyCode::Enter => {
                    modal.submit(now);
                }
                KeyCode::Backspace => modal.pop_char(),
                KeyCode::Char(c) => modal.push_char(c),
                _ => {}
            }
            return Flow::Continue;
        }

        let selected = self.list.selected();
        let action = match code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Down | KeyCode::Char('j') => {
                self.list.next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.previous();
                None
            }
            KeyCode::Char('l') => selected.map(Action::ToggleLike),
            KeyCode::Char('y') => selected.map(|id| Action::CastAiVote(id, VoteChoice::Helpful)),
            KeyCode::Char('n') => selected.map(|id| Action::CastAiVote(id, VoteChoice::Unhelpful)),
            KeyCode::Char(c) => {
                if let Some(feature) = gated_key(c) {
                    self.open_gated(feature);
                }
                None
            }
            _ => None,
        };

        if let Some(action) = action {
            if let Err(e) = self.react(action) {
                log::error!("{} rejected: {}", action, e);
            }
        }
        Flow::Continue
    }
}

impl Drop for FeedScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn gated_key(c: char) -> Option<Feature> {
    match c {
        '/' => Some(Feature::Search),
        'b' => Some(Feature::Notifications),
        'm' => Some(Feature::Menu),
        'c' => Some(Feature::Compose),
        'p' => Some(Feature::Profile),
        'g' => Some(Feature::Groups),
        's' => Some(Feature::Shortcuts),
        'v' => Some(Feature::Navigation),
        _ => None,
    }
}
