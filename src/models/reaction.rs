//! Reaction engine.
//!
//! Every viewer gesture becomes an [`Action`] that [`reduce`] turns into the
//! next [`FeedState`]. The input state is never touched, so a rejected action
//! leaves the caller with exactly what it had.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FeedError, NotFoundError};
use crate::models::post::PostId;
use crate::models::store::{LikeDelta, PostStore, VoteDelta};

/// A vote the viewer can request on an AI answer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Helpful,
    Unhelpful,
}

/// The viewer's current standing on one AI answer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AiVote {
    #[default]
    None,
    Helpful,
    Unhelpful,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteTransition {
    pub next: AiVote,
    pub delta: VoteDelta,
}

impl AiVote {
    pub const fn transition(self, requested: VoteChoice) -> VoteTransition {
        let (next, helpful, unhelpful) = match (self, requested) {
            (AiVote::None, VoteChoice::Helpful) => (AiVote::Helpful, 1, 0),
            (AiVote::None, VoteChoice::Unhelpful) => (AiVote::Unhelpful, 0, 1),
            (AiVote::Helpful, VoteChoice::Helpful) => (AiVote::None, -1, 0),
            (AiVote::Helpful, VoteChoice::Unhelpful) => (AiVote::Unhelpful, -1, 1),
            (AiVote::Unhelpful, VoteChoice::Unhelpful) => (AiVote::None, 0, -1),
            (AiVote::Unhelpful, VoteChoice::Helpful) => (AiVote::Helpful, 1, -1),
        };
        VoteTransition {
            next,
            delta: VoteDelta { helpful, unhelpful },
        }
    }
}

/// What one viewer has liked and voted during the session.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewerReactions {
    liked: BTreeSet<PostId>,
    // Only helpful/unhelpful are stored; absence means `AiVote::None`.
    ai_votes: BTreeMap<PostId, AiVote>,
}

impl ViewerReactions {
    pub fn is_liked(&self, post_id: PostId) -> bool {
        self.liked.contains(&post_id)
    }

    pub fn liked(&self) -> &BTreeSet<PostId> {
        &self.liked
    }

    pub fn vote_for(&self, post_id: PostId) -> AiVote {
        self.ai_votes.get(&post_id).copied().unwrap_or_default()
    }

    fn set_vote(&mut self, post_id: PostId, vote: AiVote) {
        match vote {
            AiVote::None => {
                self.ai_votes.remove(&post_id);
            }
            vote => {
                self.ai_votes.insert(post_id, vote);
            }
        }
    }
}

/// Store plus viewer reactions. Read through the accessors; only the
/// reaction engine produces new values.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FeedState {
    store: PostStore,
    viewer: ViewerReactions,
}

impl FeedState {
    pub fn new(store: PostStore) -> Self {
        FeedState {
            store,
            viewer: ViewerReactions::default(),
        }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn viewer(&self) -> &ViewerReactions {
        &self.viewer
    }

    /// Replaces `self` with the reduced state, or leaves it untouched on error.
    pub fn dispatch(&mut self, action: Action) -> Result<(), NotFoundError> {
        *self = reduce(self, action)?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ToggleLike(PostId),
    CastAiVote(PostId, VoteChoice),
}

impl Action {
    pub fn post_id(&self) -> PostId {
        match *self {
            Action::ToggleLike(id) | Action::CastAiVote(id, _) => id,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ToggleLike(id) => write!(f, "like:{}", id),
            Action::CastAiVote(id, VoteChoice::Helpful) => write!(f, "helpful:{}", id),
            Action::CastAiVote(id, VoteChoice::Unhelpful) => write!(f, "unhelpful:{}", id),
        }
    }
}

impl FromStr for Action {
    type Err = FeedError;

    /// Parses `like:<id>`, `helpful:<id>` or `unhelpful:<id>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| FeedError::InvalidAction(s.to_string()))?;
        let id: PostId = id
            .trim()
            .parse()
            .map_err(|_| FeedError::InvalidAction(s.to_string()))?;
        match kind.trim() {
            "like" => Ok(Action::ToggleLike(id)),
            "helpful" => Ok(Action::CastAiVote(id, VoteChoice::Helpful)),
            "unhelpful" => Ok(Action::CastAiVote(id, VoteChoice::Unhelpful)),
            _ => Err(FeedError::InvalidAction(s.to_string())),
        }
    }
}

pub fn reduce(state: &FeedState, action: Action) -> Result<FeedState, NotFoundError> {
    match action {
        Action::ToggleLike(id) => toggle_like(state, id),
        Action::CastAiVote(id, vote) => cast_ai_vote(state, id, vote),
    }
}

pub fn toggle_like(state: &FeedState, post_id: PostId) -> Result<FeedState, NotFoundError> {
    state.store.get(post_id)?;

    let mut next = state.clone();
    let delta = if next.viewer.liked.remove(&post_id) {
        LikeDelta::Decrement
    } else {
        next.viewer.liked.insert(post_id);
        LikeDelta::Increment
    };
    next.store.apply_like_delta(post_id, delta)?;

    log::debug!("post {} like {:?}", post_id, delta);
    Ok(next)
}

pub fn cast_ai_vote(state: &FeedState, post_id: PostId, requested: VoteChoice) -> Result<FeedState, NotFoundError> {
    state.store.get(post_id)?;

    let current = state.viewer.vote_for(post_id);
    let transition = current.transition(requested);

    let mut next = state.clone();
    next.viewer.set_vote(post_id, transition.next);
    next.store.apply_vote_delta(post_id, transition.delta)?;

    log::debug!("post {} ai vote {:?} -> {:?}", post_id, current, transition.next);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::post::builtin_seed;

    fn seeded() -> FeedState {
        FeedState::new(PostStore::seeded(builtin_seed()).unwrap())
    }

    #[test]
    fn like_toggles_on_then_off() {
        let state = seeded();

        let liked = toggle_like(&state, 1).unwrap();
        assert_eq!(liked.store().get(1).unwrap().like_count, 46);
        assert!(liked.viewer().is_liked(1));
        assert_eq!(liked.viewer().liked().len(), 1);

        let unliked = toggle_like(&liked, 1).unwrap();
        assert_eq!(unliked.store().get(1).unwrap().like_count, 45);
        assert!(unliked.viewer().liked().is_empty());
        assert_eq!(unliked, state);
    }

    #[test]
    fn vote_cast_switch_and_retract() {
        let state = seeded();

        let helpful = cast_ai_vote(&state, 1, VoteChoice::Helpful).unwrap();
        let post = helpful.store().get(1).unwrap();
        assert_eq!((post.ai_helpful_count, post.ai_unhelpful_count), (128, 8));
        assert_eq!(helpful.viewer().vote_for(1), AiVote::Helpful);

        let switched = cast_ai_vote(&helpful, 1, VoteChoice::Unhelpful).unwrap();
        let post = switched.store().get(1).unwrap();
        assert_eq!((post.ai_helpful_count, post.ai_unhelpful_count), (127, 9));
        assert_eq!(switched.viewer().vote_for(1), AiVote::Unhelpful);

        let retracted = cast_ai_vote(&switched, 1, VoteChoice::Unhelpful).unwrap();
        let post = retracted.store().get(1).unwrap();
        assert_eq!((post.ai_helpful_count, post.ai_unhelpful_count), (127, 8));
        assert_eq!(retracted.viewer().vote_for(1), AiVote::None);
        assert_eq!(retracted, state);
    }

    #[test]
    fn transition_table_is_exhaustive() {
        use AiVote as V;
        use VoteChoice as C;
        let cases = [
            (V::None, C::Helpful, V::Helpful, 1, 0),
            (V::None, C::Unhelpful, V::Unhelpful, 0, 1),
            (V::Helpful, C::Helpful, V::None, -1, 0),
            (V::Helpful, C::Unhelpful, V::Unhelpful, -1, 1),
            (V::Unhelpful, C::Unhelpful, V::None, 0, -1),
            (V::Unhelpful, C::Helpful, V::Helpful, 1, -1),
        ];
        for (from, requested, to, helpful, unhelpful) in cases {
            let t = from.transition(requested);
            assert_eq!(t.next, to, "{:?} + {:?}", from, requested);
            assert_eq!(t.delta, VoteDelta { helpful, unhelpful });
        }
    }

    #[test]
    fn unknown_post_leaves_state_alone() {
        let mut state = seeded();
        let before = state.clone();

        assert_eq!(state.dispatch(Action::ToggleLike(9999)), Err(NotFoundError(9999)));
        assert_eq!(
            state.dispatch(Action::CastAiVote(9999, VoteChoice::Helpful)),
            Err(NotFoundError(9999))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn votes_on_different_posts_are_independent() {
        let mut state = seeded();
        state.dispatch(Action::CastAiVote(1, VoteChoice::Helpful)).unwrap();
        state.dispatch(Action::CastAiVote(2, VoteChoice::Unhelpful)).unwrap();

        assert_eq!(state.viewer().vote_for(1), AiVote::Helpful);
        assert_eq!(state.viewer().vote_for(2), AiVote::Unhelpful);
        assert_eq!(state.viewer().vote_for(3), AiVote::None);
        assert_eq!(state.store().get(2).unwrap().ai_unhelpful_count, 13);
    }

    #[test]
    fn parses_replay_actions() {
        assert_eq!("like:1".parse::<Action>().unwrap(), Action::ToggleLike(1));
        assert_eq!(
            "helpful:2".parse::<Action>().unwrap(),
            Action::CastAiVote(2, VoteChoice::Helpful)
        );
        assert_eq!(
            "unhelpful: 3".parse::<Action>().unwrap(),
            Action::CastAiVote(3, VoteChoice::Unhelpful)
        );
        assert!(matches!("share:1".parse::<Action>(), Err(FeedError::InvalidAction(_))));
        assert!(matches!("like".parse::<Action>(), Err(FeedError::InvalidAction(_))));
        assert!(matches!("like:x".parse::<Action>(), Err(FeedError::InvalidAction(_))));
        assert_eq!(Action::CastAiVote(7, VoteChoice::Unhelpful).to_string(), "unhelpful:7");
    }
}
