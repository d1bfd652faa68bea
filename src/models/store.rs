use serde::Serialize;

use crate::error::{FeedError, NotFoundError};
use crate::models::post::{ensure_unique_ids, Post, PostId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeDelta {
    Decrement,
    Increment,
}

impl LikeDelta {
    pub fn as_i32(self) -> i32 {
        match self {
            LikeDelta::Decrement => -1,
            LikeDelta::Increment => 1,
        }
    }
}

/// Change to the AI answer tallies of one post. Each side is -1, 0 or +1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoteDelta {
    pub helpful: i32,
    pub unhelpful: i32,
}

/// Ordered, fixed collection of posts holding the authoritative counters.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    pub fn seeded(posts: Vec<Post>) -> Result<Self, FeedError> {
        ensure_unique_ids(&posts)?;
        Ok(PostStore { posts })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn ids(&self) -> Vec<PostId> {
        self.posts.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn contains(&self, post_id: PostId) -> bool {
        self.posts.iter().any(|p| p.id == post_id)
    }

    pub fn get(&self, post_id: PostId) -> Result<&Post, NotFoundError> {
        self.posts
            .iter()
            .find(|p| p.id == post_id)
            .ok_or(NotFoundError(post_id))
    }

    fn get_mut(&mut self, post_id: PostId) -> Result<&mut Post, NotFoundError> {
        self.posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(NotFoundError(post_id))
    }

    pub(crate) fn apply_like_delta(&mut self, post_id: PostId, delta: LikeDelta) -> Result<(), NotFoundError> {
        let post = self.get_mut(post_id)?;
        post.like_count = apply_counter(post.like_count, delta.as_i32());
        Ok(())
    }

    pub(crate) fn apply_vote_delta(&mut self, post_id: PostId, delta: VoteDelta) -> Result<(), NotFoundError> {
        let post = self.get_mut(post_id)?;
        post.ai_helpful_count = apply_counter(post.ai_helpful_count, delta.helpful);
        post.ai_unhelpful_count = apply_counter(post.ai_unhelpful_count, delta.unhelpful);
        Ok(())
    }
}

// Unreachable through the engine's contracts; saturate rather than wrap if it ever happens.
fn apply_counter(count: u32, delta: i32) -> u32 {
    match count.checked_add_signed(delta) {
        Some(next) => next,
        None => {
            log::error!("counter {} cannot take delta {}, saturating", count, delta);
            count.saturating_add_signed(delta)
        }
    }
}
