use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::FeedError;

pub type PostId = u32;

/// One question paired with its AI answer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub author: String,
    pub avatar_url: String,
    pub question: String,
    pub posted_at: NaiveDateTime,
    pub views: String,
    pub like_count: u32,
    pub comment_count: u32,
    pub share_count: u32,
    pub ai_response: String,
    pub ai_helpful_count: u32,
    pub ai_unhelpful_count: u32,
}

impl Post {
    pub fn datetime(&self) -> String {
        self.posted_at.format("%I:%M %p, %d %b, %Y").to_string()
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, 0))
        .unwrap_or_default()
}

/// The posts shown on a fresh screen.
pub fn builtin_seed() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            author: "Maria Rodriguez".to_string(),
            avatar_url: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=60&h=60&fit=crop&crop=face".to_string(),
            question: "How long does it typically take to get a work visa approved for the US? I'm a software engineer from Brazil and my company wants to sponsor me.".to_string(),
            posted_at: at(2025, 5, 15, 9, 15),
            views: "8.2k views".to_string(),
            like_count: 45,
            comment_count: 12,
            share_count: 8,
            ai_response: "For software engineers from Brazil, H-1B work visa processing typically takes 3-6 months for regular processing, or 1-15 days for premium processing (additional $2,805 fee). Your employer must first file the petition, and approval depends on the annual cap and your qualifications.".to_string(),
            ai_helpful_count: 127,
            ai_unhelpful_count: 8,
        },
        Post {
            id: 2,
            author: "Ahmed Hassan".to_string(),
            avatar_url: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face".to_string(),
            question: "Can I bring my spouse and children when immigrating to Canada through Express Entry? What documents do I need for them?".to_string(),
            posted_at: at(2025, 5, 14, 11, 30),
            views: "12.5k views".to_string(),
            like_count: 78,
            comment_count: 23,
            share_count: 15,
            ai_response: "Yes, you can include your spouse and dependent children in your Express Entry application. Required documents include: marriage certificate, birth certificates for children, medical exams, police clearances, and proof of language proficiency for your spouse if claiming points.".to_string(),
            ai_helpful_count: 203,
            ai_unhelpful_count: 12,
        },
        Post {
            id: 3,
            author: "Priya Sharma".to_string(),
            avatar_url: "https://images.unsplash.com/photo-1494790108755-2616b612b142?w=150&h=150&fit=crop&crop=face".to_string(),
            question: "What's the difference between EB-1, EB-2, and EB-3 green cards? Which one should I apply for as a research scientist?".to_string(),
            posted_at: at(2025, 5, 13, 14, 45),
            views: "15.7k views".to_string(),
            like_count: 92,
            comment_count: 31,
            share_count: 22,
            ai_response: "As a research scientist, you may qualify for EB-1A (extraordinary ability) if you have significant achievements, EB-1B (outstanding researcher) if backed by an employer, or EB-2 with advanced degree. EB-1 has no country caps and faster processing, while EB-2 may require PERM labor certification.".to_string(),
            ai_helpful_count: 284,
            ai_unhelpful_count: 15,
        },
    ]
}

/// Reads a seed from a JSON array of posts. The file is never written back.
pub fn load_seed(path: &Path) -> Result<Vec<Post>, FeedError> {
    let data = fs::read_to_string(path)
        .map_err(|e| FeedError::Io(format!("Failed to read seed file {:?}: {}", path, e)))?;
    let posts: Vec<Post> = serde_json::from_str(&data)?;
    ensure_unique_ids(&posts)?;
    log::info!("loaded {} posts from {:?}", posts.len(), path);
    Ok(posts)
}

pub(crate) fn ensure_unique_ids(posts: &[Post]) -> Result<(), FeedError> {
    let mut seen = HashSet::new();
    for post in posts {
        if !seen.insert(post.id) {
            return Err(FeedError::DuplicatePost(post.id));
        }
    }
    Ok(())
}
