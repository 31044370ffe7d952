use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub game_title: String,
    pub review_text: String,
    pub rating: f64,
    #[serde(default)]
    pub game_image_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    // Counters may be absent on freshly created reviews.
    #[serde(default)]
    pub upvote_count: u32,
    #[serde(default)]
    pub downvote_count: u32,
    #[serde(default)]
    pub comment_count: u32,
}

impl Review {
    pub fn total_votes(&self) -> u64 {
        u64::from(self.upvote_count) + u64::from(self.downvote_count)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub game_title: String,
    pub review_text: String,
    pub rating: f64,
    pub username: String,
    #[serde(default)]
    pub game_image_url: String,
}
