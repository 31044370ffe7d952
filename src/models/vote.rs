use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Upvote,
    Downvote,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStatus {
    pub has_voted: bool,
    #[serde(default)]
    pub vote_type: Option<VoteKind>,
}

impl VoteStatus {
    pub fn cast(kind: VoteKind) -> Self {
        Self {
            has_voted: true,
            vote_type: Some(kind),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

// Authoritative counters returned by every vote mutation; these replace
// whatever the client was showing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteCounts {
    pub upvote_count: u32,
    pub downvote_count: u32,
}
