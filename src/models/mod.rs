pub mod comment;
pub mod game;
pub mod review;
pub mod user;
pub mod vote;

pub use comment::{Comment, MAX_COMMENT_LENGTH};
pub use game::TrendingGame;
pub use review::{NewReview, Review};
pub use user::{NewUser, ProfileUpdate, Role, User};
pub use vote::{VoteCounts, VoteKind, VoteStatus};
