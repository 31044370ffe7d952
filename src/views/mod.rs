pub mod admin;
pub mod compose;
pub mod feed;
pub mod follow;
mod guard;
pub mod home;
pub mod profile;
pub mod review;

pub use admin::{AdminPanel, AdminStats};
pub use compose::ReviewComposer;
pub use feed::{FeedStats, FeedView};
pub use follow::FollowPanel;
pub use home::HomeView;
pub use profile::ProfileView;
pub use review::ReviewView;
