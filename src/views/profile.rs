use crate::{
    api::GameboxdApi,
    errors::AppError,
    models::{Review, User},
    views::guard::FlagGuard,
};

// State behind a user's public profile page, including the viewer's follow
// button for that user.
#[derive(Debug)]
pub struct ProfileView {
    pub viewer: String,
    pub username: String,
    pub profile: Option<User>,
    pub reviews: Vec<Review>,
    pub followers: Vec<String>,
    pub following: Vec<String>,
    pub is_following: bool,
    follow_pending: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProfileView {
    pub fn new(username: impl Into<String>, viewer: impl Into<String>) -> Self {
        Self {
            viewer: viewer.into(),
            username: username.into(),
            profile: None,
            reviews: Vec::new(),
            followers: Vec::new(),
            following: Vec::new(),
            is_following: false,
            follow_pending: false,
            loading: false,
            error: None,
        }
    }

    pub fn is_own_profile(&self) -> bool {
        self.username == self.viewer
    }

    pub async fn load(&mut self, api: &dyn GameboxdApi) -> Result<(), AppError> {
        let username = self.username.clone();
        let viewer = self.viewer.clone();

        self.error = None;

        let result = {
            let _loading = FlagGuard::raise(&mut self.loading);
            tokio::try_join!(
                api.get_profile(&username),
                api.user_reviews(&username),
                api.followers(&username),
                api.following(&username),
                api.following(&viewer)
            )
        };

        match result {
            Ok((profile, reviews, followers, following, viewer_following)) => {
                self.profile = Some(profile);
                self.reviews = reviews;
                self.followers = followers;
                self.following = following;
                self.is_following = viewer_following.contains(&self.username);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Loading profile {username} failed: {err}");
                self.error = Some("User not found".into());
                Err(err)
            }
        }
    }

    pub fn follow_pending(&self) -> bool {
        self.follow_pending
    }

    pub async fn toggle_follow(&mut self, api: &dyn GameboxdApi) -> Result<(), AppError> {
        if self.follow_pending {
            return Ok(());
        }

        let result = {
            let _pending = FlagGuard::raise(&mut self.follow_pending);

            if self.is_following {
                api.unfollow(&self.username, &self.viewer).await
            } else {
                api.follow(&self.username, &self.viewer).await
            }
        };

        match result {
            Ok(()) => {
                if self.is_following {
                    self.followers.retain(|name| name != &self.viewer);
                    self.is_following = false;
                } else {
                    self.followers.push(self.viewer.clone());
                    self.is_following = true;
                }
                Ok(())
            }
            Err(err) => {
                tracing::error!("Follow toggle for {} failed: {err}", self.username);
                Err(err)
            }
        }
    }

    pub fn apply_vote_update(&mut self, review_id: &str, upvotes: u32, downvotes: u32) {
        if let Some(review) = self.reviews.iter_mut().find(|r| r.id == review_id) {
            review.upvote_count = upvotes;
            review.downvote_count = downvotes;
        }
    }
}
