use std::collections::HashSet;

use crate::{
    api::GameboxdApi,
    errors::AppError,
    models::User,
    views::{
        feed::FeedView,
        guard::{FlagGuard, SetGuard},
    },
};

// The viewer's side of the follow graph: who they could follow and who they
// already do. Each toggled target carries its own pending marker so repeat
// clicks mid-flight are ignored.
#[derive(Debug)]
pub struct FollowPanel {
    pub viewer: String,
    pub suggestions: Vec<User>,
    pub following: HashSet<String>,
    pending: HashSet<String>,
    pub loading: bool,
}

impl FollowPanel {
    pub fn new(viewer: impl Into<String>) -> Self {
        Self {
            viewer: viewer.into(),
            suggestions: Vec::new(),
            following: HashSet::new(),
            pending: HashSet::new(),
            loading: false,
        }
    }

    pub async fn load(&mut self, api: &dyn GameboxdApi) -> Result<(), AppError> {
        let viewer = self.viewer.clone();

        let result = {
            let _loading = FlagGuard::raise(&mut self.loading);
            tokio::try_join!(api.list_users(), api.following(&viewer))
        };

        match result {
            Ok((users, following)) => {
                self.suggestions = users
                    .into_iter()
                    .filter(|user| user.username != self.viewer)
                    .collect();
                self.following = following.into_iter().collect();
                Ok(())
            }
            Err(err) => {
                tracing::error!("Loading follow panel failed: {err}");
                Err(err)
            }
        }
    }

    pub fn is_following(&self, username: &str) -> bool {
        self.following.contains(username)
    }

    pub fn is_pending(&self, username: &str) -> bool {
        self.pending.contains(username)
    }

    // Follow if not following, unfollow otherwise; the feed is reloaded
    // after either outcome so it reflects the new graph. On failure the
    // membership set keeps its prior state.
    pub async fn toggle(
        &mut self,
        api: &dyn GameboxdApi,
        feed: &mut FeedView,
        target: &str,
    ) -> Result<(), AppError> {
        if self.pending.contains(target) {
            return Ok(());
        }

        // Dropped on every exit, so an abandoned toggle frees the target.
        let _pending = SetGuard::insert(&mut self.pending, target);

        let result = if self.following.contains(target) {
            api.unfollow(target, &self.viewer)
                .await
                .map(|()| self.following.remove(target))
        } else {
            api.follow(target, &self.viewer)
                .await
                .map(|()| self.following.insert(target.to_owned()))
        };

        match result {
            Ok(_) => feed.load_feed(api, &self.viewer).await,
            Err(err) => {
                tracing::error!("Follow toggle for {target} failed: {err}");
                Err(err)
            }
        }
    }
}
