use std::collections::HashSet;

use crate::{api::GameboxdApi, errors::AppError, models::Review, views::guard::FlagGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    pub total_reviews: usize,
    pub distinct_games: usize,
    pub total_votes: u64,
}

// Holds whichever review list is on screen: the whole site or just the
// accounts the viewer follows. Every load replaces the list wholesale.
#[derive(Debug, Default)]
pub struct FeedView {
    pub reviews: Vec<Review>,
    pub loading: bool,
    pub error: Option<String>,
}

impl FeedView {
    pub async fn load_all(&mut self, api: &dyn GameboxdApi) -> Result<(), AppError> {
        let result = {
            let _loading = FlagGuard::raise(&mut self.loading);
            api.list_reviews().await
        };

        self.apply_load("Failed to load reviews. Please try again.", result)
    }

    pub async fn load_feed(
        &mut self,
        api: &dyn GameboxdApi,
        viewer: &str,
    ) -> Result<(), AppError> {
        let result = {
            let _loading = FlagGuard::raise(&mut self.loading);
            api.feed(viewer).await
        };

        self.apply_load("Failed to load feed. Please try again.", result)
    }

    fn apply_load(
        &mut self,
        banner: &str,
        result: Result<Vec<Review>, AppError>,
    ) -> Result<(), AppError> {
        match result {
            Ok(reviews) => {
                self.reviews = reviews;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                tracing::error!("Feed load failed: {err}");
                self.reviews.clear();
                self.error = Some(banner.into());
                Err(err)
            }
        }
    }

    pub fn stats(&self) -> FeedStats {
        let distinct_games = self
            .reviews
            .iter()
            .map(|review| review.game_title.as_str())
            .collect::<HashSet<_>>()
            .len();

        FeedStats {
            total_reviews: self.reviews.len(),
            distinct_games,
            total_votes: self.reviews.iter().map(Review::total_votes).sum(),
        }
    }

    // Patch in fresh server counters reported by an open review modal.
    pub fn apply_vote_update(&mut self, review_id: &str, upvotes: u32, downvotes: u32) {
        if let Some(review) = self.reviews.iter_mut().find(|r| r.id == review_id) {
            review.upvote_count = upvotes;
            review.downvote_count = downvotes;
        }
    }
}
