use crate::{
    api::GameboxdApi,
    errors::AppError,
    models::{Comment, MAX_COMMENT_LENGTH, Review, VoteKind, VoteStatus},
    views::guard::FlagGuard,
};

// Per-review state behind the review modal: the viewer's vote and the
// comment thread. Server replies are authoritative for all counters.
#[derive(Debug)]
pub struct ReviewView {
    pub review: Review,
    pub viewer: String,
    pub status: VoteStatus,
    pub comments: Vec<Comment>,
    pub loading_comments: bool,
    voting: bool,
    submitting: bool,
}

impl ReviewView {
    pub fn new(review: Review, viewer: impl Into<String>) -> Self {
        Self {
            review,
            viewer: viewer.into(),
            status: VoteStatus::none(),
            comments: Vec::new(),
            loading_comments: false,
            voting: false,
            submitting: false,
        }
    }

    pub fn is_own_review(&self) -> bool {
        self.review.username == self.viewer
    }

    // Vote controls are only offered on other people's reviews.
    pub fn can_vote(&self) -> bool {
        !self.is_own_review()
    }

    pub fn can_delete_comment(&self, comment: &Comment) -> bool {
        comment.username == self.viewer
    }

    // Joined fetch of vote status and comments; the status request is
    // skipped entirely on the viewer's own review. Either failure aborts
    // the whole group.
    pub async fn load(&mut self, api: &dyn GameboxdApi) -> Result<(), AppError> {
        let review_id = self.review.id.clone();
        let viewer = self.viewer.clone();
        let own_review = self.is_own_review();

        let result = {
            let _loading = FlagGuard::raise(&mut self.loading_comments);

            if own_review {
                api.list_comments(&review_id)
                    .await
                    .map(|comments| (VoteStatus::none(), comments))
            } else {
                tokio::try_join!(
                    api.vote_status(&review_id, &viewer),
                    api.list_comments(&review_id)
                )
            }
        };

        match result {
            Ok((status, comments)) => {
                self.status = status;
                self.comments = comments;
                Ok(())
            }
            Err(err) => {
                tracing::error!("Loading review {review_id} failed: {err}");
                Err(err)
            }
        }
    }

    // Same direction again removes the vote, a different direction switches
    // it, otherwise the vote is cast. No-op while a vote is in flight or on
    // the viewer's own review.
    pub async fn vote(&mut self, api: &dyn GameboxdApi, kind: VoteKind) -> Result<(), AppError> {
        if self.voting || self.is_own_review() {
            return Ok(());
        }

        // The guard clears the flag on every exit, including a dropped call.
        let result = {
            let _voting = FlagGuard::raise(&mut self.voting);

            let removing = self.status.has_voted && self.status.vote_type == Some(kind);
            if removing {
                api.remove_vote(&self.review.id, &self.viewer)
                    .await
                    .map(|counts| (VoteStatus::none(), counts))
            } else {
                api.cast_vote(&self.review.id, &self.viewer, kind)
                    .await
                    .map(|counts| (VoteStatus::cast(kind), counts))
            }
        };

        match result {
            Ok((status, counts)) => {
                self.status = status;
                self.review.upvote_count = counts.upvote_count;
                self.review.downvote_count = counts.downvote_count;
                Ok(())
            }
            Err(err) => {
                tracing::error!("Vote on review {} failed: {err}", self.review.id);
                Err(err)
            }
        }
    }

    // New comments are prepended. Empty input is a no-op; over-length input
    // is rejected before any network call.
    pub async fn add_comment(
        &mut self,
        api: &dyn GameboxdApi,
        text: &str,
    ) -> Result<(), AppError> {
        let text = text.trim();
        if text.is_empty() || self.submitting {
            return Ok(());
        }

        if text.chars().count() > MAX_COMMENT_LENGTH {
            return Err(AppError::InvalidInput(format!(
                "Comments are limited to {MAX_COMMENT_LENGTH} characters"
            )));
        }

        let result = {
            let _submitting = FlagGuard::raise(&mut self.submitting);
            api.add_comment(&self.review.id, &self.viewer, text).await
        };

        match result {
            Ok(comment) => {
                self.comments.insert(0, comment);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Comment on review {} failed: {err}", self.review.id);
                Err(err)
            }
        }
    }

    pub async fn delete_comment(
        &mut self,
        api: &dyn GameboxdApi,
        comment_id: &str,
    ) -> Result<(), AppError> {
        match api
            .delete_comment(&self.review.id, comment_id, &self.viewer)
            .await
        {
            Ok(()) => {
                self.comments.retain(|comment| comment.id != comment_id);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Deleting comment {comment_id} failed: {err}");
                Err(err)
            }
        }
    }
}
