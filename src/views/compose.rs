use crate::{
    api::GameboxdApi,
    errors::AppError,
    models::{NewReview, Review},
    views::guard::FlagGuard,
};

const MIN_REVIEW_LENGTH: usize = 10;

// Review editor state: a draft plus the viewer's existing reviews. The
// draft is validated before anything touches the network.
#[derive(Debug)]
pub struct ReviewComposer {
    pub viewer: String,
    pub game_title: String,
    pub rating: f64,
    pub review_text: String,
    pub image: Option<(String, Vec<u8>)>,
    pub my_reviews: Vec<Review>,
    submitting: bool,
}

impl ReviewComposer {
    pub fn new(viewer: impl Into<String>) -> Self {
        Self {
            viewer: viewer.into(),
            game_title: String::new(),
            rating: 0.0,
            review_text: String::new(),
            image: None,
            my_reviews: Vec::new(),
            submitting: false,
        }
    }

    pub async fn load_my_reviews(&mut self, api: &dyn GameboxdApi) -> Result<(), AppError> {
        match api.user_reviews(&self.viewer).await {
            Ok(reviews) => {
                self.my_reviews = reviews;
                Ok(())
            }
            Err(err) => {
                tracing::error!("Loading own reviews failed: {err}");
                Err(err)
            }
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.game_title.trim().is_empty() {
            return Err(AppError::InvalidInput("Please enter a game name".into()));
        }
        if self.rating == 0.0 {
            return Err(AppError::InvalidInput("Please give a rating".into()));
        }
        if self.review_text.trim().chars().count() < MIN_REVIEW_LENGTH {
            return Err(AppError::InvalidInput(format!(
                "Review must be at least {MIN_REVIEW_LENGTH} characters"
            )));
        }
        Ok(())
    }

    // Uploads the attached image first (if any), then posts the review and
    // refreshes the viewer's list. The draft is cleared on success.
    pub async fn submit(&mut self, api: &dyn GameboxdApi) -> Result<(), AppError> {
        if self.submitting {
            return Ok(());
        }
        self.validate()?;

        let result = {
            let _submitting = FlagGuard::raise(&mut self.submitting);

            async {
                // The draft keeps the image bytes until the whole submission
                // succeeds, so a failed attempt can be retried as-is.
                let game_image_url = match &self.image {
                    Some((file_name, bytes)) => api.upload_image(file_name, bytes.clone()).await?,
                    None => String::new(),
                };

                let review = NewReview {
                    game_title: self.game_title.trim().to_owned(),
                    review_text: self.review_text.trim().to_owned(),
                    rating: self.rating,
                    username: self.viewer.clone(),
                    game_image_url,
                };

                api.create_review(&review).await?;
                api.user_reviews(&self.viewer).await
            }
            .await
        };

        match result {
            Ok(reviews) => {
                self.my_reviews = reviews;
                self.game_title.clear();
                self.rating = 0.0;
                self.review_text.clear();
                self.image = None;
                Ok(())
            }
            Err(err) => {
                tracing::error!("Posting review failed: {err}");
                Err(err)
            }
        }
    }

    pub async fn delete_review(
        &mut self,
        api: &dyn GameboxdApi,
        review_id: &str,
    ) -> Result<(), AppError> {
        match api.delete_review(review_id, &self.viewer).await {
            Ok(()) => {
                self.my_reviews.retain(|review| review.id != review_id);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Deleting review {review_id} failed: {err}");
                Err(err)
            }
        }
    }
}
