use crate::{
    api::GameboxdApi,
    errors::AppError,
    models::{Review, TrendingGame},
    views::guard::FlagGuard,
};

// Landing page state: what's trending plus the viewer's own library.
#[derive(Debug)]
pub struct HomeView {
    pub viewer: String,
    pub trending: Vec<TrendingGame>,
    pub my_reviews: Vec<Review>,
    pub loading: bool,
}

impl HomeView {
    pub fn new(viewer: impl Into<String>) -> Self {
        Self {
            viewer: viewer.into(),
            trending: Vec::new(),
            my_reviews: Vec::new(),
            loading: false,
        }
    }

    pub async fn load(&mut self, api: &dyn GameboxdApi) -> Result<(), AppError> {
        let viewer = self.viewer.clone();

        let result = {
            let _loading = FlagGuard::raise(&mut self.loading);
            tokio::try_join!(api.trending_games(), api.user_reviews(&viewer))
        };

        match result {
            Ok((trending, reviews)) => {
                self.trending = trending;
                self.my_reviews = reviews;
                Ok(())
            }
            Err(err) => {
                tracing::error!("Loading home page failed: {err}");
                Err(err)
            }
        }
    }
}
