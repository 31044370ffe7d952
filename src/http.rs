use async_trait::async_trait;
use reqwest::multipart;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    api::GameboxdApi,
    config::Config,
    errors::AppError,
    models::{
        Comment, NewReview, NewUser, ProfileUpdate, Review, TrendingGame, User, VoteCounts,
        VoteKind, VoteStatus,
    },
};

// The backend identifies the acting admin by this header on /admin routes.
const ADMIN_HEADER: &str = "x-admin-username";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

// Failed requests carry `{error}` or `{message}` depending on the route.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    email: &'a str,
    full_name: &'a str,
}

// Untouched fields stay out of the payload so the backend only overwrites
// what the caller actually changed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_picture: Option<&'a str>,
}

#[derive(Deserialize)]
struct UpdateProfileResponse {
    user: User,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    image_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UsernameBody<'a> {
    username: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FollowerBody<'a> {
    follower_username: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoteRequest<'a> {
    username: &'a str,
    vote_type: VoteKind,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentRequest<'a> {
    username: &'a str,
    text: &'a str,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(&Config::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
        if response.status().is_success() {
            return Ok(response.json::<T>().await?);
        }

        Err(Self::server_error(response).await)
    }

    async fn check(response: reqwest::Response) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::server_error(response).await)
    }

    async fn server_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error.or(body.message))
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        tracing::error!("Server error ({status}): {message}");
        AppError::Server(message)
    }
}

#[async_trait]
impl GameboxdApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        full_name: &str,
    ) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&RegisterRequest {
                username,
                password,
                email,
                full_name,
            })
            .send()
            .await?;

        Self::check(response).await
    }

    async fn get_profile(&self, username: &str) -> Result<User, AppError> {
        let response = self
            .http
            .get(self.url(&format!("/auth/profile/{username}")))
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn update_profile(
        &self,
        username: &str,
        changes: &ProfileUpdate,
    ) -> Result<User, AppError> {
        let response = self
            .http
            .put(self.url("/auth/profile"))
            .json(&UpdateProfileRequest {
                username,
                full_name: changes.full_name.as_deref(),
                email: changes.email.as_deref(),
                bio: changes.bio.as_deref(),
                profile_picture: changes.profile_picture.as_deref(),
            })
            .send()
            .await?;

        let body: UpdateProfileResponse = Self::parse(response).await?;
        Ok(body.user)
    }

    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = multipart::Form::new().part("image", part);

        let response = self
            .http
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;

        let body: UploadResponse = Self::parse(response).await?;
        Ok(body.image_url)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        let response = self.http.get(self.url("/reviews")).send().await?;
        Self::parse(response).await
    }

    async fn user_reviews(&self, username: &str) -> Result<Vec<Review>, AppError> {
        let response = self
            .http
            .get(self.url(&format!("/reviews/user/{username}")))
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn create_review(&self, review: &NewReview) -> Result<Review, AppError> {
        let response = self
            .http
            .post(self.url("/reviews"))
            .json(review)
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn delete_review(&self, review_id: &str, username: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.url(&format!("/reviews/{review_id}")))
            .json(&UsernameBody { username })
            .send()
            .await?;

        Self::check(response).await
    }

    async fn vote_status(
        &self,
        review_id: &str,
        username: &str,
    ) -> Result<VoteStatus, AppError> {
        let response = self
            .http
            .get(self.url(&format!("/reviews/{review_id}/vote/{username}")))
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn cast_vote(
        &self,
        review_id: &str,
        username: &str,
        kind: VoteKind,
    ) -> Result<VoteCounts, AppError> {
        let response = self
            .http
            .post(self.url(&format!("/reviews/{review_id}/vote")))
            .json(&VoteRequest {
                username,
                vote_type: kind,
            })
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn remove_vote(
        &self,
        review_id: &str,
        username: &str,
    ) -> Result<VoteCounts, AppError> {
        let response = self
            .http
            .delete(self.url(&format!("/reviews/{review_id}/vote")))
            .json(&UsernameBody { username })
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn list_comments(&self, review_id: &str) -> Result<Vec<Comment>, AppError> {
        let response = self
            .http
            .get(self.url(&format!("/reviews/{review_id}/comments")))
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn add_comment(
        &self,
        review_id: &str,
        username: &str,
        text: &str,
    ) -> Result<Comment, AppError> {
        let response = self
            .http
            .post(self.url(&format!("/reviews/{review_id}/comments")))
            .json(&CommentRequest { username, text })
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn delete_comment(
        &self,
        review_id: &str,
        comment_id: &str,
        username: &str,
    ) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.url(&format!("/reviews/{review_id}/comments/{comment_id}")))
            .json(&UsernameBody { username })
            .send()
            .await?;

        Self::check(response).await
    }

    async fn trending_games(&self) -> Result<Vec<TrendingGame>, AppError> {
        let response = self.http.get(self.url("/games/trending")).send().await?;
        Self::parse(response).await
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let response = self.http.get(self.url("/users")).send().await?;
        Self::parse(response).await
    }

    async fn follow(&self, target: &str, follower: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.url(&format!("/users/{target}/follow")))
            .json(&FollowerBody {
                follower_username: follower,
            })
            .send()
            .await?;

        Self::check(response).await
    }

    async fn unfollow(&self, target: &str, follower: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.url(&format!("/users/{target}/follow")))
            .json(&FollowerBody {
                follower_username: follower,
            })
            .send()
            .await?;

        Self::check(response).await
    }

    async fn followers(&self, username: &str) -> Result<Vec<String>, AppError> {
        let response = self
            .http
            .get(self.url(&format!("/users/{username}/followers")))
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn following(&self, username: &str) -> Result<Vec<String>, AppError> {
        let response = self
            .http
            .get(self.url(&format!("/users/{username}/following")))
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn feed(&self, username: &str) -> Result<Vec<Review>, AppError> {
        let response = self
            .http
            .get(self.url(&format!("/users/{username}/feed")))
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn admin_list_users(&self, admin: &str) -> Result<Vec<User>, AppError> {
        let response = self
            .http
            .get(self.url("/admin/users"))
            .header(ADMIN_HEADER, admin)
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn admin_list_reviews(&self, admin: &str) -> Result<Vec<Review>, AppError> {
        let response = self
            .http
            .get(self.url("/admin/reviews"))
            .header(ADMIN_HEADER, admin)
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn admin_delete_review(&self, review_id: &str, admin: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.url(&format!("/admin/reviews/{review_id}")))
            .header(ADMIN_HEADER, admin)
            .send()
            .await?;

        Self::check(response).await
    }

    async fn admin_delete_user(&self, username: &str, admin: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.url(&format!("/admin/users/{username}")))
            .header(ADMIN_HEADER, admin)
            .send()
            .await?;

        Self::check(response).await
    }

    async fn admin_promote_user(&self, username: &str, admin: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.url(&format!("/admin/users/{username}/promote")))
            .header(ADMIN_HEADER, admin)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        Self::check(response).await
    }

    async fn admin_ban_user(&self, username: &str, admin: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.url(&format!("/admin/users/{username}/ban")))
            .header(ADMIN_HEADER, admin)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        Self::check(response).await
    }

    async fn admin_unban_user(&self, username: &str, admin: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.url(&format!("/admin/users/{username}/unban")))
            .header(ADMIN_HEADER, admin)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        Self::check(response).await
    }

    async fn admin_create_user(
        &self,
        new_user: &NewUser,
        admin: &str,
    ) -> Result<User, AppError> {
        let response = self
            .http
            .post(self.url("/admin/users"))
            .header(ADMIN_HEADER, admin)
            .json(new_user)
            .send()
            .await?;

        Self::parse(response).await
    }
}
