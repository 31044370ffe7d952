use async_trait::async_trait;

use crate::{
    errors::AppError,
    models::{
        Comment, NewReview, NewUser, ProfileUpdate, Review, TrendingGame, User, VoteCounts,
        VoteKind, VoteStatus,
    },
};

// The Gameboxd REST surface. View-models depend on this trait instead of the
// concrete HTTP client so tests can run against an in-memory stub.
//
// Admin operations carry the acting admin's username, which the backend
// receives as the `x-admin-username` header. That is the backend's own
// contract; the client does not treat it as a security boundary.
#[async_trait]
pub trait GameboxdApi: Send + Sync {
    // Auth & profile
    async fn login(&self, username: &str, password: &str) -> Result<User, AppError>;
    async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        full_name: &str,
    ) -> Result<(), AppError>;
    async fn get_profile(&self, username: &str) -> Result<User, AppError>;
    async fn update_profile(
        &self,
        username: &str,
        changes: &ProfileUpdate,
    ) -> Result<User, AppError>;
    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, AppError>;

    // Reviews
    async fn list_reviews(&self) -> Result<Vec<Review>, AppError>;
    async fn user_reviews(&self, username: &str) -> Result<Vec<Review>, AppError>;
    async fn create_review(&self, review: &NewReview) -> Result<Review, AppError>;
    async fn delete_review(&self, review_id: &str, username: &str) -> Result<(), AppError>;

    // Votes
    async fn vote_status(
        &self,
        review_id: &str,
        username: &str,
    ) -> Result<VoteStatus, AppError>;
    async fn cast_vote(
        &self,
        review_id: &str,
        username: &str,
        kind: VoteKind,
    ) -> Result<VoteCounts, AppError>;
    async fn remove_vote(
        &self,
        review_id: &str,
        username: &str,
    ) -> Result<VoteCounts, AppError>;

    // Comments
    async fn list_comments(&self, review_id: &str) -> Result<Vec<Comment>, AppError>;
    async fn add_comment(
        &self,
        review_id: &str,
        username: &str,
        text: &str,
    ) -> Result<Comment, AppError>;
    async fn delete_comment(
        &self,
        review_id: &str,
        comment_id: &str,
        username: &str,
    ) -> Result<(), AppError>;

    // Games
    async fn trending_games(&self) -> Result<Vec<TrendingGame>, AppError>;

    // Users & follow graph
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn follow(&self, target: &str, follower: &str) -> Result<(), AppError>;
    async fn unfollow(&self, target: &str, follower: &str) -> Result<(), AppError>;
    async fn followers(&self, username: &str) -> Result<Vec<String>, AppError>;
    async fn following(&self, username: &str) -> Result<Vec<String>, AppError>;
    async fn feed(&self, username: &str) -> Result<Vec<Review>, AppError>;

    // Admin surface
    async fn admin_list_users(&self, admin: &str) -> Result<Vec<User>, AppError>;
    async fn admin_list_reviews(&self, admin: &str) -> Result<Vec<Review>, AppError>;
    async fn admin_delete_review(&self, review_id: &str, admin: &str) -> Result<(), AppError>;
    async fn admin_delete_user(&self, username: &str, admin: &str) -> Result<(), AppError>;
    async fn admin_promote_user(&self, username: &str, admin: &str) -> Result<(), AppError>;
    async fn admin_ban_user(&self, username: &str, admin: &str) -> Result<(), AppError>;
    async fn admin_unban_user(&self, username: &str, admin: &str) -> Result<(), AppError>;
    async fn admin_create_user(
        &self,
        new_user: &NewUser,
        admin: &str,
    ) -> Result<User, AppError>;
}
