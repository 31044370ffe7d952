use crate::{
    api::GameboxdApi,
    errors::AppError,
    models::{NewUser, Review, Role, User},
    views::guard::FlagGuard,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminStats {
    pub total_users: usize,
    pub total_admins: usize,
    pub total_reviews: usize,
    pub banned_users: usize,
}

// Moderation view. Mutations re-derive the in-memory lists instead of
// re-fetching; only user creation appends the server-returned record.
#[derive(Debug)]
pub struct AdminPanel {
    admin: String,
    pub users: Vec<User>,
    pub reviews: Vec<Review>,
    pub search: String,
    pub loading: bool,
}

impl AdminPanel {
    // Client-side gate only; the backend authorizes every call on its own.
    pub fn new(session_user: &User) -> Result<Self, AppError> {
        if !session_user.is_admin() {
            return Err(AppError::Unauthorized(
                "Admin access required".into(),
            ));
        }

        Ok(Self {
            admin: session_user.username.clone(),
            users: Vec::new(),
            reviews: Vec::new(),
            search: String::new(),
            loading: false,
        })
    }

    pub async fn load(&mut self, api: &dyn GameboxdApi) -> Result<(), AppError> {
        let admin = self.admin.clone();

        let result = {
            let _loading = FlagGuard::raise(&mut self.loading);
            tokio::try_join!(api.admin_list_users(&admin), api.admin_list_reviews(&admin))
        };

        match result {
            Ok((users, reviews)) => {
                self.users = users;
                self.reviews = reviews;
                Ok(())
            }
            Err(err) => {
                tracing::error!("Loading admin data failed: {err}");
                Err(err)
            }
        }
    }

    // Case-insensitive substring match on username or email.
    pub fn filtered_users(&self) -> Vec<&User> {
        let term = self.search.to_lowercase();

        self.users
            .iter()
            .filter(|user| {
                user.username.to_lowercase().contains(&term)
                    || user
                        .email
                        .as_ref()
                        .is_some_and(|email| email.to_lowercase().contains(&term))
            })
            .collect()
    }

    // Case-insensitive substring match on game title, author or body.
    pub fn filtered_reviews(&self) -> Vec<&Review> {
        let term = self.search.to_lowercase();

        self.reviews
            .iter()
            .filter(|review| {
                review.game_title.to_lowercase().contains(&term)
                    || review.username.to_lowercase().contains(&term)
                    || review.review_text.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn stats(&self) -> AdminStats {
        AdminStats {
            total_users: self.users.len(),
            total_admins: self.users.iter().filter(|u| u.is_admin()).count(),
            total_reviews: self.reviews.len(),
            banned_users: self.users.iter().filter(|u| u.is_banned).count(),
        }
    }

    pub async fn delete_review(
        &mut self,
        api: &dyn GameboxdApi,
        review_id: &str,
    ) -> Result<(), AppError> {
        match api.admin_delete_review(review_id, &self.admin).await {
            Ok(()) => {
                self.reviews.retain(|review| review.id != review_id);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Admin delete of review {review_id} failed: {err}");
                Err(err)
            }
        }
    }

    // The backend cascades the user's reviews; mirror that locally so the
    // lists stay consistent without a re-fetch.
    pub async fn delete_user(
        &mut self,
        api: &dyn GameboxdApi,
        username: &str,
    ) -> Result<(), AppError> {
        match api.admin_delete_user(username, &self.admin).await {
            Ok(()) => {
                self.users.retain(|user| user.username != username);
                self.reviews.retain(|review| review.username != username);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Admin delete of user {username} failed: {err}");
                Err(err)
            }
        }
    }

    pub async fn promote_user(
        &mut self,
        api: &dyn GameboxdApi,
        username: &str,
    ) -> Result<(), AppError> {
        match api.admin_promote_user(username, &self.admin).await {
            Ok(()) => {
                self.set_role(username, Role::Admin);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Promoting {username} failed: {err}");
                Err(err)
            }
        }
    }

    pub async fn ban_user(
        &mut self,
        api: &dyn GameboxdApi,
        username: &str,
    ) -> Result<(), AppError> {
        match api.admin_ban_user(username, &self.admin).await {
            Ok(()) => {
                self.set_banned(username, true);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Banning {username} failed: {err}");
                Err(err)
            }
        }
    }

    pub async fn unban_user(
        &mut self,
        api: &dyn GameboxdApi,
        username: &str,
    ) -> Result<(), AppError> {
        match api.admin_unban_user(username, &self.admin).await {
            Ok(()) => {
                self.set_banned(username, false);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Unbanning {username} failed: {err}");
                Err(err)
            }
        }
    }

    pub async fn create_user(
        &mut self,
        api: &dyn GameboxdApi,
        new_user: NewUser,
    ) -> Result<(), AppError> {
        if new_user.username.trim().is_empty() || new_user.password.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Username and password are required".into(),
            ));
        }

        match api.admin_create_user(&new_user, &self.admin).await {
            Ok(created) => {
                self.users.push(created);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Creating user {} failed: {err}", new_user.username);
                Err(err)
            }
        }
    }

    fn set_role(&mut self, username: &str, role: Role) {
        if let Some(user) = self.users.iter_mut().find(|u| u.username == username) {
            user.role = role;
        }
    }

    fn set_banned(&mut self, username: &str, banned: bool) {
        if let Some(user) = self.users.iter_mut().find(|u| u.username == username) {
            user.is_banned = banned;
        }
    }
}
