#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use chrono::Utc;
use gameboxd_client::{
    AppError, GameboxdApi,
    models::{
        Comment, NewReview, NewUser, ProfileUpdate, Review, Role, TrendingGame, User, VoteCounts,
        VoteKind, VoteStatus,
    },
};

pub fn init_tracing() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();
}

pub fn user(username: &str) -> User {
    User {
        username: username.to_owned(),
        role: Role::User,
        is_banned: false,
        email: None,
        full_name: None,
        bio: None,
        profile_picture: None,
        created_at: Some(Utc::now()),
    }
}

pub fn admin(username: &str) -> User {
    User {
        role: Role::Admin,
        ..user(username)
    }
}

pub fn review(id: &str, author: &str, game: &str) -> Review {
    Review {
        id: id.to_owned(),
        username: author.to_owned(),
        game_title: game.to_owned(),
        review_text: format!("{game} is worth playing"),
        rating: 4.0,
        game_image_url: None,
        timestamp: Utc::now(),
        upvote_count: 0,
        downvote_count: 0,
        comment_count: 0,
    }
}

#[derive(Default)]
pub struct MockState {
    pub users: Vec<User>,
    pub reviews: Vec<Review>,
    // (review_id, voter) -> current vote
    pub votes: HashMap<(String, String), VoteKind>,
    // review_id -> comments, oldest first
    pub comments: HashMap<String, Vec<Comment>>,
    // (follower, followee)
    pub follows: HashSet<(String, String)>,
    pub fail_reads: bool,
    // While set, vote and follow mutations never complete, so tests can
    // abandon an in-flight call.
    pub stall_mutations: bool,
    pub vote_status_calls: usize,
    pub comment_calls: usize,
    pub create_user_calls: usize,
    pub next_id: usize,
}

impl MockState {
    fn counts_for(&self, review: &Review) -> VoteCounts {
        let mut counts = VoteCounts {
            upvote_count: review.upvote_count,
            downvote_count: review.downvote_count,
        };

        for ((review_id, _), kind) in &self.votes {
            if review_id == &review.id {
                match kind {
                    VoteKind::Upvote => counts.upvote_count += 1,
                    VoteKind::Downvote => counts.downvote_count += 1,
                }
            }
        }

        counts
    }

    fn materialize(&self, review: &Review) -> Review {
        let counts = self.counts_for(review);
        let mut review = review.clone();
        review.upvote_count = counts.upvote_count;
        review.downvote_count = counts.downvote_count;
        review.comment_count = self
            .comments
            .get(&review.id)
            .map_or(0, |list| list.len() as u32);
        review
    }

    fn find_review(&self, review_id: &str) -> Result<Review, AppError> {
        self.reviews
            .iter()
            .find(|r| r.id == review_id)
            .cloned()
            .ok_or_else(|| AppError::Server("Review not found".into()))
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

pub struct MockApi {
    pub state: Mutex<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
        }
    }

    pub fn with_state(state: MockState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

#[async_trait]
impl GameboxdApi for MockApi {
    async fn login(&self, username: &str, _password: &str) -> Result<User, AppError> {
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| AppError::Server("Invalid username or password".into()))
    }

    async fn register(
        &self,
        username: &str,
        _password: &str,
        email: &str,
        full_name: &str,
    ) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.username == username) {
            return Err(AppError::Server("Username already taken".into()));
        }

        let mut created = user(username);
        created.email = Some(email.to_owned());
        created.full_name = Some(full_name.to_owned());
        state.users.push(created);
        Ok(())
    }

    async fn get_profile(&self, username: &str) -> Result<User, AppError> {
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| AppError::Server("User not found".into()))
    }

    async fn update_profile(
        &self,
        username: &str,
        changes: &ProfileUpdate,
    ) -> Result<User, AppError> {
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| AppError::Server("User not found".into()))?;

        if let Some(full_name) = &changes.full_name {
            user.full_name = Some(full_name.clone());
        }
        if let Some(email) = &changes.email {
            user.email = Some(email.clone());
        }
        if let Some(bio) = &changes.bio {
            user.bio = Some(bio.clone());
        }
        if let Some(picture) = &changes.profile_picture {
            user.profile_picture = Some(picture.clone());
        }

        Ok(user.clone())
    }

    async fn upload_image(&self, file_name: &str, _bytes: Vec<u8>) -> Result<String, AppError> {
        Ok(format!("https://images.test/{file_name}"))
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(AppError::Server("Internal server error".into()));
        }

        Ok(state
            .reviews
            .iter()
            .map(|r| state.materialize(r))
            .collect())
    }

    async fn user_reviews(&self, username: &str) -> Result<Vec<Review>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reviews
            .iter()
            .filter(|r| r.username == username)
            .map(|r| state.materialize(r))
            .collect())
    }

    async fn create_review(&self, review: &NewReview) -> Result<Review, AppError> {
        let mut state = self.state.lock().unwrap();
        let id = state.fresh_id("new-r");

        let created = Review {
            id,
            username: review.username.clone(),
            game_title: review.game_title.clone(),
            review_text: review.review_text.clone(),
            rating: review.rating,
            game_image_url: (!review.game_image_url.is_empty())
                .then(|| review.game_image_url.clone()),
            timestamp: Utc::now(),
            upvote_count: 0,
            downvote_count: 0,
            comment_count: 0,
        };

        state.reviews.push(created.clone());
        Ok(created)
    }

    async fn delete_review(&self, review_id: &str, username: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        let review = state.find_review(review_id)?;
        if review.username != username {
            return Err(AppError::Server("Not authorized".into()));
        }

        state.reviews.retain(|r| r.id != review_id);
        Ok(())
    }

    async fn vote_status(
        &self,
        review_id: &str,
        username: &str,
    ) -> Result<VoteStatus, AppError> {
        let mut state = self.state.lock().unwrap();
        state.vote_status_calls += 1;

        let key = (review_id.to_owned(), username.to_owned());
        Ok(match state.votes.get(&key) {
            Some(kind) => VoteStatus::cast(*kind),
            None => VoteStatus::none(),
        })
    }

    async fn cast_vote(
        &self,
        review_id: &str,
        username: &str,
        kind: VoteKind,
    ) -> Result<VoteCounts, AppError> {
        let stalled = self.state.lock().unwrap().stall_mutations;
        if stalled {
            std::future::pending::<()>().await;
        }

        let mut state = self.state.lock().unwrap();
        let review = state.find_review(review_id)?;
        if review.username == username {
            return Err(AppError::Server("You cannot vote on your own review".into()));
        }

        state
            .votes
            .insert((review_id.to_owned(), username.to_owned()), kind);
        Ok(state.counts_for(&review))
    }

    async fn remove_vote(
        &self,
        review_id: &str,
        username: &str,
    ) -> Result<VoteCounts, AppError> {
        let mut state = self.state.lock().unwrap();
        let review = state.find_review(review_id)?;

        state
            .votes
            .remove(&(review_id.to_owned(), username.to_owned()));
        Ok(state.counts_for(&review))
    }

    async fn list_comments(&self, review_id: &str) -> Result<Vec<Comment>, AppError> {
        let state = self.state.lock().unwrap();
        let mut comments = state.comments.get(review_id).cloned().unwrap_or_default();
        // Newest first, like the backend.
        comments.reverse();
        Ok(comments)
    }

    async fn add_comment(
        &self,
        review_id: &str,
        username: &str,
        text: &str,
    ) -> Result<Comment, AppError> {
        let mut state = self.state.lock().unwrap();
        state.comment_calls += 1;
        state.find_review(review_id)?;

        let id = state.fresh_id("c");
        let comment = Comment {
            id,
            username: username.to_owned(),
            text: text.to_owned(),
            timestamp: Utc::now(),
        };

        state
            .comments
            .entry(review_id.to_owned())
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn delete_comment(
        &self,
        review_id: &str,
        comment_id: &str,
        username: &str,
    ) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        let comments = state
            .comments
            .get_mut(review_id)
            .ok_or_else(|| AppError::Server("Review not found".into()))?;

        let comment = comments
            .iter()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| AppError::Server("Comment not found".into()))?;
        if comment.username != username {
            return Err(AppError::Server("Not authorized".into()));
        }

        comments.retain(|c| c.id != comment_id);
        Ok(())
    }

    async fn trending_games(&self) -> Result<Vec<TrendingGame>, AppError> {
        Ok(vec![TrendingGame {
            id: Some("g1".into()),
            title: "Hollow Knight".into(),
            description: Some("Metroidvania".into()),
            cover_url: None,
            rating: Some(4.8),
        }])
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.clone())
    }

    async fn follow(&self, target: &str, follower: &str) -> Result<(), AppError> {
        let stalled = self.state.lock().unwrap().stall_mutations;
        if stalled {
            std::future::pending::<()>().await;
        }

        let mut state = self.state.lock().unwrap();
        state
            .follows
            .insert((follower.to_owned(), target.to_owned()));
        Ok(())
    }

    async fn unfollow(&self, target: &str, follower: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state
            .follows
            .remove(&(follower.to_owned(), target.to_owned()));
        Ok(())
    }

    async fn followers(&self, username: &str) -> Result<Vec<String>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .follows
            .iter()
            .filter(|(_, followee)| followee == username)
            .map(|(follower, _)| follower.clone())
            .collect())
    }

    async fn following(&self, username: &str) -> Result<Vec<String>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .follows
            .iter()
            .filter(|(follower, _)| follower == username)
            .map(|(_, followee)| followee.clone())
            .collect())
    }

    async fn feed(&self, username: &str) -> Result<Vec<Review>, AppError> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(AppError::Server("Internal server error".into()));
        }

        Ok(state
            .reviews
            .iter()
            .filter(|r| {
                state
                    .follows
                    .contains(&(username.to_owned(), r.username.clone()))
            })
            .map(|r| state.materialize(r))
            .collect())
    }

    async fn admin_list_users(&self, _admin: &str) -> Result<Vec<User>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.clone())
    }

    async fn admin_list_reviews(&self, _admin: &str) -> Result<Vec<Review>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reviews
            .iter()
            .map(|r| state.materialize(r))
            .collect())
    }

    async fn admin_delete_review(&self, review_id: &str, _admin: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.find_review(review_id)?;
        state.reviews.retain(|r| r.id != review_id);
        Ok(())
    }

    async fn admin_delete_user(&self, username: &str, _admin: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.users.retain(|u| u.username != username);
        state.reviews.retain(|r| r.username != username);
        Ok(())
    }

    async fn admin_promote_user(&self, username: &str, _admin: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| AppError::Server("User not found".into()))?;
        user.role = Role::Admin;
        Ok(())
    }

    async fn admin_ban_user(&self, username: &str, _admin: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| AppError::Server("User not found".into()))?;
        user.is_banned = true;
        Ok(())
    }

    async fn admin_unban_user(&self, username: &str, _admin: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| AppError::Server("User not found".into()))?;
        user.is_banned = false;
        Ok(())
    }

    async fn admin_create_user(
        &self,
        new_user: &NewUser,
        _admin: &str,
    ) -> Result<User, AppError> {
        let mut state = self.state.lock().unwrap();
        state.create_user_calls += 1;

        if state.users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::Server("Username already taken".into()));
        }

        let mut created = user(&new_user.username);
        created.role = new_user.role;
        created.email = new_user.email.clone();
        state.users.push(created.clone());
        Ok(created)
    }
}
