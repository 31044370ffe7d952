use std::{fs, path::PathBuf};

use tokio::sync::watch;

use crate::{
    errors::AppError,
    models::{ProfileUpdate, User},
};

// Durable session holder: one JSON file with the signed-in user record,
// trusted until an explicit logout. State changes are broadcast on a watch
// channel so interested views can react without a global singleton.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    tx: watch::Sender<Option<User>>,
}

impl SessionStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let user = match fs::read_to_string(&path) {
            Ok(raw) => Some(serde_json::from_str::<User>(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };

        let (tx, _rx) = watch::channel(user);
        Ok(Self { path, tx })
    }

    pub fn current(&self) -> Option<User> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.tx.subscribe()
    }

    pub fn login(&self, user: User) -> Result<(), AppError> {
        self.persist(&user)?;
        self.tx.send_replace(Some(user));
        Ok(())
    }

    pub fn logout(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        self.tx.send_replace(None);
        Ok(())
    }

    // Merge changed profile fields into the stored record, then persist and
    // broadcast the merged user.
    pub fn update(&self, changes: &ProfileUpdate) -> Result<User, AppError> {
        let mut user = self
            .current()
            .ok_or_else(|| AppError::Unauthorized("No active session".into()))?;

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

        self.persist(&user)?;
        self.tx.send_replace(Some(user.clone()));
        Ok(user)
    }

    fn persist(&self, user: &User) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let raw = serde_json::to_string_pretty(user)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
