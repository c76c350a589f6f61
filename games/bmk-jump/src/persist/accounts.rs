use serde::{Deserialize, Serialize};
use sha2::Digest;

use super::profile::PlayerStats;
use super::{PersistError, Persistence, SESSION_KEY};
use bmk_engine::storage::{read_json, write_json};

/// The signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub uid: String,
}

/// Stored account record, keyed by username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub uid: String,
    /// Hex SHA-256 of `username:password`. `None` marks a corrupt record.
    #[serde(default)]
    pub password_digest: Option<String>,
    pub created_at_ms: f64,
    #[serde(default)]
    pub last_login_ms: Option<f64>,
    #[serde(default)]
    pub invited_by: Option<String>,
    #[serde(default)]
    pub invited_friends: Vec<String>,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Account {
    pub fn invited_count(&self) -> usize {
        self.invited_friends.len()
    }

    pub fn user(&self) -> User {
        User {
            username: self.username.clone(),
            uid: self.uid.clone(),
        }
    }
}

fn password_digest(username: &str, password: &str) -> String {
    format!("{:x}", sha2::Sha256::digest(format!("{}:{}", username, password).as_bytes()))
}

impl Persistence {
    /// Create an account, give it a zero leaderboard row, credit the referrer and sign in.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        invited_by: Option<&str>,
        now_ms: f64,
    ) -> Result<User, PersistError> {
        let mut users = self.users()?;
        if users.contains_key(username) {
            return Err(PersistError::UserExists(username.to_string()));
        }

        let account = Account {
            username: username.to_string(),
            uid: format!("local_{}_{}", username, now_ms as u64),
            password_digest: Some(password_digest(username, password)),
            created_at_ms: now_ms,
            last_login_ms: Some(now_ms),
            invited_by: invited_by.map(str::to_string),
            invited_friends: Vec::new(),
            stats: PlayerStats::default(),
        };
        let user = account.user();
        users.insert(username.to_string(), account);
        self.save_users(&users)?;

        if let Some(referrer) = invited_by {
            if let Err(e) = self.credit_referrer(referrer, &user.uid) {
                log::warn!("accounts: could not credit referrer {}: {}", referrer, e);
            }
        }

        self.ensure_row(&user, now_ms)?;
        self.set_session(&user)?;
        log::info!("accounts: registered {} ({})", user.username, user.uid);
        Ok(user)
    }

    pub fn sign_in(&mut self, username: &str, password: &str, now_ms: f64) -> Result<User, PersistError> {
        let mut users = self.users()?;
        let account = users
            .get_mut(username)
            .ok_or_else(|| PersistError::UserNotFound(username.to_string()))?;

        let Some(stored) = account.password_digest.as_deref() else {
            log::warn!("accounts: {} has no password, removing", username);
            users.remove(username);
            self.save_users(&users)?;
            return Err(PersistError::CorruptAccount(username.to_string()));
        };
        if stored != password_digest(username, password) {
            return Err(PersistError::WrongPassword(username.to_string()));
        }

        account.last_login_ms = Some(now_ms);
        let user = account.user();
        self.save_users(&users)?;
        self.set_session(&user)?;
        log::info!("accounts: signed in {}", user.username);
        Ok(user)
    }

    pub fn sign_out(&mut self) -> Result<(), PersistError> {
        self.store.remove(SESSION_KEY)?;
        log::info!("accounts: signed out");
        Ok(())
    }

    /// The signed-in user, if any. A session pointing at a vanished account counts as none.
    pub fn current_user(&self) -> Option<User> {
        let session: Option<User> = match read_json(self.store.as_ref(), SESSION_KEY) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("accounts: unreadable session: {}", e);
                return None;
            }
        };
        let user = session?;
        match self.users() {
            Ok(users) if users.get(&user.username).is_some_and(|a| a.uid == user.uid) => Some(user),
            Ok(_) => None,
            Err(e) => {
                log::warn!("accounts: unreadable user table: {}", e);
                None
            }
        }
    }

    pub fn account(&self, username: &str) -> Result<Option<Account>, PersistError> {
        Ok(self.users()?.get(username).cloned())
    }

    fn set_session(&mut self, user: &User) -> Result<(), PersistError> {
        write_json(self.store.as_mut(), SESSION_KEY, user)?;
        Ok(())
    }

    fn credit_referrer(&mut self, referrer: &str, new_uid: &str) -> Result<(), PersistError> {
        let mut users = self.users()?;
        let account = users
            .get_mut(referrer)
            .ok_or_else(|| PersistError::UserNotFound(referrer.to_string()))?;
        account.invited_friends.push(new_uid.to_string());
        self.save_users(&users)
    }
}
