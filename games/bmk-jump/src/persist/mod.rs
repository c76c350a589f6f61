//! Accounts, leaderboard and profile stats on top of a key/value store.
//!
//! Everything here runs at sign-in/registration time or once per finished
//! game, never inside the frame loop.

mod accounts;
mod leaderboard;
mod profile;

use std::collections::BTreeMap;

use bmk_engine::storage::{read_json, write_json};
use bmk_engine::{KeyValueStore, StorageError};

pub use accounts::{Account, User};
pub use leaderboard::LeaderboardEntry;
pub use profile::PlayerStats;

const USERS_KEY: &str = "bmk_users";
const SESSION_KEY: &str = "bmk_current_user";
const LEADERBOARD_KEY: &str = "bmk_leaderboard";

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Wrong password for user {0}")]
    WrongPassword(String),

    #[error("Account {0} had no password and was removed")]
    CorruptAccount(String),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Outcome of recording one finished game for the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameRecord {
    pub score: u32,
    /// Beat the best stored before this game (or first score ever).
    pub new_record: bool,
    /// 1-based leaderboard position after the submission.
    pub rank: usize,
}

/// Persistence facade owned by the game session.
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Submit the score, update profile stats and report record/rank.
    /// `Ok(None)` when nobody is signed in.
    ///
    /// Once the leaderboard accepts the score the record is returned, even if
    /// the profile stats then fail to save.
    pub fn record_game(&mut self, score: u32, at_ms: f64) -> Result<Option<GameRecord>, PersistError> {
        let Some(user) = self.current_user() else {
            return Ok(None);
        };

        let previous_best = self.best_of(&user.uid)?;
        let new_record = previous_best.map_or(true, |best| score > best);
        self.submit(&user, score, at_ms)?;
        let rank = self.rank_of(&user.uid)?.unwrap_or(0);

        if let Err(e) = self.update_stats(&user, score, rank, at_ms) {
            log::warn!(
                "bmk-jump: score {} for {} is on the leaderboard but stats were not saved: {}",
                score,
                user.username,
                e
            );
        }

        Ok(Some(GameRecord {
            score,
            new_record,
            rank,
        }))
    }

    fn update_stats(&mut self, user: &User, score: u32, rank: usize, at_ms: f64) -> Result<(), PersistError> {
        let mut users = self.users()?;
        let account = users
            .get_mut(&user.username)
            .ok_or_else(|| PersistError::UserNotFound(user.username.clone()))?;
        account.stats.record(score, at_ms);
        account.stats.current_rank = rank as u32;
        self.save_users(&users)
    }

    fn users(&self) -> Result<BTreeMap<String, Account>, PersistError> {
        Ok(read_json(self.store.as_ref(), USERS_KEY)?.unwrap_or_default())
    }

    fn save_users(&mut self, users: &BTreeMap<String, Account>) -> Result<(), PersistError> {
        write_json(self.store.as_mut(), USERS_KEY, users)?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{memory, signed_in_ana, RejectKeyStore};
    use super::{Persistence, USERS_KEY};

    #[test]
    fn record_game_needs_a_session() {
        let mut p = memory();
        assert_eq!(p.record_game(500, 0.0).unwrap(), None);
    }

    #[test]
    fn record_game_reports_records_and_rank() {
        let mut p = memory();
        p.register("bob", "pw", None, 1.0).unwrap();
        p.record_game(900, 10.0).unwrap();
        p.sign_out().unwrap();

        p.register("ana", "pw", None, 2.0).unwrap();
        let first = p.record_game(300, 20.0).unwrap().unwrap();
        assert!(first.new_record);
        assert_eq!(first.rank, 2);

        let worse = p.record_game(100, 30.0).unwrap().unwrap();
        assert!(!worse.new_record);

        let better = p.record_game(1500, 40.0).unwrap().unwrap();
        assert!(better.new_record);
        assert_eq!(better.rank, 1);

        let stats = p.current_stats().unwrap();
        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.best_score, 1500);
        assert_eq!(stats.current_rank, 1);
    }

    #[test]
    fn stored_score_is_reported_when_stats_fail_to_save() {
        let mut p = Persistence::new(Box::new(RejectKeyStore {
            inner: signed_in_ana(),
            key: USERS_KEY,
        }));

        let record = p.record_game(700, 5.0).unwrap().unwrap();

        assert!(record.new_record);
        assert_eq!(record.rank, 1);
        assert_eq!(p.best_of("local_ana_1").unwrap(), Some(700));
        assert_eq!(p.current_stats().unwrap().total_games, 0);
    }
}
