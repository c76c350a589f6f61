use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::accounts::User;
use super::{PersistError, Persistence, LEADERBOARD_KEY};
use bmk_engine::storage::{read_json, write_json};

/// One row per user: their best score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub uid: String,
    pub username: String,
    pub score: u32,
    pub at_ms: f64,
}

/// Higher score first; on a tie the earlier result ranks higher.
fn by_rank(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.at_ms.partial_cmp(&b.at_ms).unwrap_or(Ordering::Equal))
}

impl Persistence {
    /// Store `score` if it beats the user's row. Returns whether the row changed.
    pub fn submit(&mut self, user: &User, score: u32, at_ms: f64) -> Result<bool, PersistError> {
        let mut rows = self.rows()?;
        match rows.iter_mut().find(|r| r.uid == user.uid) {
            Some(row) if score > row.score => {
                row.score = score;
                row.at_ms = at_ms;
            }
            Some(_) => return Ok(false),
            None => rows.push(LeaderboardEntry {
                uid: user.uid.clone(),
                username: user.username.clone(),
                score,
                at_ms,
            }),
        }
        self.save_rows(&rows)?;
        log::debug!("leaderboard: {} now at {}", user.username, score);
        Ok(true)
    }

    /// Give a fresh account a zero row so it shows up in rankings.
    pub fn ensure_row(&mut self, user: &User, at_ms: f64) -> Result<(), PersistError> {
        let mut rows = self.rows()?;
        if rows.iter().any(|r| r.uid == user.uid) {
            return Ok(());
        }
        rows.push(LeaderboardEntry {
            uid: user.uid.clone(),
            username: user.username.clone(),
            score: 0,
            at_ms,
        });
        self.save_rows(&rows)
    }

    /// Best `limit` rows in rank order.
    pub fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, PersistError> {
        let mut rows = self.rows()?;
        rows.sort_by(by_rank);
        rows.truncate(limit);
        Ok(rows)
    }

    /// 1-based position of `uid`, if it has a row.
    pub fn rank_of(&self, uid: &str) -> Result<Option<usize>, PersistError> {
        let mut rows = self.rows()?;
        rows.sort_by(by_rank);
        Ok(rows.iter().position(|r| r.uid == uid).map(|i| i + 1))
    }

    pub fn best_of(&self, uid: &str) -> Result<Option<u32>, PersistError> {
        Ok(self.rows()?.iter().find(|r| r.uid == uid).map(|r| r.score))
    }

    fn rows(&self) -> Result<Vec<LeaderboardEntry>, PersistError> {
        Ok(read_json(self.store.as_ref(), LEADERBOARD_KEY)?.unwrap_or_default())
    }

    fn save_rows(&mut self, rows: &[LeaderboardEntry]) -> Result<(), PersistError> {
        write_json(self.store.as_mut(), LEADERBOARD_KEY, &rows)?;
        Ok(())
    }
}
