use serde::{Deserialize, Serialize};

use super::{PersistError, Persistence};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Per-account play statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub total_games: u32,
    pub best_score: u32,
    pub total_score: u64,
    pub average_score: u32,
    /// Games finished on the UTC day of `last_game_ms`.
    pub games_played_today: u32,
    pub last_game_ms: Option<f64>,
    pub current_rank: u32,
}

fn utc_day(ms: f64) -> i64 {
    (ms / MS_PER_DAY).floor() as i64
}

impl PlayerStats {
    /// Fold one finished game into the totals.
    pub fn record(&mut self, score: u32, at_ms: f64) {
        self.total_games += 1;
        self.total_score += u64::from(score);
        self.best_score = self.best_score.max(score);
        self.average_score = (self.total_score as f64 / f64::from(self.total_games)).round() as u32;

        let same_day = self.last_game_ms.is_some_and(|last| utc_day(last) == utc_day(at_ms));
        self.games_played_today = if same_day { self.games_played_today + 1 } else { 1 };
        self.last_game_ms = Some(at_ms);
    }
}

impl Persistence {
    /// Stats of the signed-in user.
    pub fn current_stats(&self) -> Result<PlayerStats, PersistError> {
        let user = self.current_user().ok_or(PersistError::NotSignedIn)?;
        self.account(&user.username)?
            .map(|a| a.stats)
            .ok_or(PersistError::UserNotFound(user.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::test_support::memory;

    #[test]
    fn totals_and_average() {
        let mut s = PlayerStats::default();
        s.record(100, 0.0);
        s.record(250, 1.0);
        assert_eq!(s.total_games, 2);
        assert_eq!(s.total_score, 350);
        assert_eq!(s.best_score, 250);
        assert_eq!(s.average_score, 175);
        s.record(0, 2.0);
        assert_eq!(s.average_score, 117);
    }

    #[test]
    fn daily_counter_resets_on_new_utc_day() {
        let mut s = PlayerStats::default();
        s.record(10, MS_PER_DAY * 3.0 + 1_000.0);
        s.record(10, MS_PER_DAY * 3.0 + 50_000.0);
        assert_eq!(s.games_played_today, 2);
        s.record(10, MS_PER_DAY * 4.0 + 5.0);
        assert_eq!(s.games_played_today, 1);
        assert_eq!(s.total_games, 3);
    }

    #[test]
    fn stats_need_a_session() {
        let p = memory();
        assert!(matches!(p.current_stats(), Err(PersistError::NotSignedIn)));
    }
}
