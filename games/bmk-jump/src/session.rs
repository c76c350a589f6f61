use bmk_engine::Countdown;

/// Where the current game is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// No game started yet.
    #[default]
    Menu,
    Playing,
    /// Frozen; the end-of-game countdown is running.
    GameOver,
    /// End-of-game handling done, waiting for a new game.
    Finished,
}

impl GamePhase {
    pub fn as_f32(self) -> f32 {
        match self {
            GamePhase::Menu => 0.0,
            GamePhase::Playing => 1.0,
            GamePhase::GameOver => 2.0,
            GamePhase::Finished => 3.0,
        }
    }
}

/// Phase plus the one-shot game-over latch and its delayed handler.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lifecycle {
    phase: GamePhase,
    latched: bool,
    end_timer: Countdown,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// True from the moment the game ended until the next `start`.
    pub fn is_over(&self) -> bool {
        self.latched
    }

    /// Begin a game. Clears the latch and discards any pending end-of-game handler.
    pub fn start(&mut self) {
        self.phase = GamePhase::Playing;
        self.latched = false;
        self.end_timer.cancel();
    }

    /// End the running game. Only the first call per game does anything.
    pub fn trigger_game_over(&mut self, delay_ms: f32) -> bool {
        if self.latched || self.phase != GamePhase::Playing {
            return false;
        }
        self.latched = true;
        self.phase = GamePhase::GameOver;
        self.end_timer.start(delay_ms);
        true
    }

    /// Advance the end-of-game delay. Returns `true` on the tick the handler is due.
    pub fn tick(&mut self, delta_ms: f32) -> bool {
        self.end_timer.tick(delta_ms) && self.phase == GamePhase::GameOver
    }

    /// Move GameOver to Finished. `false` if the game was restarted or already finished.
    pub fn finish(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::Finished;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_is_one_shot() {
        let mut l = Lifecycle::new();
        l.start();
        assert!(l.trigger_game_over(1000.0));
        assert!(!l.trigger_game_over(1000.0));
        assert!(l.is_over());
        assert_eq!(l.phase(), GamePhase::GameOver);
    }

    #[test]
    fn menu_cannot_end() {
        let mut l = Lifecycle::new();
        assert!(!l.trigger_game_over(1000.0));
        assert_eq!(l.phase(), GamePhase::Menu);
    }

    #[test]
    fn handler_fires_once_after_delay() {
        let mut l = Lifecycle::new();
        l.start();
        l.trigger_game_over(1000.0);
        let mut fired = 0;
        for _ in 0..120 {
            if l.tick(1000.0 / 60.0) {
                fired += 1;
                assert!(l.finish());
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(l.phase(), GamePhase::Finished);
        assert!(!l.finish());
    }

    #[test]
    fn restart_discards_pending_handler() {
        let mut l = Lifecycle::new();
        l.start();
        l.trigger_game_over(1000.0);
        l.tick(500.0);
        l.start();
        assert!(!l.is_over());
        assert!(!l.tick(1000.0));
        assert!(l.is_playing());
    }
}
