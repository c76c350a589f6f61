use crate::config::JumpConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScarePhase {
    #[default]
    Idle,
    /// Music ducks, scare sound starts, screen tints.
    PreWarning,
    /// Full-screen overlay animation.
    Active,
}

impl ScarePhase {
    pub fn as_f32(self) -> f32 {
        match self {
            ScarePhase::Idle => 0.0,
            ScarePhase::PreWarning => 1.0,
            ScarePhase::Active => 2.0,
        }
    }
}

/// Transitions taken during one `update`. Several can happen in the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScareCues {
    /// Idle -> PreWarning: duck the music, start the scare sound.
    pub began: bool,
    /// PreWarning -> Active.
    pub activated: bool,
    /// Active -> Idle: stop the scare sound, bring the music back.
    pub finished: bool,
}

/// Score-keyed two-phase jump scare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpScare {
    pub phase: ScarePhase,
    /// Set on activation, cleared when the cycle completes. Blocks re-entry mid-cycle.
    pub triggered: bool,
    /// Frames spent in PreWarning.
    pub pre_timer: f32,
    /// Frames spent in Active.
    pub timer: f32,
    pub next_trigger_score: u32,
    pub opacity: f32,
    pub scale: f32,
}

impl JumpScare {
    pub fn new(cfg: &JumpConfig) -> Self {
        Self {
            phase: ScarePhase::Idle,
            triggered: false,
            pre_timer: 0.0,
            timer: 0.0,
            next_trigger_score: cfg.scare_trigger_score,
            opacity: 0.0,
            scale: 1.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase != ScarePhase::Idle
    }

    /// Screen tint alpha during the pre-warning, 0 otherwise.
    pub fn tint(&self) -> f32 {
        match self.phase {
            ScarePhase::PreWarning => 0.1 + (self.pre_timer * 0.1).sin() * 0.05,
            _ => 0.0,
        }
    }

    /// Advance by `frames` (60 Hz frame equivalents) at the given score.
    pub fn update(&mut self, score: u32, frames: f32, cfg: &JumpConfig) -> ScareCues {
        let mut cues = ScareCues::default();
        let target = self.next_trigger_score;
        let warn_at = target.saturating_sub(cfg.scare_lead);

        if !self.triggered && self.phase == ScarePhase::Idle && score >= warn_at {
            log::info!("jumpscare: pre-warning for mark {}", target);
            self.phase = ScarePhase::PreWarning;
            self.pre_timer = 0.0;
            cues.began = true;
        }

        if self.phase == ScarePhase::PreWarning {
            self.pre_timer += frames;
            if self.pre_timer >= cfg.scare_pre_frames || score >= target {
                log::info!("jumpscare: active at mark {}", target);
                self.phase = ScarePhase::Active;
                self.triggered = true;
                self.timer = 0.0;
                cues.activated = true;
            }
        }

        if self.phase == ScarePhase::Active {
            self.timer += frames;
            let t = self.timer;
            let fade = cfg.scare_fade_frames;
            let duration = cfg.scare_active_frames;
            if t < fade {
                self.opacity = t / fade;
                self.scale = 1.0 + t / (fade / 2.0);
            } else if t < duration - fade {
                self.opacity = 1.0;
                self.scale = 3.0 + (t * 0.1).sin() * 0.2;
            } else if t < duration {
                self.opacity = (duration - t) / fade;
            } else {
                self.next_trigger_score += cfg.scare_increment;
                log::info!("jumpscare: done, next mark {}", self.next_trigger_score);
                self.reset_cycle();
                cues.finished = true;
            }
        }

        cues
    }

    /// Force-stop a running cycle (game over). Returns whether anything was running.
    /// The trigger score does not advance.
    pub fn interrupt(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        log::info!("jumpscare: interrupted in {:?}", self.phase);
        self.reset_cycle();
        true
    }

    fn reset_cycle(&mut self) {
        self.phase = ScarePhase::Idle;
        self.triggered = false;
        self.pre_timer = 0.0;
        self.timer = 0.0;
        self.opacity = 0.0;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(js: &mut JumpScare, score: u32, ticks: usize, cfg: &JumpConfig) -> ScareCues {
        let mut all = ScareCues::default();
        for _ in 0..ticks {
            let c = js.update(score, 1.0, cfg);
            all.began |= c.began;
            all.activated |= c.activated;
            all.finished |= c.finished;
        }
        all
    }

    #[test]
    fn stays_idle_below_warning_score() {
        let cfg = JumpConfig::default();
        let mut js = JumpScare::new(&cfg);
        assert_eq!(js.update(4799, 1.0, &cfg), ScareCues::default());
        assert_eq!(js.phase, ScarePhase::Idle);
    }

    #[test]
    fn enters_pre_warning_at_4800() {
        let cfg = JumpConfig::default();
        let mut js = JumpScare::new(&cfg);
        let cues = js.update(4800, 1.0, &cfg);
        assert!(cues.began);
        assert!(!cues.activated);
        assert_eq!(js.phase, ScarePhase::PreWarning);
        assert_eq!(js.pre_timer, 1.0);
        assert!(js.tint() > 0.0);
    }

    #[test]
    fn pre_warning_times_out_into_active() {
        let cfg = JumpConfig::default();
        let mut js = JumpScare::new(&cfg);
        let cues = run(&mut js, 4850, 179, &cfg);
        assert!(cues.began && !cues.activated);
        let cues = js.update(4850, 1.0, &cfg);
        assert!(cues.activated);
        assert!(js.triggered);
        assert_eq!(js.phase, ScarePhase::Active);
    }

    #[test]
    fn reaching_the_mark_cuts_pre_warning_short() {
        let cfg = JumpConfig::default();
        let mut js = JumpScare::new(&cfg);
        js.update(4900, 1.0, &cfg);
        let cues = js.update(5000, 1.0, &cfg);
        assert!(cues.activated);
    }

    #[test]
    fn active_animation_bands() {
        let cfg = JumpConfig::default();
        let mut js = JumpScare::new(&cfg);
        js.update(5000, 1.0, &cfg); // begin + activate, timer = 1
        assert_eq!(js.phase, ScarePhase::Active);
        assert!((js.opacity - 1.0 / 30.0).abs() < 1e-6);
        assert!((js.scale - (1.0 + 1.0 / 15.0)).abs() < 1e-6);

        run(&mut js, 5000, 49, &cfg); // timer = 50
        assert_eq!(js.opacity, 1.0);
        assert!(js.scale >= 2.8 && js.scale <= 3.2);

        run(&mut js, 5000, 50, &cfg); // timer = 100
        assert!((js.opacity - 20.0 / 30.0).abs() < 1e-5);
    }

    #[test]
    fn full_cycle_advances_trigger_and_rearms() {
        let cfg = JumpConfig::default();
        let mut js = JumpScare::new(&cfg);
        let cues = run(&mut js, 5000, 120, &cfg);
        assert!(cues.began && cues.activated && cues.finished);
        assert_eq!(js.phase, ScarePhase::Idle);
        assert!(!js.triggered);
        assert_eq!(js.next_trigger_score, 10_000);
        assert_eq!(js.opacity, 0.0);

        // Score still at 5000: far below the next warning mark.
        assert_eq!(js.update(5000, 1.0, &cfg), ScareCues::default());
        assert!(js.update(9800, 1.0, &cfg).began);
    }

    #[test]
    fn never_reenters_pre_warning_while_triggered() {
        let cfg = JumpConfig::default();
        let mut js = JumpScare::new(&cfg);
        for _ in 0..119 {
            let cues = js.update(5000, 1.0, &cfg);
            if js.triggered {
                assert!(!cues.began || cues.activated);
                assert_ne!(js.phase, ScarePhase::PreWarning);
            }
        }
    }

    #[test]
    fn interrupt_resets_without_advancing() {
        let cfg = JumpConfig::default();
        let mut js = JumpScare::new(&cfg);
        js.update(4800, 1.0, &cfg);
        assert!(js.interrupt());
        assert_eq!(js.phase, ScarePhase::Idle);
        assert_eq!(js.next_trigger_score, 5000);
        assert!(!js.interrupt());
    }
}
