use bmk_engine::{Countdown, Fader, SoundEvent};

use crate::config::JumpConfig;

// Sound event ids (Rust → host audio layer)
pub const SOUND_PLAY_MUSIC: SoundEvent = SoundEvent(1);
pub const SOUND_PAUSE_MUSIC: SoundEvent = SoundEvent(2);
/// Rewind the music track to the start (does not change play state).
pub const SOUND_REWIND_MUSIC: SoundEvent = SoundEvent(3);
pub const SOUND_PLAY_SCARE: SoundEvent = SoundEvent(4);
/// Pause and rewind the scare sound.
pub const SOUND_STOP_SCARE: SoundEvent = SoundEvent(5);

/// Background music and scare sound control.
///
/// The host owns the actual media elements; the mixer decides what they should
/// do and publishes the music volume every frame.
#[derive(Debug, Clone)]
pub struct Mixer {
    music: Fader,
    base_volume: f32,
    ducked_volume: f32,
    fade_rate_per_ms: f32,
    /// Volume to come back to after a duck.
    saved_volume: f32,
    music_playing: bool,
    user_interacted: bool,
    retry: Countdown,
    retry_delay_ms: f32,
    retry_used: bool,
    pending: Vec<SoundEvent>,
}

impl Mixer {
    pub fn new(cfg: &JumpConfig) -> Self {
        Self {
            music: Fader::new(cfg.music_volume),
            base_volume: cfg.music_volume,
            ducked_volume: cfg.ducked_volume,
            fade_rate_per_ms: cfg.fade_rate_per_ms,
            saved_volume: cfg.music_volume,
            music_playing: false,
            user_interacted: false,
            retry: Countdown::idle(),
            retry_delay_ms: cfg.audio_retry_ms,
            retry_used: false,
            pending: Vec::new(),
        }
    }

    pub fn volume(&self) -> f32 {
        self.music.value()
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn user_interacted(&self) -> bool {
        self.user_interacted
    }

    /// A key press or touch. The first one unlocks playback and starts the music.
    pub fn on_gesture(&mut self) {
        if !self.user_interacted {
            self.user_interacted = true;
            self.request_play();
        }
    }

    /// Music button: pause if playing, otherwise try to play.
    pub fn toggle_music(&mut self) {
        self.user_interacted = true;
        if self.music_playing {
            self.music_playing = false;
            self.retry.cancel();
            self.pending.push(SOUND_PAUSE_MUSIC);
        } else {
            self.request_play();
        }
    }

    /// Ask the host to start the music. Each request gets one retry on failure.
    pub fn request_play(&mut self) {
        if !self.user_interacted || self.music_playing {
            return;
        }
        self.retry_used = false;
        self.retry.cancel();
        if !self.pending.contains(&SOUND_PLAY_MUSIC) {
            self.pending.push(SOUND_PLAY_MUSIC);
        }
    }

    /// Host confirmed playback started.
    pub fn on_music_started(&mut self) {
        self.music_playing = true;
        self.retry.cancel();
    }

    /// Host reported that playback was rejected.
    pub fn on_music_failed(&mut self) {
        if self.music_playing {
            return;
        }
        if self.retry_used {
            log::warn!("audio: music playback failed again, giving up");
            return;
        }
        log::warn!("audio: music playback failed, retrying in {}ms", self.retry_delay_ms);
        self.retry_used = true;
        self.retry.start(self.retry_delay_ms);
    }

    /// Save the current volume and fade down to the ducked level.
    pub fn duck(&mut self) {
        self.saved_volume = self.music.value();
        self.music.fade_to(self.ducked_volume, self.fade_rate_per_ms);
    }

    /// Fade back to the volume saved by `duck`.
    pub fn restore(&mut self) {
        self.music.fade_to(self.saved_volume, self.fade_rate_per_ms);
    }

    /// Jump back to the saved volume, cancelling any fade.
    pub fn restore_now(&mut self) {
        self.music.snap(self.saved_volume);
    }

    pub fn play_scare(&mut self) {
        self.pending.push(SOUND_PLAY_SCARE);
    }

    pub fn stop_scare(&mut self) {
        self.pending.push(SOUND_STOP_SCARE);
    }

    /// New game: base volume, silent scare channel, music rewound and (re)started.
    pub fn reset_for_new_game(&mut self) {
        self.saved_volume = self.base_volume;
        self.music.snap(self.base_volume);
        self.pending.push(SOUND_STOP_SCARE);
        if self.user_interacted {
            self.pending.push(SOUND_REWIND_MUSIC);
            self.request_play();
        }
    }

    /// Advance fades and the retry countdown.
    pub fn tick(&mut self, delta_ms: f32) {
        self.music.tick(delta_ms);
        if self.retry.tick(delta_ms) && !self.music_playing {
            log::info!("audio: retrying music playback");
            self.pending.push(SOUND_PLAY_MUSIC);
        }
    }

    /// Sound requests accumulated since the last call.
    pub fn take_sounds(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.pending)
    }
}
