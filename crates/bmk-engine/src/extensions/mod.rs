// extensions/mod.rs
//
// Helpers a game owns and advances itself.

pub mod tween;

pub use tween::{Fader, Tween, lerp};
