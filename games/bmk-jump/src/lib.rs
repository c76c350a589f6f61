use wasm_bindgen::prelude::*;
use bmk_engine::*;

pub mod audio;
pub mod config;
pub mod enemy;
pub mod geometry;
pub mod jumpscare;
pub mod persist;
pub mod physics;
pub mod render;
pub mod scoring;
pub mod session;
pub mod world;

pub mod game;
use game::BmkJump;

bmk_web::export_game!(BmkJump, "bmk-jump");

// ---- Accounts and leaderboard (called from menu screens, never per frame) ----

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Returns the new user's uid.
#[wasm_bindgen]
pub fn account_register(username: &str, password: &str, invited_by: Option<String>) -> Result<String, JsValue> {
    with_runner(|r| r.game_mut().register(username, password, invited_by.as_deref()))
        .map(|user| user.uid)
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn account_sign_in(username: &str, password: &str) -> Result<String, JsValue> {
    with_runner(|r| r.game_mut().sign_in(username, password))
        .map(|user| user.uid)
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn account_sign_out() -> Result<(), JsValue> {
    with_runner(|r| r.game_mut().sign_out()).map_err(js_error)
}

/// Username of the signed-in user, if any.
#[wasm_bindgen]
pub fn account_current_user() -> Option<String> {
    with_runner(|r| r.game().current_user()).map(|user| user.username)
}

/// Top `limit` rows as a JSON array.
#[wasm_bindgen]
pub fn leaderboard_json(limit: u32) -> Result<String, JsValue> {
    let rows = with_runner(|r| r.game().leaderboard(limit as usize)).map_err(js_error)?;
    serde_json::to_string(&rows).map_err(js_error)
}

/// Signed-in user's stats as a JSON object.
#[wasm_bindgen]
pub fn profile_json() -> Result<String, JsValue> {
    let stats = with_runner(|r| r.game().profile()).map_err(js_error)?;
    serde_json::to_string(&stats).map_err(js_error)
}
