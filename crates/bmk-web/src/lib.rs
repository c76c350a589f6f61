pub mod renderer;
pub mod runner;
pub mod storage;

pub use renderer::SharedBufferRenderer;
pub use runner::GameRunner;
pub use storage::LocalStorage;

/// Wall-clock milliseconds since the Unix epoch, for persisted timestamps.
/// Frame timing uses the `requestAnimationFrame` clock instead.
pub fn epoch_ms() -> f64 {
    js_sys::Date::now()
}

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function (usable by the game's own extra exports)
/// - wasm-bindgen exports for init, tick, input, resize and buffer accessors
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use bmk_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// bmk_web::export_game!(MyGame, "my-game");
/// ```
///
/// The game type must provide `fn new() -> Self`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        /// `render_mode`: 0 = 2D canvas, 1 = 3D overlay.
        #[wasm_bindgen]
        pub fn game_init(render_mode: u32) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let mode = bmk_engine::RenderMode::from_u32(render_mode);
            let runner = $crate::GameRunner::new(game, mode);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        /// `now_ms`: the `requestAnimationFrame` timestamp.
        #[wasm_bindgen]
        pub fn game_tick(now_ms: f64) {
            with_runner(|r| r.tick(now_ms));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_tilt(gamma: f32) {
            with_runner(|r| r.push_input(InputEvent::Tilt { gamma }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn game_resize(window_width: f32, window_height: f32) {
            with_runner(|r| r.resize(window_width, window_height));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_buffer_ptr() -> *const f32 {
            with_runner(|r| r.buffer_ptr())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}
