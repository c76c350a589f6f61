use bmk_engine::{
    EngineContext, FrameClock, FrameData, Game, GameConfig, HudBuffer, InputEvent, InputQueue,
    ProtocolLayout, RenderBuffer, RenderContext, RenderMode, Renderer, Viewport,
};

use crate::renderer::SharedBufferRenderer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    hud: HudBuffer,
    clock: FrameClock,
    viewport: Viewport,
    config: GameConfig,
    renderer: SharedBufferRenderer,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G, mode: RenderMode) -> Self {
        let config = game.config();
        let clock = FrameClock::new(config.fixed_step_ms, config.max_frame_scale, config.stall_ms);
        let layout = ProtocolLayout::from_config(&config);
        let viewport = Viewport::new(config.world_width, config.world_height);
        let renderer =
            SharedBufferRenderer::new(mode, layout, viewport.display_width, viewport.display_height);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            hud: HudBuffer::new(),
            clock,
            viewport,
            config,
            renderer,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        log::info!(
            "runner: {} renderer, playfield {}x{}",
            self.renderer.backend(),
            self.config.world_width,
            self.config.world_height
        );
    }

    /// Push an input event into the queue.
    /// Pointer coordinates arrive in display pixels and are converted to playfield units.
    pub fn push_input(&mut self, event: InputEvent) {
        let event = match event {
            InputEvent::PointerDown { x, y } => {
                let (x, y) = self.viewport.to_world(x, y);
                InputEvent::PointerDown { x, y }
            }
            InputEvent::PointerUp { x, y } => {
                let (x, y) = self.viewport.to_world(x, y);
                InputEvent::PointerUp { x, y }
            }
            other => other,
        };
        self.input.push(event);
    }

    /// Fit the playfield into a new host window size.
    pub fn resize(&mut self, window_width: f32, window_height: f32) {
        self.viewport.resize(window_width, window_height);
        self.renderer
            .resize(self.viewport.display_width, self.viewport.display_height);
    }

    /// Run one frame: update the game once with the clamped frame timing, then publish.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.ctx.frame = self.clock.advance(now_ms);
        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.clear();

        self.render_buffer.clear();
        self.hud.clear();
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                hud: &mut self.hud,
            };
            self.game.render(&mut render_ctx);
        }

        let frame = FrameData {
            frame: self.clock.frames(),
            instances: &self.render_buffer.instances,
            focus: self.render_buffer.focus.as_ref(),
            hud: self.hud.as_slice(),
            sounds: &self.ctx.sounds,
            events: &self.ctx.events,
            world_width: self.config.world_width,
            world_height: self.config.world_height,
        };
        self.renderer.draw(&frame);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    // ---- Accessors for shared-buffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.renderer.buffer_ptr()
    }

    pub fn buffer(&self) -> &[f32] {
        self.renderer.buffer()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.renderer.layout().total_floats() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn render_mode(&self) -> RenderMode {
        self.renderer.mode()
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.renderer.layout().max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.renderer.layout().max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.renderer.layout().max_events as u32
    }
}
