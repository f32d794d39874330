//! Simulation builder and windowed driver.
//!
//! `Simulation` configures a scatter field, then `run` opens a window and
//! drives it: one `tick` + `render` per `RedrawRequested`, pointer clicks
//! spread at the cursor, scheduled emitters fire as the clock passes them.
//! The loop is owned by the host window: it stops when the window closes
//! (or on Escape), so nothing keeps scheduling itself after disposal.
//!
//! Hotkeys: Space pauses, M toggles the mute flag, S saves a PNG snapshot,
//! Escape quits.
//!
//! # Example
//!
//! ```ignore
//! Simulation::new()
//!     .with_title("Blessings")
//!     .with_size(1280, 720)
//!     .with_emitter(Emitter::entrance(1280.0, 720.0))
//!     .run()?;
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::audio::{AudioSettings, Chime, NullChime};
use crate::config::FieldConfig;
use crate::emitter::{Emitter, EmitterQueue};
use crate::error::SimulationError;
use crate::field::ParticleField;
use crate::input::{Input, Key};
use crate::lifecycle::Lifecycle;
use crate::time::Time;
use crate::window::GpuState;

/// Where the S hotkey writes its snapshot.
const SNAPSHOT_PATH: &str = "kumkum-snapshot.png";

/// A scatter simulation builder.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Simulation {
    width: u32,
    height: u32,
    title: String,
    config: FieldConfig,
    lifecycle: Lifecycle,
    emitters: Vec<Emitter>,
    audio: AudioSettings,
    chime: Option<Box<dyn Chime>>,
}

impl Simulation {
    /// Create a simulation with default settings.
    pub fn new() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Kumkum - scatter engine".to_string(),
            config: FieldConfig::default(),
            lifecycle: Lifecycle::default(),
            emitters: Vec::new(),
            audio: AudioSettings::new(),
            chime: None,
        }
    }

    /// Set the window (and field) size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the spawn configuration.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the lifecycle thresholds.
    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Add a programmatic spawn trigger.
    pub fn with_emitter(mut self, emitter: Emitter) -> Self {
        self.emitters.push(emitter);
        self
    }

    /// Share audio preferences with the host. Keep a clone of the handle
    /// to mute the spread cue from outside.
    pub fn with_audio(mut self, audio: AudioSettings) -> Self {
        self.audio = audio;
        self
    }

    /// Install the sound cue played on click spreads.
    pub fn with_chime(mut self, chime: Box<dyn Chime>) -> Self {
        self.chime = Some(chime);
        self
    }

    /// Open the window and run until it closes. Blocks.
    pub fn run(self) -> Result<(), SimulationError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    field: ParticleField,
    time: Time,
    input: Input,
    emitters: EmitterQueue,
    audio: AudioSettings,
    chime: Box<dyn Chime>,
    title: String,
    width: u32,
    height: u32,
}

impl App {
    fn new(sim: Simulation) -> Self {
        let field = ParticleField::new(sim.width, sim.height)
            .with_config(sim.config)
            .with_lifecycle(sim.lifecycle);

        Self {
            window: None,
            gpu: None,
            field,
            time: Time::new(),
            input: Input::new(),
            emitters: EmitterQueue::new(sim.emitters),
            audio: sim.audio,
            chime: sim.chime.unwrap_or_else(|| Box::new(NullChime)),
            title: sim.title,
            width: sim.width,
            height: sim.height,
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        // User spreads first: they ring the chime unless muted.
        for click in self.input.take_clicks() {
            self.field.spread(click.x, click.y);
            if !self.audio.is_muted() {
                self.chime.ring();
            }
        }

        if self.input.key_pressed(Key::Escape) {
            event_loop.exit();
        }
        if self.input.key_pressed(Key::Space) {
            self.time.toggle_pause();
        }
        if self.input.key_pressed(Key::M) {
            self.audio.toggle();
        }
        if self.input.key_pressed(Key::S) {
            if let Err(e) = self.field.snapshot(SNAPSHOT_PATH) {
                eprintln!("Snapshot failed: {}", e);
            }
        }
        self.input.end_frame();

        self.time.update();

        // Scheduled spreads are silent; only pointer clicks ring.
        if !self.emitters.is_empty() {
            for position in self.emitters.drain_due(self.time.elapsed_duration()) {
                self.field.spread(position.x, position.y);
            }
        }

        // All physics for the frame completes before any rendering.
        if !self.time.is_paused() {
            self.field.tick(&self.time);
        }
        self.field.render();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.width, self.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                eprintln!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        // A missing GPU degrades to a headless run instead of aborting;
        // the field keeps accepting spreads either way.
        self.gpu = match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu) => Some(gpu),
            Err(e) => {
                eprintln!("GPU unavailable, running without rendering: {}", e);
                None
            }
        };

        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                // Minimized windows report a zero size; keep the field as
                // it was until something is visible again.
                if size.width > 0 && size.height > 0 {
                    if let Some(gpu) = &mut self.gpu {
                        gpu.resize(size);
                    }
                    self.field.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);

                if let Some(gpu) = &mut self.gpu {
                    if let Some(canvas) = self.field.canvas() {
                        match gpu.present(canvas) {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost) => {
                                let size = winit::dpi::PhysicalSize {
                                    width: gpu.config.width,
                                    height: gpu.config.height,
                                };
                                gpu.resize(size);
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                            Err(e) => eprintln!("Render error: {:?}", e),
                        }
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            other => self.input.process_window_event(&other),
        }
    }
}
