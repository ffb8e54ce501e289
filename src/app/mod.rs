use crate::config::{AppConfig, AppConfigOverrides};
use crate::loader::{GltfLoader, Loader};
use crate::overlay::{self, Overlay, OverlayActions, OverlayLayout};
use crate::renderer::{self, WindowSurface};
use crate::sample_set::SampleSetQueue;
use crate::stopwatch::Stopwatch;

use anyhow::{Context as _, Result};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};

// egui
use egui::Context as EguiCtx;
use egui_wgpu::{Renderer as EguiRenderer, RendererOptions, ScreenDescriptor};
use egui_winit::State as EguiWinit;

pub async fn run() -> Result<()> {
    run_with_overrides(AppConfigOverrides::default()).await
}

pub async fn run_with_overrides(overrides: AppConfigOverrides) -> Result<()> {
    let mut config = AppConfig::load_or_default("config/app.json");
    if !overrides.is_empty() {
        info!("CLI overrides applied: {:?}", overrides.applied_fields());
        config.apply_overrides(&overrides);
    }
    let event_loop = EventLoop::new().context("Failed to create winit event loop")?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app).context("Event loop execution failed")?;
    Ok(())
}

pub struct App {
    surface: WindowSurface,
    egui_ctx: EguiCtx,
    egui_winit: Option<EguiWinit>,
    egui_renderer: Option<EguiRenderer>,
    egui_screen: Option<ScreenDescriptor>,
    overlay: Option<Overlay>,
    stopwatch: Stopwatch,
    loader: Box<dyn Loader>,
    population: SampleSetQueue,
    start_url: Option<String>,
    config: AppConfig,
    styles_applied: bool,
    should_close: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let population = SampleSetQueue::new(config.sample_sets.clone());
        let start_url = config.start_url.clone();
        Self {
            surface: WindowSurface::new(&config.window),
            egui_ctx: EguiCtx::default(),
            egui_winit: None,
            egui_renderer: None,
            egui_screen: None,
            overlay: None,
            stopwatch: Stopwatch::new(),
            loader: Box::new(GltfLoader::new()),
            population,
            start_url,
            config,
            styles_applied: false,
            should_close: false,
        }
    }

    fn ensure_overlay(&mut self) {
        if self.overlay.is_some() {
            return;
        }
        let dpi = self.surface.device_dpi();
        let factor = overlay::scale_factor(dpi);
        let layout = OverlayLayout::scaled(&self.config.overlay, factor);
        self.stopwatch.set_pos_x(layout.list_width);
        info!("UI scale factor {factor} (device dpi {dpi:.0})");
        self.overlay = Some(Overlay::new(self.config.platform, layout));
    }

    fn apply_styles_once(&mut self) {
        if self.styles_applied {
            return;
        }
        if let Some(overlay) = &self.overlay {
            overlay::apply_text_styles(&self.egui_ctx, overlay.layout());
            self.styles_applied = true;
        }
    }

    fn pump_population(&mut self) {
        let Some(result) = self.population.poll() else {
            return;
        };
        match result {
            Ok(set) => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.append_sample_set(&set);
                }
            }
            Err(err) => warn!("Sample set skipped: {err:?}"),
        }
    }

    fn pump_loader_events(&mut self) {
        let events = self.loader.poll_events();
        if let Some(overlay) = self.overlay.as_mut() {
            for event in &events {
                info!("Loader event: {event}");
                overlay.handle_event(event, &mut self.stopwatch);
            }
        }
    }

    fn run_overlay_ui(&mut self, raw_input: egui::RawInput) -> (egui::FullOutput, OverlayActions) {
        let mut actions = OverlayActions::default();
        let Self { egui_ctx, overlay, stopwatch, .. } = self;
        let full_output = egui_ctx.run(raw_input, |ctx| {
            if let Some(overlay) = overlay.as_mut() {
                actions = overlay.ui(ctx);
            }
            stopwatch.ui(ctx);
        });
        (full_output, actions)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(err) = self.surface.ensure_window(event_loop) {
            error!("Window initialization error: {err:?}");
            self.should_close = true;
            return;
        }
        self.ensure_overlay();
        self.apply_styles_once();

        if self.egui_winit.is_none() {
            if let Some(window) = self.surface.window() {
                let state = EguiWinit::new(
                    self.egui_ctx.clone(),
                    egui::ViewportId::ROOT,
                    window,
                    Some(self.surface.pixels_per_point()),
                    window.theme(),
                    None,
                );
                self.egui_winit = Some(state);
            }
        }

        let egui_renderer = match (self.surface.device(), self.surface.surface_format()) {
            (Ok(device), Ok(format)) => EguiRenderer::new(device, format, RendererOptions::default()),
            (Err(err), _) | (_, Err(err)) => {
                error!("Unable to initialize egui renderer: {err:?}");
                self.should_close = true;
                return;
            }
        };
        self.egui_renderer = Some(egui_renderer);
        let size = self.surface.size();
        self.egui_screen = Some(ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: self.surface.pixels_per_point(),
        });
    }

    fn window_event(&mut self, _el: &ActiveEventLoop, id: winit::window::WindowId, event: WindowEvent) {
        // egui wants the events too
        let mut consumed = false;
        if let (Some(window), Some(state)) = (self.surface.window(), self.egui_winit.as_mut()) {
            if id == window.id() {
                let resp = state.on_window_event(window, &event);
                if resp.consumed {
                    consumed = true;
                }
            }
        }
        if consumed {
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.should_close = true,
            WindowEvent::Resized(size) => {
                self.surface.resize(*size);
                if let Some(sd) = &mut self.egui_screen {
                    sd.size_in_pixels = [size.width, size.height];
                    sd.pixels_per_point = self.surface.pixels_per_point();
                }
            }
            WindowEvent::KeyboardInput { event: KeyEvent { logical_key, state, .. }, .. } => {
                if let Key::Named(NamedKey::Escape) = logical_key {
                    if *state == ElementState::Pressed {
                        self.should_close = true;
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_close {
            event_loop.exit();
            return;
        }

        self.pump_population();

        if let Some(url) = self.start_url.take() {
            info!("Load request: {url}");
            self.loader.load_url(&url);
        }
        self.pump_loader_events();

        let raw_input = {
            let Some(window) = self.surface.window() else {
                return;
            };
            let Some(state) = self.egui_winit.as_mut() else {
                return;
            };
            state.take_egui_input(window)
        };
        self.egui_ctx.set_pixels_per_point(self.surface.pixels_per_point());

        let (full_output, actions) = self.run_overlay_ui(raw_input);
        if let Some(locator) = actions.load_request {
            info!("Load request: {locator}");
            self.loader.load_url(&locator);
        }

        let egui::FullOutput { platform_output, textures_delta, shapes, .. } = full_output;
        if let (Some(window), Some(state)) = (self.surface.window(), self.egui_winit.as_mut()) {
            state.handle_platform_output(window, platform_output);
        }

        let frame = match self.surface.acquire_surface_frame() {
            Ok(frame) => frame,
            Err(err) => {
                warn!("Frame acquisition failed: {err}");
                return;
            }
        };
        if let (Some(painter), Some(screen)) = (self.egui_renderer.as_mut(), self.egui_screen.as_ref()) {
            if let Ok((device, queue)) = self.surface.device_and_queue() {
                for (id, delta) in &textures_delta.set {
                    painter.update_texture(device, queue, *id, delta);
                }
            }
            let meshes = self.egui_ctx.tessellate(shapes, screen.pixels_per_point);
            if let Err(err) = renderer::render_overlay(&self.surface, painter, &meshes, screen, frame) {
                warn!("Overlay render error: {err:?}");
            }
            for id in &textures_delta.free {
                painter.free_texture(id);
            }
        } else {
            frame.present();
        }

        if let Some(window) = self.surface.window() {
            window.request_redraw();
        }
    }
}
