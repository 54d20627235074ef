use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use ringrun_input::{Button, KeyTracker, SideCommand, side_commands, steer};
use ringrun_sim::{FlightSim, RunState};
use ringrun_render_wgpu::{SceneCamera, WgpuRenderer};
use ringrun_tools::FlightTelemetry;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

#[derive(Parser)]
#[command(name = "ringrun-desktop", about = "Fly through the ring course")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Application state outside the GPU stack: the simulation, the key
/// tracker, and the overlay flags.
struct AppState {
    sim: FlightSim,
    tracker: KeyTracker,
    show_ui: bool,
    last_frame: Instant,
}

impl AppState {
    fn new() -> Self {
        Self {
            sim: FlightSim::default(),
            tracker: KeyTracker::new(),
            show_ui: true,
            last_frame: Instant::now(),
        }
    }

    /// Translate a winit key code into a bound button, if any.
    fn bind(key: KeyCode) -> Option<Button> {
        match key {
            KeyCode::ArrowUp => Some(Button::ArrowUp),
            KeyCode::ArrowDown => Some(Button::ArrowDown),
            KeyCode::ArrowLeft => Some(Button::ArrowLeft),
            KeyCode::ArrowRight => Some(Button::ArrowRight),
            KeyCode::KeyR => Some(Button::KeyR),
            KeyCode::F2 => Some(Button::F2),
            KeyCode::F11 => Some(Button::F11),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(button) = Self::bind(key) {
            self.tracker.record(button, pressed);
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        let summary = FlightTelemetry::summary(&self.sim);

        if self.show_ui {
            egui::SidePanel::left("telemetry")
                .default_width(240.0)
                .show(ctx, |ui| {
                    ui.heading("Ringrun");
                    ui.separator();
                    ui.label(format!("Frame: {:.3} ms", summary.frame_ms));
                    ui.label(format!("Tick: {}", summary.tick));
                    ui.label(format!("State: {}", summary.state));
                    ui.label(format!(
                        "Craft: ({:.2}, {:.2}, {:.2})",
                        summary.craft_position[0],
                        summary.craft_position[1],
                        summary.craft_position[2]
                    ));
                    ui.label(format!(
                        "Camera: ({:.3}, {:.3}, {:.3})",
                        summary.camera_position[0],
                        summary.camera_position[1],
                        summary.camera_position[2]
                    ));
                    ui.label(format!("Rings: {}", summary.rings));
                    ui.separator();
                    ui.small("Arrows: steer | R: reload shaders");
                    ui.small("F2: toggle UI | F11: fullscreen");
                });
        }

        if summary.state == RunState::GameOver {
            egui::Area::new(egui::Id::new("game_over"))
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.heading(
                        egui::RichText::new(summary.banner())
                            .size(48.0)
                            .color(egui::Color32::RED),
                    );
                });
        }
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    camera: SceneCamera,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new() -> Self {
        Self {
            state: AppState::new(),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            camera: SceneCamera::default(),
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    /// Side commands are presentation-level and run once per tick whether
    /// or not the run is still live.
    fn apply_side_commands(&mut self) {
        for command in side_commands(&self.state.tracker) {
            match command {
                SideCommand::ReloadShaders => {
                    if let (Some(renderer), Some(device)) = (&mut self.renderer, &self.device) {
                        renderer.rebuild_pipelines(device);
                    }
                }
                SideCommand::ToggleUi => {
                    self.state.show_ui = !self.state.show_ui;
                }
                SideCommand::ToggleFullscreen => {
                    if let Some(window) = &self.window {
                        let next = if window.fullscreen().is_some() {
                            None
                        } else {
                            Some(Fullscreen::Borderless(None))
                        };
                        window.set_fullscreen(next);
                    }
                }
            }
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Ringrun")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("ringrun_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.camera.aspect = size.width as f32 / size.height.max(1) as f32;

        let renderer = WgpuRenderer::new(&device, surface_format, size.width, size.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                // Window lifecycle is the outer state machine; closing
                // ends the whole loop, not just the run.
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.camera.aspect = config.width as f32 / config.height.max(1) as f32;
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).min(std::time::Duration::from_millis(100));
                self.state.last_frame = now;

                // Sample this tick's input snapshot, then expire edges.
                let steer_input = steer(&self.state.tracker);
                self.apply_side_commands();
                self.state.tracker.advance();

                // The inner state machine: simulation advances only while
                // the run is live; presentation continues regardless.
                if self.state.sim.state() == RunState::Running {
                    self.state.sim.step(steer_input, dt);
                }
                for event in self.state.sim.drain_events() {
                    tracing::trace!(?event, "sim event");
                }

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &self.renderer {
                    renderer.render(
                        device,
                        queue,
                        &view,
                        &self.camera,
                        &self.state.sim.camera_pose(),
                        &self.state.sim.scene(),
                    );
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui_pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                ..Default::default()
                            })
                            .forget_lifetime();
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("ringrun-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
