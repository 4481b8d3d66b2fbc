use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, ReadyCtx};
use crate::device::{Gpu, GpuInit};
use crate::geometry::Size;
use crate::input::{GesturePhase, GestureRecognizer, PointerSample};
use crate::schedule::RedrawFlag;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "inkpad".to_string(),
            initial_size: LogicalSize::new(900.0, 600.0),
        }
    }
}

/// User event that wakes a waiting loop after an off-thread redraw request.
struct Wake;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::<Wake>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;
        let proxy = event_loop.create_proxy();
        let mut state = AppState::new(config, gpu_init, proxy, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    recognizer: GestureRecognizer,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    proxy: EventLoopProxy<Wake>,
    app: A,

    entry: Option<WindowEntry>,
    redraw: Option<RedrawFlag>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, proxy: EventLoopProxy<Wake>, app: A) -> Self {
        Self {
            config,
            gpu_init,
            proxy,
            app,
            entry: None,
            redraw: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryBuilder {
            recognizer: GestureRecognizer::new(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .expect("GPU initialization failed for window")
            },
        }
        .build();

        let size = entry.with_window(|w| w.inner_size());
        let surface_size = Size::new(size.width as f32, size.height as f32);

        let mut ctx = ReadyCtx {
            redraw: &mut self.redraw,
            surface_size,
        };
        self.app.on_ready(&mut ctx);

        // A bound flag reaches the loop through the proxy when raised off-thread.
        if let Some(flag) = &self.redraw {
            let proxy = self.proxy.clone();
            flag.set_waker(move || {
                let _ = proxy.send_event(Wake);
            });
        }

        self.entry = Some(entry);
        Ok(())
    }

    fn handle_resize(&mut self, new_size: PhysicalSize<u32>) {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };

        entry.with_gpu_mut(|gpu| gpu.resize(new_size));
        app.on_resized(Size::new(new_size.width as f32, new_size.height as f32));
        entry.with_window(|w| w.request_redraw());
    }

    fn drive_frame(&mut self, event_loop: &ActiveEventLoop) {
        // Collapse the pending mark before rendering; input landing during
        // the frame re-raises it and schedules the next one.
        if let Some(flag) = &self.redraw {
            flag.take();
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };

        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
            };
            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
        }
    }
}

impl<A> ApplicationHandler<Wake> for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.request_exit();
            event_loop.exit();
            return;
        }

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, _event: Wake) {
        let Some(entry) = self.entry.as_ref() else {
            return;
        };

        // A wake races the frame that served it; redraw only while still dirty.
        if self.redraw.as_ref().is_some_and(|f| f.is_pending()) {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Render only while marked dirty. An unbound flag falls back to
        // redrawing after every event.
        let dirty = match &self.redraw {
            Some(flag) => flag.is_pending(),
            None => true,
        };

        if dirty {
            if let Some(entry) = self.entry.as_ref() {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };

        if let Some((phase, sample)) =
            entry.with_mut(|fields| translate_gesture(fields.recognizer, &event))
        {
            app.on_gesture(phase, sample);
        }

        if app.on_window_event(&event) == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
            return;
        }

        // Runtime-managed window lifecycle / resize / redraw handling.
        match &event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                self.handle_resize(*new_size);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = self
                    .entry
                    .as_ref()
                    .map(|entry| entry.with_window(|w| w.inner_size()));
                if let Some(new_size) = new_size {
                    self.handle_resize(new_size);
                }
            }

            WindowEvent::RedrawRequested => {
                self.drive_frame(event_loop);
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

/// Maps raw window events onto press-drag-release gestures.
///
/// Positions stay in device (physical) pixels; the pad's geometry works in
/// the same space as the surface.
fn translate_gesture(
    recognizer: &mut GestureRecognizer,
    event: &WindowEvent,
) -> Option<(GesturePhase, PointerSample)> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            recognizer.pointer_moved(position.x as f32, position.y as f32, Instant::now())
        }

        WindowEvent::MouseInput {
            state: ElementState::Pressed,
            button: MouseButton::Left,
            ..
        } => recognizer.button_pressed(Instant::now()),

        WindowEvent::MouseInput {
            state: ElementState::Released,
            button: MouseButton::Left,
            ..
        } => recognizer.button_released(Instant::now()),

        _ => None,
    }
}
