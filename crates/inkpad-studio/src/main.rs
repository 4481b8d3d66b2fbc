//! Inkpad studio: a desktop signature pad.
//!
//! Draw with the mouse. `E` erases, `S` exports the signature as a PNG,
//! `Esc` quits.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use inkpad_engine::capture::{CaptureError, CaptureTicket, InkImage};
use inkpad_engine::core::{App, AppControl, FrameCtx, ReadyCtx};
use inkpad_engine::device::GpuInit;
use inkpad_engine::geometry::Size;
use inkpad_engine::input::{GesturePhase, PointerSample, TAP_SLOP};
use inkpad_engine::logging::{LoggingConfig, init_logging};
use inkpad_engine::pad::SignaturePad;
use inkpad_engine::paint::InkStyle;
use inkpad_engine::render::InkRenderer;
use inkpad_engine::window::{Runtime, RuntimeConfig};

struct StudioApp {
    pad: SignaturePad,
    renderer: InkRenderer,
    style: InkStyle,

    /// Where the active gesture began, in device pixels.
    press_origin: Option<(f32, f32)>,

    /// Export waiting on its frame, polled once per frame.
    pending_export: Option<CaptureTicket>,
    export_path: PathBuf,
}

impl StudioApp {
    fn new(export_path: PathBuf) -> Self {
        Self {
            pad: SignaturePad::new(),
            renderer: InkRenderer::new(),
            style: InkStyle::default(),
            press_origin: None,
            pending_export: None,
            export_path,
        }
    }

    fn request_export(&mut self) {
        if self.pending_export.is_some() {
            log::warn!("an export is already in flight");
            return;
        }

        match self.pad.capture_handle().request() {
            Ok(ticket) => self.pending_export = Some(ticket),
            Err(CaptureError::NoSignature) => log::warn!("nothing to export yet"),
            Err(e) => log::error!("export request failed: {e}"),
        }
    }

    fn poll_export(&mut self) {
        let Some(ticket) = &self.pending_export else {
            return;
        };
        let Some(result) = ticket.try_take() else {
            return;
        };
        self.pending_export = None;

        match result {
            Ok(image) => match save_png(&self.export_path, &image) {
                Ok(()) => log::info!(
                    "saved {}x{} signature to {}",
                    image.width,
                    image.height,
                    self.export_path.display()
                ),
                Err(e) => log::error!("failed to save signature: {e:#}"),
            },
            Err(e) => log::error!("export failed: {e}"),
        }
    }
}

impl App for StudioApp {
    fn on_ready(&mut self, ctx: &mut ReadyCtx<'_>) {
        self.pad.set_surface_size(ctx.surface_size());
        ctx.bind_redraw(self.pad.redraw_flag());
    }

    fn on_resized(&mut self, size: Size) {
        self.pad.set_surface_size(size);
    }

    fn on_gesture(&mut self, phase: GesturePhase, sample: PointerSample) {
        if phase == GesturePhase::Began {
            self.press_origin = Some((sample.x, sample.y));
        }

        self.pad.handle_pointer_event(phase, sample);

        // A release that never left the slop radius is a tap dab, not a stroke.
        if phase == GesturePhase::Ended {
            if let Some((ox, oy)) = self.press_origin.take() {
                let travel = (sample.x - ox).hypot(sample.y - oy);
                if travel < TAP_SLOP {
                    self.pad.tap(sample.x, sample.y);
                }
            }
        }
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let WindowEvent::KeyboardInput { event: key, .. } = event else {
            return AppControl::Continue;
        };
        if key.state != ElementState::Pressed || key.repeat {
            return AppControl::Continue;
        }

        match key.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => return AppControl::Exit,
            PhysicalKey::Code(KeyCode::KeyE) => {
                self.pad.erase();
                log::info!("pad erased");
            }
            PhysicalKey::Code(KeyCode::KeyS) => self.request_export(),
            _ => {}
        }

        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.poll_export();

        let pad = &self.pad;
        let style = &self.style;
        let renderer = &mut self.renderer;

        ctx.render_with_post(
            style.background,
            |rctx, target| renderer.render(rctx, target, pad, style.ink),
            |post| {
                pad.drain_frame_hooks(post);
            },
        )
    }
}

fn save_png(path: &Path, image: &InkImage) -> Result<()> {
    let buf = image::RgbaImage::from_raw(image.width, image.height, image.pixels.clone())
        .context("capture buffer does not match its dimensions")?;
    buf.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let export_path = std::env::var_os("INKPAD_EXPORT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("signature.png"));

    log::info!(
        "draw with the mouse; E erases, S saves to {}, Esc quits",
        export_path.display()
    );

    Runtime::run(
        RuntimeConfig {
            title: "inkpad studio".to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit::default(),
        StudioApp::new(export_path),
    )
}
