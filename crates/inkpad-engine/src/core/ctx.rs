use winit::window::Window;

use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::geometry::Size;
use crate::paint::Color;
use crate::render::readback;
use crate::render::{RenderCtx, RenderPost, RenderTarget};
use crate::schedule::RedrawFlag;

use super::app::AppControl;

/// Startup context passed to `core::App::on_ready`.
pub struct ReadyCtx<'a> {
    pub(crate) redraw: &'a mut Option<RedrawFlag>,
    pub(crate) surface_size: Size,
}

impl ReadyCtx<'_> {
    /// Initial drawable size in device pixels.
    pub fn surface_size(&self) -> Size {
        self.surface_size
    }

    /// Hands the runtime the flag it should watch to schedule frames.
    ///
    /// A bound flag makes the loop render only when the flag is raised.
    /// Without one the runtime redraws after every event.
    pub fn bind_redraw(&mut self, flag: RedrawFlag) {
        *self.redraw = Some(flag);
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the surface with `clear`, calls `draw` with a ready [`RenderCtx`] and
    /// [`RenderTarget`], then submits and presents the frame.
    ///
    /// Equivalent to [`render_with_post`](Self::render_with_post) with an empty
    /// post stage.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        self.render_with_post(clear, draw, |_| {})
    }

    /// Like [`render`](Self::render), but runs `post` between drawing and
    /// submission.
    ///
    /// The post stage sees a [`RenderPost`] that owns the frame encoder and a
    /// handle to the surface texture. Deferred per-frame work runs there, such
    /// as encoding capture copies of a frame whose contents are settled.
    pub fn render_with_post<F, P>(&mut self, clear: Color, draw: F, post: P) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
        P: FnOnce(&mut RenderPost),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        // Clear pass — dropped before the encoder moves into the post stage.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("inkpad clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format());

        // RenderTarget borrows frame.encoder; dropped before the frame is decomposed.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        let GpuFrame {
            surface_texture,
            view: _,
            encoder,
        } = frame;

        let mut hooks = RenderPost::new(
            self.gpu.device().clone(),
            self.gpu.queue().clone(),
            encoder,
            surface_texture.texture.clone(),
            self.gpu.surface_copyable(),
        );
        post(&mut hooks);
        let (encoder, pending) = hooks.finish();

        self.window.pre_present_notify();
        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        // Readbacks map their buffers only once the copy is in flight.
        readback::complete(self.gpu.device(), pending);

        AppControl::Continue
    }
}
