use std::sync::mpsc;

use crate::capture::{CaptureError, InkImage};

/// End-of-frame context handed to deferred frame hooks.
///
/// Owns the frame's encoder while hooks run, plus cloned device handles, so
/// hook closures carry no borrowed lifetimes and can travel through the
/// deferred queue from any thread. Readbacks requested here are encoded
/// into the frame and completed after its submission.
pub struct RenderPost {
    device: wgpu::Device,
    queue: wgpu::Queue,
    encoder: wgpu::CommandEncoder,
    frame: wgpu::Texture,
    frame_copyable: bool,
    pending: Vec<PendingReadback>,
}

pub(crate) struct PendingReadback {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    bytes_per_row: u32,
    format: wgpu::TextureFormat,
    resolve: mpsc::Sender<Result<InkImage, CaptureError>>,
}

impl RenderPost {
    pub(crate) fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        encoder: wgpu::CommandEncoder,
        frame: wgpu::Texture,
        frame_copyable: bool,
    ) -> Self {
        Self {
            device,
            queue,
            encoder,
            frame,
            frame_copyable,
            pending: Vec::new(),
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Encodes a copy of the frame into a mappable buffer and registers it
    /// for completion after submit; `resolve` receives the tight image.
    ///
    /// Fails immediately through `resolve` when the surface was configured
    /// without copy support.
    pub fn request_frame_image(&mut self, resolve: mpsc::Sender<Result<InkImage, CaptureError>>) {
        if !self.frame_copyable {
            let _ = resolve.send(Err(CaptureError::Unsupported));
            return;
        }

        let size = self.frame.size();
        let (width, height) = (size.width, size.height);
        // Buffer rows must be padded to wgpu's 256-byte alignment.
        let bytes_per_row = (4 * width + 255) & !255;

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("inkpad readback buffer"),
            size: u64::from(bytes_per_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        self.encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.frame,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.pending.push(PendingReadback {
            buffer,
            width,
            height,
            bytes_per_row,
            format: self.frame.format(),
            resolve,
        });
    }

    /// Tears the post stage back down into the encoder to submit and the
    /// readbacks to complete afterwards.
    pub(crate) fn finish(self) -> (wgpu::CommandEncoder, Vec<PendingReadback>) {
        (self.encoder, self.pending)
    }
}

/// Maps registered readback buffers and resolves their captures.
///
/// Runs on the frame-driving thread after submission; the blocking device
/// poll bounds how long the mapping stays in flight.
pub(crate) fn complete(device: &wgpu::Device, pending: Vec<PendingReadback>) {
    for readback in pending {
        let result = map_and_tighten(device, &readback);
        if readback.resolve.send(result).is_err() {
            log::debug!("capture resolved after its ticket was dropped");
        }
    }
}

fn map_and_tighten(
    device: &wgpu::Device,
    readback: &PendingReadback,
) -> Result<InkImage, CaptureError> {
    let slice = readback.buffer.slice(..);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });

    if let Err(e) = device.poll(wgpu::PollType::wait_indefinitely()) {
        return Err(CaptureError::Readback(format!("device poll failed: {e}")));
    }
    match rx.recv() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(CaptureError::Readback(e.to_string())),
        Err(_) => return Err(CaptureError::Readback("map callback dropped".into())),
    }

    // Strip the row padding. Copies out of a texture are already top-down,
    // so rows keep their order.
    let data = slice.get_mapped_range();
    let (width, height) = (readback.width as usize, readback.height as usize);
    let mut pixels = Vec::with_capacity(width * height * 4);
    for row in 0..height {
        let start = row * readback.bytes_per_row as usize;
        pixels.extend_from_slice(&data[start..start + width * 4]);
    }
    drop(data);
    readback.buffer.unmap();

    swizzle_to_rgba(readback.format, &mut pixels)?;
    Ok(InkImage::new(readback.width, readback.height, pixels))
}

/// Reorders `pixels` in place into RGBA byte order.
fn swizzle_to_rgba(format: wgpu::TextureFormat, pixels: &mut [u8]) -> Result<(), CaptureError> {
    match format {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => Ok(()),
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => {
            for px in pixels.chunks_exact_mut(4) {
                px.swap(0, 2);
            }
            Ok(())
        }
        other => Err(CaptureError::Readback(format!(
            "unsupported surface format {other:?}"
        ))),
    }
}
