//! Headless single-triangle renderer.
//!
//! Renders one hardcoded triangle into an offscreen `Rgba32Float` target,
//! samples a mipmapped probe texture from the fragment stage, and reads the
//! resulting pixels back to host memory for serialization. The flow is
//! strictly linear:
//!
//! ```text
//!   GpuContext::new ──▶ Renderer::build_resources ──▶ encode_and_submit
//!                                                            │
//!   PixelBuffer::write_to_dir ◀── readback ◀── wait_for_completion
//! ```
//!
//! `Renderer` owns every GPU object for the duration of the run; the
//! host-side [`PixelBuffer`] is handed to the caller for serialization.
//! The probe texture is never written with image data; it exists so the
//! mip-level derivation is exercised by a texture that is legally bindable.

mod compile;
mod error;
mod geometry;
mod gpu;
mod output;

pub use error::RenderError;
pub use geometry::{Vertex, TRIANGLE};
pub use gpu::{mip_level_count, GpuContext, Renderer};
pub use output::{PixelBuffer, BYTES_PER_PIXEL, OUTPUT_FILE_NAME};

/// Immutable render-target dimensions, fixed for the whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}
