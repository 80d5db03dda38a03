//! GPU orchestration for the one-shot triangle render.
//!
//! - `context` owns the wgpu instance/adapter/device/queue wiring.
//! - `resources` builds the textures, sampler, and buffers, including the
//!   mip-level-count derivation for the probe texture.
//! - `pipeline` compiles the embedded GLSL into an immutable pipeline state.
//! - `state` glues everything together and exposes the `Renderer` API used
//!   by the orchestrating binary.

mod context;
mod pipeline;
pub(crate) mod resources;
mod state;

pub use context::GpuContext;
pub use resources::mip_level_count;
pub use state::Renderer;
