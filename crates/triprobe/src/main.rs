//! One-shot offscreen triangle render.
//!
//! Picks the first available GPU, renders a single hardcoded triangle into a
//! 512x512 float target while sampling an unwritten mip-probe texture, then
//! dumps the raw pixel bytes to `output.metal.bin` in the current working
//! directory. No flags, no loop; every failure ends the run.

use anyhow::{Context, Result};
use renderer::{GpuContext, Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    initialise_tracing();

    let context = GpuContext::new()?;
    let mut renderer = Renderer::new(context, RendererConfig::default());

    renderer.build_resources()?;
    let submission = renderer.encode_and_submit()?;
    renderer.wait_for_completion(submission)?;
    let pixels = renderer.readback()?;

    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let path = pixels.write_to_dir(&cwd)?;

    tracing::info!(path = %path.display(), bytes = pixels.bytes().len(), "wrote rendered pixels");
    println!("{}", path.display());
    Ok(())
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
