use std::io;

use thiserror::Error;

/// Failures surfaced by the render pipeline.
///
/// Setup and compilation failures abort the run before any output file
/// exists. I/O failures happen after the GPU work has already completed and
/// are reported without retrying; a partially written frame has no use.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Device, queue, texture, sampler, or pipeline construction was refused.
    #[error("GPU setup failed: {0}")]
    Setup(String),
    /// Shader source failed to compile; carries the compiler diagnostic.
    #[error("shader compilation failed: {0}")]
    Compilation(String),
    /// Writing the output file failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_underlying_diagnostic() {
        let setup = RenderError::Setup("no adapter".into());
        assert_eq!(setup.to_string(), "GPU setup failed: no adapter");

        let compile = RenderError::Compilation("line 3: unknown identifier".into());
        assert!(compile.to_string().contains("line 3"));

        let io = RenderError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(io.to_string().starts_with("failed to write output"));
    }
}
