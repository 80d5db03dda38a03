use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RenderError;

/// Fixed output file name, written into the directory the caller picks.
pub const OUTPUT_FILE_NAME: &str = "output.metal.bin";

/// Bytes per pixel of the Rgba32Float render target: 4 channels x 4 bytes.
pub const BYTES_PER_PIXEL: u32 = 16;

/// Host-owned copy of the render target contents: raw little-endian f32
/// RGBA values, row-major, top row first.
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub(crate) fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len() as u64,
            u64::from(width) * u64::from(height) * u64::from(BYTES_PER_PIXEL)
        );
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw bytes exactly as they left the GPU.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Writes the raw bytes, unmodified, to [`OUTPUT_FILE_NAME`] inside
    /// `dir` and returns the absolute path of the written file.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, RenderError> {
        let path = dir.join(OUTPUT_FILE_NAME);
        fs::write(&path, &self.data)?;
        let absolute = path.canonicalize()?;
        Ok(absolute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_pixels(width: u32, height: u32) -> PixelBuffer {
        let mut floats = Vec::with_capacity((width * height * 4) as usize);
        for index in 0..(width * height) {
            floats.extend_from_slice(&[index as f32, 0.0, 2.5, 1.0]);
        }
        let data: Vec<u8> = floats.iter().flat_map(|f| f.to_le_bytes()).collect();
        PixelBuffer::new(width, height, data)
    }

    #[test]
    fn written_file_is_a_verbatim_byte_copy() {
        let pixels = gradient_pixels(8, 4);
        let dir = tempfile::tempdir().expect("create temp dir");

        let path = pixels.write_to_dir(dir.path()).expect("write pixels");
        assert!(path.is_absolute());
        assert!(path.ends_with(OUTPUT_FILE_NAME));

        let written = fs::read(&path).expect("read back file");
        assert_eq!(written, pixels.bytes());
        assert_eq!(written.len() as u32, 8 * 4 * BYTES_PER_PIXEL);
    }

    #[test]
    fn full_size_buffer_length_matches_width_height_times_16() {
        let data = vec![0u8; (512 * 512 * BYTES_PER_PIXEL) as usize];
        let pixels = PixelBuffer::new(512, 512, data);
        let dir = tempfile::tempdir().expect("create temp dir");

        let path = pixels.write_to_dir(dir.path()).expect("write pixels");
        let len = fs::metadata(&path).expect("stat output").len();
        assert_eq!(len, 4_194_304);
    }

    #[test]
    fn write_failure_surfaces_as_io_error() {
        let pixels = gradient_pixels(2, 2);
        let missing = Path::new("/nonexistent-triprobe-dir");

        let err = pixels.write_to_dir(missing).expect_err("write must fail");
        assert!(matches!(err, RenderError::Io(_)));
    }
}
