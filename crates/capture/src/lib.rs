//! Frame capture: RGB frames written as plain-text PPM files.
//!
//! Layout inside the capture directory:
//! ```text
//! <prefix>0.ppm
//! <prefix>1.ppm
//! ...
//! ```
//!
//! # Invariants
//! - Row 0 of every written file is the top of the image.
//! - The counter lives in a [`CaptureSession`], starts at 0, and moves by
//!   exactly one per file written.

mod frame;
mod ppm;
mod session;

pub use frame::{Frame, RowOrder};
pub use ppm::{PPM_MAX_VALUE, write_ppm};
pub use session::CaptureSession;

/// Errors from building frames or writing captures.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame has zero size ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub fn crate_info() -> &'static str {
    "orrery-capture v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("capture"));
    }
}
