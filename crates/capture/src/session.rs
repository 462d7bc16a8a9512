use crate::frame::Frame;
use crate::ppm::write_ppm;
use crate::CaptureError;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Owns the capture counter and where captures go.
///
/// Each successful [`CaptureSession::capture`] writes `<dir>/<prefix><n>.ppm`
/// and moves `n` forward by one. The counter is never reset.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    dir: PathBuf,
    prefix: String,
    counter: u32,
}

impl CaptureSession {
    pub fn new(dir: impl AsRef<Path>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Number of captures written so far, which is also the next suffix.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the next capture will be written to.
    pub fn next_path(&self) -> PathBuf {
        self.dir.join(format!("{}{}.ppm", self.prefix, self.counter))
    }

    /// Write `frame` to the next path. The counter only advances on success.
    pub fn capture(&mut self, frame: &Frame) -> Result<PathBuf, CaptureError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.next_path();
        let file = File::create(&path)?;
        write_ppm(BufWriter::new(file), frame)?;
        self.counter += 1;
        tracing::info!(
            path = %path.display(),
            width = frame.width(),
            height = frame.height(),
            "captured frame {}",
            self.counter - 1
        );
        Ok(path)
    }
}
