//! Plain-text (`P3`) PPM encoding.

use crate::frame::Frame;
use std::io::{self, Write};

/// Largest channel value declared in the header.
pub const PPM_MAX_VALUE: u8 = 255;

/// Write `frame` as ASCII PPM: `P3`, `<width> <height>`, `255`, then one line
/// per row of space-separated `R G B` triples.
pub fn write_ppm<W: Write>(mut out: W, frame: &Frame) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", frame.width(), frame.height())?;
    writeln!(out, "{PPM_MAX_VALUE}")?;
    for row in frame.rows() {
        let mut first = true;
        for px in row.chunks_exact(3) {
            if !first {
                out.write_all(b" ")?;
            }
            first = false;
            write!(out, "{} {} {}", px[0], px[1], px[2])?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}
