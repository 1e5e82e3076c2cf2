//! Byte-exact persistence for cost grids.
//!
//! Three formats, all hard external contracts:
//! - text: one row of space-separated decimal byte values per grid row,
//!   newline-terminated;
//! - binary: `width * height` raw bytes, row-major, no header;
//! - PGM: `P5\n<width> <height>\n255\n` then raw bytes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::grid::Costmap;
use crate::types::CostmapError;

/// On-disk representation of a saved grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Text,
    Binary,
    Pgm,
}

impl Costmap {
    /// Serialize the live cost grid into `writer`.
    ///
    /// Output is deterministic: saving the same grid state twice
    /// produces byte-identical bytes. Failures are surfaced to the
    /// caller; a dropped save can mean lost static-map calibration.
    pub fn save(&self, format: SaveFormat, writer: &mut impl Write) -> Result<(), CostmapError> {
        let width = self.width() as usize;
        let data = self.data();
        match format {
            SaveFormat::Text => {
                for row in data.chunks(width) {
                    let mut first = true;
                    for &value in row {
                        if first {
                            first = false;
                        } else {
                            writer.write_all(b" ")?;
                        }
                        write!(writer, "{value}")?;
                    }
                    writer.write_all(b"\n")?;
                }
            }
            SaveFormat::Binary => {
                writer.write_all(data)?;
            }
            SaveFormat::Pgm => {
                write!(writer, "P5\n{} {}\n255\n", self.width(), self.height())?;
                writer.write_all(data)?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Serialize into a file at `path`.
    pub fn save_to_path(
        &self,
        format: SaveFormat,
        path: impl AsRef<Path>,
    ) -> Result<(), CostmapError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.save(format, &mut writer)
    }
}
