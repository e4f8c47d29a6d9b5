//! Serialization of the generated star and segment tables.
//!
//! The payload is deliberately terse: `s` is the star list as `[ra, dec]`
//! pairs in first-seen order, `l` the segment list as index pairs into
//! `s`. The front end loads the generated file as a CommonJS module, so
//! the JSON payload is wrapped in a `module.exports=` assignment.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::error::Error;

/// The generated star and segment tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkyData {
    /// Star positions as `[ra, dec]` radian pairs, first-seen order.
    #[serde(rename = "s")]
    pub stars: Vec<[f64; 2]>,
    /// Segments as `[start, end]` index pairs into `stars`.
    #[serde(rename = "l")]
    pub lines: Vec<[usize; 2]>,
}

impl SkyData {
    /// Render the bare JSON payload.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Render the CommonJS module source embedding the payload.
    pub fn to_module_source(&self) -> Result<String, Error> {
        Ok(format!("module.exports={}", self.to_json()?))
    }

    /// Write the CommonJS module to `path`.
    pub fn write_module<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        writer.write_all(self.to_module_source()?.as_bytes())?;
        writer.flush()?;
        info!(
            "Wrote {} stars and {} segments to {}",
            self.stars.len(),
            self.lines.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}
