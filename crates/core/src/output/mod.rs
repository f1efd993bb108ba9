//! Ensemble writers.
//!
//! The generator hands a complete ensemble to exactly one writer. Writers
//! emit parcels in insertion order and never reorder or filter them.

mod ascii;
mod binary;
mod json;

pub use ascii::write_ascii;
pub use binary::{write_binary, BINARY_MAGIC, BINARY_VERSION};
pub use json::write_json;

use crate::config::ControlFile;
use crate::ensemble::ParcelEnsemble;
use crate::error::{ConfigError, WriteError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Output file format, selected by `ATM_TYPE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AtmFormat {
    /// Whitespace-separated table with `#` header (`ATM_TYPE = 0`)
    #[default]
    Ascii,
    /// Little-endian column dump (`ATM_TYPE = 1`)
    Binary,
    /// Serde JSON document (`ATM_TYPE = 2`)
    Json,
}

impl AtmFormat {
    /// Format for an `ATM_TYPE` code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(AtmFormat::Ascii),
            1 => Some(AtmFormat::Binary),
            2 => Some(AtmFormat::Json),
            _ => None,
        }
    }

    /// Resolve `ATM_TYPE` from control parameters
    ///
    /// # Errors
    /// Returns error for an unparsable or unknown format code
    pub fn from_control(ctl: &ControlFile) -> Result<Self, ConfigError> {
        let code = ctl.scan_count("ATM_TYPE", 0)?;
        Self::from_code(code).ok_or_else(|| ConfigError::Invalid {
            name: "ATM_TYPE".to_string(),
            msg: format!("unknown output format {code}, expected 0, 1 or 2"),
        })
    }
}

/// Write `ensemble` to `writer` in `format`
///
/// # Errors
/// Returns error if writing or serialization fails
pub fn write_to<W: Write>(
    writer: &mut W,
    ensemble: &ParcelEnsemble,
    format: AtmFormat,
) -> Result<(), WriteError> {
    match format {
        AtmFormat::Ascii => write_ascii(writer, ensemble),
        AtmFormat::Binary => write_binary(writer, ensemble),
        AtmFormat::Json => write_json(writer, ensemble),
    }
}

/// Write `ensemble` to the file at `path`, replacing any existing file
///
/// # Errors
/// Returns error if the file cannot be created or written
pub fn write_atm<P: AsRef<Path>>(
    path: P,
    ensemble: &ParcelEnsemble,
    format: AtmFormat,
) -> Result<(), WriteError> {
    let path = path.as_ref();
    info!("Write atmospheric data: {}", path.display());

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, ensemble, format)?;
    writer.flush()?;
    Ok(())
}
