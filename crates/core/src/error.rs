//! Error types for parcel ensemble generation.
//!
//! Every error here is fatal for a generation run: the ensemble is either
//! complete and valid or it is never handed to a writer.

use std::fmt;

/// Errors raised while reading the control file or its overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Control file could not be read
    LoadFailed { path: String, msg: String },
    /// A line in the control file is not a `NAME = VALUE` assignment
    Syntax { line: usize, content: String },
    /// Command-line overrides must come in `NAME VALUE` pairs
    DanglingOverride(String),
    /// A value could not be parsed as the requested type
    Parse { name: String, value: String },
    /// A value parsed but lies outside its admissible range
    Invalid { name: String, msg: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, msg } => {
                write!(f, "Failed to read control file '{path}': {msg}")
            }
            ConfigError::Syntax { line, content } => {
                write!(f, "Control file line {line}: expected NAME = VALUE, got '{content}'")
            }
            ConfigError::DanglingOverride(name) => {
                write!(f, "Override '{name}' is missing a value")
            }
            ConfigError::Parse { name, value } => {
                write!(f, "Cannot parse {name} = '{value}'")
            }
            ConfigError::Invalid { name, msg } => write!(f, "Invalid {name}: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by the ensemble writers.
#[derive(Debug)]
pub enum WriteError {
    /// File could not be created or written
    Io(std::io::Error),
    /// Ensemble could not be serialized
    SerializeFailed(String),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::Io(e) => write!(f, "Failed to write ensemble: {e}"),
            WriteError::SerializeFailed(msg) => write!(f, "Failed to serialize ensemble: {msg}"),
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::Io(e) => Some(e),
            WriteError::SerializeFailed(_) => None,
        }
    }
}

impl From<std::io::Error> for WriteError {
    fn from(e: std::io::Error) -> Self {
        WriteError::Io(e)
    }
}

/// Errors that abort parcel ensemble generation.
#[derive(Debug)]
pub enum InitError {
    /// The sweep would produce more parcels than the ensemble can hold
    CapacityExceeded { capacity: usize },
    /// The sweep produced no parcels at all
    EmptyEnsemble,
    /// The latitude band cannot be sampled
    DegenerateBand { lat: f64, ulat: f64, reason: String },
    /// Configuration could not be resolved
    Config(ConfigError),
    /// Ensemble could not be written
    Write(WriteError),
}

impl InitError {
    pub(crate) fn degenerate_band(lat: f64, ulat: f64, reason: impl Into<String>) -> Self {
        InitError::DegenerateBand {
            lat,
            ulat,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::CapacityExceeded { capacity } => {
                write!(f, "Too many particles! (capacity {capacity})")
            }
            InitError::EmptyEnsemble => write!(f, "Did not create any air parcels!"),
            InitError::DegenerateBand { lat, ulat, reason } => {
                write!(f, "Cannot sample latitude band {lat} +/- {}: {reason}", ulat / 2.0)
            }
            InitError::Config(e) => write!(f, "{e}"),
            InitError::Write(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::Config(e) => Some(e),
            InitError::Write(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        InitError::Config(e)
    }
}

impl From<WriteError> for InitError {
    fn from(e: WriteError) -> Self {
        InitError::Write(e)
    }
}
