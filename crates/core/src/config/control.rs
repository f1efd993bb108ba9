//! Control file parsing and parameter lookup.
//!
//! A control file holds one `NAME = VALUE` assignment per line. `#` starts a
//! comment, blank lines are skipped and later assignments replace earlier
//! ones. Command-line `NAME VALUE` pairs override the file.

use crate::error::ConfigError;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// File name that stands for "no control file".
pub const NO_FILE: &str = "-";

/// Resolved control parameters.
#[derive(Debug, Clone, Default)]
pub struct ControlFile {
    entries: FxHashMap<String, String>,
    overrides: FxHashMap<String, String>,
}

impl ControlFile {
    /// Empty control file; every lookup falls back to its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a control file from disk. `-` yields an empty control file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or contains a malformed line
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.as_os_str() == NO_FILE {
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            msg: e.to_string(),
        })?;

        Self::parse(&contents)
    }

    /// Parse control file text.
    ///
    /// # Errors
    /// Returns error on a non-empty line without `=` or with an empty name
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut entries = FxHashMap::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let (name, value) = line.split_once('=').ok_or_else(|| ConfigError::Syntax {
                line: idx + 1,
                content: raw.trim().to_string(),
            })?;
            let name = name.trim();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(ConfigError::Syntax {
                    line: idx + 1,
                    content: raw.trim().to_string(),
                });
            }

            entries.insert(name.to_string(), value.trim().to_string());
        }

        Ok(Self {
            entries,
            overrides: FxHashMap::default(),
        })
    }

    /// Apply command-line overrides given as a flat `NAME VALUE ...` list.
    ///
    /// # Errors
    /// Returns error if the list has an odd number of items
    pub fn with_overrides<I, S>(mut self, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        while let Some(name) = args.next() {
            let value = args
                .next()
                .ok_or_else(|| ConfigError::DanglingOverride(name.clone()))?;
            self.overrides.insert(name, value);
        }
        Ok(self)
    }

    /// Set a single parameter as if it came from the control file
    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) {
        self.entries.insert(name.into(), value.to_string());
    }

    /// Raw value of a parameter, overrides first
    pub fn get(&self, name: &str) -> Option<&str> {
        self.overrides
            .get(name)
            .or_else(|| self.entries.get(name))
            .map(String::as_str)
    }

    /// Raw value of an array parameter `NAME[idx]`
    pub fn get_indexed(&self, name: &str, idx: usize) -> Option<&str> {
        self.get(&format!("{name}[{idx}]"))
    }

    /// Look up and parse a parameter, falling back to `default`.
    ///
    /// # Errors
    /// Returns error if the parameter is present but does not parse
    pub fn scan<T>(&self, name: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + std::fmt::Debug,
    {
        let value = match self.get(name) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Parse {
                name: name.to_string(),
                value: raw.to_string(),
            })?,
            None => default,
        };
        debug!("{name} = {value:?}");
        Ok(value)
    }

    /// Look up a non-negative count. Fractional input is truncated, so
    /// `INIT_REP = 3.0` and `INIT_REP = 3` are equivalent.
    ///
    /// # Errors
    /// Returns error if the value is not a finite, non-negative number
    pub fn scan_count(&self, name: &str, default: u64) -> Result<u64, ConfigError> {
        let Some(raw) = self.get(name) else {
            debug!("{name} = {default}");
            return Ok(default);
        };

        if let Ok(v) = raw.parse::<u64>() {
            debug!("{name} = {v}");
            return Ok(v);
        }

        let v: f64 = raw.parse().map_err(|_| ConfigError::Parse {
            name: name.to_string(),
            value: raw.to_string(),
        })?;
        if !v.is_finite() || v < 0.0 {
            return Err(ConfigError::Invalid {
                name: name.to_string(),
                msg: format!("must be a non-negative count, got {raw}"),
            });
        }
        let v = v.trunc() as u64;
        debug!("{name} = {v}");
        Ok(v)
    }

    /// Number of distinct parameters (file entries and overrides)
    pub fn len(&self) -> usize {
        self.entries.len()
            + self
                .overrides
                .keys()
                .filter(|k| !self.entries.contains_key(*k))
                .count()
    }

    /// True if no parameter is set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignments_and_comments() {
        let ctl = ControlFile::parse(
            "# header\nINIT_T0 = 10\n\nINIT_T1=20  # trailing\n  QNT_NAME[0] = m\n",
        )
        .unwrap();
        assert_eq!(ctl.get("INIT_T0"), Some("10"));
        assert_eq!(ctl.get("INIT_T1"), Some("20"));
        assert_eq!(ctl.get_indexed("QNT_NAME", 0), Some("m"));
        assert_eq!(ctl.len(), 3);
    }

    #[test]
    fn test_later_assignment_wins() {
        let ctl = ControlFile::parse("INIT_REP = 1\nINIT_REP = 5\n").unwrap();
        assert_eq!(ctl.scan_count("INIT_REP", 1).unwrap(), 5);
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = ControlFile::parse("INIT_T0 = 1\nbogus line\n").unwrap_err();
        assert_eq!(
            err,
            ConfigError::Syntax {
                line: 2,
                content: "bogus line".into()
            }
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let ctl = ControlFile::parse("INIT_LAT0 = -10\n")
            .unwrap()
            .with_overrides(["INIT_LAT0", "5", "INIT_LAT1", "15"])
            .unwrap();
        assert_eq!(ctl.scan("INIT_LAT0", 0.0).unwrap(), 5.0);
        assert_eq!(ctl.scan("INIT_LAT1", 0.0).unwrap(), 15.0);
        assert_eq!(ctl.len(), 2);
    }

    #[test]
    fn test_dangling_override() {
        let err = ControlFile::new()
            .with_overrides(["INIT_SEED"])
            .unwrap_err();
        assert_eq!(err, ConfigError::DanglingOverride("INIT_SEED".into()));
    }

    #[test]
    fn test_scan_default_and_parse_error() {
        let mut ctl = ControlFile::new();
        assert_eq!(ctl.scan("INIT_DT", 1.0).unwrap(), 1.0);

        ctl.set("INIT_DT", "fast");
        assert!(matches!(
            ctl.scan("INIT_DT", 1.0),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_scan_count_accepts_float_text() {
        let mut ctl = ControlFile::new();
        ctl.set("INIT_REP", "3.0");
        assert_eq!(ctl.scan_count("INIT_REP", 1).unwrap(), 3);

        ctl.set("INIT_REP", "-2");
        assert!(matches!(
            ctl.scan_count("INIT_REP", 1),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_dash_means_no_file() {
        let ctl = ControlFile::load(NO_FILE).unwrap();
        assert!(ctl.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = ControlFile::load("/nonexistent/parcel-init.ctl").unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { .. }));
    }
}
