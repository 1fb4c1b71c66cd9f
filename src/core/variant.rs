use std::fmt;

use thiserror::Error;

/// Error raised when an INFO value cannot be read as the requested type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfoError {
    #[error("INFO key '{key}' is a {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A typed value from the INFO column of a variant record
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    /// Key present without a value (e.g. `IMPRECISE`)
    Flag,
    Integer(i64),
    Float(f64),
    String(String),
    /// Comma-separated values
    Array(Vec<InfoValue>),
}

impl InfoValue {
    /// Infer the value type from its raw text.
    ///
    /// VCF header `Type=` declarations are not consulted; a value that parses as
    /// an integer is an integer, then a float, otherwise a string.
    pub fn parse(raw: &str) -> Self {
        if raw.contains(',') {
            return Self::Array(raw.split(',').map(Self::parse_scalar).collect());
        }
        Self::parse_scalar(raw)
    }

    fn parse_scalar(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<i64>() {
            Self::Integer(n)
        } else if let Ok(f) = raw.parse::<f64>() {
            Self::Float(f)
        } else {
            Self::String(raw.to_string())
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
        }
    }
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => Ok(()),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }
    }
}

/// INFO column key/value pairs, in record order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    entries: Vec<(String, InfoValue)>,
}

impl Info {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw INFO column (`KEY=VALUE;FLAG;...`). A lone `.` is empty.
    pub fn parse(raw: &str) -> Self {
        let mut info = Self::new();
        if raw.is_empty() || raw == "." {
            return info;
        }

        for field in raw.split(';').filter(|f| !f.is_empty()) {
            match field.split_once('=') {
                Some((key, value)) => info.insert(key, InfoValue::parse(value)),
                None => info.insert(field, InfoValue::Flag),
            }
        }

        info
    }

    pub fn insert(&mut self, key: impl Into<String>, value: InfoValue) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Read a value as a string. Numbers are rendered back to text; flags and
    /// arrays are rejected.
    ///
    /// # Errors
    ///
    /// Returns `InfoError::TypeMismatch` if the value is a flag or an array.
    pub fn get_str(&self, key: &str) -> Result<Option<String>, InfoError> {
        match self.get(key) {
            None => Ok(None),
            Some(value @ (InfoValue::Flag | InfoValue::Array(_))) => {
                Err(InfoError::TypeMismatch {
                    key: key.to_string(),
                    expected: "string",
                    found: value.type_name(),
                })
            }
            Some(value) => Ok(Some(value.to_string())),
        }
    }

    /// Read a value as an integer.
    ///
    /// # Errors
    ///
    /// Returns `InfoError::TypeMismatch` if the value is not a single integer.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, InfoError> {
        match self.get(key) {
            None => Ok(None),
            Some(InfoValue::Integer(n)) => Ok(Some(*n)),
            Some(value) => Err(InfoError::TypeMismatch {
                key: key.to_string(),
                expected: "integer",
                found: value.type_name(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single variant record, reduced to the fields indel scoring needs.
///
/// Only the first alternate allele is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub chrom: String,

    /// 1-based position of the first REF base (the breakpoint anchor)
    pub pos: u64,

    pub ref_allele: String,

    /// First alternate allele
    pub alt_allele: String,

    /// True unless FILTER names a failing filter (`PASS` and `.` both pass)
    pub passes_filters: bool,

    pub info: Info,
}

impl Variant {
    pub fn new(
        chrom: impl Into<String>,
        pos: u64,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
            ref_allele: ref_allele.into(),
            alt_allele: alt_allele.into(),
            passes_filters: true,
            info: Info::new(),
        }
    }

    #[must_use]
    pub fn with_filtered(mut self) -> Self {
        self.passes_filters = false;
        self
    }

    #[must_use]
    pub fn with_info(mut self, key: impl Into<String>, value: InfoValue) -> Self {
        self.info.insert(key, value);
        self
    }

    pub fn is_filtered(&self) -> bool {
        !self.passes_filters
    }
}
