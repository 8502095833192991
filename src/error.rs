//! Error type shared by the fallible table entry points.

/// Represents errors that can occur when building or querying a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A table was configured with zero buckets
    ZeroCapacity,

    /// The key is not present in the table
    KeyNotFound(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "table capacity must be at least one bucket"),
            Self::KeyNotFound(key) => write!(f, "key not found: {key:?}"),
        }
    }
}

impl std::error::Error for Error {}

/// Table result
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_missing_key() {
        let e = Error::KeyNotFound("abc".to_string());
        assert_eq!(e.to_string(), "key not found: \"abc\"");
        assert!(Error::ZeroCapacity.to_string().contains("capacity"));
    }
}
