use std::io;

use tagfs_record::IndexError;

/// Errors surfaced by a mount.
///
/// Every resolution failure is reported as `NotFound`; the underlying
/// lookup error is kept as the source for logging only.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{path}: not found")]
    NotFound {
        path: String,
        #[source]
        source: IndexError,
    },
}

impl Error {
    /// The path that failed to open.
    pub fn path(&self) -> &str {
        match self {
            Error::NotFound { path, .. } => path,
        }
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        io::Error::new(io::ErrorKind::NotFound, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    fn not_found() -> Error {
        Error::NotFound {
            path: "/dns/missing".to_string(),
            source: IndexError::FieldNotFound {
                tag: "json".to_string(),
                name: "missing".to_string(),
            },
        }
    }

    #[test]
    fn display_names_path() {
        assert_eq!(format!("{}", not_found()), "/dns/missing: not found");
        assert_eq!(not_found().path(), "/dns/missing");
    }

    #[test]
    fn source_is_index_error() {
        let e = not_found();
        let source = StdError::source(&e).unwrap();
        assert!(source.to_string().contains("missing"));
    }

    #[test]
    fn converts_to_io_not_found() {
        let e: io::Error = not_found().into();
        assert_eq!(e.kind(), io::ErrorKind::NotFound);
    }
}
