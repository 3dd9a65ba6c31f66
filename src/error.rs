use std::fmt;

#[derive(Debug)]
pub enum Error {
    YAML(serde_yaml::Error),
    /// A lookup merge directive named a lookup nobody defined.
    UnresolvedLookupMerge { target: String, source: String },
    /// A set merge directive named something that is neither a lookup nor a
    /// lookup set.
    UnresolvedSetMerge { target: String, source: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `#[error(transparent)]`: forward Display straight to the inner error.
            Error::YAML(e) => fmt::Display::fmt(e, f),
            Error::UnresolvedLookupMerge { target, source } => {
                write!(f, "unable to merge lookup '{source}' into '{target}'")
            }
            Error::UnresolvedSetMerge { target, source } => {
                write!(f, "unable to merge set '{source}' into '{target}'")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            // Transparent variant forwards `source()` through to the inner error.
            Error::YAML(e) => e.source(),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::YAML(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
