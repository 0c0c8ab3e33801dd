//! Install endpoint classification.

/// What an install endpoint names: a registry package or a local directory.
///
/// The package manager accepts both forms; only local endpoints need the
/// stale-copy cleanup before install, and both branch again during path
/// resolution, so the classification is made once and carried as a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Registry package name, shorthand or URL.
    Registry(String),
    /// Filesystem reference, starting with `./` or `/`.
    Local(String),
}

impl Endpoint {
    /// Classify a raw endpoint string.
    pub fn classify(raw: &str) -> Self {
        if raw.starts_with("./") || raw.starts_with('/') {
            Endpoint::Local(raw.to_string())
        } else {
            Endpoint::Registry(raw.to_string())
        }
    }

    /// The raw endpoint string as given on the command line.
    pub fn as_str(&self) -> &str {
        match self {
            Endpoint::Registry(raw) | Endpoint::Local(raw) => raw,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Endpoint::Local(_))
    }
}
