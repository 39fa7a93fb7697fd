use std::{fmt, path::PathBuf};

/// Failures that abort a whole stub generation.
///
/// Soft problems never end up here; they are collected as [`Warning`]s.
#[derive(Debug, thiserror::Error)]
pub enum StubError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to parse `{path}`: {message}")]
    Parse { path: String, message: String },

    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("cannot access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Category of a recoverable problem met while building a stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A member could not be enumerated and was skipped.
    NotIntrospectable,
    /// A name listed in `__all__` has no matching member.
    ExportNotFound,
    /// `__all__` is not a literal sequence of strings.
    ExportListNotLiteral,
    /// The signature could not be reconstructed; a variadic fallback is used.
    SignatureUnavailable,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            WarningKind::NotIntrospectable => "member not introspectable",
            WarningKind::ExportNotFound => "export not found",
            WarningKind::ExportListNotLiteral => "export list not literal",
            WarningKind::SignatureUnavailable => "signature not derivable",
        };
        write!(f, "{label}")
    }
}

/// A recoverable problem attached to the generated stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    /// Dotted path of the affected member, e.g. `random.Random.seed`.
    pub subject: String,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} `{}`: {}", self.kind, self.subject, self.message)
    }
}

/// Accumulates warnings across pipeline stages.
///
/// Every warning is also forwarded to the `log` facade when recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings(Vec<Warning>);

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.0.push(warning);
    }

    pub fn record(
        &mut self,
        kind: WarningKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(Warning::new(kind, subject, message));
    }

    pub fn extend(&mut self, other: Warnings) {
        // Already logged when first recorded.
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.0
    }
}
