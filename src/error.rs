use std::{error, fmt};

/// Broad classification of what went wrong, so callers can tell a bad
/// request apart from a failing template or an unconvertible metric object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input is absent or has the wrong shape.
    Input,
    /// Activity settings could not be interpreted.
    Settings,
    /// The template engine rejected or failed to execute a template.
    Template,
    /// A metric object could not be turned into exposition lines.
    Format,
    /// Reading input or writing output failed.
    Io,
}

pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn error::Error>>,
}

impl Error {
    pub fn new<M: Into<String>>(kind: ErrorKind, message: M) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<M, E>(kind: ErrorKind, message: M, source: E) -> Self
    where
        M: Into<String>,
        E: error::Error + 'static,
    {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn input<M: Into<String>>(message: M) -> Self {
        Self::new(ErrorKind::Input, message)
    }

    pub fn settings<M: Into<String>>(message: M) -> Self {
        Self::new(ErrorKind::Settings, message)
    }

    pub fn format<M: Into<String>>(message: M) -> Self {
        Self::new(ErrorKind::Format, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} error: {}", self.kind, self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "{}. Source error: {}", self.message, err),
            None => write!(f, "{}", self.message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.source {
            Some(ref err) => Some(&**err),
            None => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, "I/O failed", err)
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        format!("{}", err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
