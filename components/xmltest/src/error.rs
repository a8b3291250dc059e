use std::fmt::{Debug, Display, Formatter};
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input is not well-formed XML
    Syntax,
    /// Source or sink failed
    Io,
}

/// Well-formedness error reported by the tokenizer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    offset: u64,
    message: String,
}

impl SyntaxError {
    pub fn new(offset: u64, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }

    /// Byte offset in the input where the error was detected
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at byte {}", self.message, self.offset)
    }
}

pub enum Error {
    Syntax(SyntaxError),
    Io(io::Error),
}

impl Error {
    pub fn syntax(offset: u64, message: impl Into<String>) -> Self {
        SyntaxError::new(offset, message).into()
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(err) => f.debug_tuple("Syntax").field(err).finish(),
            Error::Io(err) => f.debug_tuple("Io").field(err).finish(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(err) => write!(f, "XML syntax error: {}", err),
            Error::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Syntax(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value)
    }
}

impl From<SyntaxError> for Error {
    fn from(value: SyntaxError) -> Self {
        Error::Syntax(value)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn display_syntax() {
        let err = Error::syntax(12, "unexpected end tag");
        assert_eq!(ErrorKind::Syntax, err.kind());
        assert_eq!(
            "XML syntax error: unexpected end tag at byte 12",
            err.to_string()
        );
    }

    #[test]
    fn from_syntax_error() {
        let err = Error::from(SyntaxError::new(3, "invalid name"));
        assert_matches!(err, Error::Syntax(err) if err.offset() == 3);
    }

    #[test]
    fn io_source() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(ErrorKind::Io, err.kind());
        assert!(std::error::Error::source(&err).is_some());
    }
}
