use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    // nothing in an in-memory catalog clears up by retrying
    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("console io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                match reason_code {
                    Some(code) => write!(f, "{} ({})", message, code),
                    None => write!(f, "{}", message),
                }
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for catalog operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

// BookKind tells a printed book apart from an electronic one.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum BookKind {
    Book,
    EBook,
}

impl BookKind {
    pub fn parse(s: &str) -> LibraryResult<BookKind> {
        match s.trim().to_lowercase().as_str() {
            "book" => Ok(BookKind::Book),
            "ebook" | "e-book" => Ok(BookKind::EBook),
            other => Err(LibraryError::validation(
                format!("unknown book type {:?}, expected book or ebook", other).as_str(),
                Some("book_kind".to_string()))),
        }
    }
}

impl Display for BookKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BookKind::Book => write!(f, "book"),
            BookKind::EBook => write!(f, "ebook"),
        }
    }
}
