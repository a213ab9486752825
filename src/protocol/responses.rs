//! FTP Response handling
//!
//! Parses control-channel reply lines and classifies their status codes.

use std::fmt;

/// Reply code announcing the passive data address
pub const PASSIVE_MODE: u16 = 227;

/// Status class taken from the first digit of the code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Preliminary,
    Success,
    Intermediate,
    Failure,
    Unknown,
}

/// One line of control-channel text: the status code token and the rest of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    code: String,
    text: String,
}

impl Response {
    /// Split a reply line at its first space. The leading token is the code.
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        match line.split_once(' ') {
            Some((code, text)) => Self {
                code: code.to_string(),
                text: text.to_string(),
            },
            None => Self {
                code: line.to_string(),
                text: String::new(),
            },
        }
    }

    /// The raw status code token, e.g. `"227"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Everything after the code.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status_class(&self) -> StatusClass {
        match self.code.as_bytes().first() {
            Some(b'1') => StatusClass::Preliminary,
            Some(b'2') => StatusClass::Success,
            Some(b'3') => StatusClass::Intermediate,
            Some(b'4' | b'5' | b'6') => StatusClass::Failure,
            _ => StatusClass::Unknown,
        }
    }

    /// Codes starting with 4, 5 or 6 are failures. FTP never sends 6xx;
    /// it is still treated as a failure.
    pub fn is_failure(&self) -> bool {
        self.status_class() == StatusClass::Failure
    }

    pub fn is_success(&self) -> bool {
        self.status_class() == StatusClass::Success
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.text)
        }
    }
}
