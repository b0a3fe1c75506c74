//! [`Error`][core::error::Error] implementations used across the crate

use core::fmt::{Display, Formatter};

/// Fatal failures from a client run.
///
/// Protocol trouble is deliberately absent here: a wrong content type is
/// recovered in place and malformed frames are tolerated by the parser. What
/// can actually kill a run is the transport or the console.
#[derive(Debug)]
pub enum Error {
    /// The request, or the response body mid-stream, failed
    Transport(reqwest::Error),
    /// Writing an event to the output failed
    Output(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Transport(e) => e.fmt(f),
            Error::Output(e) => e.fmt(f),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Transport(e) => Some(e),
            Error::Output(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Output(value)
    }
}
