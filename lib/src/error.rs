// Copyright (c) 2026 The pintan Developers

use core::fmt::Debug;
use std::fmt::Display;

use tokio::time::error::Elapsed;

/// PIN/TAN dialog API Error Type
#[derive(Debug, thiserror::Error)]
pub enum Error<E: Display + Debug> {
    /// Transport / encoder error
    #[error("Transport error {0}")]
    Transport(E),

    /// Passport operation failed
    #[error("Passport operation failed: {0}")]
    Engine(pintan_core::Error),

    /// Dialog initialisation repeated more often than configured
    #[error("Dialog initialisation restarted too many times ({0})")]
    TooManyRestarts(usize),

    /// Request timeout
    #[error("Timeout waiting for bank response")]
    RequestTimeout,
}

impl<E: Display + Debug> From<pintan_core::Error> for Error<E> {
    fn from(e: pintan_core::Error) -> Self {
        Error::Engine(e)
    }
}

impl<E: Display + Debug> From<Elapsed> for Error<E> {
    fn from(_: Elapsed) -> Self {
        Error::RequestTimeout
    }
}
