// Copyright (c) 2026 The pintan Developers

//! Vectors and test drivers for PIN/TAN negotiation tests.
//!
//! Shared by the `pintan-core` and `pintan` integration tests.
//!

pub mod bpd;

pub mod reply;

pub mod driver;

pub mod bank;

pub mod flicker;

/// Common error type for test drivers
#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum Error {
    #[error("no reply scripted for message {0}")]
    NoReply(usize),

    #[error("unexpected request: {0}")]
    UnexpectedRequest(String),
}
