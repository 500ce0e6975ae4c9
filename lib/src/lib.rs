// Copyright (c) 2026 The pintan Developers

//! PIN/TAN dialog client library (and CLI)
//!
//! This provides a [DialogHandle] driving dialog initialisation and job
//! batches against a bank via an [Exchange] implementation, with TAN
//! negotiation handled by a [Passport][pintan_core::passport::Passport].
//!

use std::fmt::{Debug, Display};

use async_trait::async_trait;

/// Re-export `pintan-core` for consumers
pub use pintan_core;

/// Re-export `pintan-proto` for consumers
pub use pintan_proto::{self as proto};

use proto::{data::Data, process::DialogTemplate};
use pintan_core::dialog::Task;

mod handle;
pub use handle::DialogHandle;

mod error;
pub use error::Error;

/// Outbound message content, encoded by the [Exchange]
#[derive(Clone, PartialEq, Debug)]
pub enum Request {
    /// Dialog initialisation with the provided template and fields
    Init {
        template: DialogTemplate,
        fields: Data,
    },
    /// Business message carrying the provided tasks in order
    Message { tasks: Vec<Task> },
}

/// [Exchange] encodes and transmits messages to the bank server
#[async_trait]
pub trait Exchange {
    type Error: Debug + Display + Send + Sync + 'static;

    /// Encode a request to a message for signing
    async fn encode(&self, req: &Request) -> Result<Vec<u8>, Self::Error>;

    /// Send a signed message, returning the flattened reply data
    async fn send(&self, msg: &[u8], signature: &str) -> Result<Data, Self::Error>;
}

#[async_trait]
impl<T: Exchange + Send + Sync> Exchange for &T {
    type Error = T::Error;

    async fn encode(&self, req: &Request) -> Result<Vec<u8>, Self::Error> {
        T::encode(self, req).await
    }

    async fn send(&self, msg: &[u8], signature: &str) -> Result<Data, Self::Error> {
        T::send(self, msg, signature).await
    }
}
