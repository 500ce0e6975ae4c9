// Copyright (c) 2026 The pintan Developers

//! Order hash computation for process variant one
//!
//! The business segment is encoded in isolation and hashed with the
//! algorithm selected by the bank (`orderhashmode` in the TAN parameters).

use alloc::vec::Vec;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use ripemd::Ripemd160;
use sha1::{Digest as _, Sha1};
use strum::{Display, EnumIter};

/// Bank-selected order hash algorithm
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum OrderHashMode {
    Ripemd160 = 1,
    Sha1 = 2,
}

impl OrderHashMode {
    /// Parse a BPD `orderhashmode` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(OrderHashMode::Ripemd160),
            "2" => Some(OrderHashMode::Sha1),
            _ => None,
        }
    }

    /// Hash an encoded segment
    pub fn digest(&self, segment: &[u8]) -> Vec<u8> {
        match self {
            OrderHashMode::Ripemd160 => Ripemd160::new().chain_update(segment).finalize().to_vec(),
            OrderHashMode::Sha1 => Sha1::new().chain_update(segment).finalize().to_vec(),
        }
    }
}
