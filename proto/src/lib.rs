// Copyright (c) 2026 The pintan Developers

//! Protocol definitions for PIN/TAN dialogs
//!
//! This crate provides the data model shared between the negotiation core
//! and client libraries: the flat, dotted-path property sets used for bank
//! parameter data (BPD), user parameter data (UPD) and reply data, the
//! structured return codes extracted from replies, and the fixed codes used
//! when requesting TANs.
//!
//! Property paths follow the segment grammar of the message encoder, for
//! example `Params_3.TAN2StepPar6.ParTAN2Step.TAN2StepParams6_2.secfunc`.
//! Indexed elements use the `_N` suffix convention (see [data::with_counter]),
//! with the first element carrying no suffix at all.
//!

#![no_std]

extern crate alloc;

pub mod codes;
pub mod data;
pub mod hash;
pub mod prelude;
pub mod process;
pub mod query;
pub mod status;

/// Security function identifier of the one-step (PIN only) method
pub const ONE_STEP_METHOD: &str = "999";

/// Segment code of the identification segment sent with every dialog initialisation
pub const SEG_IDENTIFICATION: &str = "HKIDN";

/// Administrative business transactions that must be referenced by the
/// SCA request during dialog initialisation when queued (change PIN, list TAN media)
pub const SCA_ADMIN_SEGMENTS: &[&str] = &["HKPAE", "HKTAB"];

/// Sentinel TAN media name used when a name is required but none is known
pub const TAN_MEDIA_NOREF: &str = "noref";
