// Copyright (c) 2026 The pintan Developers

//! Parameter paths and query patterns
//!
//! See [Data::find_all][crate::data::Data::find_all] and
//! [Data::find][crate::data::Data::find] for pattern semantics.

use alloc::{format, string::String};

/// One-step method allowed by the bank (`J` / `N`)
pub const BPD_PINTAN_CAN1STEP: &str = "Params*.PinTanPar*.ParPinTan.can1step";

/// Per business transaction TAN requirement, sibling of `needtan`
pub const BPD_PINTAN_GV_SEGCODE: &str = "Params*.PinTanPar*.ParPinTan.PinTanGV*.segcode";

/// Parameter segment codes of supported business transactions
pub const BPD_SEGHEAD_CODE: &str = "Params*.*.SegHead.code";

/// Prefix of the PIN/TAN parameter segment
pub const BPD_PINTAN_PAR: &str = "PinTanPar";

/// Prefix of two-step method parameter segments, followed by the segment version
pub const BPD_TAN2STEP_PAR: &str = "TAN2StepPar";

/// Group holding two-step method declarations
pub const BPD_TAN2STEP_GROUP: &str = "ParTAN2Step";

/// Identifier field of a two-step method declaration
pub const BPD_SECFUNC: &str = "secfunc";

/// TAN response block within reply data
pub const TAN_RESPONSE: &str = "TAN2StepRes*.";

/// Stored TAN media name(s) in the user parameter data
pub const UPD_TAN_MEDIA: &str = "tanmedia.names";

/// Order hash mode for TAN parameters of the provided segment version
pub fn bpd_order_hash_mode(seg_version: u32) -> String {
    format!("Params*.TAN2StepPar{seg_version}.ParTAN2Step.orderhashmode")
}

/// Path prefix of TAN request fields for the provided segment version
pub fn tan_request_prefix(seg_version: u32) -> String {
    format!("TAN2Step{seg_version}")
}

/// Convert a request segment code to its parameter segment code (`HKUEB` -> `HIUEBS`)
pub fn to_parameter_code(code: &str) -> String {
    match code.get(2..) {
        Some(rest) => format!("HI{rest}S"),
        None => format!("{code}S"),
    }
}
