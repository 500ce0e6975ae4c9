//! Prelude to simplify downstream use of protocol objects
//!

pub use crate::{
    codes::{KnownReturnCode, AUTH_FAILURE},
    data::{with_counter, Data, ECHO_PREFIX},
    hash::OrderHashMode,
    process::{DialogTemplate, ProcessVariant, ScaStep, TanProcess},
    status::{ReplyStatus, ReturnValue, Severity},
    ONE_STEP_METHOD, SEG_IDENTIFICATION,
};
