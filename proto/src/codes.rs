// Copyright (c) 2026 The pintan Developers

//! Known bank return codes
//!

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

use crate::status::ReturnValue;

/// Return codes with defined reactions in the PIN/TAN negotiation
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Debug,
    EnumString,
    Display,
    EnumVariantNames,
    EnumIter,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[repr(u16)]
pub enum KnownReturnCode {
    /// User id / customer id changed, parameters carry the new ids
    W3072 = 3072,

    /// Strong customer authentication not required for this exchange
    W3076 = 3076,

    /// Two-step methods permitted for the user, one per parameter
    W3920 = 3920,

    /// PIN invalid
    E9340 = 9340,

    /// PIN locked after too many attempts
    E9342 = 9342,

    /// User name or PIN wrong
    E9931 = 9931,

    /// PIN wrong
    E9942 = 9942,
}

/// Error codes signalling rejected credentials
pub const AUTH_FAILURE: &[KnownReturnCode] = &[
    KnownReturnCode::E9340,
    KnownReturnCode::E9342,
    KnownReturnCode::E9931,
    KnownReturnCode::E9942,
];

impl KnownReturnCode {
    /// Numeric return code
    pub fn code(&self) -> u16 {
        (*self).into()
    }

    /// Check whether a parsed return value carries this code
    pub fn matches(&self, rv: &ReturnValue) -> bool {
        rv.numeric_code() == Some(self.code())
    }

    /// Check whether this code signals rejected credentials
    pub fn is_auth_failure(&self) -> bool {
        AUTH_FAILURE.contains(self)
    }

    /// Find the first return value matching this code
    pub fn search<'a>(
        &self,
        values: impl IntoIterator<Item = &'a ReturnValue>,
    ) -> Option<&'a ReturnValue> {
        values.into_iter().find(|rv| self.matches(rv))
    }
}
