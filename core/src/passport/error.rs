// Copyright (c) 2026 The pintan Developers

/// [Passport][super::Passport] errors
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Bank declared order hash mode is neither RIPEMD-160 nor SHA-1
    #[cfg_attr(feature = "thiserror", error("unknown order hash mode"))]
    UnknownHashMode = 0x00,

    /// Current TAN method has no catalog entry
    #[cfg_attr(feature = "thiserror", error("unsupported TAN method"))]
    UnsupportedMethod = 0x01,

    /// Selected TAN method is not one of the offered options
    #[cfg_attr(feature = "thiserror", error("selected TAN method not supported"))]
    InvalidSelection = 0x02,

    /// No PIN entered
    #[cfg_attr(feature = "thiserror", error("PIN must not be empty"))]
    EmptyPin = 0x03,

    /// No TAN entered
    #[cfg_attr(feature = "thiserror", error("TAN must not be empty"))]
    EmptyTan = 0x04,

    /// Business task field could not be formatted as a challenge parameter
    #[cfg_attr(feature = "thiserror", error("invalid challenge parameter"))]
    InvalidChallengeParam = 0x05,

    /// Segment encoding failed
    #[cfg_attr(feature = "thiserror", error("segment encoding failed"))]
    EncodingFailed = 0x06,
}

impl Error {
    /// Check whether this error was caused by invalid user input,
    /// in which case passport state is left unchanged
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidSelection | Error::EmptyPin | Error::EmptyTan
        )
    }
}
