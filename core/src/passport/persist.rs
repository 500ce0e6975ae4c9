// Copyright (c) 2026 The pintan Developers

use alloc::string::String;

/// Challenge data received in reply to a TAN request, persisted with the
/// passport until consumed by [Passport::sign][super::Passport::sign]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChallengeData {
    challenge: Option<String>,
    challenge_hhd_uc: Option<String>,
    order_ref: Option<String>,
}

/// Store `value` where non-empty
fn store(slot: &mut Option<String>, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        *slot = Some(v.into());
    }
}

impl ChallengeData {
    pub fn set_challenge(&mut self, challenge: Option<&str>) {
        store(&mut self.challenge, challenge)
    }

    pub fn set_challenge_hhd_uc(&mut self, hhd_uc: Option<&str>) {
        store(&mut self.challenge_hhd_uc, hhd_uc)
    }

    pub fn set_order_ref(&mut self, order_ref: Option<&str>) {
        store(&mut self.order_ref, order_ref)
    }

    pub fn challenge(&self) -> Option<&str> {
        self.challenge.as_deref()
    }

    pub fn challenge_hhd_uc(&self) -> Option<&str> {
        self.challenge_hhd_uc.as_deref()
    }

    pub fn order_ref(&self) -> Option<&str> {
        self.order_ref.as_deref()
    }

    /// Fetch and clear the challenge text
    pub fn take_challenge(&mut self) -> Option<String> {
        self.challenge.take()
    }

    /// Fetch and clear the optical challenge payload
    pub fn take_challenge_hhd_uc(&mut self) -> Option<String> {
        self.challenge_hhd_uc.take()
    }

    /// Fetch and clear the order reference
    pub fn take_order_ref(&mut self) -> Option<String> {
        self.order_ref.take()
    }

    pub fn is_empty(&self) -> bool {
        self.challenge.is_none() && self.challenge_hhd_uc.is_none() && self.order_ref.is_none()
    }
}
