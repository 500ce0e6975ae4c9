// Copyright (c) 2026 The pintan Developers

//! TAN process codes and dialog templates
//!

use strum::{Display, EnumIter, EnumString, EnumVariantNames};

/// Bank-selected sequencing of the TAN request relative to the business task
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum ProcessVariant {
    /// TAN request with the order hash sent ahead of the business task
    One,
    /// Business task and TAN request sent together, TAN submitted in a second step
    Two,
}

impl ProcessVariant {
    /// Resolve the variant from a method's `process` attribute,
    /// anything other than `"1"` selects variant two
    pub fn from_attr(process: Option<&str>) -> Self {
        match process {
            Some("1") => ProcessVariant::One,
            _ => ProcessVariant::Two,
        }
    }
}

/// Step within the SCA negotiation of a dialog initialisation
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum ScaStep {
    /// Initial request, awaiting the challenge
    Step1,
    /// Challenge received, submitting the TAN
    Step2,
}

/// `tanprocess` codes written into TAN request segments
#[derive(Copy, Clone, PartialEq, Eq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum TanProcess {
    /// Process variant 1
    #[strum(serialize = "1")]
    Process1,
    /// Process variant 2, first step (submit order, request challenge)
    #[strum(serialize = "4")]
    Process2Step1,
    /// Process variant 2, second step (submit TAN)
    #[strum(serialize = "2")]
    Process2Step2,
}

impl TanProcess {
    /// Wire code for this process
    pub const fn code(&self) -> &'static str {
        match self {
            TanProcess::Process1 => "1",
            TanProcess::Process2Step1 => "4",
            TanProcess::Process2Step2 => "2",
        }
    }

    /// Select the process code for a variant and SCA step
    pub const fn select(variant: ProcessVariant, step: ScaStep) -> Self {
        match (variant, step) {
            (ProcessVariant::One, _) => TanProcess::Process1,
            (ProcessVariant::Two, ScaStep::Step1) => TanProcess::Process2Step1,
            (ProcessVariant::Two, ScaStep::Step2) => TanProcess::Process2Step2,
        }
    }
}

/// Dialog initialisation templates
#[derive(Copy, Clone, PartialEq, Eq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DialogTemplate {
    /// Authenticated dialog initialisation
    #[strum(serialize = "DialogInit")]
    Init,
    /// Second SCA step of a dialog initialisation, carrying the TAN
    #[strum(serialize = "DialogInitSCA")]
    InitSca,
    /// Anonymous dialog initialisation
    #[strum(serialize = "DialogInitAnon")]
    InitAnon,
    /// Customer system id synchronisation
    #[strum(serialize = "Synch")]
    Sync,
    /// Dialog end
    #[strum(serialize = "DialogEnd")]
    End,
}

impl DialogTemplate {
    /// Templates performing strong customer authentication during initialisation
    pub const fn sends_sca(&self) -> bool {
        matches!(
            self,
            DialogTemplate::Init | DialogTemplate::InitSca | DialogTemplate::Sync
        )
    }

    /// Synchronisation-only templates
    pub const fn is_sync(&self) -> bool {
        matches!(self, DialogTemplate::Sync)
    }
}
