// Copyright (c) 2026 The pintan Developers

use strum::{Display, EnumIter, EnumString, EnumVariantNames};

/// Dialog lifecycle events, fired by the dialog driver in the order
/// [MessageCreated][DialogEvent::MessageCreated] → (exchange) →
/// [MessageSent][DialogEvent::MessageSent], with
/// [JobsCreated][DialogEvent::JobsCreated] once per job batch
#[derive(Copy, Clone, PartialEq, Eq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum DialogEvent {
    /// Dialog initialisation message about to be encoded
    MessageCreated,

    /// Reply received, [DialogContext::status][crate::dialog::DialogContext::status] populated
    MessageSent,

    /// Business tasks queued, before the first message is sent
    JobsCreated,
}
