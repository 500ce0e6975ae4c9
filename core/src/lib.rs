// Copyright (c) 2026 The pintan Developers

//! PIN/TAN negotiation core
//!
//! This provides a [Passport][passport::Passport] holding the long-lived
//! credential state of a PIN/TAN user (announced TAN methods, the enrolled
//! method set, the current selection, the cached PIN and challenge data)
//! and the logic that negotiates TAN methods and strong customer
//! authentication (SCA) with a bank server.
//!
//! Interactions with the [Passport][passport::Passport] are driven by
//! [DialogEvent][passport::DialogEvent]s fired by the dialog driver,
//! each taking the per-dialog [DialogContext][dialog::DialogContext] by
//! mutable reference. See [pintan_proto] for the property data model and
//! return code definitions.
//!
//! ## Operations
//!
//! Before the first dialog the caller loads bank parameter data (BPD) via
//! [`Passport::set_bpd`][passport::Passport::set_bpd], which rebuilds the
//! method catalog from the `HITANS` declarations.
//!
//! ### Dialog initialisation
//!
//! 1. Create a [DialogContext][dialog::DialogContext] with the
//!    [`Init`][pintan_proto::process::DialogTemplate::Init] template
//! 2. Fire [`MessageCreated`][passport::DialogEvent::MessageCreated], the
//!    passport writes `TAN2Step{version}.*` request fields into the
//!    initialisation fields where SCA applies
//! 3. Exchange the message, attach the parsed
//!    [ReplyStatus][pintan_proto::status::ReplyStatus] to the context
//! 4. Fire [`MessageSent`][passport::DialogEvent::MessageSent], the passport
//!    reacts to known return codes and harvests TAN challenges
//! 5. If [`DialogContext::take_repeat`][dialog::DialogContext::take_repeat]
//!    returns true, repeat from 2 (bounded by the driver)
//!
//! ### Business tasks
//!
//! 1. Queue business tasks into a [MessageQueue][dialog::MessageQueue]
//! 2. Fire [`JobsCreated`][passport::DialogEvent::JobsCreated], the passport
//!    inserts TAN request tasks for tasks requiring a TAN according to the
//!    process variant of the current method
//! 3. Exchange each message in order, forwarding order references from
//!    step one TAN replies via
//!    [`MessageQueue::forward_order_ref`][dialog::MessageQueue::forward_order_ref]
//!
//! Signing a message ([`Passport::sign`][passport::Passport::sign]) consumes
//! stored challenge data and requests the TAN from the user.
//!

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pintan_proto as proto;

pub mod challenge;

pub mod dialog;

pub mod flicker;

pub mod passport;
pub use passport::{Config, Error};

mod helpers;
pub use helpers::collect_segment_codes;
