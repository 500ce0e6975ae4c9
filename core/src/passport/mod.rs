// Copyright (c) 2026 The pintan Developers

//! The [Passport] holds PIN/TAN credential state and negotiates TAN methods
//! and SCA with the bank.
//!
//! This handles [DialogEvent] inputs fired by the dialog driver, reading and
//! mutating the per-dialog [DialogContext] passed with each event, and
//! interacts with the user and the message encoder through a [Driver].

use alloc::{collections::BTreeSet, string::String, vec::Vec};

use zeroize::Zeroizing;

use pintan_proto::prelude::*;

use crate::{
    challenge::ChallengeParams,
    dialog::{DialogContext, Task},
};

mod catalog;
pub use catalog::{MethodCatalog, TanMethod, ATTR_SEGVERSION};

mod config;
pub use config::{Config, DEFAULT_MAX_RESTARTS};

mod error;
pub use error::Error;

mod event;
pub use event::DialogEvent;

mod params;
pub use params::PinTanInfo;

mod patch;

mod persist;
pub use persist::ChallengeData;

mod policy;

mod sca;
pub use sca::{DEFAULT_TAN_SEG_VERSION, MIN_SCA_SEG_VERSION, MIN_TAN_MEDIA_SEG_VERSION};

mod select;
pub use select::{render_options, MethodOption, ONE_STEP_NAME};

mod sign;
pub use sign::ONE_STEP_TAN_PROMPT;

/// [`Driver`] trait provides user interaction and message encoding for
/// [`Passport`] instances
pub trait Driver {
    /// Request the PIN from the user
    fn request_pin(&mut self) -> String;

    /// Request a TAN from the user, with an optional rendered flicker code
    fn request_tan(&mut self, prompt: &str, flicker: Option<&str>) -> String;

    /// Request a TAN method choice from the `id:name|id:name` options,
    /// returning the selected id
    fn select_method(&mut self, options: &str) -> String;

    /// Request a TAN media name, pre-filled with `default`
    fn request_tan_media(&mut self, default: &str) -> String;

    /// Notify the user the PIN was rejected
    fn wrong_pin(&mut self) {}

    /// Notify the user of changed `user|customer` ids
    fn user_id_changed(&mut self, _ids: &str) {}

    /// Encode a business task as a standalone segment, for order hashing
    fn encode_segment(&self, task: &Task) -> Result<Vec<u8>, Error>;

    /// Resolve challenge class parameters for a business task,
    /// defaulting to the built-in table
    fn challenge_params(
        &self,
        task: &Task,
        method: &TanMethod,
    ) -> Result<Option<ChallengeParams>, Error> {
        crate::challenge::challenge_params(task, method)
    }
}

impl<T: Driver> Driver for &mut T {
    fn request_pin(&mut self) -> String {
        T::request_pin(self)
    }

    fn request_tan(&mut self, prompt: &str, flicker: Option<&str>) -> String {
        T::request_tan(self, prompt, flicker)
    }

    fn select_method(&mut self, options: &str) -> String {
        T::select_method(self, options)
    }

    fn request_tan_media(&mut self, default: &str) -> String {
        T::request_tan_media(self, default)
    }

    fn wrong_pin(&mut self) {
        T::wrong_pin(self)
    }

    fn user_id_changed(&mut self, ids: &str) {
        T::user_id_changed(self, ids)
    }

    fn encode_segment(&self, task: &Task) -> Result<Vec<u8>, Error> {
        T::encode_segment(self, task)
    }

    fn challenge_params(
        &self,
        task: &Task,
        method: &TanMethod,
    ) -> Result<Option<ChallengeParams>, Error> {
        T::challenge_params(self, task, method)
    }
}

/// [Passport] provides PIN/TAN credential state and TAN method negotiation
pub struct Passport<DRV: Driver> {
    config: Config,

    bpd: Option<Data>,
    upd: Option<Data>,

    catalog: MethodCatalog,
    enrolled: BTreeSet<String>,

    current: Option<String>,
    auto_selected: bool,

    pin: Option<Zeroizing<String>>,
    challenge: ChallengeData,

    anonymous: bool,
    verify_tan_mode: bool,

    drv: DRV,
}

impl<DRV: Driver> Passport<DRV> {
    /// Create a new passport with the provided driver and configuration
    pub fn new(drv: DRV, config: Config) -> Self {
        Self {
            verify_tan_mode: config.verify_tan_mode,
            config,
            bpd: None,
            upd: None,
            catalog: MethodCatalog::new(),
            enrolled: BTreeSet::new(),
            current: None,
            auto_selected: false,
            pin: None,
            challenge: ChallengeData::default(),
            anonymous: false,
            drv,
        }
    }

    /// Handle dialog lifecycle events
    pub fn update(&mut self, evt: DialogEvent, ctx: &mut DialogContext) -> Result<(), Error> {
        #[cfg(feature = "log")]
        log::debug!("event: {}", evt);

        match evt {
            DialogEvent::MessageCreated => self.sca_request(ctx),
            DialogEvent::MessageSent => {
                self.check_invalid_pin(ctx);
                self.check_allowed_methods(ctx)?;
                self.check_user_id_changed(ctx);
                self.sca_response(ctx);
                Ok(())
            }
            DialogEvent::JobsCreated => self.patch_queue(ctx),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set bank parameter data, rebuilding the method catalog
    pub fn set_bpd(&mut self, bpd: Data) {
        self.catalog
            .refresh(&bpd, self.config.max_tan_segment_version);
        self.bpd = Some(bpd);
    }

    pub fn bpd(&self) -> Option<&Data> {
        self.bpd.as_ref()
    }

    pub fn set_upd(&mut self, upd: Data) {
        self.upd = Some(upd);
    }

    pub fn upd(&self) -> Option<&Data> {
        self.upd.as_ref()
    }

    /// TAN methods announced by the bank
    pub fn catalog(&self) -> &MethodCatalog {
        &self.catalog
    }

    /// TAN methods the user is enrolled for, empty where unknown
    pub fn enrolled(&self) -> &BTreeSet<String> {
        &self.enrolled
    }

    /// Replace the enrolled method set (restored from storage)
    pub fn set_enrolled(&mut self, methods: impl IntoIterator<Item = String>) {
        self.enrolled = methods.into_iter().collect();
    }

    /// Current TAN method, without (re)selection
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether the current method was selected without user input
    pub fn is_auto_selected(&self) -> bool {
        self.auto_selected
    }

    /// Set the current TAN method as chosen by the user
    pub fn set_current(&mut self, id: &str) {
        self.current = Some(String::from(id));
        self.auto_selected = false;
    }

    /// Clear the enrolled method set and selection, forcing re-enrollment
    pub fn reset_methods(&mut self) {
        self.enrolled.clear();
        self.current = None;
        self.auto_selected = false;
    }

    pub fn set_pin(&mut self, pin: &str) {
        self.pin = Some(Zeroizing::new(String::from(pin)));
    }

    pub fn clear_pin(&mut self) {
        self.pin = None;
    }

    pub fn has_pin(&self) -> bool {
        self.pin.is_some()
    }

    /// Persisted challenge data
    pub fn challenge_data(&self) -> &ChallengeData {
        &self.challenge
    }

    pub fn challenge_data_mut(&mut self) -> &mut ChallengeData {
        &mut self.challenge
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// Mark the passport as anonymous (no credentials)
    pub fn set_anonymous(&mut self, anonymous: bool) {
        self.anonymous = anonymous;
    }

    pub fn verify_tan_mode(&self) -> bool {
        self.verify_tan_mode
    }

    /// Request a TAN with the identification segment of the next dialog
    pub fn set_verify_tan_mode(&mut self, enabled: bool) {
        self.verify_tan_mode = enabled;
    }

    pub fn drv(&self) -> &DRV {
        &self.drv
    }

    pub fn drv_mut(&mut self) -> &mut DRV {
        &mut self.drv
    }
}
