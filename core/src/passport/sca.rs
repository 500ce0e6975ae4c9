// Copyright (c) 2026 The pintan Developers

//! Strong customer authentication during dialog initialisation
//!
//! The negotiation runs `None → Step1 → Step2 → None` on
//! [DialogContext::sca][crate::dialog::DialogContext::sca]. Step one attaches
//! a `HKTAN` to the initialisation message. Where the bank answers with a
//! challenge the initialisation is repeated with the
//! [InitSca][DialogTemplate::InitSca] template carrying the TAN.

use alloc::string::String;

use pintan_proto::{
    prelude::*,
    query::{tan_request_prefix, TAN_RESPONSE, UPD_TAN_MEDIA},
    SCA_ADMIN_SEGMENTS, TAN_MEDIA_NOREF,
};

use super::{Driver, Error, Passport, TanMethod};
use crate::dialog::{DialogContext, TanRequest};

/// Default `HKTAN` version where the current method has no catalog entry
pub const DEFAULT_TAN_SEG_VERSION: u32 = 6;

/// First `HKTAN` version supporting SCA during dialog initialisation
pub const MIN_SCA_SEG_VERSION: u32 = 6;

/// First `HKTAN` version carrying a TAN media name
pub const MIN_TAN_MEDIA_SEG_VERSION: u32 = 3;

/// Placeholder order hash sent with SCA requests
const ORDER_HASH_PLACEHOLDER: [u8; 4] = [0u8; 4];

/// Placeholder challenge class sent with process variant 1 SCA requests
const CHALLENGE_CLASS_PLACEHOLDER: &str = "99";

impl<DRV: Driver> Passport<DRV> {
    /// Catalog entry of the current method, where one exists
    pub fn current_method_info(&mut self) -> Result<Option<TanMethod>, Error> {
        let id = self.current_method(false)?;
        Ok(self.catalog.get(&id).cloned())
    }

    /// Resolve the TAN media name for a request with the provided
    /// `HKTAN` version
    pub(crate) fn tan_media(&mut self, seg_version: u32, method: Option<&TanMethod>) -> String {
        if seg_version < MIN_TAN_MEDIA_SEG_VERSION {
            return String::new();
        }

        let required = method.map(|m| m.tan_media_required()).unwrap_or(false);
        if !required {
            return String::new();
        }

        let default = self
            .upd
            .as_ref()
            .and_then(|upd| upd.get(UPD_TAN_MEDIA))
            .unwrap_or_default();

        let media = self.drv.request_tan_media(default);
        if !media.is_empty() {
            return media;
        }

        #[cfg(feature = "log")]
        log::warn!("TAN media required but none provided, using '{}'", TAN_MEDIA_NOREF);

        String::from(TAN_MEDIA_NOREF)
    }

    /// Attach `HKTAN` fields to a dialog initialisation message
    pub(crate) fn sca_request(&mut self, ctx: &mut DialogContext) -> Result<(), Error> {
        match ctx.template() {
            Some(t) if t.sends_sca() => (),
            _ => return Ok(()),
        }

        let method = self.current_method_info()?;
        let (seg_version, variant) = match &method {
            Some(m) => (m.seg_version, m.variant()),
            None => (DEFAULT_TAN_SEG_VERSION, ProcessVariant::Two),
        };

        if seg_version < MIN_SCA_SEG_VERSION {
            #[cfg(feature = "log")]
            log::debug!("HKTAN{} does not support SCA, skipping", seg_version);
            return Ok(());
        }

        let step = *ctx.sca.get_or_insert(ScaStep::Step1);

        // Administrative transactions are referenced in place of the identification
        let order_seg_code = ctx
            .queue
            .as_ref()
            .and_then(|q| {
                SCA_ADMIN_SEGMENTS
                    .iter()
                    .find(|code| q.find_task(code).is_some())
            })
            .copied()
            .unwrap_or(SEG_IDENTIFICATION);

        let process = TanProcess::select(variant, step);

        #[cfg(feature = "log")]
        log::debug!(
            "creating HKTAN{} for SCA ({}, variant: {}, process: {}, order: {})",
            seg_version,
            step,
            variant,
            process,
            order_seg_code
        );

        let mut req = TanRequest::new(process);
        req.order_seg_code = String::from(order_seg_code);
        match variant {
            ProcessVariant::One => {
                req.challenge_class = String::from(CHALLENGE_CLASS_PLACEHOLDER);
            }
            ProcessVariant::Two => {
                req.order_hash = Some(ORDER_HASH_PLACEHOLDER.to_vec());
            }
        }
        if step == ScaStep::Step2 {
            req.order_ref = String::from(self.challenge.order_ref().unwrap_or_default());
        }
        req.tan_media = self.tan_media(seg_version, method.as_ref());

        if let Some(init) = ctx.init.as_mut() {
            req.write_fields(&mut init.fields, &tan_request_prefix(seg_version));
        }

        Ok(())
    }

    /// Harvest the `HITAN` challenge from a dialog initialisation reply
    pub(crate) fn sca_response(&mut self, ctx: &mut DialogContext) {
        match ctx.template() {
            Some(t) if t.sends_sca() => (),
            _ => return,
        }

        if ctx.anonymous || self.anonymous {
            #[cfg(feature = "log")]
            log::debug!("anonymous dialog, skipping SCA response");
            ctx.sca = None;
            return;
        }

        let step = match ctx.sca {
            Some(s) => s,
            None => return,
        };

        let status = match &ctx.status {
            Some(s) => s,
            None => return,
        };

        // Exemption granted, no TAN required
        if status.find_warnings(KnownReturnCode::W3076).next().is_some() {
            #[cfg(feature = "log")]
            log::debug!("found 3076, no SCA required");
            ctx.sca = None;
            return;
        }

        let res = status.data.find(TAN_RESPONSE);

        match step {
            ScaStep::Step1 => {
                // No challenge yet, handled as a regular reply
                if res.is_empty() {
                    return;
                }

                #[cfg(feature = "log")]
                log::debug!("SCA challenge received, requesting second step");

                self.challenge.set_challenge(res.get("challenge"));
                self.challenge.set_challenge_hhd_uc(res.get("challenge_hhd_uc"));
                self.challenge.set_order_ref(res.get("orderref"));

                ctx.sca = Some(ScaStep::Step2);
                if let Some(init) = ctx.init.as_mut() {
                    init.template = DialogTemplate::InitSca;
                }
                ctx.set_repeat();
            }
            ScaStep::Step2 => {
                #[cfg(feature = "log")]
                if !res.is_empty() {
                    log::debug!("final SCA response received");
                }

                ctx.sca = None;
            }
        }
    }
}
