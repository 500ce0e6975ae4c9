// Copyright (c) 2026 The pintan Developers

//! Reactions to known return codes, applied after each exchange

use alloc::{collections::BTreeSet, string::String};

use pintan_proto::prelude::*;

use super::{Driver, Error, Passport};
use crate::dialog::DialogContext;

impl<DRV: Driver> Passport<DRV> {
    /// Clear the cached PIN and notify the driver where the bank rejected
    /// the credentials
    pub(crate) fn check_invalid_pin(&mut self, ctx: &DialogContext) {
        // No credentials in anonymous dialogs
        if ctx.anonymous {
            return;
        }

        let status = match &ctx.status {
            Some(s) => s,
            None => return,
        };

        #[allow(unused_variables)]
        if let Some(rv) = status.auth_failure() {
            #[cfg(feature = "log")]
            log::info!("PIN rejected by bank: {}", rv);

            self.clear_pin();
            self.drv.wrong_pin();
        }
    }

    /// Update the enrolled method set from `3920` warnings, requesting a
    /// dialog repeat where the current method changes as a result
    pub(crate) fn check_allowed_methods(&mut self, ctx: &mut DialogContext) -> Result<(), Error> {
        let status = match &ctx.status {
            Some(s) => s,
            None => return Ok(()),
        };

        let mut matched = false;
        let mut allowed = BTreeSet::new();
        for rv in status.find_warnings(KnownReturnCode::W3920) {
            matched = true;
            allowed.extend(rv.params.iter().cloned());
        }

        if !matched {
            return Ok(());
        }

        if !allowed.is_empty() && allowed != self.enrolled {
            #[cfg(feature = "log")]
            log::debug!(
                "found 3920, updated allowed TAN methods: {:?} -> {:?}",
                self.enrolled,
                allowed
            );

            self.enrolled = allowed;
        }

        if ctx.anonymous || self.anonymous {
            return Ok(());
        }

        // Synchronisation is not repeated with a different method
        if ctx.template().map(|t| t.is_sync()).unwrap_or(false) {
            return Ok(());
        }

        let previous = self.current.clone();
        let current = self.current_method(true)?;

        if previous.as_deref() != Some(current.as_str()) {
            #[cfg(feature = "log")]
            log::info!(
                "TAN method changed from {:?} to {}, repeating dialog initialisation",
                previous,
                current
            );

            ctx.set_repeat();
        }

        Ok(())
    }

    /// Notify the driver of changed user / customer ids (`3072`)
    pub(crate) fn check_user_id_changed(&mut self, ctx: &DialogContext) {
        if ctx.anonymous {
            return;
        }

        let rv = match ctx
            .status
            .as_ref()
            .and_then(|s| s.find_warnings(KnownReturnCode::W3072).next())
        {
            Some(rv) => rv,
            None => return,
        };

        // A single parameter serves as both user and customer id
        let user_id = match rv.params.first() {
            Some(u) => u,
            None => return,
        };
        let customer_id = rv.params.get(1).unwrap_or(user_id);

        #[cfg(feature = "log")]
        log::debug!("found 3072, user id changed");

        let mut ids = String::with_capacity(user_id.len() + customer_id.len() + 1);
        ids.push_str(user_id);
        ids.push('|');
        ids.push_str(customer_id);

        self.drv.user_id_changed(&ids);
    }
}
