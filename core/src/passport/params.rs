// Copyright (c) 2026 The pintan Developers

//! Bank parameter lookups

use strum::{Display, EnumIter, EnumString};

use pintan_proto::{
    prelude::*,
    query::{
        bpd_order_hash_mode, to_parameter_code, BPD_PINTAN_CAN1STEP, BPD_PINTAN_GV_SEGCODE,
        BPD_PINTAN_PAR, BPD_SEGHEAD_CODE,
    },
};

use super::{Driver, Error, Passport};

/// TAN requirement for a segment code, per `HIPINS`
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumString, EnumIter)]
pub enum PinTanInfo {
    /// TAN required
    #[strum(serialize = "J")]
    Required,
    /// Declared, no TAN required
    #[strum(serialize = "N")]
    NotRequired,
    /// Administrative segment
    #[strum(serialize = "A")]
    Admin,
    /// Business transaction not declared in `HIPINS`, or no BPD
    #[strum(serialize = "")]
    Unknown,
}

impl<DRV: Driver> Passport<DRV> {
    /// Check whether the bank allows the one-step method
    pub fn is_one_step_allowed(&self) -> bool {
        match &self.bpd {
            Some(bpd) => bpd
                .find_all(BPD_PINTAN_CAN1STEP)
                .any(|(_, v)| v == "J"),
            None => true,
        }
    }

    /// Look up the TAN requirement for a segment code
    pub fn pin_tan_info(&mut self, code: &str) -> PinTanInfo {
        let bpd = match &self.bpd {
            Some(b) => b,
            None => return PinTanInfo::Unknown,
        };

        // Declared in HIPINS, `needtan` is a sibling of the matching `segcode`
        for (key, value) in bpd.find_all(BPD_PINTAN_GV_SEGCODE) {
            if value != code {
                continue;
            }

            let needtan = key
                .strip_suffix("segcode")
                .and_then(|prefix| bpd.get(&alloc::format!("{prefix}needtan")));

            return match needtan {
                Some("J") => PinTanInfo::Required,
                _ => PinTanInfo::NotRequired,
            };
        }

        // Known business transactions not declared in HIPINS
        let param_code = to_parameter_code(code);
        if bpd.find_all(BPD_SEGHEAD_CODE).any(|(_, v)| v == param_code) {
            return PinTanInfo::Unknown;
        }

        // Administrative segment, the identification segment needs a TAN
        // once when verifying a new TAN method
        if self.verify_tan_mode && code == SEG_IDENTIFICATION {
            #[cfg(feature = "log")]
            log::debug!("TAN verify mode, requesting TAN for {}", code);

            self.verify_tan_mode = false;
            return PinTanInfo::Required;
        }

        PinTanInfo::Admin
    }

    /// Check whether the passport is usable with the bank's parameters
    /// and the current method
    pub fn is_supported(&mut self) -> Result<bool, Error> {
        let bpd = match &self.bpd {
            Some(b) if !b.is_empty() => b,
            _ => return Ok(true),
        };

        let has_pintan = bpd.iter().any(|(k, _)| {
            k.starts_with("Params")
                && k.split('.').nth(1).map(|s| s.starts_with(BPD_PINTAN_PAR)) == Some(true)
        });
        if !has_pintan {
            #[cfg(feature = "log")]
            log::error!("not supported: no PIN/TAN parameters in BPD");
            return Ok(false);
        }

        let current = self.current_method(true)?;

        let supported = if current == ONE_STEP_METHOD {
            self.is_one_step_allowed()
        } else {
            self.catalog.contains(&current)
        };

        #[cfg(feature = "log")]
        match supported {
            true => log::debug!("TAN method {} supported", current),
            false => log::error!("not supported: TAN method {}", current),
        }

        Ok(supported)
    }

    /// Resolve the bank order hash mode for a `HKTAN` segment version
    pub fn order_hash_mode(&self, seg_version: u32) -> Result<OrderHashMode, Error> {
        let mode = self
            .bpd
            .as_ref()
            .and_then(|bpd| bpd.find_value(&bpd_order_hash_mode(seg_version)));

        match mode.and_then(OrderHashMode::from_code) {
            Some(m) => Ok(m),
            None => {
                #[cfg(feature = "log")]
                log::error!(
                    "unknown order hash mode {:?} for HKTAN{}",
                    mode,
                    seg_version
                );
                Err(Error::UnknownHashMode)
            }
        }
    }
}
