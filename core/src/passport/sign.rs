// Copyright (c) 2026 The pintan Developers

//! PIN/TAN message signatures

use alloc::{format, string::String};

use zeroize::Zeroizing;

use pintan_proto::prelude::*;

use super::{Driver, Error, PinTanInfo, Passport};
use crate::{collect_segment_codes, flicker};

/// Prompt for one-step TAN requests
pub const ONE_STEP_TAN_PROMPT: &str = "Enter TAN";

impl<DRV: Driver> Passport<DRV> {
    /// Sign an encoded message, returning the `PIN|TAN` signature payload
    ///
    /// The PIN is requested where none is cached. A TAN is requested for
    /// one-step methods where the message carries a segment requiring one,
    /// and for two-step methods where a challenge has been received.
    pub fn sign(&mut self, msg: &[u8]) -> Result<Zeroizing<String>, Error> {
        let pin = match &self.pin {
            Some(p) => p.clone(),
            None => {
                let p = Zeroizing::new(self.drv.request_pin());
                if p.is_empty() {
                    return Err(Error::EmptyPin);
                }
                self.pin = Some(p.clone());
                p
            }
        };

        let tan = match self.current_method(false)?.as_str() {
            ONE_STEP_METHOD => self.one_step_tan(msg)?,
            _ => self.two_step_tan()?,
        };

        let mut sig = Zeroizing::new(String::with_capacity(pin.len() + tan.len() + 1));
        sig.push_str(&pin);
        sig.push('|');
        sig.push_str(&tan);

        Ok(sig)
    }

    /// Request a TAN once where any segment in the message requires one
    fn one_step_tan(&mut self, msg: &[u8]) -> Result<Zeroizing<String>, Error> {
        let mut tan = Zeroizing::new(String::new());

        for code in collect_segment_codes(msg) {
            match self.pin_tan_info(&code) {
                PinTanInfo::Required if tan.is_empty() => {
                    #[cfg(feature = "log")]
                    log::debug!("segment {} requires a TAN", code);

                    tan = Zeroizing::new(self.drv.request_tan(ONE_STEP_TAN_PROMPT, None));
                    if tan.is_empty() {
                        return Err(Error::EmptyTan);
                    }
                }
                PinTanInfo::Required => {
                    #[cfg(feature = "log")]
                    log::warn!("multiple segments requiring a TAN, {} signed with the first", code);
                }
                PinTanInfo::Unknown => {
                    #[cfg(feature = "log")]
                    log::warn!("segment {} seems not to be allowed with PIN/TAN", code);
                }
                _ => (),
            }
        }

        Ok(tan)
    }

    /// Request a TAN for the stored challenge, consuming it
    fn two_step_tan(&mut self) -> Result<Zeroizing<String>, Error> {
        let method = self.current_method_info()?;

        let challenge = self.challenge.take_challenge();
        let hhd_uc = self.challenge.take_challenge_hhd_uc();
        let flicker = flicker::decode(hhd_uc.as_deref(), challenge.as_deref());

        let challenge = match challenge {
            Some(c) => c,
            None => {
                #[cfg(feature = "log")]
                log::debug!("no challenge stored, signing without TAN");
                return Ok(Zeroizing::new(String::new()));
            }
        };

        let (name, info) = match &method {
            Some(m) => (m.name(), m.input_info()),
            None => ("", ""),
        };
        let prompt = format!("{name}\n{info}\n\n{challenge}");

        let tan = Zeroizing::new(self.drv.request_tan(&prompt, flicker.as_deref()));
        if tan.is_empty() {
            return Err(Error::EmptyTan);
        }

        Ok(tan)
    }
}
