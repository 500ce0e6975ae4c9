// Copyright (c) 2026 The pintan Developers

//! Reply data builders

use pintan_proto::{data::with_counter, prelude::*};

/// Builder for flattened bank reply data
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ReplyBuilder {
    data: Data,
    global: usize,
    segments: usize,
}

impl ReplyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn ret_val(&mut self, header: &str, code: &str, text: &str, params: &[&str]) {
        self.data.set(format!("{header}.code"), code);
        self.data.set(format!("{header}.text"), text);
        for (i, p) in params.iter().enumerate() {
            self.data
                .set(with_counter(&format!("{header}.parm"), i), *p);
        }
    }

    /// Add a message-global return value
    pub fn global(mut self, code: &str, text: &str, params: &[&str]) -> Self {
        let header = with_counter("RetGlob.RetVal", self.global);
        self.global += 1;

        self.ret_val(&header, code, text, params);
        self
    }

    /// Add a segment-scoped block holding a single return value
    pub fn segment(mut self, seg_ref: &str, code: &str, text: &str, params: &[&str]) -> Self {
        let header = with_counter("RetSeg", self.segments);
        self.segments += 1;

        self.data.set(format!("{header}.SegHead.ref"), seg_ref);
        self.ret_val(&format!("{header}.RetVal"), code, text, params);
        self
    }

    /// Add a `HITAN` response block
    pub fn tan_response(
        mut self,
        version: u32,
        challenge: Option<&str>,
        hhd_uc: Option<&str>,
        order_ref: &str,
    ) -> Self {
        let header = format!("TAN2StepRes{version}");

        self.data.set(format!("{header}.process"), "4");
        self.data.set(format!("{header}.orderref"), order_ref);
        if let Some(c) = challenge {
            self.data.set(format!("{header}.challenge"), c);
        }
        if let Some(h) = hhd_uc {
            self.data.set(format!("{header}.challenge_hhd_uc"), h);
        }
        self
    }

    /// Set an arbitrary reply field
    pub fn field(mut self, path: &str, value: &str) -> Self {
        self.data.set(path, value);
        self
    }

    pub fn build(self) -> Data {
        self.data
    }
}

/// Plain successful reply
pub fn ok() -> Data {
    ReplyBuilder::new()
        .global("0010", "Nachricht entgegengenommen.", &[])
        .build()
}

/// Reply listing the TAN methods allowed for the user (`3920`)
pub fn allowed_methods(ids: &[&str]) -> Data {
    ReplyBuilder::new()
        .global("3060", "Bitte beachten Sie die enthaltenen Warnungen.", &[])
        .segment("4", "3920", "Zugelassene TAN-Verfahren fuer den Benutzer", ids)
        .build()
}

/// Reply rejecting the PIN
pub fn wrong_pin() -> Data {
    ReplyBuilder::new()
        .global("9050", "Die Nachricht enthaelt Fehler.", &[])
        .segment("3", "9931", "PIN ungueltig", &[])
        .build()
}

/// Reply carrying a TAN challenge for dialog initialisation SCA
pub fn sca_challenge(version: u32, challenge: &str, order_ref: &str) -> Data {
    ReplyBuilder::new()
        .global("3060", "Bitte beachten Sie die enthaltenen Warnungen.", &[])
        .segment("5", "0030", "Auftrag empfangen - Sicherheitsfreigabe erforderlich", &[])
        .tan_response(version, Some(challenge), None, order_ref)
        .build()
}

/// Reply granting an SCA exemption (`3076`)
pub fn sca_exempt() -> Data {
    ReplyBuilder::new()
        .global("0010", "Nachricht entgegengenommen.", &[])
        .segment("5", "3076", "Keine starke Authentifizierung erforderlich.", &[])
        .build()
}
