// Copyright (c) 2026 The pintan Developers

//! Bank and user parameter data builders

use pintan_proto::{data::with_counter, prelude::*};

/// Two-step method declaration
#[derive(Clone, PartialEq, Debug)]
pub struct Method {
    pub id: &'static str,
    pub name: &'static str,
    /// `HITANS` segment version
    pub version: u32,
    /// Process variant (`"1"` / `"2"`)
    pub process: &'static str,
    /// Additional attributes
    pub attrs: &'static [(&'static str, &'static str)],
}

/// chipTAN optical, process variant 2 with HHD 1.4
pub const CHIP_TAN: Method = Method {
    id: "912",
    name: "chipTAN optisch",
    version: 6,
    process: "2",
    attrs: &[
        ("inputinfo", "TAN-Generator"),
        ("zkamethod_version", "1.4"),
    ],
};

/// pushTAN, process variant 2
pub const PUSH_TAN: Method = Method {
    id: "921",
    name: "pushTAN",
    version: 6,
    process: "2",
    attrs: &[("inputinfo", "Freigabe in der App")],
};

/// Legacy chipTAN, process variant 1 requiring a challenge class
pub const CHIP_TAN_P1: Method = Method {
    id: "911",
    name: "chipTAN manuell",
    version: 5,
    process: "1",
    attrs: &[
        ("zkamethod_version", "1.4"),
        ("needchallengeklass", "J"),
        ("needchallengevalue", "J"),
        ("needorderaccount", "2"),
    ],
};

/// Legacy method declared below the SCA capable segment version
pub const SMS_TAN_V4: Method = Method {
    id: "942",
    name: "smsTAN",
    version: 4,
    process: "2",
    attrs: &[("needtanmedia", "2")],
};

/// Builder for flattened bank parameter data
#[derive(Clone, PartialEq, Debug, Default)]
pub struct BpdBuilder {
    data: Data,
    blocks: usize,
    tasks: usize,
}

impl BpdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn block(&mut self) -> String {
        self.blocks += 1;
        with_counter("Params", self.blocks)
    }

    /// Declare PIN/TAN parameters, allowing the one-step method or not
    pub fn pin_tan(mut self, can_one_step: bool) -> Self {
        self.data.set(
            "Params.PinTanPar.ParPinTan.can1step",
            if can_one_step { "J" } else { "N" },
        );
        self
    }

    /// Declare the TAN requirement of a business transaction
    pub fn need_tan(mut self, code: &str, need_tan: bool) -> Self {
        let header = format!(
            "Params.PinTanPar.ParPinTan.{}",
            with_counter("PinTanGV", self.tasks)
        );
        self.tasks += 1;

        self.data.set(format!("{header}.segcode"), code);
        self.data
            .set(format!("{header}.needtan"), if need_tan { "J" } else { "N" });
        self
    }

    /// Declare a business transaction parameter segment (`HKUEB` -> `HIUEBS`)
    pub fn business(mut self, code: &str) -> Self {
        let block = self.block();
        let param = pintan_proto::query::to_parameter_code(code);
        self.data.set(format!("{block}.{param}.SegHead.code"), param);
        self
    }

    /// Declare a two-step method in a `HITANS` segment of its own
    pub fn method(mut self, m: &Method) -> Self {
        let block = self.block();
        let header = format!(
            "{block}.TAN2StepPar{v}.ParTAN2Step.TAN2StepParams{v}",
            v = m.version
        );

        self.data.set(format!("{header}.secfunc"), m.id);
        self.data.set(format!("{header}.name"), m.name);
        self.data.set(format!("{header}.process"), m.process);
        for (k, v) in m.attrs {
            self.data.set(format!("{header}.{k}"), *v);
        }
        self
    }

    /// Set the order hash mode for a `HKTAN` segment version
    pub fn order_hash_mode(mut self, version: u32, mode: &str) -> Self {
        let block = self.block();
        self.data.set(
            format!("{block}.TAN2StepPar{version}.ParTAN2Step.orderhashmode"),
            mode,
        );
        self
    }

    pub fn build(self) -> Data {
        self.data
    }
}

/// Bank parameters offering chipTAN and pushTAN, transfers requiring a TAN
pub fn two_step_bpd() -> Data {
    BpdBuilder::new()
        .pin_tan(false)
        .need_tan("HKCCS", true)
        .need_tan("HKSAL", false)
        .business("HKCCS")
        .business("HKSAL")
        .method(&CHIP_TAN)
        .method(&PUSH_TAN)
        .build()
}

/// Bank parameters offering a single process variant 1 method
pub fn variant_one_bpd(hash_mode: &str) -> Data {
    BpdBuilder::new()
        .pin_tan(false)
        .need_tan("HKCCS", true)
        .need_tan("HKAOM", true)
        .business("HKCCS")
        .business("HKAOM")
        .method(&CHIP_TAN_P1)
        .order_hash_mode(CHIP_TAN_P1.version, hash_mode)
        .build()
}

/// User parameter data with a stored TAN media name
pub fn upd_with_media(name: &str) -> Data {
    let mut d = Data::new();
    d.set(pintan_proto::query::UPD_TAN_MEDIA, name);
    d
}
