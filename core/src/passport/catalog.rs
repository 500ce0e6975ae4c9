// Copyright (c) 2026 The pintan Developers

//! TAN method catalog, built from `HITANS` declarations in the BPD

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

use pintan_proto::{
    prelude::*,
    query::{BPD_SECFUNC, BPD_TAN2STEP_GROUP, BPD_TAN2STEP_PAR},
};

/// Attribute holding the segment version a method was declared in
pub const ATTR_SEGVERSION: &str = "segversion";

/// Prefix of per-method parameter groups within `ParTAN2Step`
const METHOD_GROUP_PREFIX: &str = "TAN2StepParams";

/// Two-step TAN method announced by the bank
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TanMethod {
    /// Security function code (`912`)
    pub id: String,
    /// Version of the `HITANS` segment declaring this method
    pub seg_version: u32,
    /// Method attributes keyed by field name
    pub attrs: Data,
}

impl TanMethod {
    pub fn new(id: &str, seg_version: u32) -> Self {
        let mut attrs = Data::new();
        attrs.set(ATTR_SEGVERSION, seg_version.to_string());

        Self {
            id: id.to_string(),
            seg_version,
            attrs,
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Fetch a method attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// Display name
    pub fn name(&self) -> &str {
        self.attr("name").unwrap_or_default()
    }

    /// Input hint shown when requesting the TAN
    pub fn input_info(&self) -> &str {
        self.attr("inputinfo").unwrap_or_default()
    }

    pub fn variant(&self) -> ProcessVariant {
        ProcessVariant::from_attr(self.attr("process"))
    }

    /// Order account must be provided where the business task has one
    pub fn needs_order_account(&self) -> bool {
        self.attr("needorderaccount") == Some("2")
    }

    /// Challenge class and parameters must be provided (process variant 1)
    pub fn needs_challenge_class(&self) -> bool {
        self.attr("needchallengeklass") == Some("J")
    }

    /// TAN media name required, more than one medium active
    pub fn tan_media_required(&self) -> bool {
        self.attr("needtanmedia") == Some("2")
    }
}

/// Methods announced by the bank, keyed by security function
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MethodCatalog {
    methods: BTreeMap<String, TanMethod>,
}

/// Extract the `HITANS` segment version from a declaration path of the form
/// `Params_x.TAN2StepParV.ParTAN2Step.TAN2StepParamsV_y.secfunc`
fn declaration_version(parts: &[&str]) -> Option<u32> {
    match parts {
        [params, par, group, entry, field]
            if params.starts_with("Params")
                && *group == BPD_TAN2STEP_GROUP
                && entry.starts_with(METHOD_GROUP_PREFIX)
                && *field == BPD_SECFUNC =>
        {
            let v = par.strip_prefix(BPD_TAN2STEP_PAR)?;
            v.split('_').next()?.parse().ok()
        }
        _ => None,
    }
}

impl MethodCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the catalog from bank parameter data, skipping declarations
    /// above `max_version` and keeping the highest segment version per method
    pub fn refresh(&mut self, bpd: &Data, max_version: Option<u32>) {
        self.methods.clear();

        for (key, secfunc) in bpd.iter() {
            let parts: Vec<&str> = key.split('.').collect();

            let version = match declaration_version(&parts) {
                Some(v) => v,
                None => continue,
            };

            if let Some(max) = max_version {
                if version > max {
                    #[cfg(feature = "log")]
                    log::debug!(
                        "skipping TAN method {} (HITANS{} above limit {})",
                        secfunc,
                        version,
                        max
                    );
                    continue;
                }
            }

            if let Some(prior) = self.methods.get(secfunc) {
                if prior.seg_version > version {
                    #[cfg(feature = "log")]
                    log::debug!(
                        "keeping TAN method {} from HITANS{}, ignoring HITANS{}",
                        secfunc,
                        prior.seg_version,
                        version
                    );
                    continue;
                }
            }

            // Attributes are the leaf fields below the method group
            let header = parts[..4].join(".");
            let mut method = TanMethod::new(secfunc, version);
            for (k, v) in bpd.below(&header) {
                if let Some(name) = k.rsplit('.').next() {
                    method.attrs.set(name, v);
                }
            }
            method.attrs.set(ATTR_SEGVERSION, version.to_string());

            #[cfg(feature = "log")]
            log::debug!(
                "found TAN method {} ({}) in HITANS{}",
                secfunc,
                method.name(),
                version
            );

            self.methods.insert(secfunc.to_string(), method);
        }
    }

    /// Add or replace a single method
    pub fn insert(&mut self, method: TanMethod) {
        self.methods.insert(method.id.clone(), method);
    }

    pub fn get(&self, id: &str) -> Option<&TanMethod> {
        self.methods.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.methods.contains_key(id)
    }

    /// Iterate over methods in identifier order
    pub fn iter(&self) -> impl Iterator<Item = &TanMethod> {
        self.methods.values()
    }

    /// Method identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn clear(&mut self) {
        self.methods.clear()
    }
}
