// Copyright (c) 2026 The pintan Developers

//! Challenge class table for process variant 1 TAN requests
//!
//! Maps business segment codes to the challenge class and the ordered
//! positional parameters (`ChallengeKlassParams.paramN`) expected by the
//! bank, per HHD version of the TAN method.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use strum::{Display, EnumIter};

use crate::{
    dialog::Task,
    passport::{Error, TanMethod},
};

/// HHD version of a TAN method, per its `zkamethod_version` attribute
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum ChallengeVersion {
    #[strum(serialize = "HHD 1.2")]
    Hhd12,
    #[strum(serialize = "HHD 1.3")]
    Hhd13,
    #[strum(serialize = "HHD 1.4")]
    Hhd14,
}

impl ChallengeVersion {
    /// Resolve the HHD version for a method, defaulting to 1.2
    pub fn of(method: &TanMethod) -> Self {
        match method.attr("zkamethod_version") {
            Some(v) if v.starts_with("1.4") => ChallengeVersion::Hhd14,
            Some(v) if v.starts_with("1.3") => ChallengeVersion::Hhd13,
            _ => ChallengeVersion::Hhd12,
        }
    }
}

/// Challenge parameter formatting
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
pub enum ParamType {
    /// Passed through as is, escaping is left to the segment encoder
    #[strum(serialize = "")]
    Plain,
    /// Amount, decimal comma without trailing zeros (`100.50` → `100,5`)
    Wrt,
    /// Date, `YYYY-MM-DD` → `YYYYMMDD`
    Date,
}

/// Positional challenge parameter
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ParamSpec {
    /// Path of the business task field
    pub path: &'static str,
    pub ty: ParamType,
    /// Only applied where the method sets `needchallengevalue`
    pub conditional: bool,
}

const fn plain(path: &'static str) -> ParamSpec {
    ParamSpec {
        path,
        ty: ParamType::Plain,
        conditional: false,
    }
}

const fn wrt(path: &'static str, conditional: bool) -> ParamSpec {
    ParamSpec {
        path,
        ty: ParamType::Wrt,
        conditional,
    }
}

const fn date(path: &'static str) -> ParamSpec {
    ParamSpec {
        path,
        ty: ParamType::Date,
        conditional: false,
    }
}

/// Challenge class and parameters of a business segment
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ClassSpec {
    pub class: &'static str,
    pub params: &'static [ParamSpec],
}

/// Built-in challenge class table
const TABLE: &[(&str, ChallengeVersion, ClassSpec)] = &[
    // Foreign transfer
    (
        "HKAOM",
        ChallengeVersion::Hhd12,
        ClassSpec {
            class: "20",
            params: &[plain("Other.number"), wrt("BTG.value", true)],
        },
    ),
    (
        "HKAOM",
        ChallengeVersion::Hhd13,
        ClassSpec {
            class: "20",
            params: &[
                plain("My.number"),
                plain("Other.number"),
                wrt("BTG.value", true),
            ],
        },
    ),
    (
        "HKAOM",
        ChallengeVersion::Hhd14,
        ClassSpec {
            class: "10",
            params: &[
                wrt("BTG.value", false),
                plain("My.number"),
                plain("Other.blz"),
                plain("Other.number"),
            ],
        },
    ),
    // SEPA transfer
    (
        "HKCCS",
        ChallengeVersion::Hhd12,
        ClassSpec {
            class: "22",
            params: &[plain("sepa.dst.iban"), wrt("sepa.btg.value", true)],
        },
    ),
    (
        "HKCCS",
        ChallengeVersion::Hhd13,
        ClassSpec {
            class: "22",
            params: &[plain("sepa.dst.iban"), wrt("sepa.btg.value", true)],
        },
    ),
    (
        "HKCCS",
        ChallengeVersion::Hhd14,
        ClassSpec {
            class: "09",
            params: &[plain("sepa.dst.iban"), wrt("sepa.btg.value", true)],
        },
    ),
    // Scheduled transfer
    (
        "HKTUE",
        ChallengeVersion::Hhd14,
        ClassSpec {
            class: "05",
            params: &[
                plain("Other.number"),
                plain("Other.blz"),
                wrt("BTG.value", false),
                date("date"),
            ],
        },
    ),
    // Standing order deletion
    (
        "HKDTE",
        ChallengeVersion::Hhd14,
        ClassSpec {
            class: "04",
            params: &[],
        },
    ),
];

/// Look up the challenge class of a business segment for an HHD version
pub fn lookup(code: &str, version: ChallengeVersion) -> Option<&'static ClassSpec> {
    TABLE
        .iter()
        .find(|(c, v, _)| *c == code && *v == version)
        .map(|(_, _, spec)| spec)
}

fn format_wrt(value: &str) -> Result<String, Error> {
    let (int, frac) = match value.split_once('.') {
        Some((i, f)) => (i, f),
        None => (value, ""),
    };

    let digits = |s: &str| s.bytes().all(|c| c.is_ascii_digit());
    if int.is_empty() || !digits(int) || !digits(frac) {
        return Err(Error::InvalidChallengeParam);
    }

    let mut s = String::from(int);
    s.push(',');
    s.push_str(frac.trim_end_matches('0'));
    Ok(s)
}

fn format_date(value: &str) -> Result<String, Error> {
    let parts: Vec<&str> = value.split('-').collect();

    let (y, m, d) = match parts.as_slice() {
        [y, m, d] if y.len() == 4 && m.len() == 2 && d.len() == 2 => (y, m, d),
        _ => return Err(Error::InvalidChallengeParam),
    };

    let month: u8 = m.parse().map_err(|_| Error::InvalidChallengeParam)?;
    let day: u8 = d.parse().map_err(|_| Error::InvalidChallengeParam)?;
    if y.parse::<u16>().is_err() || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(Error::InvalidChallengeParam);
    }

    let mut s = String::with_capacity(8);
    s.push_str(y);
    s.push_str(m);
    s.push_str(d);
    Ok(s)
}

impl ParamSpec {
    /// Format a business task value for use as a challenge parameter
    pub fn format(&self, value: &str) -> Result<String, Error> {
        match self.ty {
            ParamType::Plain => Ok(value.to_string()),
            ParamType::Wrt => format_wrt(value),
            ParamType::Date => format_date(value),
        }
    }

    /// Check whether this parameter applies to the method
    pub fn applies(&self, method: &TanMethod) -> bool {
        !self.conditional || method.attr("needchallengevalue") == Some("J")
    }
}

/// Challenge class and formatted positional parameters for a TAN request
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ChallengeParams {
    pub class: String,
    /// Parameters by position, skipped parameters are left empty
    pub params: Vec<String>,
}

/// Resolve challenge parameters for a business task using the built-in table
pub fn challenge_params(task: &Task, method: &TanMethod) -> Result<Option<ChallengeParams>, Error> {
    let version = ChallengeVersion::of(method);

    let spec = match lookup(&task.code, version) {
        Some(s) => s,
        None => {
            #[cfg(feature = "log")]
            log::warn!("no challenge class for {} ({})", task.code, version);
            return Ok(None);
        }
    };

    let mut params = Vec::with_capacity(spec.params.len());
    for p in spec.params {
        let value = match task.params.get_non_empty(p.path) {
            Some(v) if p.applies(method) => p.format(v)?,
            _ => String::new(),
        };
        params.push(value);
    }

    // Trailing empty parameters may be omitted
    while params.last().map(|p| p.is_empty()) == Some(true) {
        params.pop();
    }

    Ok(Some(ChallengeParams {
        class: spec.class.to_string(),
        params,
    }))
}
