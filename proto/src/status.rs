// Copyright (c) 2026 The pintan Developers

//! Reply status extraction
//!
//! Replies carry a series of global return values (`RetGlob.RetVal`,
//! `RetGlob.RetVal_2`, ...) followed by per-segment blocks (`RetSeg`,
//! `RetSeg_2`, ...), each referencing the request segment it answers via
//! `SegHead.ref` and containing its own return value series.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use strum::{Display, EnumIter, EnumString};

use crate::{
    codes::{KnownReturnCode, AUTH_FAILURE},
    data::{with_counter, Data},
};

/// Return value severity, derived from the leading digit of the code
#[derive(Copy, Clone, PartialEq, Eq, Debug, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// `0xxx`
    Info,
    /// `3xxx`
    Warning,
    /// `9xxx`
    Error,
}

impl Severity {
    /// Classify a return code
    pub fn of(code: &str) -> Self {
        match code.as_bytes().first() {
            Some(b'9') => Severity::Error,
            Some(b'3') => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

/// Structured bank return value
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ReturnValue {
    /// Four digit return code
    pub code: String,
    pub severity: Severity,
    pub text: String,
    /// Positional parameters in order of appearance
    pub params: Vec<String>,
    /// Data element reference within the segment, if provided
    pub element_ref: Option<String>,
    /// Reference of the request segment this value is scoped to
    pub segment_ref: Option<String>,
}

impl ReturnValue {
    /// Parse the return value rooted at `header`, returning `None` where no
    /// code is present (end of the series)
    pub fn parse(data: &Data, header: &str, segment_ref: Option<&str>) -> Option<Self> {
        let code = data.get(&format!("{header}.code"))?.to_string();

        let mut params = Vec::new();
        while let Some(p) = data.get(&with_counter(&format!("{header}.parm"), params.len())) {
            params.push(p.to_string());
        }

        Some(Self {
            severity: Severity::of(&code),
            text: data
                .get(&format!("{header}.text"))
                .unwrap_or_default()
                .to_string(),
            element_ref: data.get(&format!("{header}.ref")).map(|r| r.to_string()),
            segment_ref: segment_ref.map(|r| r.to_string()),
            params,
            code,
        })
    }

    /// Numeric form of the code, if valid
    pub fn numeric_code(&self) -> Option<u16> {
        self.code.parse().ok()
    }

    /// Known code lookup
    pub fn known(&self) -> Option<KnownReturnCode> {
        self.numeric_code()
            .and_then(|c| KnownReturnCode::try_from(c).ok())
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl core::fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(s) = &self.segment_ref {
            write!(f, "[{s}")?;
            if let Some(e) = &self.element_ref {
                write!(f, "/{e}")?;
            }
            write!(f, "] ")?;
        }

        write!(f, "{}: {}", self.code, self.text)
    }
}

/// Outcome of a single message exchange
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ReplyStatus {
    /// Message-global return values
    pub global: Vec<ReturnValue>,
    /// Segment-scoped return values
    pub segment: Vec<ReturnValue>,
    /// Raw reply data
    pub data: Data,
}

impl ReplyStatus {
    /// Extract return values from reply data
    pub fn parse(data: Data) -> Self {
        let mut global = Vec::new();
        while let Some(rv) =
            ReturnValue::parse(&data, &with_counter("RetGlob.RetVal", global.len()), None)
        {
            global.push(rv);
        }

        let mut segment = Vec::new();
        for i in 0.. {
            let header = with_counter("RetSeg", i);
            let segment_ref = match data.get(&format!("{header}.SegHead.ref")) {
                Some(r) => r.to_string(),
                None => break,
            };

            for j in 0.. {
                match ReturnValue::parse(
                    &data,
                    &with_counter(&format!("{header}.RetVal"), j),
                    Some(&segment_ref),
                ) {
                    Some(rv) => segment.push(rv),
                    None => break,
                }
            }
        }

        #[cfg(feature = "log")]
        log::trace!(
            "parsed reply status: {} global, {} segment",
            global.len(),
            segment.len()
        );

        Self {
            global,
            segment,
            data,
        }
    }

    /// True if the global scope carries no error
    pub fn is_ok(&self) -> bool {
        !self.global.iter().any(|rv| rv.is_error())
    }

    /// True if either scope carries an error
    pub fn has_errors(&self) -> bool {
        self.all().any(|rv| rv.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.all().any(|rv| rv.is_warning())
    }

    /// Iterate over all return values, global scope first
    pub fn all(&self) -> impl Iterator<Item = &ReturnValue> {
        self.global.iter().chain(self.segment.iter())
    }

    pub fn errors(&self) -> impl Iterator<Item = &ReturnValue> {
        self.all().filter(|rv| rv.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ReturnValue> {
        self.all().filter(|rv| rv.is_warning())
    }

    /// Find the first return value with the provided code,
    /// searching the global scope then the segment scope
    pub fn find(&self, code: KnownReturnCode) -> Option<&ReturnValue> {
        code.search(self.all())
    }

    /// Find all warnings with the provided code in both scopes
    pub fn find_warnings(&self, code: KnownReturnCode) -> impl Iterator<Item = &ReturnValue> {
        self.warnings().filter(move |rv| code.matches(rv))
    }

    /// Find the first error signalling rejected credentials
    pub fn auth_failure(&self) -> Option<&ReturnValue> {
        self.errors()
            .find(|rv| rv.known().map(|k| AUTH_FAILURE.contains(&k)).unwrap_or(false))
    }

    /// Human readable error summary, global errors first
    pub fn error_string(&self) -> String {
        let mut s = String::new();

        for rv in self.errors() {
            if !s.is_empty() {
                s.push('\n');
            }
            s.push_str(&rv.to_string());
        }

        s
    }
}
