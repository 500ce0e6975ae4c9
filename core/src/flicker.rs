// Copyright (c) 2026 The pintan Developers

//! Optical (flicker) challenge decoding
//!
//! Parses HHD-UC challenge payloads (HHD 1.4, falling back to HHD 1.3) and
//! renders them into the flicker code displayed to a chipTAN generator.
//! Payloads may be delivered in the dedicated `challenge_hhd_uc` field or,
//! by banks predating it, inline in the challenge text between `CHLGUC`
//! and `CHLGTEXT` markers.

use alloc::{string::String, vec::Vec};
use core::fmt::Write as _;

use strum::{Display, EnumIter};

/// Bit in an LDE marking ASCII encoded data (HHD 1.4)
const BIT_ENCODING: u8 = 6;

/// Bit in the start code LDE marking following control bytes (HHD 1.4)
const BIT_CONTROL_BYTE: u8 = 7;

/// Maximum number of control bytes following the start code
const MAX_CONTROL_BYTES: usize = 10;

/// Mask for the data length within an LDE
const LENGTH_MASK: u8 = 0x3F;

/// Challenge payload version
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum HhdVersion {
    #[strum(serialize = "HHD 1.3")]
    Hhd13,
    #[strum(serialize = "HHD 1.4")]
    Hhd14,
}

impl HhdVersion {
    /// Number of digits in the leading length field
    const fn lc_len(&self) -> usize {
        match self {
            HhdVersion::Hhd13 => 2,
            HhdVersion::Hhd14 => 3,
        }
    }
}

/// Flicker code parse errors
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
pub enum FlickerError {
    /// Payload ended early
    #[cfg_attr(feature = "thiserror", error("payload truncated"))]
    Truncated,

    /// Length field is not a valid number
    #[cfg_attr(feature = "thiserror", error("invalid length field"))]
    InvalidLength,

    /// Declared length does not match the payload
    #[cfg_attr(feature = "thiserror", error("length mismatch"))]
    LengthMismatch,

    /// Payload contains non-ASCII characters
    #[cfg_attr(feature = "thiserror", error("non-ascii payload"))]
    NonAscii,
}

/// Data element encoding, BCD for purely numeric data
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Encoding {
    Bcd,
    Asc,
}

/// Split `n` characters off the front of `s`
fn take<'a>(s: &mut &'a str, n: usize) -> Result<&'a str, FlickerError> {
    if s.len() < n {
        return Err(FlickerError::Truncated);
    }
    let (head, tail) = s.split_at(n);
    *s = tail;
    Ok(head)
}

fn push_hex(out: &mut String, value: usize, width: usize) {
    let _ = write!(out, "{value:0width$X}");
}

/// Data element (start code or DE1-3)
#[derive(Clone, PartialEq, Eq, Debug, Default)]
struct DataElement {
    data: Option<String>,
}

impl DataElement {
    /// Parse a data element with a decimal LDE, absent where no input remains
    fn parse(s: &mut &str) -> Result<Self, FlickerError> {
        if s.is_empty() {
            return Ok(Self::default());
        }

        let lde: u8 = take(s, 2)?
            .parse()
            .map_err(|_| FlickerError::InvalidLength)?;
        let data = take(s, (lde & LENGTH_MASK) as usize)?;

        Ok(Self {
            data: Some(data.into()),
        })
    }

    fn encoding(&self) -> Encoding {
        match &self.data {
            Some(d) if d.is_empty() || !d.bytes().all(|c| c.is_ascii_digit()) => Encoding::Asc,
            _ => Encoding::Bcd,
        }
    }

    fn render_data(&self) -> String {
        let data = match &self.data {
            Some(d) => d,
            None => return String::new(),
        };

        match self.encoding() {
            Encoding::Asc => {
                let mut s = String::with_capacity(data.len() * 2);
                for b in data.bytes() {
                    push_hex(&mut s, b as usize, 2);
                }
                s
            }
            Encoding::Bcd => {
                let mut s = data.clone();
                if s.len() % 2 == 1 {
                    s.push('F');
                }
                s
            }
        }
    }

    fn render_length(&self, version: HhdVersion) -> String {
        if self.data.is_none() {
            return String::new();
        }

        let len = self.render_data().len() / 2;
        let mut s = String::new();

        match (self.encoding(), version) {
            (Encoding::Bcd, _) => push_hex(&mut s, len, 2),
            (Encoding::Asc, HhdVersion::Hhd14) => push_hex(&mut s, len + (1 << BIT_ENCODING), 2),
            (Encoding::Asc, HhdVersion::Hhd13) => {
                s.push('1');
                push_hex(&mut s, len, 1);
            }
        }

        s
    }
}

/// Parsed HHD-UC challenge
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FlickerCode {
    pub version: HhdVersion,
    /// Declared payload length
    pub lc: usize,
    control_bytes: Vec<u8>,
    start_code: DataElement,
    de: [DataElement; 3],
    /// Trailing data following DE3
    pub rest: Option<String>,
}

/// Strip whitespace and extract inline payloads from challenge text
fn clean(code: &str) -> String {
    let code: String = code.chars().filter(|c| *c != ' ').collect();
    let code = code.trim();

    match (code.find("CHLGUC"), code.find("CHLGTEXT")) {
        // Skip the marker and its four digit length, restoring a three digit LC
        (Some(t1), Some(t2)) if t2 > t1 && t1 + 10 <= t2 => match code.get(t1 + 10..t2) {
            Some(p) => {
                let mut s = String::from("0");
                s.push_str(p);
                s
            }
            None => code.into(),
        },
        _ => code.into(),
    }
}

impl FlickerCode {
    /// Parse a challenge payload, trying HHD 1.4 then HHD 1.3
    pub fn parse(code: &str) -> Result<Self, FlickerError> {
        Self::parse_version(code, HhdVersion::Hhd14)
            .or_else(|_| Self::parse_version(code, HhdVersion::Hhd13))
    }

    /// Parse a challenge payload with a fixed version
    pub fn parse_version(code: &str, version: HhdVersion) -> Result<Self, FlickerError> {
        let code = clean(code);
        if !code.is_ascii() {
            return Err(FlickerError::NonAscii);
        }
        let mut s = code.as_str();

        let lc: usize = take(&mut s, version.lc_len())?
            .parse()
            .map_err(|_| FlickerError::InvalidLength)?;
        if lc != s.len() {
            return Err(FlickerError::LengthMismatch);
        }

        // Start code, LDE is hex encoded
        let lde = u8::from_str_radix(take(&mut s, 2)?, 16).map_err(|_| FlickerError::InvalidLength)?;

        let mut control_bytes = Vec::new();
        if version == HhdVersion::Hhd14 && lde & (1 << BIT_CONTROL_BYTE) != 0 {
            for _ in 0..MAX_CONTROL_BYTES {
                let cb = u8::from_str_radix(take(&mut s, 2)?, 16)
                    .map_err(|_| FlickerError::InvalidLength)?;
                control_bytes.push(cb);

                if cb & (1 << BIT_CONTROL_BYTE) == 0 {
                    break;
                }
            }
        }

        let start_code = DataElement {
            data: Some(take(&mut s, (lde & LENGTH_MASK) as usize)?.into()),
        };

        let de = [
            DataElement::parse(&mut s)?,
            DataElement::parse(&mut s)?,
            DataElement::parse(&mut s)?,
        ];

        Ok(Self {
            version,
            lc,
            control_bytes,
            start_code,
            de,
            rest: (!s.is_empty()).then(|| s.into()),
        })
    }

    /// Start code data
    pub fn start_code(&self) -> &str {
        self.start_code.data.as_deref().unwrap_or_default()
    }

    /// Data element `index` (0-2), if present
    pub fn data_element(&self, index: usize) -> Option<&str> {
        self.de.get(index).and_then(|d| d.data.as_deref())
    }

    pub fn control_bytes(&self) -> &[u8] {
        &self.control_bytes
    }

    fn render_control_bytes(&self) -> String {
        let mut s = String::new();
        for cb in &self.control_bytes {
            push_hex(&mut s, *cb as usize, 2);
        }
        s
    }

    /// Render the flicker code payload, prefixed with its length
    fn render_payload(&self) -> String {
        let mut s = self.start_code.render_length(self.version);

        // Flag control bytes in the start code length (HHD 1.4 only)
        if self.version == HhdVersion::Hhd14 && !self.control_bytes.is_empty() {
            let len = usize::from_str_radix(&s, 16).unwrap_or_default();
            s.clear();
            push_hex(&mut s, len + (1 << BIT_CONTROL_BYTE), 2);
        }

        s.push_str(&self.render_control_bytes());
        s.push_str(&self.start_code.render_data());

        for de in &self.de {
            s.push_str(&de.render_length(self.version));
            s.push_str(&de.render_data());
        }

        // Length in bytes including the trailing checksums
        let mut out = String::new();
        push_hex(&mut out, (s.len() + 2) / 2, 2);
        out.push_str(&s);
        out
    }

    /// Luhn checksum over control bytes, start code and data elements
    fn luhn(&self) -> char {
        let mut s = self.render_control_bytes();
        s.push_str(&self.start_code.render_data());
        for de in &self.de {
            s.push_str(&de.render_data());
        }

        let digit_sum = |mut n: u32| {
            let mut q = 0;
            while n != 0 {
                q += n % 10;
                n /= 10;
            }
            q
        };

        let nibbles: Vec<u32> = s.chars().filter_map(|c| c.to_digit(16)).collect();
        let sum: u32 = nibbles
            .chunks(2)
            .map(|p| p[0] + p.get(1).map(|n| digit_sum(2 * n)).unwrap_or_default())
            .sum();

        let check = (10 - sum % 10) % 10;
        char::from_digit(check, 16).unwrap_or('0')
    }

    /// Render the flicker code for display
    pub fn render(&self) -> String {
        let mut payload = self.render_payload();
        let luhn = self.luhn();

        let xor = payload
            .chars()
            .filter_map(|c| c.to_digit(16))
            .fold(0, |a, n| a ^ n);

        payload.push(luhn);
        let _ = write!(payload, "{xor:X}");
        payload
    }
}

/// Decode a displayable flicker code from the dedicated payload or the
/// challenge text, returning `None` where neither holds an optical challenge
pub fn decode(hhd_uc: Option<&str>, challenge: Option<&str>) -> Option<String> {
    // The dedicated field takes precedence
    if let Some(code) = hhd_uc.filter(|c| !c.trim().is_empty()) {
        match FlickerCode::parse(code) {
            Ok(f) => return Some(f.render()),
            #[allow(unused_variables)]
            Err(e) => {
                #[cfg(feature = "log")]
                log::debug!("unable to parse challenge hhd_uc '{}': {:?}", code, e);
            }
        }
    }

    // Older banks inline the payload in the challenge text
    if let Some(code) = challenge.filter(|c| !c.trim().is_empty()) {
        match FlickerCode::parse(code) {
            Ok(f) => return Some(f.render()),
            #[allow(unused_variables)]
            Err(e) => {
                #[cfg(feature = "log")]
                log::trace!("challenge contains no hhd_uc: {:?}", e);
            }
        }
    }

    None
}
