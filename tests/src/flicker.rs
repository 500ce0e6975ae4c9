// Copyright (c) 2026 The pintan Developers

//! Optical challenge vectors

/// Challenge input and the expected rendered flicker code
pub struct Vector {
    pub hhd_uc: Option<&'static str>,
    pub challenge: Option<&'static str>,
    pub flicker: Option<&'static str>,
}

pub const VECTORS: &[Vector] = &[
    // Inline in the challenge text
    Vector {
        hhd_uc: None,
        challenge: Some("CHLGUC 0026 2908881344731012345678900515,00 CHLGTEXT Bitte pruefen"),
        flicker: Some("1204881344730512345678904531352C30303E"),
    },
    // Dedicated field, HHD 1.3 layout
    Vector {
        hhd_uc: Some("2908881344731012345678900515,00"),
        challenge: Some("Bitte Karte einstecken"),
        flicker: Some("1204881344730512345678901531352C30303B"),
    },
    // Control byte present
    Vector {
        hhd_uc: Some("02987011120492101234567890041,00"),
        challenge: None,
        flicker: Some("1284011120492F05123456789044312C303094"),
    },
    Vector {
        hhd_uc: Some("21081234567809123456789"),
        challenge: None,
        flicker: Some("0C041234567805123456789F2B"),
    },
    // Plain text challenge, nothing to render
    Vector {
        hhd_uc: None,
        challenge: Some("Bitte geben Sie die TAN aus der App ein"),
        flicker: None,
    },
];
