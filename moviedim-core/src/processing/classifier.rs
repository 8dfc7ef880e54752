//! Classification of measured ratios into cinematic bands.

use serde::Serialize;

/// Ratio reported whenever no reliable measurement exists.
pub const DEFAULT_RATIO: f64 = 1.76;

/// A named, inclusive range of accepted ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioBand {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl RatioBand {
    pub fn contains(&self, ratio: f64) -> bool {
        self.min <= ratio && ratio <= self.max
    }
}

/// Accepted bands, checked in this order.
pub const RATIO_BANDS: [RatioBand; 4] = [
    RatioBand {
        name: "Flat/Widescreen",
        min: 1.75,
        max: 1.79,
    },
    RatioBand {
        name: "Anamorphic scope",
        min: 2.35,
        max: 2.40,
    },
    RatioBand {
        name: "Early scope",
        min: 2.20,
        max: 2.25,
    },
    RatioBand {
        name: "Academy widescreen",
        min: 1.84,
        max: 1.90,
    },
];

/// Rounds to two decimals, halves away from zero.
///
/// The product with 100 is taken in binary floating point, so a ratio such as
/// 2.675 (stored slightly below) rounds to 2.67.
pub fn round_ratio(ratio: f64) -> f64 {
    (ratio * 100.0).round() / 100.0
}

/// First band containing `ratio`.
pub fn find_band(ratio: f64) -> Option<&'static RatioBand> {
    RATIO_BANDS.iter().find(|band| band.contains(ratio))
}

/// The ratio itself when it falls in a band, otherwise [`DEFAULT_RATIO`].
pub fn classify(ratio: f64) -> f64 {
    match find_band(ratio) {
        Some(_) => ratio,
        None => DEFAULT_RATIO,
    }
}
