//! Measurement units for user profile fields
//!
//! Heights are stored in centimetres and weights in kilograms; these enums
//! convert a stored value into the unit a caller asked for.

use async_graphql::Enum;

/// Centimetres per foot
const CENTIMETRES_PER_FOOT: f64 = 30.48;

/// Kilograms per pound
const KILOGRAMS_PER_POUND: f64 = 0.45359237;

/// Height unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enum)]
pub enum HeightUnit {
    /// Metres
    Metre,
    /// Centimetres
    #[default]
    Centimetre,
    /// Feet (1 foot = 30.48 cm)
    Foot,
}

impl HeightUnit {
    /// Convert a height in centimetres into this unit
    pub fn from_centimetres(self, centimetres: f64) -> f64 {
        match self {
            Self::Metre => centimetres / 100.0,
            Self::Centimetre => centimetres,
            Self::Foot => centimetres / CENTIMETRES_PER_FOOT,
        }
    }
}

/// Weight unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enum)]
pub enum WeightUnit {
    /// Kilograms
    #[default]
    Kilogram,
    /// Grams
    Gram,
    /// Pounds (1 lb = 0.45359237 kg)
    Pound,
}

impl WeightUnit {
    /// Convert a weight in kilograms into this unit
    pub fn from_kilograms(self, kilograms: f64) -> f64 {
        match self {
            Self::Kilogram => kilograms,
            Self::Gram => kilograms * 1000.0,
            Self::Pound => kilograms / KILOGRAMS_PER_POUND,
        }
    }
}
