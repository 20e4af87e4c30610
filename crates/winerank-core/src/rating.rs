//! Rating location and normalization
//!
//! A record carries its rating in a single `Scale: value` field. Values are
//! converted onto the Parker (100-point) scale.

use std::fmt;
use std::str::FromStr;

use crate::error::{RankError, Result};

/// Separator between scale name and value in a rating field
pub const RATING_SEPARATOR: char = ':';

/// Rating scales understood by winerank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    /// 100-point scale, used as the canonical scale
    Parker,
    /// 20-point scale
    Robinson,
}

impl Scale {
    /// Every supported scale, in display order
    pub const ALL: [Scale; 2] = [Scale::Parker, Scale::Robinson];

    /// Multiplier converting a value on this scale to Parker points
    pub fn factor(self) -> f64 {
        match self {
            Scale::Parker => 1.0,
            Scale::Robinson => 5.0,
        }
    }

    /// Name as written in the input
    pub fn as_str(self) -> &'static str {
        match self {
            Scale::Parker => "Parker",
            Scale::Robinson => "Robinson",
        }
    }

    fn supported() -> String {
        Scale::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Scale {
    type Err = RankError;

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Parker" => Ok(Scale::Parker),
            "Robinson" => Ok(Scale::Robinson),
            other => Err(RankError::UnknownScale {
                scale: other.to_string(),
                supported: Scale::supported(),
            }),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed rating in its original scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub scale: Scale,
    pub value: f64,
}

impl Rating {
    /// The rating in Parker points
    pub fn normalized(&self) -> f64 {
        self.value * self.scale.factor()
    }
}

/// The first field, in column order, that contains the rating separator
pub fn find_rating(fields: &[String]) -> Option<&str> {
    fields
        .iter()
        .map(String::as_str)
        .find(|field| field.contains(RATING_SEPARATOR))
}

/// Parse a `Scale: value` field.
///
/// The field must hold exactly one separator. Scale and value are trimmed; the
/// scale must match a [`Scale`] name exactly.
pub fn parse_rating(field: &str) -> Result<Rating> {
    let mut parts = field.split(RATING_SEPARATOR);
    let (Some(scale), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(RankError::RatingFormat {
            field: field.to_string(),
        });
    };

    let value_text = value.trim();
    let value: f64 = value_text.parse().map_err(|e: std::num::ParseFloatError| {
        RankError::RatingValue {
            value: value_text.to_string(),
            reason: e.to_string(),
        }
    })?;

    let scale: Scale = scale.trim().parse()?;

    Ok(Rating { scale, value })
}
