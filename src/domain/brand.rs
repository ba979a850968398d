use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Canonical payment network identifiers.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Brand {
    Visa,
    Master,
    Discover,
    AmericanExpress,
    DinersClub,
    Jcb,
    Switch,
    Solo,
    Dankort,
    Maestro,
    Forbrugsforeningen,
    Laser,
}

impl Brand {
    /// Every brand, in classification order.
    pub const ALL: [Brand; 12] = [
        Brand::Visa,
        Brand::Master,
        Brand::Discover,
        Brand::AmericanExpress,
        Brand::DinersClub,
        Brand::Jcb,
        Brand::Switch,
        Brand::Solo,
        Brand::Dankort,
        Brand::Maestro,
        Brand::Forbrugsforeningen,
        Brand::Laser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Visa => "visa",
            Brand::Master => "master",
            Brand::Discover => "discover",
            Brand::AmericanExpress => "american_express",
            Brand::DinersClub => "diners_club",
            Brand::Jcb => "jcb",
            Brand::Switch => "switch",
            Brand::Solo => "solo",
            Brand::Dankort => "dankort",
            Brand::Maestro => "maestro",
            Brand::Forbrugsforeningen => "forbrugsforeningen",
            Brand::Laser => "laser",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown card brand: {0}")]
pub struct UnknownBrand(pub String);

impl FromStr for Brand {
    type Err = UnknownBrand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Brand::ALL
            .into_iter()
            .find(|brand| brand.as_str() == s)
            .ok_or_else(|| UnknownBrand(s.to_string()))
    }
}

// Patterns overlap (maestro covers most 5x/6x ranges), so order is significant.
static BRAND_PATTERNS: Lazy<Vec<(Brand, Regex)>> = Lazy::new(|| {
    [
        (Brand::Visa, r"^4\d{12}(\d{3})?$"),
        (Brand::Master, r"^(5[1-5]\d{4}|677189)\d{10}$"),
        (
            Brand::Discover,
            r"^(?:(?:6011|65\d{2}|64[4-9]\d)\d{12}|62\d{14})$",
        ),
        (Brand::AmericanExpress, r"^3[47]\d{13}$"),
        (Brand::DinersClub, r"^3(0[0-5]|[68]\d)\d{11}$"),
        (Brand::Jcb, r"^35(28|29|[3-8]\d)\d{12}$"),
        (Brand::Switch, r"^6759\d{12}(\d{2,3})?$"),
        (Brand::Solo, r"^6767\d{12}(\d{2,3})?$"),
        (Brand::Dankort, r"^5019\d{12}$"),
        (Brand::Maestro, r"^(5[06-8]|6\d)\d{10,17}$"),
        (Brand::Forbrugsforeningen, r"^600722\d{10}$"),
        (Brand::Laser, r"^(6304|6706|6771|6709)\d{8}(\d{4}|\d{6,7})?$"),
    ]
    .into_iter()
    .map(|(brand, pattern)| (brand, Regex::new(pattern).expect("static brand pattern")))
    .collect()
});

/// Classifies a digits-only card number.
///
/// Returns the first brand in table order whose pattern matches the whole
/// input, or `None` when nothing matches. An empty input is always unknown.
pub fn classify(digits: &str) -> Option<Brand> {
    BRAND_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(digits))
        .map(|(brand, _)| *brand)
}

/// Maps a brand name from an external vocabulary onto the canonical set.
///
/// An empty or unrecognized hint falls back to classifying `number`.
pub fn resolve_brand_hint(hint: &str, number: &str) -> Option<Brand> {
    let hint = hint.trim().to_ascii_lowercase();
    match hint.as_str() {
        "mastercard" | "maestro" => Some(Brand::Master),
        "amex" => Some(Brand::AmericanExpress),
        "dinersclub" => Some(Brand::DinersClub),
        "" => classify(number),
        other => other.parse().ok().or_else(|| classify(number)),
    }
}
