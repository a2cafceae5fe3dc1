//! Value-plus-unit parsing for prediction strings.
//!
//! A prediction is a number followed by a unit, e.g. `12 kilogram`,
//! `12kg` or `3.5 fluid ounces`. The unit must resolve (directly, via an
//! alias, or as the plural of a full unit name) to one of the allowed units.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::UnitsConfig;
use crate::error::SanityError;

/// Units accepted out of the box, grouped by the entity they measure.
const BUILTIN_UNITS: &[&str] = &[
    // length: width, depth, height
    "centimetre", "foot", "inch", "metre", "millimetre", "yard",
    // weight
    "gram", "kilogram", "microgram", "milligram", "ounce", "pound", "ton",
    // voltage
    "kilovolt", "millivolt", "volt",
    // wattage
    "kilowatt", "watt",
    // volume
    "centilitre", "cubic foot", "cubic inch", "cup", "decilitre", "fluid ounce", "gallon",
    "imperial gallon", "litre", "microlitre", "millilitre", "pint", "quart",
];

/// Abbreviations, irregular plurals and American spellings (with their
/// plurals). Regular plurals of full unit names are handled by
/// `UnitParser::resolve`.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("cm", "centimetre"),
    ("centimeter", "centimetre"),
    ("centimeters", "centimetre"),
    ("mm", "millimetre"),
    ("millimeter", "millimetre"),
    ("millimeters", "millimetre"),
    ("m", "metre"),
    ("meter", "metre"),
    ("meters", "metre"),
    ("ft", "foot"),
    ("feet", "foot"),
    ("in", "inch"),
    ("inches", "inch"),
    ("yd", "yard"),
    ("g", "gram"),
    ("gm", "gram"),
    ("kg", "kilogram"),
    ("mcg", "microgram"),
    ("ug", "microgram"),
    ("mg", "milligram"),
    ("oz", "ounce"),
    ("lb", "pound"),
    ("lbs", "pound"),
    ("kv", "kilovolt"),
    ("mv", "millivolt"),
    ("v", "volt"),
    ("kw", "kilowatt"),
    ("w", "watt"),
    ("cl", "centilitre"),
    ("centiliter", "centilitre"),
    ("centiliters", "centilitre"),
    ("cu ft", "cubic foot"),
    ("cubic feet", "cubic foot"),
    ("cu in", "cubic inch"),
    ("cubic inches", "cubic inch"),
    ("dl", "decilitre"),
    ("deciliter", "decilitre"),
    ("deciliters", "decilitre"),
    ("fl oz", "fluid ounce"),
    ("gal", "gallon"),
    ("l", "litre"),
    ("liter", "litre"),
    ("liters", "litre"),
    ("ul", "microlitre"),
    ("microliter", "microlitre"),
    ("microliters", "microlitre"),
    ("ml", "millilitre"),
    ("milliliter", "millilitre"),
    ("milliliters", "millilitre"),
    ("pt", "pint"),
    ("qt", "quart"),
];

fn grammar() -> &'static Regex {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Regex::new(r"^(-?\d+(?:\.\d+)?)\s*([A-Za-z][A-Za-z\s]*)$").expect("grammar regex is valid")
    })
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A parsed prediction: numeric value plus canonical unit name.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitParseError {
    /// Blank text (or a `nan` placeholder).
    Empty,
    /// Text does not match `<number> <unit>`.
    Malformed { text: String },
    /// Grammar matched but the unit is not allowed.
    UnknownUnit { unit: String, text: String },
}

impl fmt::Display for UnitParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty prediction"),
            Self::Malformed { text } => write!(f, "invalid format in '{text}'"),
            Self::UnknownUnit { unit, text } => {
                write!(f, "invalid unit [{unit}] found in '{text}'")
            }
        }
    }
}

impl std::error::Error for UnitParseError {}

/// Validation oracle consulted once per output row.
pub trait PredictionParser {
    fn parse(&self, text: &str) -> Result<Quantity, UnitParseError>;
}

impl<F> PredictionParser for F
where
    F: Fn(&str) -> Result<Quantity, UnitParseError>,
{
    fn parse(&self, text: &str) -> Result<Quantity, UnitParseError> {
        self(text)
    }
}

// ---------------------------------------------------------------------------
// Default parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct UnitParser {
    allowed: BTreeSet<String>,
    aliases: BTreeMap<String, String>,
}

impl Default for UnitParser {
    fn default() -> Self {
        Self {
            allowed: BUILTIN_UNITS.iter().map(|u| u.to_string()).collect(),
            aliases: BUILTIN_ALIASES
                .iter()
                .map(|(a, u)| (a.to_string(), u.to_string()))
                .collect(),
        }
    }
}

impl UnitParser {
    /// Build a parser from config overrides.
    ///
    /// Built-in aliases whose target is no longer allowed are dropped;
    /// configured aliases must point at an allowed unit.
    pub fn from_config(config: &UnitsConfig) -> Result<Self, SanityError> {
        let mut parser = Self::default();

        let extra: BTreeSet<String> = config.allowed.iter().map(|u| unit_key(u)).collect();
        if extra.iter().any(|u| u.is_empty()) {
            return Err(SanityError::Config("allowed units must not be empty".into()));
        }
        if config.replace_allowed {
            if extra.is_empty() {
                return Err(SanityError::Config(
                    "replace_allowed requires at least one allowed unit".into(),
                ));
            }
            parser.allowed = extra;
            let allowed = &parser.allowed;
            parser.aliases.retain(|_, target| allowed.contains(target));
        } else {
            parser.allowed.extend(extra);
        }

        for (alias, target) in &config.aliases {
            let target = unit_key(target);
            if !parser.allowed.contains(&target) {
                return Err(SanityError::Config(format!(
                    "alias '{alias}' points at unknown unit '{target}'"
                )));
            }
            parser.aliases.insert(unit_key(alias), target);
        }

        Ok(parser)
    }

    pub fn allowed_units(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(|s| s.as_str())
    }

    /// Map a normalized unit to its canonical name.
    ///
    /// A trailing `s` is only stripped to reach a full unit name; aliases
    /// carry their own plural forms (`lbs`, `inches`).
    fn resolve(&self, unit: &str) -> Option<String> {
        if self.allowed.contains(unit) {
            return Some(unit.to_string());
        }
        if let Some(target) = self.aliases.get(unit) {
            return Some(target.clone());
        }
        unit.strip_suffix('s')
            .filter(|singular| self.allowed.contains(*singular))
            .map(str::to_string)
    }
}

impl PredictionParser for UnitParser {
    fn parse(&self, text: &str) -> Result<Quantity, UnitParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return Err(UnitParseError::Empty);
        }

        let caps = grammar().captures(trimmed).ok_or_else(|| UnitParseError::Malformed {
            text: text.to_string(),
        })?;

        let value: f64 = caps[1].parse().map_err(|_| UnitParseError::Malformed {
            text: text.to_string(),
        })?;
        let unit_raw = unit_key(&caps[2]);

        match self.resolve(&unit_raw) {
            Some(unit) => Ok(Quantity { value, unit }),
            None => Err(UnitParseError::UnknownUnit {
                unit: unit_raw,
                text: text.to_string(),
            }),
        }
    }
}

/// Lowercase and collapse internal whitespace to single spaces.
fn unit_key(s: &str) -> String {
    s.split_whitespace()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
