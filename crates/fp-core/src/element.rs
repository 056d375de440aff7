use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidSymbol;

/// One of the five elements (wuxing).
///
/// There is no meaningful total order — only the two cycles matter:
/// generation (wood→fire→earth→metal→water→wood) and restriction
/// (wood→earth, earth→water, water→fire, fire→metal, metal→wood).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// The element `self` produces in the generation cycle.
    pub fn generation_target(self) -> Element {
        match self {
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
        }
    }

    /// The element `self` suppresses in the restriction cycle.
    pub fn restriction_target(self) -> Element {
        match self {
            Element::Wood => Element::Earth,
            Element::Earth => Element::Water,
            Element::Water => Element::Fire,
            Element::Fire => Element::Metal,
            Element::Metal => Element::Wood,
        }
    }

    /// The element that suppresses `self` — the restriction cycle read
    /// backwards (metal restricts wood, so `Wood.restrictor()` is metal).
    pub fn restrictor(self) -> Element {
        match self {
            Element::Wood => Element::Metal,
            Element::Fire => Element::Water,
            Element::Earth => Element::Wood,
            Element::Metal => Element::Fire,
            Element::Water => Element::Earth,
        }
    }

    /// Whether `self` generates `other`.
    pub fn generates(self, other: Element) -> bool {
        self.generation_target() == other
    }

    /// Whether `self` restricts `other`.
    pub fn restricts(self, other: Element) -> bool {
        self.restriction_target() == other
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Element {
    type Err = InvalidSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wood" => Ok(Element::Wood),
            "fire" => Ok(Element::Fire),
            "earth" => Ok(Element::Earth),
            "metal" => Ok(Element::Metal),
            "water" => Ok(Element::Water),
            _ => Err(InvalidSymbol::new("element", s)),
        }
    }
}

/// Yin/yang polarity of a heavenly stem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Polarity::Yang => "yang",
            Polarity::Yin => "yin",
        })
    }
}
