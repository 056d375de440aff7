use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::branch::EarthlyBranch;
use crate::element::Element;
use crate::error::InvalidSymbol;
use crate::stem::HeavenlyStem;

/// One of the four chart positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarPosition {
    pub const ALL: [PillarPosition; 4] = [
        PillarPosition::Year,
        PillarPosition::Month,
        PillarPosition::Day,
        PillarPosition::Hour,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PillarPosition::Year => "year",
            PillarPosition::Month => "month",
            PillarPosition::Day => "day",
            PillarPosition::Hour => "hour",
        }
    }
}

impl fmt::Display for PillarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PillarPosition {
    type Err = InvalidSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        PillarPosition::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| InvalidSymbol::new("position", s))
    }
}

/// A stem/branch pair occupying one chart position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: HeavenlyStem,
    pub branch: EarthlyBranch,
}

impl Pillar {
    pub fn new(stem: HeavenlyStem, branch: EarthlyBranch) -> Self {
        Self { stem, branch }
    }

    pub fn stem_element(self) -> Element {
        self.stem.element()
    }

    pub fn branch_element(self) -> Element {
        self.branch.element()
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stem, self.branch)
    }
}

impl FromStr for Pillar {
    type Err = InvalidSymbol;

    /// Parses `"stem-branch"` text, e.g. `"jia-zi"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stem, branch) = s
            .split_once('-')
            .ok_or_else(|| InvalidSymbol::new("pillar", s))?;
        Ok(Pillar::new(stem.parse()?, branch.parse()?))
    }
}

/// A complete birth chart: exactly four pillars, one per position.
///
/// The day pillar's stem is the Day Master — the anchor every
/// person-level scoring decision hangs off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FourPillarsChart {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillarsChart {
    pub fn new(year: Pillar, month: Pillar, day: Pillar, hour: Pillar) -> Self {
        Self {
            year,
            month,
            day,
            hour,
        }
    }

    pub fn pillar(&self, position: PillarPosition) -> Pillar {
        match position {
            PillarPosition::Year => self.year,
            PillarPosition::Month => self.month,
            PillarPosition::Day => self.day,
            PillarPosition::Hour => self.hour,
        }
    }

    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    pub fn day_master(&self) -> HeavenlyStem {
        self.day.stem
    }

    /// Elements of the eight stem/branch slots, pillar order, stem first.
    pub fn symbol_elements(&self) -> [Element; 8] {
        [
            self.year.stem_element(),
            self.year.branch_element(),
            self.month.stem_element(),
            self.month.branch_element(),
            self.day.stem_element(),
            self.day.branch_element(),
            self.hour.stem_element(),
            self.hour.branch_element(),
        ]
    }
}

/// Body strength classification (身強/身弱), derived by an external
/// pattern-analysis step and consumed here as an opaque input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyStrength {
    Strong,
    Weak,
    #[default]
    Neutral,
}

impl BodyStrength {
    pub fn name(self) -> &'static str {
        match self {
            BodyStrength::Strong => "strong",
            BodyStrength::Weak => "weak",
            BodyStrength::Neutral => "neutral",
        }
    }
}

impl fmt::Display for BodyStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BodyStrength {
    type Err = InvalidSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strong" => Ok(BodyStrength::Strong),
            "weak" => Ok(BodyStrength::Weak),
            "neutral" => Ok(BodyStrength::Neutral),
            _ => Err(InvalidSymbol::new("strength", s)),
        }
    }
}

/// Element counts across a chart's eight symbol slots — the balance
/// profile an alternative fortune strategy consumes. The baseline daily
/// fortune path never reads this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementTally {
    counts: [u8; 5],
}

impl ElementTally {
    pub fn of_chart(chart: &FourPillarsChart) -> Self {
        let mut tally = Self::default();
        for element in chart.symbol_elements() {
            tally.counts[Self::slot(element)] += 1;
        }
        tally
    }

    pub fn count(&self, element: Element) -> u8 {
        self.counts[Self::slot(element)]
    }

    /// Total symbols counted — always 8 for a complete chart.
    pub fn total(&self) -> u8 {
        self.counts.iter().sum()
    }

    fn slot(element: Element) -> usize {
        match element {
            Element::Wood => 0,
            Element::Fire => 1,
            Element::Earth => 2,
            Element::Metal => 3,
            Element::Water => 4,
        }
    }
}
