use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::element::{Element, Polarity};
use crate::error::InvalidSymbol;

/// One of the ten heavenly stems: 甲(jia) 乙(yi) 丙(bing) 丁(ding) 戊(wu)
/// 己(ji) 庚(geng) 辛(xin) 壬(ren) 癸(gui).
///
/// Each stem carries exactly one element and one polarity; stems alternate
/// yang/yin through the cycle, two stems per element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeavenlyStem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl HeavenlyStem {
    pub const ALL: [HeavenlyStem; 10] = [
        HeavenlyStem::Jia,
        HeavenlyStem::Yi,
        HeavenlyStem::Bing,
        HeavenlyStem::Ding,
        HeavenlyStem::Wu,
        HeavenlyStem::Ji,
        HeavenlyStem::Geng,
        HeavenlyStem::Xin,
        HeavenlyStem::Ren,
        HeavenlyStem::Gui,
    ];

    pub fn element(self) -> Element {
        match self {
            HeavenlyStem::Jia | HeavenlyStem::Yi => Element::Wood,
            HeavenlyStem::Bing | HeavenlyStem::Ding => Element::Fire,
            HeavenlyStem::Wu | HeavenlyStem::Ji => Element::Earth,
            HeavenlyStem::Geng | HeavenlyStem::Xin => Element::Metal,
            HeavenlyStem::Ren | HeavenlyStem::Gui => Element::Water,
        }
    }

    pub fn polarity(self) -> Polarity {
        match self {
            HeavenlyStem::Jia
            | HeavenlyStem::Bing
            | HeavenlyStem::Wu
            | HeavenlyStem::Geng
            | HeavenlyStem::Ren => Polarity::Yang,
            HeavenlyStem::Yi
            | HeavenlyStem::Ding
            | HeavenlyStem::Ji
            | HeavenlyStem::Xin
            | HeavenlyStem::Gui => Polarity::Yin,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeavenlyStem::Jia => "jia",
            HeavenlyStem::Yi => "yi",
            HeavenlyStem::Bing => "bing",
            HeavenlyStem::Ding => "ding",
            HeavenlyStem::Wu => "wu",
            HeavenlyStem::Ji => "ji",
            HeavenlyStem::Geng => "geng",
            HeavenlyStem::Xin => "xin",
            HeavenlyStem::Ren => "ren",
            HeavenlyStem::Gui => "gui",
        }
    }
}

impl fmt::Display for HeavenlyStem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeavenlyStem {
    type Err = InvalidSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        HeavenlyStem::ALL
            .into_iter()
            .find(|stem| stem.name() == lower)
            .ok_or_else(|| InvalidSymbol::new("stem", s))
    }
}
