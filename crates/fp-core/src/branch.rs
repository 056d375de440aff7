use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::element::Element;
use crate::error::InvalidSymbol;

/// One of the twelve earthly branches: 子(zi) 丑(chou) 寅(yin) 卯(mao)
/// 辰(chen) 巳(si) 午(wu) 未(wei) 申(shen) 酉(you) 戌(xu) 亥(hai).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarthlyBranch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl EarthlyBranch {
    pub const ALL: [EarthlyBranch; 12] = [
        EarthlyBranch::Zi,
        EarthlyBranch::Chou,
        EarthlyBranch::Yin,
        EarthlyBranch::Mao,
        EarthlyBranch::Chen,
        EarthlyBranch::Si,
        EarthlyBranch::Wu,
        EarthlyBranch::Wei,
        EarthlyBranch::Shen,
        EarthlyBranch::You,
        EarthlyBranch::Xu,
        EarthlyBranch::Hai,
    ];

    pub fn element(self) -> Element {
        match self {
            EarthlyBranch::Zi | EarthlyBranch::Hai => Element::Water,
            EarthlyBranch::Yin | EarthlyBranch::Mao => Element::Wood,
            EarthlyBranch::Si | EarthlyBranch::Wu => Element::Fire,
            EarthlyBranch::Shen | EarthlyBranch::You => Element::Metal,
            EarthlyBranch::Chou
            | EarthlyBranch::Chen
            | EarthlyBranch::Wei
            | EarthlyBranch::Xu => Element::Earth,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EarthlyBranch::Zi => "zi",
            EarthlyBranch::Chou => "chou",
            EarthlyBranch::Yin => "yin",
            EarthlyBranch::Mao => "mao",
            EarthlyBranch::Chen => "chen",
            EarthlyBranch::Si => "si",
            EarthlyBranch::Wu => "wu",
            EarthlyBranch::Wei => "wei",
            EarthlyBranch::Shen => "shen",
            EarthlyBranch::You => "you",
            EarthlyBranch::Xu => "xu",
            EarthlyBranch::Hai => "hai",
        }
    }
}

impl fmt::Display for EarthlyBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EarthlyBranch {
    type Err = InvalidSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        EarthlyBranch::ALL
            .into_iter()
            .find(|branch| branch.name() == lower)
            .ok_or_else(|| InvalidSymbol::new("branch", s))
    }
}
