use std::fmt;

/// A symbol name outside one of the closed astrological domains.
///
/// Only raised at the parse boundary (`FromStr` impls). Every function
/// past that boundary is total over the enums and cannot fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidSymbol {
    /// Which domain was being parsed ("stem", "branch", "element", ...).
    pub kind: &'static str,
    /// The offending input text.
    pub token: String,
}

impl InvalidSymbol {
    pub fn new(kind: &'static str, token: &str) -> Self {
        Self {
            kind,
            token: token.to_string(),
        }
    }
}

impl fmt::Display for InvalidSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} symbol: '{}'", self.kind, self.token)
    }
}

impl std::error::Error for InvalidSymbol {}
