use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Violation;

const SYMBOL_LEN: usize = 3;

/// Exchange ticker: exactly three uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse a symbol without normalizing case or whitespace.
    pub fn parse(input: &str) -> Result<Self, Violation> {
        let is_valid =
            input.len() == SYMBOL_LEN && input.bytes().all(|byte| byte.is_ascii_uppercase());

        if !is_valid {
            return Err(Violation::InvalidSymbol {
                value: input.to_owned(),
            });
        }

        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Symbol {
    type Error = Violation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = Violation;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_uppercase_letters() {
        let parsed = Symbol::parse("POP").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "POP");
        assert_eq!(parsed.to_string(), "POP");
    }

    #[test]
    fn rejects_lowercase_without_normalizing() {
        let err = Symbol::parse("pop").expect_err("must fail");
        assert!(matches!(err, Violation::InvalidSymbol { ref value } if value == "pop"));
    }

    #[test]
    fn rejects_wrong_lengths_and_padding() {
        for input in ["", "PO", "POPS", " POP", "POP ", "P0P", "ÄBC"] {
            assert!(Symbol::parse(input).is_err(), "{input:?} must be rejected");
        }
    }

    #[test]
    fn deserializes_through_validation() {
        let symbol: Symbol = serde_json::from_str("\"GIN\"").expect("valid symbol");
        assert_eq!(symbol.as_str(), "GIN");
        assert!(serde_json::from_str::<Symbol>("\"gin\"").is_err());
    }
}
