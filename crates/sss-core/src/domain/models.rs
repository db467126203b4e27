use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Violation;

/// Stock classification, which selects the dividend yield formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockKind {
    Common,
    Preferred,
}

impl StockKind {
    /// Exact, case-sensitive match against the `common` / `preferred` tags.
    pub fn parse(tag: &str) -> Result<Self, Violation> {
        match tag {
            "common" => Ok(Self::Common),
            "preferred" => Ok(Self::Preferred),
            _ => Err(Violation::InvalidKind {
                value: tag.to_owned(),
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Preferred => "preferred",
        }
    }
}

impl Display for StockKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Exact, case-sensitive match against the `buy` / `sell` tags.
    pub fn parse(tag: &str) -> Result<Self, Violation> {
        match tag {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(Violation::InvalidSide {
                value: tag.to_owned(),
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
