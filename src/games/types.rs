use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque player identifier.
///
/// Front-ends hand us either a numeric chat user id or a string; both are
/// normalized to the same key so `42` and `"42"` address the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for AccountId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(id) => id.into(),
            RawId::Text(id) => id.into(),
        })
    }
}

/// Wheel color
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    White,
}

impl Color {
    /// Every color, in display order
    pub const ALL: [Color; 3] = [Color::Red, Color::Black, Color::White];

    /// Stable key used in action tokens and JSON
    pub fn key(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::White => "white",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Black => "Black",
            Color::White => "White",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Color::Red => "🔴",
            Color::Black => "⚫",
            Color::White => "⚪",
        }
    }

    /// Glyph and label together, e.g. "🔴 Red"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.glyph(), self.label())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Color {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|color| color.key() == s)
            .ok_or_else(|| UnknownChoice(s.to_string()))
    }
}

/// Wheel number, always within `Number::MIN..=Number::MAX`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Number(u8);

impl Number {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Every number, ascending
    pub const ALL: [Number; 6] = [
        Number(1),
        Number(2),
        Number(3),
        Number(4),
        Number(5),
        Number(6),
    ];

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Number {
    type Error = UnknownChoice;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Number::new(value).ok_or_else(|| UnknownChoice(value.to_string()))
    }
}

impl From<Number> for u8 {
    fn from(number: Number) -> Self {
        number.0
    }
}

impl FromStr for Number {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .and_then(Number::new)
            .ok_or_else(|| UnknownChoice(s.to_string()))
    }
}

/// A color key or number that is not part of the catalogue
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown choice: {0}")]
pub struct UnknownChoice(pub String);

/// One drawn result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Draw {
    pub color: Color,
    pub number: Number,
}

impl Draw {
    pub fn new(color: Color, number: Number) -> Self {
        Self { color, number }
    }
}

/// Read-only projection of an account for rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub balance: i64,
    pub credit_granted: bool,
}

impl AccountSnapshot {
    /// Overdraft rule: a stake is covered by the balance, or the account is
    /// already at or below zero with credit granted.
    pub fn can_cover(&self, amount: i64) -> bool {
        self.balance >= amount || (self.balance <= 0 && self.credit_granted)
    }

    /// Whether the menu should offer the overdraft
    pub fn credit_offer_due(&self) -> bool {
        self.balance <= 0 && !self.credit_granted
    }
}

/// Result of one settled wager. Handed back once, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WagerOutcome {
    pub account_id: AccountId,
    pub amount: i64,
    pub chosen: Draw,
    pub result: Draw,
    pub won: bool,
    pub balance_after: i64,
}

/// Catalogue entry for a color as exposed to front-ends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorEntry {
    pub key: String,
    pub label: String,
    pub glyph: String,
}

impl From<Color> for ColorEntry {
    fn from(color: Color) -> Self {
        Self {
            key: color.key().to_string(),
            label: color.label().to_string(),
            glyph: color.glyph().to_string(),
        }
    }
}

/// The fixed choice sets, identical for both front-ends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalogue {
    pub colors: Vec<ColorEntry>,
    pub numbers: Vec<u8>,
}

impl Catalogue {
    pub fn standard() -> Self {
        Self {
            colors: Color::ALL.into_iter().map(ColorEntry::from).collect(),
            numbers: Number::ALL.into_iter().map(u8::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_accepts_number_or_string() {
        let from_number: AccountId = serde_json::from_str("42").unwrap();
        let from_string: AccountId = serde_json::from_str("\"42\"").unwrap();

        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"42\"");
    }

    #[test]
    fn test_color_keys_round_trip_through_from_str() {
        for color in Color::ALL {
            assert_eq!(color.key().parse::<Color>(), Ok(color));
        }
        assert!("green".parse::<Color>().is_err());
    }

    #[test]
    fn test_number_bounds() {
        assert!(Number::new(0).is_none());
        assert!(Number::new(7).is_none());
        assert_eq!(Number::new(6).map(|n| n.value()), Some(6));
        assert!(serde_json::from_str::<Number>("9").is_err());
        assert!("x".parse::<Number>().is_err());
    }

    #[test]
    fn test_catalogue_lists_everything() {
        let catalogue = Catalogue::standard();

        assert_eq!(catalogue.numbers, vec![1, 2, 3, 4, 5, 6]);
        let keys: Vec<_> = catalogue.colors.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["red", "black", "white"]);
        assert_eq!(catalogue.colors[1].glyph, "⚫");
    }

    #[test]
    fn test_credit_offer_due() {
        let broke = AccountSnapshot { balance: 0, credit_granted: false };
        let covered = AccountSnapshot { balance: -50, credit_granted: true };
        let solvent = AccountSnapshot { balance: 10, credit_granted: false };

        assert!(broke.credit_offer_due());
        assert!(!covered.credit_offer_due());
        assert!(!solvent.credit_offer_due());
    }
}
