//! Boundary types for the lookup service.

use serde::ser::Serializer;
use serde::Serialize;

/// A game-specific elo rating, or `"N/A"` when the player has no data
/// for the configured game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elo {
    Rating(i64),
    NotAvailable,
}

impl Serialize for Elo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Elo::Rating(r) => serializer.serialize_i64(*r),
            Elo::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

impl From<Option<i64>> for Elo {
    fn from(value: Option<i64>) -> Self {
        match value {
            Some(r) => Elo::Rating(r),
            None => Elo::NotAvailable,
        }
    }
}

/// The aggregate answer for one nickname. This is the only type that
/// crosses the service boundary as output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    /// Nickname as reported by the upstream profile (original casing).
    pub nickname: String,
    /// Game-specific elo, or `"N/A"`.
    pub elo: Elo,
    /// Coarse skill tier, defaults to 1 when the profile lacks game data.
    pub skill_level: u8,
    /// Death-weighted K/D over the counted matches, formatted to two
    /// decimals, or `"N/A"` when no deaths were counted.
    pub average_kd: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_elo_serializes_as_number() {
        let json = serde_json::to_string(&Elo::Rating(2001)).unwrap();
        assert_eq!(json, "2001");
    }

    #[test]
    fn test_elo_serializes_na_as_string() {
        let json = serde_json::to_string(&Elo::NotAvailable).unwrap();
        assert_eq!(json, "\"N/A\"");
    }

    #[test]
    fn test_elo_from_option() {
        assert_eq!(Elo::from(Some(1500)), Elo::Rating(1500));
        assert_eq!(Elo::from(None), Elo::NotAvailable);
    }

    #[test]
    fn test_summary_field_order_is_stable() {
        let summary = PlayerSummary {
            nickname: "s1mple".to_string(),
            elo: Elo::Rating(3800),
            skill_level: 10,
            average_kd: "1.40".to_string(),
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(
            json,
            r#"{"nickname":"s1mple","elo":3800,"skill_level":10,"average_kd":"1.40"}"#
        );
    }
}
