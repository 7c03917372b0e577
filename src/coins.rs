//! Selectable coin designs
//!
//! Only identity lives here; faces and colors belong to the page.

use serde::Serialize;

/// A coin the player can toss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoinDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub country: &'static str,
}

impl CoinDefinition {
    /// Label for the coin picker, e.g. "Euro (EU)"
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.country)
    }
}

pub static COINS: [CoinDefinition; 6] = [
    CoinDefinition {
        id: "usd",
        name: "US Dollar",
        country: "USA",
    },
    CoinDefinition {
        id: "cny",
        name: "Yuan (RMB)",
        country: "China",
    },
    CoinDefinition {
        id: "eur",
        name: "Euro",
        country: "EU",
    },
    CoinDefinition {
        id: "btc",
        name: "Bitcoin",
        country: "Crypto",
    },
    CoinDefinition {
        id: "jpn",
        name: "Yen",
        country: "Japan",
    },
    CoinDefinition {
        id: "ancient",
        name: "Ancient",
        country: "Empire",
    },
];

/// Coin shown before the player picks one
pub fn default_coin() -> &'static CoinDefinition {
    &COINS[0]
}

/// Exact lookup by id
pub fn find(id: &str) -> Option<&'static CoinDefinition> {
    COINS.iter().find(|c| c.id == id)
}

/// Lookup by id, falling back to the default coin
pub fn find_or_default(id: &str) -> &'static CoinDefinition {
    find(id).unwrap_or_else(default_coin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in COINS.iter().enumerate() {
            for b in &COINS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(find("btc").map(|c| c.name), Some("Bitcoin"));
        assert!(find("doge").is_none());
        assert_eq!(find_or_default("doge").id, "usd");
        assert_eq!(find_or_default("cny").display_name(), "Yuan (RMB) (China)");
    }
}
