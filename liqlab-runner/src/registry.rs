//! The declarative indicator registry.
//!
//! One registry replaces a pair of near-duplicate update scripts: every
//! indicator is declared as a store keyword, a display precision, and a
//! serializable compute strategy carrying its fetch specification. Adding an
//! indicator is a registry entry, not a new script.

use serde::{Deserialize, Serialize};

/// One registry entry: which record to update, how precisely, and how to
/// compute the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    /// Case-insensitive substring matched against record names; first match
    /// in store order wins.
    pub keyword: String,

    /// Decimal places kept in the persisted `current` value.
    pub precision: u32,

    #[serde(flatten)]
    pub kind: IndicatorKind,
}

/// Compute strategy plus fetch specification (serializable enum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorKind {
    /// Year-over-year change of one macro series, in percent.
    MacroYoy { series_id: String },

    /// Net liquidity composite (balance sheet − reverse repo − treasury
    /// account): YoY in percent, plus a windowed-change impulse and a
    /// regression beta against a reference ticker in `meta`.
    NetLiquidity {
        balance_sheet: String,
        reverse_repo: String,
        treasury_account: String,
        impulse_days: i64,
        beta_symbol: String,
    },

    /// Windowed market-cap growth averaged across coins, in percent.
    /// Tolerates partial source failure — one coin is enough.
    StablecoinGrowth {
        coins: Vec<String>,
        fetch_days: u32,
        window_days: i64,
    },

    /// An asset's share of total crypto market cap, in percent, taken as-is.
    Dominance { asset: String },

    /// Trailing total of daily ETF net flows, in USD.
    EtfNetFlow { window_days: usize },

    /// Sentiment index value, taken as-is.
    Sentiment,

    /// Z-score of the latest close against a trailing price window.
    PriceZScore { symbol: String, window_days: i64 },
}

/// The default dashboard registry, in the fixed order updates run.
pub fn default_registry() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec {
            keyword: "RRP 逆回購".into(),
            precision: 2,
            kind: IndicatorKind::MacroYoy {
                series_id: "RRPONTSYD".into(),
            },
        },
        IndicatorSpec {
            keyword: "TGA 財政部帳戶".into(),
            precision: 2,
            kind: IndicatorKind::MacroYoy {
                series_id: "WTREGEN".into(),
            },
        },
        IndicatorSpec {
            keyword: "Fed 資產負債表".into(),
            precision: 2,
            kind: IndicatorKind::MacroYoy {
                series_id: "WALCL".into(),
            },
        },
        IndicatorSpec {
            keyword: "Net Liquidity 綜合指標".into(),
            precision: 2,
            kind: IndicatorKind::NetLiquidity {
                balance_sheet: "WALCL".into(),
                reverse_repo: "RRPONTSYD".into(),
                treasury_account: "WTREGEN".into(),
                impulse_days: 90,
                beta_symbol: "BTC-USD".into(),
            },
        },
        IndicatorSpec {
            keyword: "穩定幣供應 90 日成長".into(),
            precision: 2,
            kind: IndicatorKind::StablecoinGrowth {
                coins: vec!["tether".into(), "usd-coin".into()],
                fetch_days: 120,
                window_days: 90,
            },
        },
        IndicatorSpec {
            keyword: "USDT.D 穩定幣市佔率".into(),
            precision: 3,
            kind: IndicatorKind::Dominance {
                asset: "usdt".into(),
            },
        },
        IndicatorSpec {
            keyword: "ETF 5 日淨流量".into(),
            precision: 2,
            kind: IndicatorKind::EtfNetFlow { window_days: 5 },
        },
        IndicatorSpec {
            keyword: "Fear & Greed".into(),
            precision: 0,
            kind: IndicatorKind::Sentiment,
        },
        IndicatorSpec {
            keyword: "BTC 價格 Z-Score".into(),
            precision: 2,
            kind: IndicatorKind::PriceZScore {
                symbol: "BTC-USD".into(),
                window_days: 365,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_every_strategy() {
        let registry = default_registry();
        assert_eq!(registry.len(), 9);

        let has = |f: fn(&IndicatorKind) -> bool| registry.iter().any(|s| f(&s.kind));
        assert!(has(|k| matches!(k, IndicatorKind::MacroYoy { .. })));
        assert!(has(|k| matches!(k, IndicatorKind::NetLiquidity { .. })));
        assert!(has(|k| matches!(k, IndicatorKind::StablecoinGrowth { .. })));
        assert!(has(|k| matches!(k, IndicatorKind::Dominance { .. })));
        assert!(has(|k| matches!(k, IndicatorKind::EtfNetFlow { .. })));
        assert!(has(|k| matches!(k, IndicatorKind::Sentiment)));
        assert!(has(|k| matches!(k, IndicatorKind::PriceZScore { .. })));
    }

    #[test]
    fn spec_json_roundtrip() {
        for spec in default_registry() {
            let json = serde_json::to_string(&spec).unwrap();
            let back: IndicatorSpec = serde_json::from_str(&json).unwrap();
            assert_eq!(back, spec);
        }
    }
}
