//! Per-model price list used by the cost ledger.
//!
//! Prices are USD per million tokens. Model names are matched by prefix so
//! dated releases ("gpt-4o-2024-08-06") resolve to their family entry.
//! Unknown models fall back to a deliberately high default so the ledger
//! overstates rather than understates spend.

use super::types::Usage;

/// USD per million input / output tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_mtok: f64,
    pub output_per_mtok: f64,
}

/// Longest-prefix-wins price table. More specific entries first.
const PRICE_TABLE: &[(&str, ModelPricing)] = &[
    (
        "gpt-4o-mini",
        ModelPricing {
            input_per_mtok: 0.15,
            output_per_mtok: 0.60,
        },
    ),
    (
        "gpt-4o",
        ModelPricing {
            input_per_mtok: 2.50,
            output_per_mtok: 10.00,
        },
    ),
    (
        "gpt-4.1-mini",
        ModelPricing {
            input_per_mtok: 0.40,
            output_per_mtok: 1.60,
        },
    ),
    (
        "gpt-4.1",
        ModelPricing {
            input_per_mtok: 2.00,
            output_per_mtok: 8.00,
        },
    ),
    (
        "claude-haiku",
        ModelPricing {
            input_per_mtok: 0.80,
            output_per_mtok: 4.00,
        },
    ),
    (
        "claude-sonnet",
        ModelPricing {
            input_per_mtok: 3.00,
            output_per_mtok: 15.00,
        },
    ),
    (
        "claude-opus",
        ModelPricing {
            input_per_mtok: 15.00,
            output_per_mtok: 75.00,
        },
    ),
];

const DEFAULT_PRICING: ModelPricing = ModelPricing {
    input_per_mtok: 5.00,
    output_per_mtok: 15.00,
};

/// Resolve the price entry for a model name
pub fn pricing_for(model: &str) -> ModelPricing {
    PRICE_TABLE
        .iter()
        .find(|(prefix, _)| model.starts_with(prefix))
        .map(|(_, pricing)| *pricing)
        .unwrap_or(DEFAULT_PRICING)
}

/// Monetary cost of one model call
pub fn cost_usd(model: &str, usage: &Usage) -> f64 {
    let pricing = pricing_for(model);
    usage.input_tokens as f64 * pricing.input_per_mtok / 1_000_000.0
        + usage.output_tokens as f64 * pricing.output_per_mtok / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching() {
        assert_eq!(pricing_for("gpt-4o-mini-2024-07-18").input_per_mtok, 0.15);
        assert_eq!(pricing_for("gpt-4o-2024-08-06").input_per_mtok, 2.50);
        assert_eq!(pricing_for("claude-sonnet-4-20250514").output_per_mtok, 15.00);
    }

    #[test]
    fn test_unknown_model_uses_default() {
        assert_eq!(pricing_for("some-new-model"), DEFAULT_PRICING);
    }

    #[test]
    fn test_cost_usd() {
        let usage = Usage {
            input_tokens: 1_000_000,
            output_tokens: 500_000,
        };
        // gpt-4o-mini: 1M in * 0.15 + 0.5M out * 0.60
        let cost = cost_usd("gpt-4o-mini", &usage);
        assert!((cost - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_zero_usage_is_free() {
        assert_eq!(cost_usd("gpt-4o", &Usage::default()), 0.0);
    }
}
