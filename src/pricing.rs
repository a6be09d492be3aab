//! # Pricing Module
//!
//! Model-tier classification and per-token pricing for cost calculations.
//!
//! ## Pricing Structure
//!
//! Each tier has pricing for:
//! - Input tokens
//! - Output tokens
//! - Cache creation (1.25x input price)
//! - Cache reads (0.1x input price)
//!
//! Rates are compiled in and never fetched; the table is bumped together with
//! the display labels when a new model generation ships.

use crate::models::TokenTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Opus,
    Sonnet,
    Haiku,
}

impl ModelTier {
    /// Case-insensitive family match. `opus` outranks `haiku`, which outranks
    /// `sonnet`; `None` for anything else.
    pub fn classify(model_id: &str) -> Option<Self> {
        let m = model_id.to_lowercase();
        if m.contains("opus") {
            Some(Self::Opus)
        } else if m.contains("haiku") {
            Some(Self::Haiku)
        } else if m.contains("sonnet") {
            Some(Self::Sonnet)
        } else {
            None
        }
    }

    /// Tier used for billing; unrecognized models are priced as Sonnet.
    pub fn for_billing(model_id: &str) -> Self {
        Self::classify(model_id).unwrap_or(Self::Sonnet)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Opus => "Opus 4.5",
            Self::Sonnet => "Sonnet 4.5",
            Self::Haiku => "Haiku 4.5",
        }
    }

    pub fn pricing(&self) -> Pricing {
        match self {
            Self::Opus => OPUS_PRICING,
            Self::Sonnet => SONNET_PRICING,
            Self::Haiku => HAIKU_PRICING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub in_per_tok: f64,
    pub out_per_tok: f64,
    pub cache_create_per_tok: f64,
    pub cache_read_per_tok: f64,
}

// $5 / $25 per 1M
pub const OPUS_PRICING: Pricing = Pricing {
    in_per_tok: 0.000005,
    out_per_tok: 0.000025,
    cache_create_per_tok: 0.00000625,
    cache_read_per_tok: 0.0000005,
};

// $3 / $15 per 1M
pub const SONNET_PRICING: Pricing = Pricing {
    in_per_tok: 0.000003,
    out_per_tok: 0.000015,
    cache_create_per_tok: 0.00000375,
    cache_read_per_tok: 0.0000003,
};

// $1 / $5 per 1M
pub const HAIKU_PRICING: Pricing = Pricing {
    in_per_tok: 0.000001,
    out_per_tok: 0.000005,
    cache_create_per_tok: 0.00000125,
    cache_read_per_tok: 0.0000001,
};

pub const MYSTERY_MODEL_LABEL: &str = "Mystery Model";

pub fn pricing_for_model(model_id: &str) -> Pricing {
    ModelTier::for_billing(model_id).pricing()
}

/// Friendly name for notifications.
pub fn model_label(model_id: &str) -> &'static str {
    ModelTier::classify(model_id)
        .map(|t| t.label())
        .unwrap_or(MYSTERY_MODEL_LABEL)
}

impl Pricing {
    pub fn cost(&self, totals: &TokenTotals) -> f64 {
        totals.input as f64 * self.in_per_tok
            + totals.output as f64 * self.out_per_tok
            + totals.cache_write as f64 * self.cache_create_per_tok
            + totals.cache_read as f64 * self.cache_read_per_tok
    }
}
