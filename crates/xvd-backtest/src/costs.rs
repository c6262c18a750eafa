//! Round-trip transaction cost model.
//!
//! Costs are configured per action: each named component (fee, half
//! spread, slippage, anything else) is paid once per leg per action. A
//! round trip is two legs entered and exited, so the total is four times
//! the per-action sum.

use std::collections::BTreeMap;
use tracing::warn;

/// Actions per round trip: 2 legs (long + short) x (enter + exit).
pub const ROUND_TRIP_ACTIONS: f64 = 4.0;

/// Cost model breakdown, for logging and inspection.
///
/// Records every component that went into the total so a trade's
/// `total_cost_bps` can be traced back to configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    /// Resolved per-component values (malformed entries appear as zero).
    pub components: BTreeMap<String, f64>,
    /// Sum of all components, paid once per action.
    pub per_action_bps: f64,
    /// The round-trip multiplier applied.
    pub round_trip_actions: f64,
    /// `round_trip_actions * per_action_bps`.
    pub total_cost_bps: f64,
}

/// Per-round-trip cost in basis points, derived from configuration.
#[derive(Debug, Clone)]
pub struct CostModel {
    components: BTreeMap<String, f64>,
    per_action_bps: f64,
}

impl CostModel {
    /// Build the model from configured components.
    ///
    /// Integers and floats are taken as-is; numeric strings are parsed.
    /// Anything else, and non-finite numbers, contributes zero with a
    /// warning. Malformed costs degrade toward frictionless, they never
    /// fail the run.
    pub fn from_components(costs_bps: &BTreeMap<String, toml::Value>) -> Self {
        let mut components = BTreeMap::new();
        for (name, value) in costs_bps {
            let bps = match value {
                toml::Value::Float(f) => Some(*f),
                toml::Value::Integer(i) => Some(*i as f64),
                toml::Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            let bps = match bps {
                Some(b) if b.is_finite() => b,
                _ => {
                    warn!(
                        component = %name,
                        value = %value,
                        "Non-numeric cost component, treating as zero"
                    );
                    0.0
                }
            };
            components.insert(name.clone(), bps);
        }
        let per_action_bps = components.values().sum();
        Self {
            components,
            per_action_bps,
        }
    }

    /// An explicitly frictionless model (no components configured).
    pub fn frictionless() -> Self {
        Self {
            components: BTreeMap::new(),
            per_action_bps: 0.0,
        }
    }

    /// Sum of all components, paid once per action.
    pub fn per_action_bps(&self) -> f64 {
        self.per_action_bps
    }

    /// Total round-trip cost applied uniformly to every trade.
    pub fn total_cost_bps(&self) -> f64 {
        ROUND_TRIP_ACTIONS * self.per_action_bps
    }

    /// Full breakdown for logging.
    pub fn breakdown(&self) -> CostBreakdown {
        CostBreakdown {
            components: self.components.clone(),
            per_action_bps: self.per_action_bps,
            round_trip_actions: ROUND_TRIP_ACTIONS,
            total_cost_bps: self.total_cost_bps(),
        }
    }
}
