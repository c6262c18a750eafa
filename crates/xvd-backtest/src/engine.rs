//! Event replay engine.
//!
//! Replays detected events against the tick history with an execution
//! latency and a uniform round-trip cost. Gross capture is the event's
//! spread itself: the model assumes the full observed spread at event
//! start is captured, independent of execution prices. The entry/exit
//! mids are recorded on each trade for diagnostics only.

use crate::config::BacktestConfig;
use crate::costs::CostModel;
use crate::lookup::PriceIndex;
use tracing::{debug, info, warn};
use xvd_core::{EventInput, Tick, Trade, BPS_SCALE};

/// Replays events against a tick history.
pub struct Backtester {
    index: PriceIndex,
    latency_ms: i64,
    total_cost_bps: f64,
}

impl Backtester {
    /// Build the per-venue price index and cost model.
    ///
    /// `ticks` must be in ascending `ts_ms` order (the store's query
    /// guarantees this).
    pub fn new(ticks: &[Tick], config: &BacktestConfig) -> Self {
        let cost = CostModel::from_components(&config.costs_bps);
        let breakdown = cost.breakdown();
        let index = PriceIndex::from_ticks(ticks);
        info!(
            venues = index.venue_count(),
            ticks = ticks.len(),
            latency_ms = config.latency_ms,
            per_action_bps = breakdown.per_action_bps,
            total_cost_bps = breakdown.total_cost_bps,
            "Backtester ready"
        );
        Self {
            index,
            latency_ms: config.latency_ms,
            total_cost_bps: cost.total_cost_bps(),
        }
    }

    /// Replay all events in input order.
    ///
    /// Output ordering matches input ordering; events whose spread cannot
    /// be resolved are dropped without a placeholder, so the result can be
    /// shorter than the input.
    pub fn run(&self, events: &[EventInput]) -> Vec<Trade> {
        let mut trades = Vec::with_capacity(events.len());
        for event in events {
            match self.replay(event) {
                Some(trade) => trades.push(trade),
                None => warn!(
                    start_ms = event.start_ms,
                    long_venue = %event.min_venue,
                    short_venue = %event.max_venue,
                    "Dropped event: spread unresolvable from carried field or entry mids"
                ),
            }
        }
        info!(
            events = events.len(),
            trades = trades.len(),
            "Backtest complete"
        );
        trades
    }

    /// Replay one event, or `None` if its spread cannot be resolved.
    fn replay(&self, event: &EventInput) -> Option<Trade> {
        let entry_ts = event.start_ms + self.latency_ms;
        let exit_ts = event.end_ms + self.latency_ms;

        // Long leg buys the cheap venue, short leg sells the expensive
        // one; each is resolved independently at entry and exit.
        let long_entry_mid = self.index.nearest_mid(&event.min_venue, entry_ts);
        let short_entry_mid = self.index.nearest_mid(&event.max_venue, entry_ts);
        let long_exit_mid = self.index.nearest_mid(&event.min_venue, exit_ts);
        let short_exit_mid = self.index.nearest_mid(&event.max_venue, exit_ts);

        let spread_bps = event
            .spread_bps
            .filter(|s| s.is_finite())
            .or_else(|| reconstruct_spread(long_entry_mid, short_entry_mid))?;

        // Full-capture model: gross PnL is the spread itself.
        let pnl_bps = spread_bps;
        let pnl_net_bps = pnl_bps - self.total_cost_bps;
        debug!(
            start_ms = event.start_ms,
            spread_bps, pnl_net_bps, "Replayed event"
        );

        Some(Trade {
            start_ms: event.start_ms,
            end_ms: event.end_ms,
            duration_ms: event.end_ms - event.start_ms,
            entry_ts,
            exit_ts,
            long_venue: event.min_venue.clone(),
            short_venue: event.max_venue.clone(),
            long_entry_mid,
            short_entry_mid,
            long_exit_mid,
            short_exit_mid,
            spread_bps,
            pnl_bps,
            total_cost_bps: self.total_cost_bps,
            pnl_net_bps,
        })
    }
}

/// Estimate the spread from entry mids: `(short - long) / avg * 1e4`.
///
/// `None` when either mid is unresolved or their average is non-positive.
fn reconstruct_spread(long_entry: Option<f64>, short_entry: Option<f64>) -> Option<f64> {
    let (long, short) = (long_entry?, short_entry?);
    let avg = (long + short) / 2.0;
    if avg > 0.0 {
        Some((short - long) / avg * BPS_SCALE)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn tick(ts_ms: i64, venue: &str, mid: f64) -> Tick {
        Tick {
            ts_ms,
            venue: venue.to_string(),
            bid: mid - 0.01,
            ask: mid + 0.01,
            mid,
        }
    }

    fn event(start_ms: i64, end_ms: i64, spread_bps: Option<f64>) -> EventInput {
        EventInput {
            start_ms,
            end_ms,
            min_venue: "COINBASE".to_string(),
            max_venue: "KRAKEN".to_string(),
            spread_bps,
        }
    }

    fn costs_24_bps() -> BTreeMap<String, toml::Value> {
        BTreeMap::from([
            ("fee".to_string(), toml::Value::Integer(2)),
            ("half_spread".to_string(), toml::Value::Integer(1)),
            ("slippage".to_string(), toml::Value::Integer(3)),
        ])
    }

    #[test]
    fn test_carried_spread_nets_to_zero_against_equal_cost() {
        let ticks = vec![tick(0, "COINBASE", 100.0), tick(0, "KRAKEN", 100.24)];
        let config = BacktestConfig {
            latency_ms: 0,
            costs_bps: costs_24_bps(),
        };
        let bt = Backtester::new(&ticks, &config);
        let trades = bt.run(&[event(0, 1_000, Some(24.0))]);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].spread_bps, 24.0);
        assert_eq!(trades[0].pnl_bps, 24.0);
        assert_eq!(trades[0].total_cost_bps, 24.0);
        assert_eq!(trades[0].pnl_net_bps, 0.0);
    }

    #[test]
    fn test_spread_reconstructed_from_entry_mids() {
        let ticks = vec![tick(0, "COINBASE", 100.0), tick(0, "KRAKEN", 100.2)];
        let config = BacktestConfig {
            latency_ms: 0,
            costs_bps: BTreeMap::new(),
        };
        let bt = Backtester::new(&ticks, &config);
        let trades = bt.run(&[event(0, 1_000, None)]);
        assert_eq!(trades.len(), 1);
        // (100.2 - 100.0) / 100.1 * 1e4
        assert!((trades[0].spread_bps - 19.980_019_980_02).abs() < 1e-6);
        assert_eq!(trades[0].pnl_bps, trades[0].spread_bps);
        assert_eq!(trades[0].pnl_net_bps, trades[0].pnl_bps);
        assert_eq!(trades[0].long_entry_mid, Some(100.0));
        assert_eq!(trades[0].short_entry_mid, Some(100.2));
    }

    #[test]
    fn test_zero_coverage_event_is_dropped() {
        // Ticks exist, but not for the event's venues.
        let ticks = vec![tick(0, "BITSTAMP", 100.0)];
        let bt = Backtester::new(&ticks, &BacktestConfig::default());
        let events = vec![event(0, 1_000, None)];
        let trades = bt.run(&events);
        assert!(trades.is_empty());
        assert!(trades.len() < events.len());
    }

    #[test]
    fn test_carried_spread_survives_missing_mids() {
        // No tick coverage at all, but the event carries its spread: the
        // trade is still produced, with unresolved diagnostic mids.
        let bt = Backtester::new(&[], &BacktestConfig::default());
        let trades = bt.run(&[event(0, 1_000, Some(12.0))]);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].spread_bps, 12.0);
        assert_eq!(trades[0].long_entry_mid, None);
        assert_eq!(trades[0].short_exit_mid, None);
    }

    #[test]
    fn test_latency_shifts_lookups() {
        let ticks = vec![
            tick(0, "COINBASE", 100.0),
            tick(0, "KRAKEN", 100.5),
            tick(1_000, "COINBASE", 100.1),
            tick(1_000, "KRAKEN", 100.2),
        ];
        let config = BacktestConfig {
            latency_ms: 900,
            costs_bps: BTreeMap::new(),
        };
        let bt = Backtester::new(&ticks, &config);
        let trades = bt.run(&[event(0, 2_000, None)]);
        assert_eq!(trades.len(), 1);
        let t = &trades[0];
        assert_eq!(t.entry_ts, 900);
        assert_eq!(t.exit_ts, 2_900);
        // Entry lookups land on the ts=1000 ticks, not the ts=0 ones.
        assert_eq!(t.long_entry_mid, Some(100.1));
        assert_eq!(t.short_entry_mid, Some(100.2));
    }

    #[test]
    fn test_output_order_matches_input_order() {
        let ticks = vec![
            tick(0, "COINBASE", 100.0),
            tick(0, "KRAKEN", 100.1),
            tick(5_000, "COINBASE", 100.0),
            tick(5_000, "KRAKEN", 100.3),
        ];
        let bt = Backtester::new(&ticks, &BacktestConfig::default());
        let trades = bt.run(&[event(5_000, 6_000, None), event(0, 1_000, None)]);
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].start_ms, 5_000);
        assert_eq!(trades[1].start_ms, 0);
    }

    #[test]
    fn test_dropped_events_leave_no_placeholder() {
        let ticks = vec![tick(0, "COINBASE", 100.0), tick(0, "KRAKEN", 100.1)];
        let bt = Backtester::new(&ticks, &BacktestConfig::default());
        let mut events = vec![event(0, 1_000, None)];
        events.push(EventInput {
            min_venue: "NOWHERE".to_string(),
            max_venue: "NULLVENUE".to_string(),
            ..event(2_000, 3_000, None)
        });
        events.push(event(0, 500, None));
        let trades = bt.run(&events);
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].start_ms, 0);
        assert_eq!(trades[1].end_ms, 500);
    }

    #[test]
    fn test_reconstruct_spread_guard() {
        assert_eq!(reconstruct_spread(None, Some(1.0)), None);
        assert_eq!(reconstruct_spread(Some(1.0), None), None);
        assert_eq!(reconstruct_spread(Some(-2.0), Some(1.0)), None);
        let bps = reconstruct_spread(Some(100.0), Some(100.24)).unwrap();
        assert!((bps - 23.971_234_518_58).abs() < 1e-6);
    }
}
