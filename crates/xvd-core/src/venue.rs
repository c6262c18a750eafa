//! Venue identifiers.
//!
//! Venues are plain uppercase string ids. They appear as tick keys in the
//! store, as map keys in the merger, and as `min_venue`/`max_venue` columns
//! in event and trade output.

/// Coinbase Exchange (public ticker API).
pub const COINBASE: &str = "COINBASE";

/// Kraken (public ticker API).
pub const KRAKEN: &str = "KRAKEN";

/// Bitstamp (public ticker API).
pub const BITSTAMP: &str = "BITSTAMP";

/// Venues the collector knows how to poll.
pub const SUPPORTED_VENUES: [&str; 3] = [COINBASE, KRAKEN, BITSTAMP];

/// Check whether a venue id (case-insensitive) has a collector.
///
/// The detection and backtest stages accept any venue id that appears in
/// the tick store; this check only gates the polling side.
pub fn is_supported(venue: &str) -> bool {
    SUPPORTED_VENUES
        .iter()
        .any(|v| v.eq_ignore_ascii_case(venue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_venues() {
        assert!(is_supported("COINBASE"));
        assert!(is_supported("kraken"));
        assert!(is_supported("Bitstamp"));
        assert!(!is_supported("BINANCE"));
    }
}
