//! Coordinate list parsing with axis order detection
//!
//! Coordinate lists arrive as flattened, whitespace-separated numbers where
//! each adjacent pair is one point. The feed does not reliably state whether
//! a pair is latitude-first or longitude-first, so each pair is tested against
//! a geographic envelope in both orientations.

use crate::app::models::{Coordinate, Ring};
use crate::config::GeoEnvelope;
use tracing::debug;

/// Result of parsing one coordinate list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCoordinates {
    /// Accepted points, latitude first, in source order
    pub coordinates: Ring,

    /// Number of complete pairs examined
    pub pairs_seen: usize,

    /// Pairs accepted only in swapped (longitude, latitude) order
    pub swapped: usize,

    /// Pairs skipped because a token was not a number
    pub invalid_tokens: usize,

    /// Pairs outside the envelope in both orientations
    pub out_of_envelope: usize,
}

impl ParsedCoordinates {
    /// Pairs that did not make it into the output
    pub fn discarded(&self) -> usize {
        self.invalid_tokens + self.out_of_envelope
    }
}

/// Orientation decided for a single pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOrientation {
    /// First value is latitude
    AsIs,
    /// First value is longitude
    Swapped,
}

/// Decide how a pair `(a, b)` should be read, if at all
///
/// The as-is reading wins whenever it is valid, so pairs that fit the
/// envelope both ways are never swapped.
pub fn detect_orientation(a: f64, b: f64, envelope: &GeoEnvelope) -> Option<PairOrientation> {
    if envelope.contains(a, b) {
        Some(PairOrientation::AsIs)
    } else if envelope.contains(b, a) {
        Some(PairOrientation::Swapped)
    } else {
        None
    }
}

/// Parse a flattened coordinate list into latitude-first points
///
/// Never fails: empty input yields an empty ring, unparseable or
/// out-of-envelope pairs are counted and skipped, and a trailing unpaired
/// token is ignored.
pub fn parse_coordinates(pos_list: &str, envelope: &GeoEnvelope) -> ParsedCoordinates {
    let tokens: Vec<&str> = pos_list.split_whitespace().collect();
    let mut parsed = ParsedCoordinates::default();

    for pair in tokens.chunks_exact(2) {
        parsed.pairs_seen += 1;

        let (a, b) = match (pair[0].parse::<f64>(), pair[1].parse::<f64>()) {
            (Ok(a), Ok(b)) => (a, b),
            _ => {
                debug!("Skipping non-numeric coordinate pair: [{}, {}]", pair[0], pair[1]);
                parsed.invalid_tokens += 1;
                continue;
            }
        };

        match detect_orientation(a, b, envelope) {
            Some(PairOrientation::AsIs) => parsed.coordinates.push(Coordinate::new(a, b)),
            Some(PairOrientation::Swapped) => {
                parsed.swapped += 1;
                parsed.coordinates.push(Coordinate::new(b, a));
            }
            None => {
                debug!("Coordinate pair outside envelope in both orientations: [{}, {}]", a, b);
                parsed.out_of_envelope += 1;
            }
        }
    }

    if tokens.len() % 2 == 1 {
        debug!("Ignoring trailing unpaired coordinate token: {}", tokens[tokens.len() - 1]);
    }

    debug!(
        "Parsed {} of {} coordinate pairs ({} swapped)",
        parsed.coordinates.len(),
        parsed.pairs_seen,
        parsed.swapped
    );

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope() -> GeoEnvelope {
        GeoEnvelope::default()
    }

    #[test]
    fn test_latitude_first_pairs() {
        let parsed = parse_coordinates("51.9 4.4 52.1 5.1", &envelope());

        assert_eq!(
            parsed.coordinates,
            vec![Coordinate::new(51.9, 4.4), Coordinate::new(52.1, 5.1)]
        );
        assert_eq!(parsed.pairs_seen, 2);
        assert_eq!(parsed.swapped, 0);
        assert_eq!(parsed.discarded(), 0);
    }

    #[test]
    fn test_swapped_pair_is_corrected() {
        let parsed = parse_coordinates("4.4 51.9", &envelope());

        assert_eq!(parsed.coordinates, vec![Coordinate::new(51.9, 4.4)]);
        assert_eq!(parsed.swapped, 1);
    }

    #[test]
    fn test_out_of_envelope_pair_does_not_affect_others() {
        let parsed = parse_coordinates("999 999 51.9 4.4", &envelope());

        assert_eq!(parsed.coordinates, vec![Coordinate::new(51.9, 4.4)]);
        assert_eq!(parsed.out_of_envelope, 1);
    }

    #[test]
    fn test_non_numeric_token_skips_pair() {
        let parsed = parse_coordinates("51.9 abc 52.0 4.5 x 4.6", &envelope());

        assert_eq!(parsed.coordinates, vec![Coordinate::new(52.0, 4.5)]);
        assert_eq!(parsed.invalid_tokens, 2);
        assert_eq!(parsed.pairs_seen, 3);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parse_coordinates("", &envelope()).coordinates.is_empty());
        assert!(parse_coordinates("  \n\t ", &envelope()).coordinates.is_empty());
    }

    #[test]
    fn test_odd_token_count_ignores_trailing_token() {
        let parsed = parse_coordinates("51.9 4.4 52.0", &envelope());

        assert_eq!(parsed.coordinates, vec![Coordinate::new(51.9, 4.4)]);
        assert_eq!(parsed.pairs_seen, 1);
    }

    #[test]
    fn test_mixed_whitespace_and_orientation() {
        let parsed = parse_coordinates("51.9\t4.4\n4.5  52.0\r\n52.1 4.6", &envelope());

        assert_eq!(
            parsed.coordinates,
            vec![
                Coordinate::new(51.9, 4.4),
                Coordinate::new(52.0, 4.5),
                Coordinate::new(52.1, 4.6),
            ]
        );
        assert_eq!(parsed.swapped, 1);
    }

    #[test]
    fn test_every_in_envelope_pair_is_kept() {
        // Pairs that fit in at least one orientation all survive
        let input = (0..50)
            .map(|i| {
                let lat = 50.5 + (i as f64) * 0.06;
                let lon = 3.2 + (i as f64) * 0.08;
                if i % 2 == 0 {
                    format!("{} {}", lat, lon)
                } else {
                    format!("{} {}", lon, lat)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        let parsed = parse_coordinates(&input, &envelope());

        assert_eq!(parsed.coordinates.len(), 50);
        assert!(
            parsed
                .coordinates
                .iter()
                .all(|c| envelope().contains(c.latitude, c.longitude))
        );
    }

    #[test]
    fn test_detect_orientation_prefers_as_is() {
        let wide = GeoEnvelope {
            min_latitude: 0.0,
            max_latitude: 60.0,
            min_longitude: 0.0,
            max_longitude: 60.0,
        };

        assert_eq!(detect_orientation(10.0, 20.0, &wide), Some(PairOrientation::AsIs));
        assert_eq!(detect_orientation(4.4, 51.9, &envelope()), Some(PairOrientation::Swapped));
        assert_eq!(detect_orientation(0.0, 0.0, &envelope()), None);
    }

    #[test]
    fn test_nan_pair_is_discarded() {
        let parsed = parse_coordinates("NaN 4.4 51.9 4.4", &envelope());

        assert_eq!(parsed.coordinates, vec![Coordinate::new(51.9, 4.4)]);
        assert_eq!(parsed.out_of_envelope, 1);
    }
}
