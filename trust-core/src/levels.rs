//! Trust level derivation
//!
//! The trust level is a pure step function of accumulated points. It is
//! recomputed on every ledger mutation and never stored independently of
//! the point total.

/// Level thresholds: minimum points required for each level, ascending.
pub const LEVEL_THRESHOLDS: [(u8, i64); 5] = [(1, 0), (2, 100), (3, 500), (4, 1000), (5, 2500)];

/// Derive the trust level for a point total. Total and deterministic;
/// negative inputs map to level 1 (balances are clamped at zero upstream).
pub fn level_from_points(points: i64) -> u8 {
    let mut level = 1;
    for (candidate, min_points) in LEVEL_THRESHOLDS {
        if points >= min_points {
            level = candidate;
        }
    }
    level
}

/// Minimum points required for a level. Out-of-range levels clamp to the
/// nearest defined tier.
pub fn level_min_points(level: u8) -> i64 {
    match level {
        0 | 1 => 0,
        2 => 100,
        3 => 500,
        4 => 1000,
        _ => 2500,
    }
}

/// Display title for a trust level
pub fn level_title(level: u8) -> &'static str {
    match level {
        5 => "Oracle",
        4 => "Expert",
        3 => "Trusted",
        2 => "Apprentice",
        _ => "Newcomer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(level_from_points(0), 1);
        assert_eq!(level_from_points(99), 1);
        assert_eq!(level_from_points(100), 2);
        assert_eq!(level_from_points(499), 2);
        assert_eq!(level_from_points(500), 3);
        assert_eq!(level_from_points(999), 3);
        assert_eq!(level_from_points(1000), 4);
        assert_eq!(level_from_points(2499), 4);
        assert_eq!(level_from_points(2500), 5);
        assert_eq!(level_from_points(1_000_000), 5);
    }

    #[test]
    fn test_negative_points_map_to_level_one() {
        assert_eq!(level_from_points(-50), 1);
    }

    #[test]
    fn test_level_is_monotonic() {
        let mut prev = 0;
        for points in 0..3000 {
            let level = level_from_points(points);
            assert!(level >= prev);
            prev = level;
        }
    }

    #[test]
    fn test_min_points_agrees_with_derivation() {
        for level in 1..=5u8 {
            assert_eq!(level_from_points(level_min_points(level)), level);
        }
    }

    #[test]
    fn test_titles() {
        assert_eq!(level_title(1), "Newcomer");
        assert_eq!(level_title(5), "Oracle");
        assert_eq!(level_title(0), "Newcomer");
    }
}
