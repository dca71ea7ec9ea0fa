//! Productivity scoring, burnout risk rules and what-if simulation.
//!
//! Everything here is pure and total: any well-typed snapshot yields a
//! result, out-of-range inputs saturate instead of failing.

use crate::routine::{RiskLevel, RoutineSnapshot, SimulationResult};

/// Raw score that maps to 0 on the normalized scale
const RAW_FLOOR: f64 = -20.0;
/// Width of the assumed raw range [-20, 165]
const RAW_SPAN: f64 = 185.0;

/// Linear combination before normalization.
pub fn raw_score(s: &RoutineSnapshot) -> f64 {
    s.study_hours * 10.0 - s.screen_time * 2.0 + s.sleep_hours * 2.0 + s.mood as f64 * 5.0
}

/// Productivity score in [0, 100].
///
/// Rounds half to even before clamping, so 55.5 becomes 56 and 54.5 becomes 54.
pub fn score(s: &RoutineSnapshot) -> u8 {
    let normalized = ((raw_score(s) - RAW_FLOOR) / RAW_SPAN) * 100.0;
    // `as` saturates, and maps NaN to 0
    normalized.round_ties_even().clamp(0.0, 100.0) as u8
}

/// Burnout risk; the first matching rule wins.
pub fn classify(s: &RoutineSnapshot) -> RiskLevel {
    if s.sleep_hours < 6.0 && s.mood < 3 {
        return RiskLevel::High;
    }
    if s.study_hours > 10.0 || s.screen_time > 8.0 {
        return RiskLevel::Medium;
    }
    RiskLevel::Low
}

/// Compare a baseline routine with a hypothetical one.
///
/// Risk is reported for `changes` only.
pub fn simulate(current: &RoutineSnapshot, changes: &RoutineSnapshot) -> SimulationResult {
    let original_score = score(current);
    let new_score = score(changes);
    SimulationResult {
        original_score,
        new_score,
        improvement: i32::from(new_score) - i32::from(original_score),
        new_risk: classify(changes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(sleep: f64, study: f64, screen: f64, mood: i64) -> RoutineSnapshot {
        RoutineSnapshot::new(sleep, study, screen, mood)
    }

    #[test]
    fn test_worked_example() {
        let s = snap(8.0, 5.0, 2.0, 4);
        assert_eq!(raw_score(&s), 82.0);
        assert_eq!(score(&s), 55);
        assert_eq!(classify(&s), RiskLevel::Low);
    }

    #[test]
    fn test_clamps_extremes() {
        assert_eq!(score(&snap(8.0, 1000.0, 0.0, 3)), 100);
        assert_eq!(score(&snap(0.0, 0.0, 1000.0, 1)), 0);
        assert_eq!(score(&snap(-50.0, -50.0, 0.0, -10)), 0);
        assert_eq!(score(&snap(f64::MAX, f64::MAX, 0.0, 5)), 100);
    }

    #[test]
    fn test_range_endpoints() {
        // raw -20 -> 0, raw 165 -> 100
        assert_eq!(score(&snap(0.0, 0.0, 12.5, 1)), 0);
        assert_eq!(score(&snap(10.0, 12.0, 0.0, 5)), 100);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // raw 72.5 -> 50.0
        assert_eq!(score(&snap(0.0, 7.25, 0.0, 0)), 50);
        // raw 83 -> 55.68
        assert_eq!(score(&snap(8.5, 5.0, 2.0, 4)), 56);
        // raw 81 -> 54.59
        assert_eq!(score(&snap(7.5, 5.0, 2.0, 4)), 55);
    }

    #[test]
    fn test_monotonic_in_each_field() {
        let base = snap(6.0, 4.0, 3.0, 3);
        let mut prev = score(&base);
        for i in 1..=12 {
            let s = snap(6.0, 4.0 + i as f64 * 0.5, 3.0, 3);
            let next = score(&s);
            assert!(next >= prev, "study {} dropped score", s.study_hours);
            prev = next;
        }

        let mut prev = score(&base);
        for i in 1..=12 {
            let next = score(&snap(6.0 + i as f64 * 0.5, 4.0, 3.0, 3));
            assert!(next >= prev);
            prev = next;
        }

        let mut prev = score(&snap(6.0, 4.0, 3.0, 1));
        for mood in 2..=5 {
            let next = score(&snap(6.0, 4.0, 3.0, mood));
            assert!(next >= prev);
            prev = next;
        }

        let mut prev = score(&base);
        for i in 1..=12 {
            let next = score(&snap(6.0, 4.0, 3.0 + i as f64, 3));
            assert!(next <= prev);
            prev = next;
        }
    }

    #[test]
    fn test_high_risk_takes_precedence() {
        assert_eq!(classify(&snap(5.0, 11.0, 0.0, 2)), RiskLevel::High);
        assert_eq!(classify(&snap(4.0, 2.0, 3.0, 1)), RiskLevel::High);
    }

    #[test]
    fn test_risk_boundaries() {
        // sleep == 6 is not "< 6"
        assert_eq!(classify(&snap(6.0, 2.0, 2.0, 2)), RiskLevel::Low);
        assert_eq!(classify(&snap(6.0, 11.0, 2.0, 2)), RiskLevel::Medium);
        // mood == 3 is not "< 3"
        assert_eq!(classify(&snap(4.0, 2.0, 2.0, 3)), RiskLevel::Low);
        // study == 10 and screen == 8 are not over the limit
        assert_eq!(classify(&snap(8.0, 10.0, 8.0, 4)), RiskLevel::Low);
        assert_eq!(classify(&snap(8.0, 10.5, 0.0, 4)), RiskLevel::Medium);
        assert_eq!(classify(&snap(8.0, 2.0, 8.5, 4)), RiskLevel::Medium);
    }

    #[test]
    fn test_simulation_example() {
        let current = snap(5.0, 2.0, 6.0, 2);
        let changes = snap(8.0, 4.0, 2.0, 4);
        let result = simulate(&current, &changes);
        assert_eq!(result.original_score, score(&current));
        assert_eq!(result.new_score, score(&changes));
        assert!(result.improvement > 0);
        assert_eq!(
            result.improvement,
            i32::from(result.new_score) - i32::from(result.original_score)
        );
        assert_eq!(result.new_risk, RiskLevel::Low);
    }

    #[test]
    fn test_simulation_negative_improvement() {
        let result = simulate(&snap(8.0, 4.0, 2.0, 4), &snap(4.0, 1.0, 9.0, 1));
        assert!(result.improvement < 0);
        assert_eq!(result.new_risk, RiskLevel::High);
    }

    #[test]
    fn test_risk_ignores_baseline() {
        let result = simulate(&snap(4.0, 2.0, 3.0, 1), &snap(8.0, 11.0, 2.0, 4));
        assert_eq!(result.new_risk, RiskLevel::Medium);
    }
}
