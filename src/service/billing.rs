//! Charge calculation for completed parking sessions.
//!
//! Policy: minimum charge is one hour, partial hours round up. No
//! discounts, no caps.

/// Compute the charge for a stay of `duration_minutes` at `rate_per_hour`.
pub fn charge(duration_minutes: i64, rate_per_hour: f64) -> f64 {
    let billed_hours = ((duration_minutes + 59) / 60).max(1);
    billed_hours as f64 * rate_per_hour
}

#[cfg(test)]
mod tests {
    use super::charge;

    #[test]
    fn partial_hour_bills_full_hour() {
        assert_eq!(charge(45, 20.0), 20.0);
        assert_eq!(charge(1, 20.0), 20.0);
        assert_eq!(charge(59, 20.0), 20.0);
    }

    #[test]
    fn one_minute_over_rolls_into_next_hour() {
        assert_eq!(charge(61, 20.0), 40.0);
        assert_eq!(charge(120, 20.0), 40.0);
        assert_eq!(charge(121, 10.0), 30.0);
    }

    #[test]
    fn zero_duration_still_bills_minimum_hour() {
        assert_eq!(charge(0, 20.0), 20.0);
        assert_eq!(charge(0, 30.0), 30.0);
    }

    #[test]
    fn exact_hours_bill_exactly() {
        assert_eq!(charge(60, 20.0), 20.0);
        assert_eq!(charge(180, 10.0), 30.0);
    }

    #[test]
    fn matches_ceiling_formula() {
        for d in 0..600 {
            let expected = ((d as f64) / 60.0).ceil().max(1.0) * 20.0;
            assert_eq!(charge(d, 20.0), expected, "duration {}", d);
        }
    }
}
