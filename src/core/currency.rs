use crate::models::School;

/// Approximate USD value of one unit of each currency.
///
/// Fixed display-grade rates, not a live exchange feed.
const USD_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 1.1),
    ("GBP", 1.25),
    ("CHF", 1.13),
    ("CAD", 0.74),
    ("AUD", 0.66),
    ("SGD", 0.74),
    ("HKD", 0.128),
    ("CNY", 0.14),
    ("JPY", 0.0067),
    ("INR", 1.0 / 83.0),
];

/// USD multiplier for a currency code; unknown codes pass through at 1.0
pub fn usd_rate(currency: &str) -> f64 {
    let code = currency.trim();
    USD_RATES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, rate)| *rate)
        .unwrap_or(1.0)
}

/// Whether the code is in the conversion table
pub fn is_known_currency(currency: &str) -> bool {
    let code = currency.trim();
    USD_RATES.iter().any(|(known, _)| known.eq_ignore_ascii_case(code))
}

#[inline]
pub fn to_usd(amount: f64, currency: &str) -> f64 {
    amount * usd_rate(currency)
}

/// Convert a USD amount back into the given currency
#[inline]
pub fn from_usd(amount_usd: f64, currency: &str) -> f64 {
    amount_usd / usd_rate(currency)
}

/// Tuition fee normalized to USD and rounded to cents, `None` when the fee
/// is missing or unreadable
pub fn fee_in_usd(school: &School) -> Option<f64> {
    school
        .fee()
        .map(|fee| round_cents(to_usd(fee, &school.currency)))
        .filter(|usd| usd.is_finite())
}

/// Keeps sub-cent rate drift from moving a fee across a tier boundary
#[inline]
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_rates() {
        assert_eq!(to_usd(100.0, "USD"), 100.0);
        assert!((to_usd(100.0, "GBP") - 125.0).abs() < 1e-9);
        assert!((to_usd(89_000.0, "EUR") - 97_900.0).abs() < 1e-6);
        assert!((to_usd(83.0, "INR") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_code_matching_is_case_insensitive() {
        assert_eq!(usd_rate(" eur "), usd_rate("EUR"));
        assert!(is_known_currency("gbp"));
    }

    #[test]
    fn test_unknown_currency_passes_through() {
        assert!(!is_known_currency("XYZ"));
        assert_eq!(to_usd(4200.0, "XYZ"), 4200.0);
        assert_eq!(to_usd(4200.0, ""), 4200.0);
    }

    #[test]
    fn test_round_trip_through_usd() {
        let eur = from_usd(to_usd(15_000.0, "EUR"), "EUR");
        assert!((eur - 15_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_sub_cent_drift_stays_in_lower_tier() {
        use crate::models::FeeTier;

        let school: School = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "Boundary", "tuitionFee": 50_000.000_000_1, "currency": "USD"
        }))
        .unwrap();

        assert_eq!(fee_in_usd(&school), Some(50_000.0));
        assert_eq!(FeeTier::for_usd(fee_in_usd(&school).unwrap()), FeeTier::Low);
    }

    #[test]
    fn test_conversion_is_monotonic() {
        for (code, _) in USD_RATES {
            let mut previous = f64::MIN;
            for amount in [0.0, 1.0, 999.0, 50_000.0, 50_001.0, 1_000_000.0] {
                let usd = to_usd(amount, code);
                assert!(usd >= previous, "{} not monotonic at {}", code, amount);
                previous = usd;
            }
        }
    }
}
