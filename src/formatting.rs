const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

// Rupee amounts abbreviate with the K/L/Cr suffixes the dashboard cards
// use; values below a thousand (and negatives) render as plain integers.
pub fn format_currency(value: f64) -> String {
    if value >= CRORE {
        format!("Rs {:.1}Cr", value / CRORE)
    } else if value >= LAKH {
        format!("Rs {:.1}L", value / LAKH)
    } else if value >= THOUSAND {
        format!("Rs {:.1}K", value / THOUSAND)
    } else {
        format!("Rs {value:.0}")
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::{format_currency, format_percent};

    #[test]
    fn abbreviates_at_the_thousand_lakh_crore_thresholds() {
        assert_eq!(format_currency(999.0), "Rs 999");
        assert_eq!(format_currency(1_000.0), "Rs 1.0K");
        assert_eq!(format_currency(45_500.0), "Rs 45.5K");
        assert_eq!(format_currency(100_000.0), "Rs 1.0L");
        assert_eq!(format_currency(2_350_000.0), "Rs 23.5L");
        assert_eq!(format_currency(10_000_000.0), "Rs 1.0Cr");
    }

    #[test]
    fn small_and_negative_amounts_stay_unabbreviated() {
        assert_eq!(format_currency(0.0), "Rs 0");
        assert_eq!(format_currency(-5_000.0), "Rs -5000");
    }

    #[test]
    fn percent_keeps_one_decimal_place() {
        assert_eq!(format_percent(31.25), "31.2%");
        assert_eq!(format_percent(0.0), "0.0%");
    }
}
