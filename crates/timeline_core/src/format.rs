//! Display helpers for card years.

/// Formats a year for display on a card.
///
/// Common-era years print as `"1969 CE"`. Years before the common era
/// switch to grouped digits from 1,000 and to millions or billions for
/// deep time.
pub fn format_year(year: i64) -> String {
    if year >= 0 {
        return format!("{year} CE");
    }

    let abs = year.unsigned_abs();
    match abs {
        0..1_000 => format!("{abs} BCE"),
        1_000..1_000_000 => format!("{} BCE", group_thousands(abs)),
        1_000_000..1_000_000_000 => format!("{:.0} million BCE", abs as f64 / 1e6),
        _ => format!("{:.1} billion BCE", abs as f64 / 1e9),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_era() {
        assert_eq!(format_year(0), "0 CE");
        assert_eq!(format_year(1969), "1969 CE");
    }

    #[test]
    fn test_recent_bce() {
        assert_eq!(format_year(-44), "44 BCE");
        assert_eq!(format_year(-999), "999 BCE");
    }

    #[test]
    fn test_grouped_bce() {
        assert_eq!(format_year(-1_000), "1,000 BCE");
        assert_eq!(format_year(-10_000), "10,000 BCE");
        assert_eq!(format_year(-250_000), "250,000 BCE");
    }

    #[test]
    fn test_deep_time() {
        assert_eq!(format_year(-65_000_000), "65 million BCE");
        assert_eq!(format_year(-4_500_000_000), "4.5 billion BCE");
    }
}
