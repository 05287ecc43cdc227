pub mod logs;

pub use logs::*;

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Whole rupees, rounded half away from zero.
pub fn rupees(value: f64) -> i64 {
    value.round() as i64
}

/// Formats an amount with Indian digit grouping, e.g. `₹1,00,000`.
pub fn format_rupees(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };
    if digits.len() <= 3 {
        return format!("{sign}₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();

    format!("{sign}₹{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(4.2 * 25.0, 1), 105.0);
        assert_eq!(round_to(3.80099, 2), 3.8);
    }

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(900), "₹900");
        assert_eq!(format_rupees(45_000), "₹45,000");
        assert_eq!(format_rupees(100_000), "₹1,00,000");
        assert_eq!(format_rupees(12_345_678), "₹1,23,45,678");
        assert_eq!(format_rupees(-40_000), "-₹40,000");
    }
}
