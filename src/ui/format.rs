/// Display formatting for cards
use chrono::NaiveDate;

/// `dd/mm/yyyy`, or `-` when there is no date
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}

/// Dollar amount with thousands separators and two decimals, e.g. `$1,234.50`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(format_date(date), "01/05/2024");
        assert_eq!(format_date(None), "-");
    }

    #[rstest]
    #[case(0.0, "$0.00")]
    #[case(30.0, "$30.00")]
    #[case(12.5, "$12.50")]
    #[case(999.99, "$999.99")]
    #[case(1234.5, "$1,234.50")]
    #[case(1234567.891, "$1,234,567.89")]
    #[case(-10.0, "-$10.00")]
    #[case(-0.001, "$0.00")]
    fn test_format_currency(#[case] amount: f64, #[case] expected: &str) {
        assert_eq!(format_currency(amount), expected);
    }
}
