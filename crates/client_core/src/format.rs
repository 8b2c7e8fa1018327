use chrono::NaiveDate;

/// Shown in place of an absent optional value.
pub const PLACEHOLDER: &str = "-";

const DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Groups thousands with `.` and uses `,` for the fraction, e.g. `3.500.000`
/// or `2.500.000,5`. Rounds to two decimals.
pub fn format_salary(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    match fraction {
        0 => format!("{sign}{grouped}"),
        f if f % 10 == 0 => format!("{sign}{grouped},{}", f / 10),
        f => format!("{sign}{grouped},{f:02}"),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

pub fn text_or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn salary_or_placeholder(value: Option<f64>) -> String {
    value
        .map(format_salary)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn date_or_placeholder(value: Option<NaiveDate>) -> String {
    value
        .map(format_date)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_uses_dot_thousands_separator() {
        assert_eq!(format_salary(3_500_000.0), "3.500.000");
        assert_eq!(format_salary(4_000_000.0), "4.000.000");
        assert_eq!(format_salary(950.0), "950");
        assert_eq!(format_salary(1000.0), "1.000");
        assert_eq!(format_salary(0.0), "0");
    }

    #[test]
    fn salary_keeps_significant_fraction() {
        assert_eq!(format_salary(2_500_000.5), "2.500.000,5");
        assert_eq!(format_salary(1234.56), "1.234,56");
        assert_eq!(format_salary(1234.05), "1.234,05");
    }

    #[test]
    fn dates_render_day_first() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("date");
        assert_eq!(format_date(date), "15/01/2024");
    }

    #[test]
    fn absent_values_render_placeholder() {
        assert_eq!(text_or_placeholder(None), PLACEHOLDER);
        assert_eq!(text_or_placeholder(Some("  ")), PLACEHOLDER);
        assert_eq!(text_or_placeholder(Some("RRHH")), "RRHH");
        assert_eq!(salary_or_placeholder(None), PLACEHOLDER);
        assert_eq!(date_or_placeholder(None), PLACEHOLDER);
    }
}
