// templates/format.rs
use chrono::NaiveDateTime;

/// "March 7, 2023"
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// "$277,800.00". Returns None when the upstream value isn't a number.
pub fn format_currency(raw: &str) -> Option<String> {
    let amount: f64 = raw.trim().parse().ok()?;
    if !amount.is_finite() {
        return None;
    }

    // `as u64` saturates; anything past this would print a wrong figure
    let cents = (amount.abs() * 100.0).round();
    if cents >= u64::MAX as f64 {
        return None;
    }
    let cents = cents as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    Some(format!("{sign}${grouped}.{:02}", cents % 100))
}
