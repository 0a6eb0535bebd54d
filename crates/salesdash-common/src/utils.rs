//! Number and string formatting shared by the report and the charts.

/// Inserts thousands separators into the integer part of a formatted number.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = formatted
        .split_once('.')
        .map_or((formatted.as_str(), None), |(i, f)| (i, Some(f)));

    let mut out = String::new();
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Formats an amount as dollars with cents, e.g. `$1,234.56`.
pub fn format_currency(value: f64) -> String {
    dollars(format_grouped(value, 2))
}

/// Formats an amount as whole dollars, e.g. `$1,235`.
pub fn format_currency_whole(value: f64) -> String {
    dollars(format_grouped(value, 0))
}

fn dollars(grouped: String) -> String {
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${grouped}"),
    }
}

/// Formats a count with thousands separators, e.g. `12,345`.
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Formats a percentage with one decimal, e.g. `23.4%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
