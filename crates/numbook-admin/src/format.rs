//! Display formatting for backend values
//!
//! Rows are formatted once, when a response arrives; the table renders
//! the resulting strings verbatim.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Display format for timestamps
pub const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

// Booking expiration as typed in the type-number form.
static EXPIRATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\d{2}\.\d{2}\.\d{2}$").expect("EXPIRATION_REGEX: invalid regex pattern")
});

/// Format a number with `,` thousands separators and at most two decimals.
///
/// ```
/// use numbook_admin::format::format_thousands;
///
/// assert_eq!(format_thousands(1500000.0), "1,500,000");
/// assert_eq!(format_thousands(-1234.5), "-1,234.5");
/// ```
pub fn format_thousands(value: f64) -> String {
	if !value.is_finite() {
		return value.to_string();
	}
	let rounded = format!("{:.2}", value.abs());
	let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

	let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
	for (i, digit) in int_part.chars().enumerate() {
		if i > 0 && (int_part.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(digit);
	}

	let frac = frac_part.trim_end_matches('0');
	let sign = if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
		"-"
	} else {
		""
	};
	if frac.is_empty() {
		format!("{sign}{grouped}")
	} else {
		format!("{sign}{grouped}.{frac}")
	}
}

/// Reformat an ISO-8601 timestamp as `dd/mm/YYYY HH:MM:SS`.
///
/// Offsets are kept as sent (no conversion to local time). Strings that do
/// not parse are returned unchanged.
pub fn format_datetime(raw: &str) -> String {
	let trimmed = raw.trim();
	if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
		return dt.naive_local().format(DATETIME_FORMAT).to_string();
	}
	for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
		if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, pattern) {
			return dt.format(DATETIME_FORMAT).to_string();
		}
	}
	if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
		&& let Some(dt) = date.and_hms_opt(0, 0, 0)
	{
		return dt.format(DATETIME_FORMAT).to_string();
	}
	raw.to_string()
}

/// Like [`format_datetime`], but a missing or empty value renders as `"0"`.
pub fn format_datetime_or_zero(raw: Option<&str>) -> String {
	match raw {
		Some(value) if !value.trim().is_empty() => format_datetime(value),
		_ => "0".to_string(),
	}
}

/// Seconds as `HH.MM.SS`.
///
/// Hours are not capped, so windows of 100 hours or more produce three
/// hour digits and fail [`parse_expiration`] until edited.
pub fn expiration_to_hms(seconds: u64) -> String {
	format!(
		"{:02}.{:02}.{:02}",
		seconds / 3600,
		(seconds % 3600) / 60,
		seconds % 60
	)
}

/// Parse `HH.MM.SS` into seconds. Returns `None` unless the text matches
/// the format exactly.
pub fn parse_expiration(text: &str) -> Option<u64> {
	if !EXPIRATION_REGEX.is_match(text) {
		return None;
	}
	let mut parts = text.split('.').map(|p| p.parse::<u64>());
	let (Some(Ok(h)), Some(Ok(m)), Some(Ok(s))) = (parts.next(), parts.next(), parts.next()) else {
		return None;
	};
	Some(h * 3600 + m * 60 + s)
}

/// Sanitize expiration input while the user types.
///
/// Everything but digits is dropped, at most six digits are kept and dots
/// are re-inserted after the hour and minute pairs: `"0130"` becomes
/// `"01.30"`, `"1a2b3c4d5e6f"` becomes `"12.34.56"`.
pub fn format_expiration_input(raw: &str) -> String {
	let digits: String = raw.chars().filter(char::is_ascii_digit).take(6).collect();
	let mut out = String::with_capacity(8);
	for (i, digit) in digits.chars().enumerate() {
		if i == 2 || i == 4 {
			out.push('.');
		}
		out.push(digit);
	}
	out
}
