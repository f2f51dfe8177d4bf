/// Render an amount in minor units (cents) as a major-unit string with
/// exactly two fractional digits, e.g. `190` → `"1.90"`.
///
/// Amounts produced by the calculator are never negative; a negative input
/// is still rendered with a leading `-` rather than panicking.
#[must_use]
pub fn format_euro(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
