//! Backquoted deadline durations such as `` `1000 milliseconds` ``.

/// Milliseconds per unit, keyed by singular and plural spellings.
const UNITS: [(&[&str], i64); 6] = [
    (&["ms", "millisecond", "milliseconds"], 1),
    (&["s", "second", "seconds"], 1_000),
    (&["minute", "minutes"], 60_000),
    (&["hour", "hours"], 3_600_000),
    (&["day", "days"], 86_400_000),
    (&["week", "weeks"], 604_800_000),
];

/// Parse `"<amount> <unit>"` into milliseconds.
///
/// ```
/// assert_eq!(normboard_parser::parse_duration("2 seconds"), Ok(2_000));
/// assert!(normboard_parser::parse_duration("soon").is_err());
/// ```
pub fn parse_duration(text: &str) -> Result<i64, String> {
    let mut parts = text.split_whitespace();
    let amount = parts
        .next()
        .ok_or_else(|| "empty duration".to_string())?
        .parse::<i64>()
        .map_err(|_| format!("invalid duration amount in `{text}`"))?;
    if amount < 0 {
        return Err(format!("negative duration `{text}`"));
    }
    let unit = parts.next().unwrap_or("milliseconds");
    if parts.next().is_some() {
        return Err(format!("unexpected trailing text in duration `{text}`"));
    }
    let per_unit = UNITS
        .iter()
        .find(|(names, _)| names.contains(&unit))
        .map(|(_, ms)| *ms)
        .ok_or_else(|| format!("unknown duration unit `{unit}`"))?;
    amount
        .checked_mul(per_unit)
        .ok_or_else(|| format!("duration `{text}` overflows"))
}
