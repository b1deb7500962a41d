//! ISO-8601 duration handling for recipe timing fields.

/// Convert an ISO-8601 duration (`PT1H30M`, `PT90M`, `PT5400S`,
/// `P0DT1H`) to whole minutes. Returns `None` for input without a
/// recognizable time component.
pub(crate) fn iso8601_minutes(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let rest = raw.strip_prefix(['P', 'p'])?;
    // A date portion may precede the time designator; timing fields
    // without a time component carry no minutes.
    let time = match rest.split_once(['T', 't']) {
        Some((_, time)) => time,
        None => return None,
    };

    let mut minutes = 0f64;
    let mut seen_component = false;
    let mut digits = String::new();
    for c in time.chars() {
        if c.is_ascii_digit() || c == '.' {
            digits.push(c);
            continue;
        }
        let value: f64 = digits.parse().ok()?;
        digits.clear();
        match c.to_ascii_uppercase() {
            'H' => minutes += value * 60.0,
            'M' => minutes += value,
            'S' => minutes += value / 60.0,
            _ => return None,
        }
        seen_component = true;
    }

    if !seen_component || !digits.is_empty() {
        return None;
    }
    Some(minutes.round() as u64)
}
