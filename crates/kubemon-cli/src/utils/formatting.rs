use chrono::{DateTime, Local, Utc};
use console::style;

/// Compact a Go-style duration string such as `1h2m3.5s`.
///
/// Hours and minutes are kept and seconds dropped; a duration under a minute
/// shows rounded seconds. Empty input renders as `-` and anything that does
/// not parse is returned unchanged.
pub fn format_uptime(uptime: &str) -> String {
    let uptime = uptime.trim();
    if uptime.is_empty() {
        return "-".to_string();
    }

    // Sub-second durations
    if ["ns", "us", "µs", "ms"].iter().any(|unit| uptime.ends_with(unit)) {
        return "0s".to_string();
    }

    let mut hours = None;
    let mut minutes = None;
    let mut seconds = None;
    let mut number = String::new();

    for ch in uptime.chars() {
        match ch {
            '0'..='9' | '.' => number.push(ch),
            'h' | 'm' | 's' if !number.is_empty() => {
                let slot = match ch {
                    'h' => &mut hours,
                    'm' => &mut minutes,
                    _ => &mut seconds,
                };
                if slot.is_some() {
                    return uptime.to_string();
                }
                *slot = Some(std::mem::take(&mut number));
            }
            _ => return uptime.to_string(),
        }
    }
    if !number.is_empty() {
        return uptime.to_string();
    }

    let mut parts = Vec::new();
    if let Some(h) = hours {
        parts.push(format!("{}h", h));
    }
    if let Some(m) = minutes {
        parts.push(format!("{}m", m));
    }
    if parts.is_empty() {
        if let Some(secs) = seconds.and_then(|s| s.parse::<f64>().ok()) {
            return format!("{}s", secs.round() as u64);
        }
        return uptime.to_string();
    }
    parts.join(" ")
}

/// Wall-clock time of a change in the local zone
pub fn format_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Full local date and time
pub fn format_datetime(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Format a section header
pub fn format_section(title: &str) -> String {
    format!(
        "\n{}\n{}",
        style(title).bold().underlined(),
        style("─".repeat(title.chars().count())).dim()
    )
}

/// Format a key-value pair for display
pub fn format_key_value(key: &str, value: &str) -> String {
    format!("{}: {}", style(key).bold(), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_keeps_hours_and_minutes() {
        assert_eq!(format_uptime("1h2m3.456s"), "1h 2m");
        assert_eq!(format_uptime("2m30s"), "2m");
        assert_eq!(format_uptime("26h0m0s"), "26h 0m");
    }

    #[test]
    fn test_uptime_rounds_seconds_under_a_minute() {
        assert_eq!(format_uptime("45.6s"), "46s");
        assert_eq!(format_uptime("3.2s"), "3s");
        assert_eq!(format_uptime("750ms"), "0s");
    }

    #[test]
    fn test_uptime_fallbacks() {
        assert_eq!(format_uptime(""), "-");
        assert_eq!(format_uptime("forever"), "forever");
        assert_eq!(format_uptime("12"), "12");
    }
}
