//! Human-readable distances and durations, in the style mapping services
//! use for leg summaries.

pub fn format_distance(meters: u64) -> String {
    if meters < 1000 {
        format!("{meters} m")
    } else {
        format!("{:.1} km", meters as f64 / 1000.0)
    }
}

pub fn format_duration(seconds: u64) -> String {
    let minutes = (seconds + 30) / 60;
    let (hours, minutes) = (minutes / 60, minutes % 60);
    match (hours, minutes) {
        (0, 0 | 1) => "1 min".to_string(),
        (0, m) => format!("{m} mins"),
        (h, 0) => format!("{h} {}", plural(h, "hour")),
        (h, m) => format!("{h} {} {m} {}", plural(h, "hour"), plural(m, "min")),
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_switches_to_km() {
        assert_eq!(format_distance(850), "850 m");
        assert_eq!(format_distance(3420), "3.4 km");
    }

    #[test]
    fn duration_rounds_to_minutes() {
        assert_eq!(format_duration(10), "1 min");
        assert_eq!(format_duration(12 * 60 + 20), "12 mins");
        assert_eq!(format_duration(3600), "1 hour");
        assert_eq!(format_duration(2 * 3600 + 60), "2 hours 1 min");
    }
}
