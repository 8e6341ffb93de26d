use chrono::{NaiveTime, Timelike};

/// Renders a time of day on the 12-hour clock, e.g. `9:05 AM`, `12:00 AM`, `11:30 PM`.
pub fn format_12h(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    let suffix = if is_pm { "PM" } else { "AM" };

    format!("{}:{:02} {}", hour, time.minute(), suffix)
}

/// Parses a 12-hour clock string as produced by [`format_12h`]. Returns `None` for anything else.
pub fn parse_12h(value: &str) -> Option<NaiveTime> {
    let (clock, suffix) = value.trim().split_once(' ')?;
    let (hours, minutes) = clock.split_once(':')?;

    let mut hour: u32 = hours.parse().ok()?;
    let minute: u32 = minutes.parse().ok()?;

    if !(1..=12).contains(&hour) {
        return None;
    }

    match suffix.trim() {
        "AM" if hour == 12 => hour = 0,
        "AM" => {}
        "PM" if hour != 12 => hour += 12,
        "PM" => {}
        _ => return None,
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parses the `HH:MM` time-of-day form stored with sessions.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn formats_noon_and_midnight() {
        assert_eq!(format_12h(t(0, 0)), "12:00 AM");
        assert_eq!(format_12h(t(12, 0)), "12:00 PM");
        assert_eq!(format_12h(t(10, 30)), "10:30 AM");
        assert_eq!(format_12h(t(23, 5)), "11:05 PM");
    }

    #[test]
    fn parses_what_it_formats() {
        for time in [t(0, 0), t(10, 0), t(12, 30), t(23, 0)] {
            assert_eq!(parse_12h(&format_12h(time)), Some(time));
        }
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_12h("13:00 PM"), None);
        assert_eq!(parse_12h("10:00"), None);
        assert_eq!(parse_12h("ten AM"), None);
    }

    #[test]
    fn hhmm_round_trip() {
        assert_eq!(parse_hhmm("23:30"), Some(t(23, 30)));
        assert_eq!(format_hhmm(t(1, 0)), "01:00");
        assert_eq!(parse_hhmm("25:00"), None);
    }
}
