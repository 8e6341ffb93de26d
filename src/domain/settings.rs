use chrono::{NaiveTime, TimeDelta};

/// Every time threshold the engine compares against `now`.
///
/// `occupancy_grace` keeps a finished session in the entries table. `recently_finished_window`
/// governs the shorter "recently finished" feed.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// A session with at most this much time left is `CriticalMinutes`.
    pub critical_window: TimeDelta,

    /// A session with at most this much time left is `FinalSeconds`.
    pub final_window: TimeDelta,

    /// How long a timed-up session stays in the active entries view after its exit.
    pub occupancy_grace: TimeDelta,

    /// How long a timed-up session stays in the recently finished feed.
    pub recently_finished_window: TimeDelta,

    /// Past this much time after exit, editing a session needs an admin unlock.
    pub edit_lock_window: TimeDelta,

    /// Planned duration assumed for the fill percentage when a session has none recorded.
    pub default_planned_duration: TimeDelta,

    pub expiry_alert_display: TimeDelta,
    pub booking_reminder_display: TimeDelta,
    pub reminder_lead: TimeDelta,
    pub reminder_tail: TimeDelta,

    /// First bookable slot start of the day.
    pub slot_opening: NaiveTime,
    /// Last bookable slot start of the day.
    pub slot_last_start: NaiveTime,
    pub slot_step: TimeDelta,
    pub slot_length: TimeDelta,
    /// Slots that started at most this long ago are still offered for today.
    pub slot_past_buffer: TimeDelta,

    pub upcoming_booking_horizon: TimeDelta,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            critical_window: TimeDelta::minutes(5),
            final_window: TimeDelta::minutes(1),
            occupancy_grace: TimeDelta::minutes(30),
            recently_finished_window: TimeDelta::minutes(15),
            edit_lock_window: TimeDelta::minutes(30),
            default_planned_duration: TimeDelta::minutes(60),
            expiry_alert_display: TimeDelta::seconds(15),
            booking_reminder_display: TimeDelta::seconds(20),
            reminder_lead: TimeDelta::minutes(15),
            reminder_tail: TimeDelta::minutes(60),
            slot_opening: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
            slot_last_start: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN),
            slot_step: TimeDelta::minutes(30),
            slot_length: TimeDelta::minutes(60),
            slot_past_buffer: TimeDelta::minutes(5),
            upcoming_booking_horizon: TimeDelta::hours(2),
        }
    }
}

impl EngineSettings {
    /// Checks the relations the engine relies on. Returns a description of the first violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.final_window <= TimeDelta::zero() || self.critical_window <= self.final_window {
            return Err(format!(
                "status windows must satisfy 0 < final ({}s) < critical ({}s)",
                self.final_window.num_seconds(),
                self.critical_window.num_seconds()
            ));
        }

        if self.slot_step <= TimeDelta::zero() || self.slot_length <= TimeDelta::zero() {
            return Err("slot step and slot length must be positive".to_string());
        }

        if self.slot_opening > self.slot_last_start {
            return Err(format!("slot opening {} is after the last slot start {}", self.slot_opening, self.slot_last_start));
        }

        if self.default_planned_duration <= TimeDelta::zero() {
            return Err("default planned duration must be positive".to_string());
        }

        let negative = [
            ("occupancy grace", self.occupancy_grace),
            ("recently finished window", self.recently_finished_window),
            ("edit lock window", self.edit_lock_window),
            ("expiry alert display", self.expiry_alert_display),
            ("booking reminder display", self.booking_reminder_display),
            ("reminder lead", self.reminder_lead),
            ("reminder tail", self.reminder_tail),
            ("slot past buffer", self.slot_past_buffer),
            ("upcoming booking horizon", self.upcoming_booking_horizon),
        ]
        .into_iter()
        .find(|(_, value)| *value < TimeDelta::zero());

        if let Some((name, _)) = negative {
            return Err(format!("{} must not be negative", name));
        }

        let too_long = [
            ("critical window", self.critical_window),
            ("default planned duration", self.default_planned_duration),
            ("slot step", self.slot_step),
            ("slot length", self.slot_length),
            ("occupancy grace", self.occupancy_grace),
            ("recently finished window", self.recently_finished_window),
            ("edit lock window", self.edit_lock_window),
            ("expiry alert display", self.expiry_alert_display),
            ("booking reminder display", self.booking_reminder_display),
            ("reminder lead", self.reminder_lead),
            ("reminder tail", self.reminder_tail),
            ("slot past buffer", self.slot_past_buffer),
            ("upcoming booking horizon", self.upcoming_booking_horizon),
        ]
        .into_iter()
        .find(|(_, value)| *value > TimeDelta::days(1));

        if let Some((name, _)) = too_long {
            return Err(format!("{} must not exceed one day", name));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(EngineSettings::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_status_windows() {
        let settings = EngineSettings { critical_window: TimeDelta::seconds(30), ..EngineSettings::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_opening_after_last_start() {
        let settings = EngineSettings { slot_opening: NaiveTime::from_hms_opt(23, 30, 0).unwrap(), ..EngineSettings::default() };
        assert!(settings.validate().unwrap_err().contains("after the last slot start"));
    }

    #[test]
    fn rejects_thresholds_longer_than_a_day() {
        let settings = EngineSettings { slot_step: TimeDelta::days(1) + TimeDelta::minutes(1), ..EngineSettings::default() };
        assert_eq!(settings.validate(), Err("slot step must not exceed one day".to_string()));

        let settings = EngineSettings { reminder_lead: TimeDelta::weeks(52), ..EngineSettings::default() };
        assert_eq!(settings.validate(), Err("reminder lead must not exceed one day".to_string()));

        let settings = EngineSettings { upcoming_booking_horizon: TimeDelta::days(1), ..EngineSettings::default() };
        assert_eq!(settings.validate(), Ok(()));
    }
}
