use chrono::{NaiveDateTime, TimeDelta};

use crate::domain::session::session::Session;
use crate::domain::settings::EngineSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Active,
    CriticalMinutes,
    FinalSeconds,
    TimeUp,
}

impl SessionStatus {
    /// Whether a session in this state still holds its station.
    pub fn occupies_station(self) -> bool {
        !matches!(self, SessionStatus::TimeUp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub status: SessionStatus,
    /// Time until the exit instant. Negative once the session is over.
    pub remaining: TimeDelta,
    /// `remaining` floored to whole minutes.
    pub remaining_minutes: i64,
    /// Share of the planned duration still left, in `[0, 100]`.
    pub percentage: f64,
    pub display: String,
}

pub fn classify(remaining: TimeDelta, settings: &EngineSettings) -> SessionStatus {
    if remaining <= TimeDelta::zero() {
        SessionStatus::TimeUp
    } else if remaining <= settings.final_window {
        SessionStatus::FinalSeconds
    } else if remaining <= settings.critical_window {
        SessionStatus::CriticalMinutes
    } else {
        SessionStatus::Active
    }
}

fn plural(count: i64) -> &'static str {
    if count > 1 { "s" } else { "" }
}

fn display_for(status: SessionStatus, remaining: TimeDelta) -> String {
    let millis = remaining.num_milliseconds();

    match status {
        SessionStatus::TimeUp => "Time's Up!".to_string(),
        SessionStatus::FinalSeconds => {
            let seconds = (millis + 999) / 1000;
            format!("{} sec left", seconds)
        }
        SessionStatus::CriticalMinutes => {
            let minutes = millis / 60_000;
            format!("{} min{} left", minutes, plural(minutes))
        }
        SessionStatus::Active => {
            let total_minutes = millis / 60_000;
            let hours = total_minutes / 60;
            let minutes = total_minutes % 60;

            if hours > 0 {
                format!("{} hr{} {} min{} left", hours, plural(hours), minutes, plural(minutes))
            } else {
                format!("{} min{} left", minutes, plural(minutes))
            }
        }
    }
}

pub fn evaluate_status(session: &Session, now: NaiveDateTime, settings: &EngineSettings) -> StatusReport {
    let remaining = session.exit_at() - now;
    let status = classify(remaining, settings);

    let percentage = if status == SessionStatus::TimeUp {
        0.0
    } else {
        let planned = session.planned_duration(settings.default_planned_duration);
        let ratio = remaining.num_milliseconds() as f64 / planned.num_milliseconds() as f64;
        ratio.clamp(0.0, 1.0) * 100.0
    };

    StatusReport {
        status,
        remaining,
        remaining_minutes: remaining.num_milliseconds().div_euclid(60_000),
        percentage,
        display: display_for(status, remaining),
    }
}

/// Over, but less than the occupancy grace past its exit.
pub fn within_occupancy_grace(session: &Session, now: NaiveDateTime, settings: &EngineSettings) -> bool {
    let exit = session.exit_at();
    now >= exit && now - exit <= settings.occupancy_grace
}

/// Over, and finished less than the recently finished window ago.
pub fn recently_finished(session: &Session, now: NaiveDateTime, settings: &EngineSettings) -> bool {
    let exit = session.exit_at();
    now >= exit && now - exit < settings.recently_finished_window
}
