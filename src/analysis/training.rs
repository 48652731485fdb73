use chrono::{Datelike, IsoWeek, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::{AxisType, ChartSettings, ChartType, DatasetDescription, SeriesValues};
use crate::utils::{bucket_sums, cumulative_sum};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// First day shown on the training graphs.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 5, 1).unwrap_or_default()
}

/// A single training session as recorded by the training log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub user: String,
    pub date: NaiveDate,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_duration: Option<u32>,
}

impl TrainingSession {
    pub fn hours(&self) -> f64 {
        self.moving_duration.unwrap_or(0) as f64 / SECONDS_PER_HOUR
    }
}

/// A named dataset ready to be handed to the chart builder.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingGraph {
    pub name: &'static str,
    pub data: DatasetDescription,
    pub settings: ChartSettings,
}

/// Both training graphs for the sessions within `[start, end]`.
pub fn training_graphs(sessions: &[TrainingSession], start: NaiveDate, end: NaiveDate) -> Vec<TrainingGraph> {
    vec![
        TrainingGraph {
            name: "total_hours_trained",
            data: total_hours_trained(sessions, start, end),
            settings: total_hours_settings(),
        },
        TrainingGraph {
            name: "weekly_hours_trained",
            data: weekly_hours_trained(sessions, start, end),
            settings: weekly_hours_settings(),
        },
    ]
}

/// Cumulative hours per user, one point per day.
pub fn total_hours_trained(sessions: &[TrainingSession], start: NaiveDate, end: NaiveDate) -> DatasetDescription {
    let days = days_between(start, end);
    let x_values: Vec<String> = days
        .iter()
        .map(|day| day.format("%Y-%m-%dT00:00:00").to_string())
        .collect();

    users_in_order(sessions)
        .into_iter()
        .map(|user| {
            let daily = bucket_sums(
                &days,
                sessions
                    .iter()
                    .filter(|s| s.user == user)
                    .map(|s| (s.date, s.hours())),
            );
            debug!("{} days of totals for {}", daily.len(), user);
            (
                capitalize(user),
                SeriesValues {
                    x_values: x_values.clone(),
                    y_values: cumulative_sum(&daily),
                },
            )
        })
        .collect()
}

/// Hours per user for each ISO week touched by `[start, end]`.
///
/// Weeks follow the calendar rather than being sorted by number, so a range
/// crossing New Year yields week labels `52, 1` in that order.
pub fn weekly_hours_trained(sessions: &[TrainingSession], start: NaiveDate, end: NaiveDate) -> DatasetDescription {
    let mut weeks: Vec<IsoWeek> = days_between(start, end).iter().map(|d| d.iso_week()).collect();
    weeks.dedup();
    let x_values: Vec<String> = weeks.iter().map(|w| w.week().to_string()).collect();

    users_in_order(sessions)
        .into_iter()
        .map(|user| {
            let weekly = bucket_sums(
                &weeks,
                sessions
                    .iter()
                    .filter(|s| s.user == user && s.date >= start && s.date <= end)
                    .map(|s| (s.date.iso_week(), s.hours())),
            );
            (
                capitalize(user),
                SeriesValues {
                    x_values: x_values.clone(),
                    y_values: weekly,
                },
            )
        })
        .collect()
}

pub fn total_hours_settings() -> ChartSettings {
    ChartSettings::default()
        .with_y_label("Hours trained")
        .with_title("Total hours trained")
}

pub fn weekly_hours_settings() -> ChartSettings {
    ChartSettings::default()
        .with_y_label("Hours trained")
        .with_title("Weekly hours trained")
        .with_chart_type(ChartType::Bar)
        .with_x_type(AxisType::Category)
        .with_x_label("Week")
}

fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

fn users_in_order(sessions: &[TrainingSession]) -> Vec<&str> {
    let mut users: Vec<&str> = Vec::new();
    for session in sessions {
        if !users.contains(&session.user.as_str()) {
            users.push(&session.user);
        }
    }
    users
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
