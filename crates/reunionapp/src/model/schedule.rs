//! Yearly event schedule.

use super::{Annotated, Collection, Record};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default look-ahead for flagging events as upcoming.
pub const UPCOMING_WINDOW_DAYS: i64 = 14;

const WEEKDAYS_JA: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_highlight: bool,
    #[serde(default)]
    pub order: i64,
}

impl Record for ScheduleEvent {
    const COLLECTION: Collection = Collection::Schedule;

    fn order(&self) -> Option<i64> {
        Some(self.order)
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl Annotated for ScheduleEvent {
    fn notes(&self) -> &str {
        &self.notes
    }

    fn set_notes(&mut self, notes: String) {
        self.notes = notes;
    }
}

/// `M/D（曜）`, e.g. `4/29（水）`.
pub fn format_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS_JA[date.weekday().num_days_from_sunday() as usize];
    format!("{}/{}（{}）", date.month(), date.day(), weekday)
}

/// True when `date` falls between `today` and `today + window_days`, inclusive.
pub fn is_upcoming(date: NaiveDate, today: NaiveDate, window_days: i64) -> bool {
    let days = (date - today).num_days();
    (0..=window_days).contains(&days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn formats_month_day_and_weekday() {
        // 2026-04-29 is a Wednesday.
        assert_eq!(format_date(d(2026, 4, 29)), "4/29（水）");
        // 2026-01-04 is a Sunday.
        assert_eq!(format_date(d(2026, 1, 4)), "1/4（日）");
    }

    #[test]
    fn upcoming_window_is_inclusive() {
        let today = d(2026, 5, 1);
        assert!(is_upcoming(today, today, UPCOMING_WINDOW_DAYS));
        assert!(is_upcoming(d(2026, 5, 15), today, UPCOMING_WINDOW_DAYS));
        assert!(!is_upcoming(d(2026, 5, 16), today, UPCOMING_WINDOW_DAYS));
        assert!(!is_upcoming(d(2026, 4, 30), today, UPCOMING_WINDOW_DAYS));
    }

    #[test]
    fn details_are_omitted_when_empty() {
        let event = ScheduleEvent {
            date: d(2026, 6, 7),
            title: "General meeting".into(),
            description: String::new(),
            location: None,
            details: Vec::new(),
            notes: String::new(),
            is_highlight: true,
            order: 1,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("details").is_none());
        assert_eq!(value["isHighlight"], serde_json::json!(true));
        assert_eq!(value["date"], serde_json::json!("2026-06-07"));
    }
}
