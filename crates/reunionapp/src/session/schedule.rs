//! Event schedule.

use super::ViewSession;
use crate::model::schedule::{is_upcoming, ScheduleEvent};
use crate::model::Stored;
use crate::store::DataStore;
use chrono::NaiveDate;

pub type ScheduleSession<'s, S> = ViewSession<'s, S, ScheduleEvent>;

impl<'s, S: DataStore> ViewSession<'s, S, ScheduleEvent> {
    /// Events within `window_days` from `today`, in schedule order.
    pub fn upcoming(&self, today: NaiveDate, window_days: i64) -> Vec<&Stored<ScheduleEvent>> {
        self.items
            .iter()
            .filter(|e| is_upcoming(e.record.date, today, window_days))
            .collect()
    }
}
