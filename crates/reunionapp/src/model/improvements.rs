//! Organizational improvement checklist.

use super::{Annotated, Collection, Record, Stored};
use crate::error::{ReunionError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImprovementStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl ImprovementStatus {
    pub const ALL: [ImprovementStatus; 3] = [
        ImprovementStatus::Pending,
        ImprovementStatus::InProgress,
        ImprovementStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImprovementStatus::Pending => "pending",
            ImprovementStatus::InProgress => "in-progress",
            ImprovementStatus::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImprovementStatus::Pending => "未着手",
            ImprovementStatus::InProgress => "進行中",
            ImprovementStatus::Done => "完了",
        }
    }
}

impl fmt::Display for ImprovementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImprovementStatus {
    type Err = ReunionError;

    fn from_str(s: &str) -> Result<Self> {
        ImprovementStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ReunionError::Validation(format!(
                    "Unknown improvement status '{}' (expected one of: pending, in-progress, done)",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, most urgent first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "高",
            Priority::Medium => "中",
            Priority::Low => "低",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: ImprovementStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub order: i64,
}

impl Record for Improvement {
    const COLLECTION: Collection = Collection::Improvements;

    fn order(&self) -> Option<i64> {
        Some(self.order)
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl Annotated for Improvement {
    fn notes(&self) -> &str {
        &self.notes
    }

    fn set_notes(&mut self, notes: String) {
        self.notes = notes;
    }
}

/// Counts shown above the checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl ImprovementStats {
    pub fn from_items(items: &[Stored<Improvement>]) -> Self {
        let count = |status: ImprovementStatus| {
            items.iter().filter(|i| i.record.status == status).count()
        };
        Self {
            total: items.len(),
            pending: count(ImprovementStatus::Pending),
            in_progress: count(ImprovementStatus::InProgress),
            done: count(ImprovementStatus::Done),
        }
    }
}

/// Display order: open items before done ones, then by priority.
///
/// The sort is stable, so items of equal rank keep their stored order.
pub fn display_order(items: &[Stored<Improvement>]) -> Vec<Stored<Improvement>> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|i| {
        (
            i.record.status == ImprovementStatus::Done,
            i.record.priority.rank(),
        )
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, status: ImprovementStatus, priority: Priority, order: i64) -> Stored<Improvement> {
        Stored::new(
            id,
            Improvement {
                title: id.to_uppercase(),
                description: String::new(),
                target_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
                notes: String::new(),
                status,
                priority,
                order,
            },
        )
    }

    #[test]
    fn done_items_sink_and_priority_leads() {
        use ImprovementStatus::*;
        let items = vec![
            item("a", Done, Priority::High, 1),
            item("b", Pending, Priority::Low, 2),
            item("c", InProgress, Priority::High, 3),
            item("d", Pending, Priority::Medium, 4),
            item("e", Pending, Priority::High, 5),
        ];
        let ids: Vec<_> = display_order(&items).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["c", "e", "d", "b", "a"]);
    }

    #[test]
    fn stats_count_each_status() {
        use ImprovementStatus::*;
        let items = vec![
            item("a", Done, Priority::High, 1),
            item("b", Pending, Priority::Low, 2),
            item("c", Pending, Priority::High, 3),
        ];
        let stats = ImprovementStats::from_items(&items);
        assert_eq!(
            stats,
            ImprovementStats {
                total: 3,
                pending: 2,
                in_progress: 0,
                done: 1
            }
        );
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in ImprovementStatus::ALL {
            assert_eq!(status.as_str().parse::<ImprovementStatus>().unwrap(), status);
        }
        assert!("closed".parse::<ImprovementStatus>().is_err());
    }
}
