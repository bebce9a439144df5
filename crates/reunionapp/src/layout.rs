//! # Magazine Layout Engine
//!
//! Pure functions from an ordered sequence of page budgets to display
//! geometry. Nothing here is stored; the layout is recomputed from scratch
//! every time the board is rendered.
//!
//! ## Page Numbering
//!
//! Page 1 follows the front cover. A section occupies the half-open range
//! `[start, end)`:
//!
//! ```text
//! pages:   2.0     1.0    3.0
//! start:   1       3      4
//! end:     3       4      7        total = 6
//! ```
//!
//! `start(i + 1) == end(i)` always holds and `end(last) - 1 == total`.
//!
//! ## Special Zone
//!
//! Pages 8 and 9 are printed in color. A section is flagged when
//! `(start <= 9 && end >= 8) || (8 <= start <= 9)`, so a section merely
//! touching page 8 from below is flagged too.
//!
//! ## Page Budget
//!
//! The body has a fixed budget of 14 pages. The total is classified as under,
//! at, or over target and drives a gauge capped at 110% for display.
//!
//! ## Precision
//!
//! Budgets move in 0.2 steps. Positions and totals are snapped to one decimal
//! so repeated `+0.2` edits never drift (`1.0 + 0.2` is `1.2`, not
//! `1.2000000000000002`).

use crate::model::magazine::{MagazineSection, SectionStatus};
use crate::model::Stored;
use serde::Serialize;

/// First body page, right after the cover.
pub const FIRST_PAGE: f64 = 1.0;
/// Color-printed window, inclusive page numbers.
pub const SPECIAL_ZONE: (f64, f64) = (8.0, 9.0);
/// Editorial page budget for the body.
pub const TARGET_PAGES: f64 = 14.0;
/// Display cap of the gauge, in percent of target.
pub const GAUGE_CAP_PERCENT: f64 = 110.0;
/// Fraction of the target at which the gauge counts as "near".
pub const NEAR_TARGET_RATIO: f64 = 0.9;
pub const MIN_PAGES: f64 = 0.2;
pub const PAGE_STEP: f64 = 0.2;

/// Round to the nearest tenth of a page.
pub fn snap(pages: f64) -> f64 {
    (pages * 10.0).round() / 10.0
}

/// Proposed budget after applying `delta`: snapped, never below [`MIN_PAGES`].
pub fn adjust_pages(current: f64, delta: f64) -> f64 {
    snap(current + delta).max(MIN_PAGES)
}

pub fn in_special_zone(start: f64, end: f64) -> bool {
    let (zone_start, zone_end) = SPECIAL_ZONE;
    (start <= zone_end && end >= zone_start) || (zone_start <= start && start <= zone_end)
}

/// Where one section sits in the magazine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpan {
    pub start: f64,
    pub end: f64,
    pub in_special_zone: bool,
}

/// Spans for every budget in sequence.
pub fn page_spans(pages: &[f64]) -> Vec<PageSpan> {
    let mut start = FIRST_PAGE;
    pages
        .iter()
        .map(|&p| {
            let end = snap(start + p);
            let span = PageSpan {
                start,
                end,
                in_special_zone: in_special_zone(start, end),
            };
            start = end;
            span
        })
        .collect()
}

/// First page of the section at `index`, or `None` past the last section.
pub fn page_start(pages: &[f64], index: usize) -> Option<f64> {
    if index >= pages.len() {
        return None;
    }
    Some(snap(FIRST_PAGE + pages[..index].iter().sum::<f64>()))
}

/// Page right after the section at `index`.
pub fn page_end(pages: &[f64], index: usize) -> Option<f64> {
    Some(snap(page_start(pages, index)? + pages.get(index)?))
}

pub fn total_pages(pages: &[f64]) -> f64 {
    snap(pages.iter().sum())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    Under,
    At,
    Over,
}

impl TargetStatus {
    pub fn classify(total: f64) -> Self {
        let total = snap(total);
        if total > TARGET_PAGES {
            TargetStatus::Over
        } else if total == TARGET_PAGES {
            TargetStatus::At
        } else {
            TargetStatus::Under
        }
    }
}

/// Color band of the gauge bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GaugeBand {
    Below,
    NearTarget,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGauge {
    /// True percentage of target, uncapped.
    pub percent: f64,
    /// Percentage to draw, capped at [`GAUGE_CAP_PERCENT`].
    pub display_percent: f64,
    pub band: GaugeBand,
}

impl PageGauge {
    pub fn for_total(total: f64) -> Self {
        let percent = total / TARGET_PAGES * 100.0;
        let band = if total > TARGET_PAGES {
            GaugeBand::Over
        } else if total >= TARGET_PAGES * NEAR_TARGET_RATIO {
            GaugeBand::NearTarget
        } else {
            GaugeBand::Below
        };
        Self {
            percent,
            display_percent: percent.min(GAUGE_CAP_PERCENT),
            band,
        }
    }
}

/// Everything the board needs to draw the page plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub spans: Vec<PageSpan>,
    pub total_pages: f64,
    pub target_pages: f64,
    pub target: TargetStatus,
    /// Pages over budget, zero when at or under.
    pub overflow: f64,
    pub gauge: PageGauge,
}

impl PageLayout {
    pub fn from_pages(pages: &[f64]) -> Self {
        let total = total_pages(pages);
        Self {
            spans: page_spans(pages),
            total_pages: total,
            target_pages: TARGET_PAGES,
            target: TargetStatus::classify(total),
            overflow: snap((total - TARGET_PAGES).max(0.0)),
            gauge: PageGauge::for_total(total),
        }
    }

    pub fn for_sections(sections: &[Stored<MagazineSection>]) -> Self {
        let pages: Vec<f64> = sections.iter().map(|s| s.record.pages).collect();
        Self::from_pages(&pages)
    }
}

/// Percent of sections marked done, rounded; 0 for an empty plan.
pub fn completion_rate<'a, I>(statuses: I) -> u32
where
    I: IntoIterator<Item = &'a SectionStatus>,
{
    let (done, total) = statuses
        .into_iter()
        .fold((0usize, 0usize), |(done, total), s| {
            (done + usize::from(s.is_done()), total + 1)
        });
    if total == 0 {
        return 0;
    }
    (done as f64 / total as f64 * 100.0).round() as u32
}
