//! # Rendering Module
//!
//! Turns a [`CmdResult`] into text. Two modes:
//!
//! - `term`: one block per view followed by the messages, styled through
//!   [`super::styles`].
//! - `json`: the `CmdResult` itself, pretty printed. The view is tagged with
//!   `"view"` so scripts can tell screens apart.
//!
//! ## Column Layout
//!
//! Titles and names are mostly Japanese, so widths are counted in terminal
//! cells with `unicode-width`, never in chars or bytes. Columns are padded
//! *before* styling; escape codes would otherwise count toward the width.

use super::setup::OutputMode;
use super::styles;
use reunionapp::api::{CmdMessage, CmdResult, MessageLevel, View};
use reunionapp::commands::glossary::GlossaryView;
use reunionapp::commands::improvements::ImprovementsView;
use reunionapp::commands::schedule::ScheduleView;
use reunionapp::error::Result;
use reunionapp::layout::{GaugeBand, TargetStatus, GAUGE_CAP_PERCENT};
use reunionapp::model::improvements::ImprovementStatus;
use reunionapp::model::magazine::SectionStatus;
use reunionapp::session::magazine::MagazineBoard;
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const COL_INDEX: usize = 3; // " 1."
pub const COL_SPAN: usize = 11; // "10.2-12.0"
pub const COL_TITLE: usize = 28;
pub const COL_PAGES: usize = 5;
pub const COL_STATUS: usize = 8;
pub const COL_ASSIGNEE: usize = 10;

/// Number of cells in the page gauge; the last cells are past 100%.
pub const GAUGE_WIDTH: usize = 22;
pub const SPECIAL_MARKER: &str = "◆";
pub const HIGHLIGHT_MARKER: &str = "★";

pub fn render(result: &CmdResult, mode: OutputMode) -> Result<String> {
    if mode == OutputMode::Json {
        return Ok(serde_json::to_string_pretty(result)? + "\n");
    }

    let mut out = String::new();
    match &result.view {
        Some(View::Schedule(view)) => render_schedule(&mut out, view),
        Some(View::Improvements(view)) => render_improvements(&mut out, view),
        Some(View::Glossary(view)) => render_glossary(&mut out, view),
        Some(View::Magazine(board)) => render_magazine(&mut out, board),
        None => {}
    }
    render_messages(&mut out, &result.messages);
    Ok(out)
}

/// The category list of a glossary result.
pub fn render_categories(result: &CmdResult, mode: OutputMode) -> Result<String> {
    let categories: &[String] = match &result.view {
        Some(View::Glossary(view)) => &view.categories,
        _ => &[],
    };
    if mode == OutputMode::Json {
        return Ok(serde_json::to_string_pretty(categories)? + "\n");
    }
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "{}", category);
    }
    render_messages(&mut out, &result.messages);
    Ok(out)
}

/// Pad or cut `text` to exactly `width` terminal cells.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    if text.width() <= width {
        out.push_str(text);
        used = text.width();
    } else if width > 0 {
        let limit = width - 1;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > limit {
                break;
            }
            out.push(ch);
            used += w;
        }
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn index(position: usize) -> String {
    format!("{:>width$}.", position, width = COL_INDEX - 1)
}

fn render_schedule(out: &mut String, view: &ScheduleView) {
    let _ = writeln!(
        out,
        "{}",
        styles::MUTED.apply_to(format!(
            "{} (events within {} days are marked)",
            view.today, view.window_days
        ))
    );
    if view.events.is_empty() {
        let _ = writeln!(out, "No events");
        return;
    }
    for row in &view.events {
        let event = &row.event.record;
        let mut line = format!(
            "{} {} {}",
            styles::INDEX.apply_to(index(row.position)),
            fit(&row.display_date, 10),
            styles::TITLE.apply_to(&event.title)
        );
        if let Some(location) = &event.location {
            let _ = write!(line, " {}", styles::MUTED.apply_to(format!("@ {}", location)));
        }
        if event.is_highlight {
            let _ = write!(line, " {}", styles::SPECIAL.apply_to(HIGHLIGHT_MARKER));
        }
        if row.upcoming {
            let _ = write!(line, " {}", styles::HIGHLIGHT.apply_to(" まもなく "));
        }
        let _ = writeln!(out, "{}", line);

        let indent = " ".repeat(COL_INDEX + 1);
        if !event.description.is_empty() {
            let _ = writeln!(out, "{}{}", indent, event.description);
        }
        for detail in &event.details {
            let _ = writeln!(out, "{}{}", indent, styles::MUTED.apply_to(format!("・{}", detail)));
        }
        if !event.notes.is_empty() {
            let _ = writeln!(out, "{}メモ: {}", indent, event.notes);
        }
    }
}

fn improvement_style(status: ImprovementStatus) -> &'static console::Style {
    match status {
        ImprovementStatus::Pending => &*styles::IDLE,
        ImprovementStatus::InProgress => &*styles::ACTIVE,
        ImprovementStatus::Done => &*styles::DONE,
    }
}

fn render_improvements(out: &mut String, view: &ImprovementsView) {
    let stats = &view.stats;
    let _ = writeln!(
        out,
        "{}",
        styles::HEADER.apply_to(format!(
            "全{}件  未着手 {}  進行中 {}  完了 {}",
            stats.total, stats.pending, stats.in_progress, stats.done
        ))
    );
    for row in &view.items {
        let item = &row.item.record;
        let status = fit(item.status.label(), 6);
        let _ = writeln!(
            out,
            "{} {} {} {} {}",
            styles::INDEX.apply_to(index(row.position)),
            improvement_style(item.status).apply_to(status),
            fit(&format!("[{}]", item.priority.label()), 4),
            styles::TITLE.apply_to(fit(&item.title, COL_TITLE)),
            styles::MUTED.apply_to(format!("期限 {}", item.target_date))
        );
        let indent = " ".repeat(COL_INDEX + 1);
        if !item.description.is_empty() {
            let _ = writeln!(out, "{}{}", indent, item.description);
        }
        if !item.notes.is_empty() {
            let _ = writeln!(out, "{}メモ: {}", indent, item.notes);
        }
    }
}

fn render_glossary(out: &mut String, view: &GlossaryView) {
    if !view.query.is_empty() || view.category.is_some() {
        let mut header = String::new();
        if !view.query.is_empty() {
            let _ = write!(header, "search: {}  ", view.query);
        }
        if let Some(category) = &view.category {
            let _ = write!(header, "category: {}", category);
        }
        let _ = writeln!(out, "{}", styles::MUTED.apply_to(header.trim_end()));
    }
    for row in &view.terms {
        let term = &row.term.record;
        let mut line = format!(
            "{} {}",
            styles::INDEX.apply_to(index(row.position)),
            styles::TITLE.apply_to(&term.term)
        );
        if let Some(reading) = &term.reading {
            let _ = write!(line, "（{}）", reading);
        }
        let _ = write!(line, " {}", styles::MUTED.apply_to(format!("[{}]", term.category)));
        let _ = writeln!(out, "{}", line);

        let indent = " ".repeat(COL_INDEX + 1);
        if !term.description.is_empty() {
            let _ = writeln!(out, "{}{}", indent, term.description);
        }
        if !term.related_terms.is_empty() {
            let _ = writeln!(
                out,
                "{}{}",
                indent,
                styles::MUTED.apply_to(format!("関連: {}", term.related_terms.join(", ")))
            );
        }
    }
}

fn section_style(status: SectionStatus) -> &'static console::Style {
    match status {
        SectionStatus::NotStarted => &*styles::IDLE,
        SectionStatus::Done => &*styles::DONE,
        _ => &*styles::ACTIVE,
    }
}

fn band_style(band: GaugeBand) -> &'static console::Style {
    match band {
        GaugeBand::Below => &*styles::BAND_BELOW,
        GaugeBand::NearTarget => &*styles::BAND_NEAR,
        GaugeBand::Over => &*styles::BAND_OVER,
    }
}

/// `[█████░░░]` with one cell per `GAUGE_CAP_PERCENT / GAUGE_WIDTH` percent.
pub fn gauge_bar(percent: f64) -> String {
    let per_cell = GAUGE_CAP_PERCENT / GAUGE_WIDTH as f64;
    let filled = ((percent / per_cell).round().max(0.0) as usize).min(GAUGE_WIDTH);
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(GAUGE_WIDTH - filled)
    )
}

fn target_summary(board: &MagazineBoard) -> String {
    match board.target {
        TargetStatus::Under => format!(
            "あと {:.1} ページ",
            board.target_pages - board.total_pages
        ),
        TargetStatus::At => "目標ページ数ちょうど".to_string(),
        TargetStatus::Over => format!("{:.1} ページ超過", board.overflow),
    }
}

fn render_magazine(out: &mut String, board: &MagazineBoard) {
    let _ = writeln!(
        out,
        "{}",
        styles::HEADER.apply_to(format!(
            "{} {} {} {} {} {} {}",
            fit("#", COL_INDEX),
            fit("ページ", COL_SPAN),
            fit("タイトル", COL_TITLE),
            fit("頁数", COL_PAGES),
            fit("状態", COL_STATUS),
            fit("担当", COL_ASSIGNEE),
            "タスク"
        ))
    );

    for row in &board.sections {
        let section = &row.section.record;
        let span = fit(&format!("{:.1}-{:.1}", row.span.start, row.span.end), COL_SPAN);
        let span = if row.span.in_special_zone {
            styles::SPECIAL.apply_to(span).to_string()
        } else {
            styles::MUTED.apply_to(span).to_string()
        };
        let marker = if row.span.in_special_zone {
            styles::SPECIAL.apply_to(SPECIAL_MARKER).to_string()
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "{} {} {} {} {} {} {}/{}{}",
            styles::INDEX.apply_to(index(row.position)),
            span,
            styles::TITLE.apply_to(fit(&section.title, COL_TITLE)),
            fit(&format!("{:.1}", section.pages), COL_PAGES),
            section_style(section.status).apply_to(fit(section.status.label(), COL_STATUS)),
            fit(&section.assignee, COL_ASSIGNEE),
            row.completed_tasks,
            section.tasks.len(),
            if marker.is_empty() { marker } else { format!(" {}", marker) }
        );
        if !section.notes.is_empty() {
            let _ = writeln!(out, "{}メモ: {}", " ".repeat(COL_INDEX + 1), section.notes);
        }
    }

    let style = band_style(board.gauge_band);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "合計 {:.1} / {:.1} ページ  {} {}  {}",
        board.total_pages,
        board.target_pages,
        style.apply_to(gauge_bar(board.gauge_percent)),
        style.apply_to(format!("{:.0}%", board.gauge_percent)),
        style.apply_to(target_summary(board))
    );
    let _ = writeln!(out, "完了率 {}%", board.completion_rate);
    if board.sections.iter().any(|s| s.span.in_special_zone) {
        let _ = writeln!(
            out,
            "{}",
            styles::MUTED.apply_to(format!("{} カラーページ範囲 (8-9)", SPECIAL_MARKER))
        );
    }
}

fn render_messages(out: &mut String, messages: &[CmdMessage]) {
    for msg in messages {
        let (style, prefix) = match msg.level {
            MessageLevel::Info => (&styles::INFO, ""),
            MessageLevel::Success => (&styles::SUCCESS, ""),
            MessageLevel::Warning => (&styles::WARNING, "Warning: "),
            MessageLevel::Error => (&styles::ERROR, "Error: "),
        };
        let _ = writeln!(out, "{}", style.apply_to(format!("{}{}", prefix, msg.content)));
    }
}
