//! Styles for the reunion CLI.
//!
//! Renderers refer to styles by what the text *is* (a row number, a muted
//! date, an over-budget gauge) and never pick colors themselves, so the look
//! can change here without touching the layout code.
//!
//! `console` drops the escape codes when stdout is not a terminal, so piped
//! output and tests see plain text.

use console::Style;
use once_cell::sync::Lazy;

// Semantic text styles
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static HEADER: Lazy<Style> = Lazy::new(|| Style::new().bold().underlined());
pub static HIGHLIGHT: Lazy<Style> = Lazy::new(|| Style::new().black().on_yellow());
pub static SPECIAL: Lazy<Style> = Lazy::new(|| Style::new().magenta().bold());

// Message levels
pub static INFO: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red().bold());

// Gauge bands
pub static BAND_BELOW: Lazy<Style> = Lazy::new(|| Style::new().blue());
pub static BAND_NEAR: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static BAND_OVER: Lazy<Style> = Lazy::new(|| Style::new().red());

// Status
pub static DONE: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static ACTIVE: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static IDLE: Lazy<Style> = Lazy::new(|| Style::new().dim());
