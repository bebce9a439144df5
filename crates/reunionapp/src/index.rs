//! # Item Selectors: Position vs Document Id
//!
//! Documents are identified by store-assigned ids like `k3j2x9...`. Those are
//! the canonical handle, but nobody wants to type twenty characters to bump a
//! page count. So every view numbers its rows `1..=n` in the order it shows
//! them, and commands accept either form:
//!
//! ```text
//! reunion magazine pages 3 +0.2          # third row on the board
//! reunion magazine pages k3j2x9... +0.2  # by id
//! ```
//!
//! ## Positions Follow the View
//!
//! A position refers to the sequence the view displays, not the stored order.
//! For the improvements checklist that is the status/priority display order;
//! for the glossary it is the filtered list. Commands always resolve against
//! the same sequence they would list.
//!
//! ## Parsing
//!
//! Anything that parses as a positive integer is a position; everything else
//! is an id. `0` is rejected rather than read as an id.

use crate::error::{ReunionError, Result};
use crate::model::{Record, Stored};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// 1-based row number in the displayed sequence.
    Position(usize),
    Id(String),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Position(n) => write!(f, "{}", n),
            Selector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for Selector {
    type Err = ReunionError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ReunionError::Api("Empty selector".to_string()));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            return match s.parse::<usize>() {
                Ok(0) => Err(ReunionError::Api(
                    "Positions start at 1".to_string(),
                )),
                Ok(n) => Ok(Selector::Position(n)),
                Err(_) => Err(ReunionError::Api(format!("Invalid position: {}", s))),
            };
        }
        Ok(Selector::Id(s.to_string()))
    }
}

impl Selector {
    /// Find the selected item in `items`, the sequence as displayed.
    pub fn resolve<'a, T: Record>(&self, items: &'a [Stored<T>]) -> Result<&'a Stored<T>> {
        match self {
            Selector::Position(n) => items.get(n - 1).ok_or_else(|| {
                ReunionError::Api(format!(
                    "No {} item at position {} (have {})",
                    T::COLLECTION,
                    n,
                    items.len()
                ))
            }),
            Selector::Id(id) => items
                .iter()
                .find(|i| &i.id == id)
                .ok_or_else(|| ReunionError::not_found(T::COLLECTION, id.as_str())),
        }
    }

    /// Resolve straight to the selected item's id.
    pub fn resolve_id<T: Record>(&self, items: &[Stored<T>]) -> Result<String> {
        self.resolve(items).map(|item| item.id.clone())
    }
}
