//! Glossary lookup.

use super::ViewSession;
use crate::model::glossary::{categories, GlossaryFilter, GlossaryTerm};
use crate::model::Stored;
use crate::store::DataStore;

pub type GlossarySession<'s, S> = ViewSession<'s, S, GlossaryTerm>;

impl<'s, S: DataStore> ViewSession<'s, S, GlossaryTerm> {
    pub fn filtered(&self, filter: &GlossaryFilter) -> Vec<Stored<GlossaryTerm>> {
        filter.apply(&self.items)
    }

    pub fn categories(&self) -> Vec<String> {
        categories(&self.items)
    }
}
