use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::seed::seed_all;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let seeded = seed_all(store)?;
    let mut result = CmdResult::default();
    if seeded.is_empty() {
        result.add_message(CmdMessage::info(
            "All collections already have data, nothing seeded",
        ));
    }
    for collection in seeded {
        result.add_message(CmdMessage::success(format!(
            "Initialized {} with default data ({})",
            collection,
            store.location(collection)
        )));
    }
    Ok(result)
}
