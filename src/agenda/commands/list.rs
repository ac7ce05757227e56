use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ListOrder;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, order: ListOrder) -> Result<CmdResult> {
    let appointments = store.list(order)?;
    let mut result = CmdResult::default();
    if appointments.is_empty() {
        result.add_message(CmdMessage::info("No appointments scheduled."));
    }
    Ok(result.with_listed_appointments(appointments))
}
