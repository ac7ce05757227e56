use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Look up one appointment. A missing id yields an empty listing and a warning,
/// not an error.
pub fn run<S: DataStore>(store: &S, id: i64) -> Result<CmdResult> {
    match store.get(id)? {
        Some(appointment) => Ok(CmdResult::default().with_listed_appointments(vec![appointment])),
        None => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::warning(format!(
                "Appointment {} not found",
                id
            )));
            Ok(result)
        }
    }
}
