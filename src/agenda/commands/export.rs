use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ListOrder;
use crate::store::DataStore;
use log::debug;
use std::fs;
use std::path::Path;

/// Write every appointment, in list order, to `path` as a JSON array.
pub fn run<S: DataStore>(store: &S, order: ListOrder, path: &Path) -> Result<CmdResult> {
    let appointments = store.list(order)?;
    let json = serde_json::to_string_pretty(&appointments)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;
    debug!("Exported {} appointments to {}", appointments.len(), path.display());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} appointment(s) to {}",
        appointments.len(),
        path.display()
    )));
    Ok(result.with_affected_appointments(appointments))
}
