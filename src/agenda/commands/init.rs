use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    store.initialize()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Appointment store ready at {}",
        store.location()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sqlite::SqliteStore;

    #[test]
    fn can_run_repeatedly() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        run(&mut store).unwrap();
        let result = run(&mut store).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains(":memory:"));
    }
}
