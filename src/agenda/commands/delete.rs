use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AgendaError, Result};
use crate::store::DataStore;
use log::debug;

pub fn run<S: DataStore>(store: &mut S, id: i64) -> Result<CmdResult> {
    let removed = store.delete(id).inspect_err(|e| {
        if let AgendaError::NotFound(_) = e {
            debug!("Delete of unknown appointment {}", id);
        }
    })?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Appointment {} deleted: {}",
        id, removed.details.patient_name
    )));
    result.affected_appointments.push(removed);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, get, list};
    use crate::model::ListOrder;
    use crate::store::memory::fixtures::{new_appointment, StoreFixture};

    #[test]
    fn deleted_appointment_is_gone() {
        let mut fixture = StoreFixture::new().with_appointments(3);
        run(&mut fixture.store, 2).unwrap();

        assert!(get::run(&fixture.store, 2).unwrap().listed_appointments.is_empty());
        let listed = list::run(&fixture.store, ListOrder::default()).unwrap();
        assert!(listed.listed_appointments.iter().all(|a| a.id != 2));
        assert_eq!(listed.listed_appointments.len(), 2);
    }

    #[test]
    fn unknown_id_is_not_found_and_changes_nothing() {
        let mut fixture = StoreFixture::new().with_appointments(2);
        let err = run(&mut fixture.store, 7).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(fixture.store.len(), 2);
    }

    #[test]
    fn highest_id_is_not_reused() {
        let mut fixture = StoreFixture::new().with_appointments(2);
        run(&mut fixture.store, 2).unwrap();

        let created =
            create::run(&mut fixture.store, &new_appointment("New", "02/02/2024 10:00")).unwrap();
        assert_eq!(created.affected_appointments[0].id, 3);
    }
}
