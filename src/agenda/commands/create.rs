use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Appointment, NewAppointment};
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, input: &NewAppointment) -> Result<CmdResult> {
    let details = input.validate()?;
    let id = store.insert(&details)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Appointment {} scheduled: {} ({}) at {}",
        id, details.patient_name, details.exam_type, details.scheduled_at
    )));
    result.affected_appointments.push(Appointment::new(id, details));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::get;
    use crate::error::{AgendaError, ValidationError};
    use crate::store::memory::fixtures::new_appointment;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn created_appointment_round_trips() {
        let mut store = InMemoryStore::new();
        let input = new_appointment("Joana", "12/08/2024 14:30");
        let created = run(&mut store, &input).unwrap();
        let id = created.affected_appointments[0].id;

        let fetched = get::run(&store, id).unwrap();
        let appt = &fetched.listed_appointments[0];
        assert_eq!(appt.details.patient_name, input.patient_name);
        assert_eq!(appt.details.age, input.age);
        assert_eq!(appt.details.city, input.city);
        assert_eq!(appt.details.exam_type, input.exam_type);
        assert_eq!(appt.details.requesting_doctor, input.requesting_doctor);
        assert_eq!(appt.details.scheduled_at.to_string(), input.scheduled_at);
    }

    #[test]
    fn rejects_empty_patient_without_persisting() {
        let mut store = InMemoryStore::new();
        let input = new_appointment("", "12/08/2024 14:30");
        let err = run(&mut store, &input).unwrap_err();
        assert!(matches!(
            err,
            AgendaError::Validation(ValidationError::EmptyField("Patient name"))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn rejects_empty_exam_type() {
        let mut store = InMemoryStore::new();
        let mut input = new_appointment("Joana", "12/08/2024 14:30");
        input.exam_type = " ".into();
        assert!(run(&mut store, &input).unwrap_err().is_validation());
        assert!(store.is_empty());
    }

    #[test]
    fn rejects_malformed_dates() {
        let mut store = InMemoryStore::new();
        for bad in ["2024-01-01 10:00", "31/02/2024 10:00", "amanhã"] {
            let input = new_appointment("Joana", bad);
            assert!(run(&mut store, &input).unwrap_err().is_validation());
        }
        assert!(store.is_empty());
    }

    #[test]
    fn ids_increase() {
        let mut store = InMemoryStore::new();
        let a = run(&mut store, &new_appointment("A", "01/01/2024 08:00")).unwrap();
        let b = run(&mut store, &new_appointment("B", "01/01/2024 08:00")).unwrap();
        assert!(b.affected_appointments[0].id > a.affected_appointments[0].id);
    }
}
