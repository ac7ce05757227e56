use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AgendaError, Result};
use crate::model::AppointmentUpdate;
use crate::store::DataStore;
use log::debug;

pub fn run<S: DataStore>(store: &mut S, id: i64, update: &AppointmentUpdate) -> Result<CmdResult> {
    let appointment = store.update(id, update).inspect_err(|e| {
        if let AgendaError::NotFound(_) = e {
            debug!("Update of unknown appointment {}", id);
        }
    })?;

    let mut result = CmdResult::default();
    if update.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Appointment {} unchanged",
            id
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Appointment {} updated: {} ({}) at {}",
            id,
            appointment.details.patient_name,
            appointment.details.exam_type,
            appointment.details.scheduled_at
        )));
    }
    result.affected_appointments.push(appointment);
    Ok(result)
}
