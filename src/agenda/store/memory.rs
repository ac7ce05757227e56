use super::DataStore;
use crate::error::{AgendaError, Result};
use crate::model::{Appointment, AppointmentDetails, AppointmentUpdate, ListOrder};
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    appointments: BTreeMap<i64, AppointmentDetails>,
    // High-water mark, so deleted ids are never handed out again
    last_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

impl DataStore for InMemoryStore {
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    fn insert(&mut self, details: &AppointmentDetails) -> Result<i64> {
        self.last_id += 1;
        self.appointments.insert(self.last_id, details.clone());
        Ok(self.last_id)
    }

    fn get(&self, id: i64) -> Result<Option<Appointment>> {
        Ok(self
            .appointments
            .get(&id)
            .map(|details| Appointment::new(id, details.clone())))
    }

    fn list(&self, order: ListOrder) -> Result<Vec<Appointment>> {
        let mut listed: Vec<Appointment> = self
            .appointments
            .iter()
            .map(|(id, details)| Appointment::new(*id, details.clone()))
            .collect();

        match order {
            ListOrder::Chronological => listed.sort_by(|a, b| {
                a.details
                    .scheduled_at
                    .datetime()
                    .cmp(&b.details.scheduled_at.datetime())
                    .then(a.id.cmp(&b.id))
            }),
            ListOrder::Text => listed.sort_by(|a, b| {
                a.details
                    .scheduled_at
                    .to_string()
                    .cmp(&b.details.scheduled_at.to_string())
                    .then(a.id.cmp(&b.id))
            }),
        }
        Ok(listed)
    }

    fn update(&mut self, id: i64, update: &AppointmentUpdate) -> Result<Appointment> {
        let current = self
            .appointments
            .get(&id)
            .ok_or(AgendaError::NotFound(id))?;
        let merged = update.apply_to(current)?;
        self.appointments.insert(id, merged.clone());
        Ok(Appointment::new(id, merged))
    }

    fn delete(&mut self, id: i64) -> Result<Appointment> {
        self.appointments
            .remove(&id)
            .map(|details| Appointment::new(id, details))
            .ok_or(AgendaError::NotFound(id))
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::model::NewAppointment;

    pub fn new_appointment(patient: &str, scheduled_at: &str) -> NewAppointment {
        NewAppointment {
            patient_name: patient.to_string(),
            age: Some(35),
            city: Some("Campinas".to_string()),
            exam_type: "Hemograma completo".to_string(),
            requesting_doctor: Some("Dr. Almeida".to_string()),
            scheduled_at: scheduled_at.to_string(),
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_appointments(mut self, count: usize) -> Self {
            for i in 0..count {
                let patient = format!("Patient {}", i + 1);
                let at = format!("{:02}/06/2024 09:00", i % 28 + 1);
                self = self.with_appointment(&patient, &at);
            }
            self
        }

        pub fn with_appointment(mut self, patient: &str, scheduled_at: &str) -> Self {
            let details = new_appointment(patient, scheduled_at).validate().unwrap();
            self.store.insert(&details).unwrap();
            self
        }
    }
}
