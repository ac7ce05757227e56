//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every appointment operation, whichever UI is driving it.
//!
//! It dispatches to `commands/*.rs`, carries the list ordering chosen at startup and
//! returns structured `Result<CmdResult>` values. It never prints, prompts or exits.
//!
//! Configuration does not go through the facade: `commands::config` works on the
//! home directory alone and runs before any store is opened.
//!
//! `AgendaApi<S: DataStore>` is generic over the storage backend:
//! - Production: `AgendaApi<SqliteStore>`
//! - Testing: `AgendaApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::model::{AppointmentUpdate, ListOrder, NewAppointment};
use crate::store::DataStore;
use std::path::Path;

pub struct AgendaApi<S: DataStore> {
    store: S,
    list_order: ListOrder,
}

impl<S: DataStore> AgendaApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            list_order: ListOrder::default(),
        }
    }

    pub fn with_list_order(mut self, order: ListOrder) -> Self {
        self.list_order = order;
        self
    }

    pub fn initialize(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&mut self.store)
    }

    pub fn create_appointment(&mut self, input: &NewAppointment) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, input)
    }

    pub fn list_appointments(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, self.list_order)
    }

    pub fn get_appointment(&self, id: i64) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, id)
    }

    pub fn update_appointment(
        &mut self,
        id: i64,
        update: &AppointmentUpdate,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, update)
    }

    pub fn delete_appointment(&mut self, id: i64) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn export_appointments(&self, path: &Path) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, self.list_order, path)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{AgendaPaths, CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::new_appointment;
    use crate::store::memory::InMemoryStore;

    fn api() -> AgendaApi<InMemoryStore> {
        AgendaApi::new(InMemoryStore::new())
    }

    #[test]
    fn create_dispatches_to_store() {
        let mut api = api();
        let result = api
            .create_appointment(&new_appointment("Ana", "01/03/2024 10:00"))
            .unwrap();
        assert_eq!(result.affected_appointments[0].id, 1);
        assert_eq!(api.store().len(), 1);
    }

    #[test]
    fn list_uses_configured_order() {
        let mut api = api().with_list_order(ListOrder::Text);
        api.create_appointment(&new_appointment("Jan", "15/01/2024 10:00"))
            .unwrap();
        api.create_appointment(&new_appointment("Feb", "01/02/2024 10:00"))
            .unwrap();

        let listed = api.list_appointments().unwrap().listed_appointments;
        assert_eq!(listed[0].details.patient_name, "Feb");
    }

    #[test]
    fn get_update_delete_round() {
        let mut api = api();
        api.create_appointment(&new_appointment("Ana", "01/03/2024 10:00"))
            .unwrap();

        let update = AppointmentUpdate {
            city: Some("Olinda".into()),
            ..Default::default()
        };
        api.update_appointment(1, &update).unwrap();
        let fetched = api.get_appointment(1).unwrap().listed_appointments;
        assert_eq!(fetched[0].details.city.as_deref(), Some("Olinda"));

        api.delete_appointment(1).unwrap();
        assert!(api.get_appointment(1).unwrap().listed_appointments.is_empty());
    }
}
