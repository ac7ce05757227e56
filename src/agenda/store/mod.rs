//! # Storage Layer
//!
//! This module defines the storage abstraction for agenda. The [`DataStore`] trait
//! keeps the command layer independent of where appointments actually live.
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: Production storage in an embedded SQLite file
//!   - One `appointments` table, created on demand
//!   - Ids come from `AUTOINCREMENT`, so they are never reused
//!   - Can also be opened in memory for tests
//!
//! - [`memory::InMemoryStore`]: Plain in-memory storage for command tests
//!   - No persistence
//!   - Mirrors the id and ordering rules of the SQLite store
//!
//! ## Contract
//!
//! Inserts receive already validated [`AppointmentDetails`]. Updates are merged
//! with [`AppointmentUpdate::apply_to`] inside the store so the read, the
//! validation and the write happen as one unit. Every mutating call is atomic: on
//! error nothing it touched is visible to a later read.
//!
//! `get` reports absence as `Ok(None)`. `update` and `delete` report absence as
//! [`AgendaError::NotFound`](crate::error::AgendaError::NotFound).

use crate::error::Result;
use crate::model::{Appointment, AppointmentDetails, AppointmentUpdate, ListOrder};

pub mod memory;
pub mod sqlite;

/// Abstract interface for appointment storage.
pub trait DataStore {
    /// Create the backing schema if it does not exist yet. Idempotent.
    fn initialize(&mut self) -> Result<()>;

    /// Persist a new appointment and return its freshly assigned id.
    fn insert(&mut self, details: &AppointmentDetails) -> Result<i64>;

    /// Look up a single appointment.
    fn get(&self, id: i64) -> Result<Option<Appointment>>;

    /// Every appointment, sorted by `scheduled_at` using `order`, ties broken by id.
    fn list(&self, order: ListOrder) -> Result<Vec<Appointment>>;

    /// Merge `update` over the stored record and persist the result.
    fn update(&mut self, id: i64, update: &AppointmentUpdate) -> Result<Appointment>;

    /// Remove an appointment permanently, returning what was removed.
    fn delete(&mut self, id: i64) -> Result<Appointment>;

    /// Where the data lives, for user-facing messages.
    fn location(&self) -> String;
}
