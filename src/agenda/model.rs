use crate::error::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display format for appointment date-times, e.g. `05/03/2024 09:00`.
pub const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Sortable rendering stored next to the display text.
const SORT_KEY_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A calendar date and time in the fixed `DD/MM/YYYY HH:MM` representation.
///
/// Parsing is strict: the input must be a real calendar date and must already be
/// in canonical (zero-padded) form, so the stored text is always the text the user
/// typed. No range restriction applies; past dates are fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ScheduledAt(NaiveDateTime);

impl ScheduledAt {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let parsed = NaiveDateTime::parse_from_str(trimmed, DATE_TIME_FORMAT)
            .map_err(|_| ValidationError::InvalidDateTime(input.to_string()))?;
        let value = Self(parsed);
        if value.to_string() != trimmed {
            return Err(ValidationError::InvalidDateTime(input.to_string()));
        }
        Ok(value)
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    pub fn sort_key(&self) -> String {
        self.0.format(SORT_KEY_FORMAT).to_string()
    }
}

impl fmt::Display for ScheduledAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_TIME_FORMAT))
    }
}

impl From<ScheduledAt> for String {
    fn from(value: ScheduledAt) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ScheduledAt {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Validated appointment fields, everything except the store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    pub patient_name: String,
    pub age: Option<u32>,
    pub city: Option<String>,
    pub exam_type: String,
    pub requesting_doctor: Option<String>,
    pub scheduled_at: ScheduledAt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    #[serde(flatten)]
    pub details: AppointmentDetails,
}

impl Appointment {
    pub fn new(id: i64, details: AppointmentDetails) -> Self {
        Self { id, details }
    }
}

/// Raw creation input, as collected by a UI.
#[derive(Debug, Clone, Default)]
pub struct NewAppointment {
    pub patient_name: String,
    pub age: Option<u32>,
    pub city: Option<String>,
    pub exam_type: String,
    pub requesting_doctor: Option<String>,
    pub scheduled_at: String,
}

impl NewAppointment {
    pub fn validate(&self) -> Result<AppointmentDetails, ValidationError> {
        Ok(AppointmentDetails {
            patient_name: required(&self.patient_name, "Patient name")?,
            age: self.age,
            city: optional(self.city.as_deref()),
            exam_type: required(&self.exam_type, "Exam type")?,
            requesting_doctor: optional(self.requesting_doctor.as_deref()),
            scheduled_at: ScheduledAt::parse(&self.scheduled_at)?,
        })
    }
}

/// Partial update. `None` and blank text both mean "keep the current value".
#[derive(Debug, Clone, Default)]
pub struct AppointmentUpdate {
    pub patient_name: Option<String>,
    pub age: Option<u32>,
    pub city: Option<String>,
    pub exam_type: Option<String>,
    pub requesting_doctor: Option<String>,
    pub scheduled_at: Option<String>,
}

impl AppointmentUpdate {
    pub fn is_empty(&self) -> bool {
        provided(self.patient_name.as_deref()).is_none()
            && self.age.is_none()
            && provided(self.city.as_deref()).is_none()
            && provided(self.exam_type.as_deref()).is_none()
            && provided(self.requesting_doctor.as_deref()).is_none()
            && provided(self.scheduled_at.as_deref()).is_none()
    }

    /// Merge this update over `current`, validating any new date-time.
    pub fn apply_to(&self, current: &AppointmentDetails) -> Result<AppointmentDetails, ValidationError> {
        let scheduled_at = match provided(self.scheduled_at.as_deref()) {
            Some(text) => ScheduledAt::parse(text)?,
            None => current.scheduled_at,
        };

        Ok(AppointmentDetails {
            patient_name: merge(self.patient_name.as_deref(), &current.patient_name),
            age: self.age.or(current.age),
            city: provided(self.city.as_deref())
                .map(str::to_string)
                .or_else(|| current.city.clone()),
            exam_type: merge(self.exam_type.as_deref(), &current.exam_type),
            requesting_doctor: provided(self.requesting_doctor.as_deref())
                .map(str::to_string)
                .or_else(|| current.requesting_doctor.clone()),
            scheduled_at,
        })
    }
}

/// Ordering used when listing appointments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListOrder {
    /// Calendar order of `scheduled_at`.
    #[default]
    Chronological,
    /// Lexicographic order of the `DD/MM/YYYY HH:MM` text.
    Text,
}

impl fmt::Display for ListOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListOrder::Chronological => write!(f, "chronological"),
            ListOrder::Text => write!(f, "text"),
        }
    }
}

impl FromStr for ListOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chronological" | "chrono" => Ok(ListOrder::Chronological),
            "text" | "legacy" => Ok(ListOrder::Text),
            other => Err(format!(
                "Invalid list order '{}': expected 'chronological' or 'text'",
                other
            )),
        }
    }
}

fn provided(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    provided(Some(value))
        .map(str::to_string)
        .ok_or(ValidationError::EmptyField(field))
}

fn optional(value: Option<&str>) -> Option<String> {
    provided(value).map(str::to_string)
}

fn merge(value: Option<&str>, current: &str) -> String {
    provided(value).unwrap_or(current).to_string()
}
