//! Interactive numbered menu.
//!
//! All retry loops live here: the core only validates and returns typed errors.
//! Input and output are injected so the menu can be driven from tests.

use super::render::{render_details, render_messages, render_table};
use agenda::api::AgendaApi;
use agenda::error::{AgendaError, Result};
use agenda::model::{Appointment, AppointmentUpdate, NewAppointment, ScheduledAt};
use agenda::store::DataStore;
use colored::Colorize;
use std::io::{BufRead, Write};

pub struct Menu<'a, S: DataStore, R: BufRead, W: Write> {
    api: &'a mut AgendaApi<S>,
    input: R,
    out: W,
}

impl<'a, S: DataStore, R: BufRead, W: Write> Menu<'a, S, R, W> {
    pub fn new(api: &'a mut AgendaApi<S>, input: R, out: W) -> Self {
        Self { api, input, out }
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "{}", "=== EXAM SCHEDULING ===".bold())?;
            writeln!(self.out, "1. Schedule new exam")?;
            writeln!(self.out, "2. List appointments")?;
            writeln!(self.out, "3. Update appointment")?;
            writeln!(self.out, "4. Delete appointment")?;
            writeln!(self.out, "5. Quit")?;

            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };
            let outcome = match choice.as_str() {
                "1" => self.create(),
                "2" => self.list(),
                "3" => self.update(),
                "4" => self.delete(),
                "5" => {
                    writeln!(self.out, "Goodbye!")?;
                    break;
                }
                _ => {
                    writeln!(self.out, "Invalid option. Try again.")?;
                    Ok(())
                }
            };
            self.report(outcome)?;
        }
        Ok(())
    }

    /// Operation failures go back to the menu; only I/O on the menu itself is fatal.
    fn report(&mut self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(AgendaError::Io(e)) => Err(AgendaError::Io(e)),
            Err(e) => {
                writeln!(self.out, "{}", format!("Error: {}", e).red())?;
                Ok(())
            }
        }
    }

    fn create(&mut self) -> Result<()> {
        writeln!(self.out, "\n--- NEW APPOINTMENT ---")?;
        let Some(patient_name) = self.prompt("1. Patient name: ")? else {
            return Ok(());
        };
        let Some(age) = self.prompt_age("2. Patient age: ")? else {
            return Ok(());
        };
        let Some(city) = self.prompt("3. City: ")? else {
            return Ok(());
        };
        let Some(exam_type) = self.prompt("4. Exam type: ")? else {
            return Ok(());
        };
        let Some(requesting_doctor) = self.prompt("5. Requesting doctor: ")? else {
            return Ok(());
        };
        let Some(scheduled_at) = self.prompt_date("6. Date and time (DD/MM/YYYY HH:MM): ", false)?
        else {
            return Ok(());
        };

        let input = NewAppointment {
            patient_name,
            age,
            city: Some(city),
            exam_type,
            requesting_doctor: Some(requesting_doctor),
            scheduled_at,
        };
        let result = self.api.create_appointment(&input)?;
        render_messages(&mut self.out, &result.messages)?;
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        let result = self.api.list_appointments()?;
        render_table(&mut self.out, &result.listed_appointments)?;
        render_messages(&mut self.out, &result.messages)?;
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        self.list()?;
        let Some(current) = self.select("\nId of the appointment to update: ")? else {
            return Ok(());
        };
        let d = current.details.clone();
        writeln!(self.out, "\nLeave blank to keep the current value.")?;

        let Some(patient_name) = self.prompt(&format!("Patient name [{}]: ", d.patient_name))?
        else {
            return Ok(());
        };
        let age_label = d.age.map(|a| a.to_string()).unwrap_or_default();
        let Some(age) = self.prompt_age(&format!("Age [{}]: ", age_label))? else {
            return Ok(());
        };
        let Some(city) = self.prompt(&format!("City [{}]: ", d.city.unwrap_or_default()))? else {
            return Ok(());
        };
        let Some(exam_type) = self.prompt(&format!("Exam [{}]: ", d.exam_type))? else {
            return Ok(());
        };
        let doctor_label = d.requesting_doctor.unwrap_or_default();
        let Some(requesting_doctor) = self.prompt(&format!("Doctor [{}]: ", doctor_label))? else {
            return Ok(());
        };
        let date_label = format!("Date and time [{}] (DD/MM/YYYY HH:MM): ", d.scheduled_at);
        let Some(scheduled_at) = self.prompt_date(&date_label, true)? else {
            return Ok(());
        };

        let update = AppointmentUpdate {
            patient_name: Some(patient_name),
            age,
            city: Some(city),
            exam_type: Some(exam_type),
            requesting_doctor: Some(requesting_doctor),
            scheduled_at: Some(scheduled_at),
        };
        let result = self.api.update_appointment(current.id, &update)?;
        render_messages(&mut self.out, &result.messages)?;
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        self.list()?;
        let Some(current) = self.select("\nId of the appointment to delete: ")? else {
            return Ok(());
        };
        let question = format!(
            "Delete the appointment of {}? (y/n): ",
            current.details.patient_name
        );
        let Some(answer) = self.prompt(&question)? else {
            return Ok(());
        };
        if !is_yes(&answer) {
            writeln!(self.out, "Cancelled.")?;
            return Ok(());
        }
        let result = self.api.delete_appointment(current.id)?;
        render_messages(&mut self.out, &result.messages)?;
        Ok(())
    }

    /// Ask for an id and fetch it. `None` when the id is invalid or unknown.
    fn select(&mut self, label: &str) -> Result<Option<Appointment>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        let Ok(id) = raw.parse::<i64>() else {
            writeln!(self.out, "Invalid id.")?;
            return Ok(None);
        };
        let mut result = self.api.get_appointment(id)?;
        if result.listed_appointments.is_empty() {
            render_messages(&mut self.out, &result.messages)?;
            return Ok(None);
        }
        let appointment = result.listed_appointments.remove(0);
        render_details(&mut self.out, &appointment)?;
        Ok(Some(appointment))
    }

    /// Outer `None` means input ended; inner `None` means left blank.
    fn prompt_age(&mut self, label: &str) -> Result<Option<Option<u32>>> {
        loop {
            let Some(raw) = self.prompt(label)? else {
                return Ok(None);
            };
            if raw.is_empty() {
                return Ok(Some(None));
            }
            match raw.parse::<u32>() {
                Ok(age) => return Ok(Some(Some(age))),
                Err(_) => writeln!(self.out, "Please enter a whole number for the age.")?,
            }
        }
    }

    fn prompt_date(&mut self, label: &str, allow_blank: bool) -> Result<Option<String>> {
        loop {
            let Some(raw) = self.prompt(label)? else {
                return Ok(None);
            };
            if allow_blank && raw.is_empty() {
                return Ok(Some(raw));
            }
            match ScheduledAt::parse(&raw) {
                Ok(_) => return Ok(Some(raw)),
                Err(e) => writeln!(self.out, "{}", e)?,
            }
        }
    }

    /// Read one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "sim")
}
