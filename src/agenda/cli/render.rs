use agenda::api::{CmdMessage, MessageLevel};
use agenda::model::Appointment;
use colored::Colorize;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SEPARATOR: char = '|';

// (header, width) per column
const COLUMNS: [(&str, usize); 7] = [
    ("ID", 4),
    ("Patient", 20),
    ("Age", 5),
    ("City", 15),
    ("Exam", 20),
    ("Doctor", 15),
    ("Date/Time", 16),
];

pub fn render_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub fn render_table<W: Write>(out: &mut W, appointments: &[Appointment]) -> io::Result<()> {
    if appointments.is_empty() {
        return Ok(());
    }

    let headers: Vec<&str> = COLUMNS.iter().map(|(h, _)| *h).collect();
    writeln!(out, "{}", format_row(&headers).bold())?;
    writeln!(out, "{}", "-".repeat(table_width()))?;

    for appt in appointments {
        let id = appt.id.to_string();
        let age = appt.details.age.map(|a| a.to_string()).unwrap_or_default();
        let at = appt.details.scheduled_at.to_string();
        let cells = [
            id.as_str(),
            appt.details.patient_name.as_str(),
            age.as_str(),
            appt.details.city.as_deref().unwrap_or(""),
            appt.details.exam_type.as_str(),
            appt.details.requesting_doctor.as_deref().unwrap_or(""),
            at.as_str(),
        ];
        writeln!(out, "{}", format_row(&cells))?;
    }
    Ok(())
}

pub fn render_details<W: Write>(out: &mut W, appt: &Appointment) -> io::Result<()> {
    let d = &appt.details;
    writeln!(out, "{} {}", format!("#{}", appt.id).yellow(), d.patient_name.bold())?;
    writeln!(out, "--------------------------------")?;
    writeln!(out, "Age:       {}", display_opt(d.age.map(|a| a.to_string())))?;
    writeln!(out, "City:      {}", display_opt(d.city.clone()))?;
    writeln!(out, "Exam:      {}", d.exam_type)?;
    writeln!(out, "Doctor:    {}", display_opt(d.requesting_doctor.clone()))?;
    writeln!(out, "Scheduled: {}", d.scheduled_at)?;
    Ok(())
}

fn display_opt(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

fn table_width() -> usize {
    COLUMNS.iter().map(|(_, w)| w + 3).sum::<usize>() - 3
}

fn format_row(cells: &[&str]) -> String {
    cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, (_, width))| pad_to_width(cell, *width))
        .collect::<Vec<_>>()
        .join(&format!(" {} ", SEPARATOR))
}

fn pad_to_width(s: &str, width: usize) -> String {
    let cell = truncate_to_width(s, width);
    let padding = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
