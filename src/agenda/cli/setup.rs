use agenda::model::{AppointmentUpdate, NewAppointment};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agenda", bin_name = "agenda", version)]
#[command(about = "Schedule and track medical exam appointments", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database file to use (overrides AGENDA_DB and the config)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the appointment store if it does not exist
    Init,

    /// Schedule a new exam
    #[command(visible_alias = "new", alias = "n")]
    Create(CreateArgs),

    /// List every appointment
    #[command(alias = "ls")]
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single appointment
    #[command(alias = "v")]
    View {
        /// Appointment id
        id: i64,
    },

    /// Change fields of an appointment (omitted fields keep their value)
    #[command(alias = "e")]
    Update {
        /// Appointment id
        id: i64,

        #[command(flatten)]
        fields: UpdateArgs,
    },

    /// Delete an appointment permanently
    #[command(alias = "rm")]
    Delete {
        /// Appointment id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Write all appointments to a JSON file
    Export {
        /// Output file
        path: PathBuf,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (database, list-order)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Interactive menu
    Menu,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Patient name
    #[arg(short, long)]
    pub patient: String,

    /// Patient age
    #[arg(short, long)]
    pub age: Option<u32>,

    /// City
    #[arg(short, long)]
    pub city: Option<String>,

    /// Exam type
    #[arg(short, long)]
    pub exam: String,

    /// Requesting doctor
    #[arg(short, long)]
    pub doctor: Option<String>,

    /// Date and time, DD/MM/YYYY HH:MM
    #[arg(short = 't', long = "at", value_name = "DD/MM/YYYY HH:MM")]
    pub scheduled_at: String,
}

impl From<CreateArgs> for NewAppointment {
    fn from(args: CreateArgs) -> Self {
        NewAppointment {
            patient_name: args.patient,
            age: args.age,
            city: args.city,
            exam_type: args.exam,
            requesting_doctor: args.doctor,
            scheduled_at: args.scheduled_at,
        }
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Patient name
    #[arg(short, long)]
    pub patient: Option<String>,

    /// Patient age
    #[arg(short, long)]
    pub age: Option<u32>,

    /// City
    #[arg(short, long)]
    pub city: Option<String>,

    /// Exam type
    #[arg(short, long)]
    pub exam: Option<String>,

    /// Requesting doctor
    #[arg(short, long)]
    pub doctor: Option<String>,

    /// Date and time, DD/MM/YYYY HH:MM
    #[arg(short = 't', long = "at", value_name = "DD/MM/YYYY HH:MM")]
    pub scheduled_at: Option<String>,
}

impl From<UpdateArgs> for AppointmentUpdate {
    fn from(args: UpdateArgs) -> Self {
        AppointmentUpdate {
            patient_name: args.patient,
            age: args.age,
            city: args.city,
            exam_type: args.exam,
            requesting_doctor: args.doctor,
            scheduled_at: args.scheduled_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_create_with_short_flags() {
        let cli = Cli::try_parse_from([
            "agenda", "new", "-p", "Ana", "-a", "30", "-e", "Raio-X", "-t", "01/02/2024 08:00",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Create(args)) => {
                let input = NewAppointment::from(args);
                assert_eq!(input.patient_name, "Ana");
                assert_eq!(input.age, Some(30));
                assert_eq!(input.city, None);
                assert_eq!(input.scheduled_at, "01/02/2024 08:00");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_partial_update() {
        let cli = Cli::try_parse_from(["agenda", "update", "4", "--city", "Natal"]).unwrap();
        match cli.command {
            Some(Commands::Update { id, fields }) => {
                assert_eq!(id, 4);
                let update = AppointmentUpdate::from(fields);
                assert_eq!(update.city.as_deref(), Some("Natal"));
                assert!(update.patient_name.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_negative_age() {
        let parsed = Cli::try_parse_from([
            "agenda", "create", "-p", "Ana", "-a", "-3", "-e", "X", "-t", "01/02/2024 08:00",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_db_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["agenda", "list", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
    }
}
