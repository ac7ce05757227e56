//! # CLI Layer
//!
//! One possible UI client for agenda. This is the only place that parses
//! arguments, prompts, writes to stdout/stderr and decides exit codes.
//!
//! - `run()`: main dispatch logic (called by `main.rs`)
//! - `init_context()`: resolves paths and config, opens and initializes the store
//! - `handle_*()`: per-command handlers that call the API and render the result

mod menu;
mod render;
mod setup;

use agenda::api::{AgendaApi, AgendaPaths, CmdResult, ConfigAction, MessageLevel};
use agenda::config::{self, AgendaConfig};
use agenda::error::{AgendaError, Result};
use agenda::model::{AppointmentUpdate, NewAppointment};
use agenda::store::sqlite::SqliteStore;
use clap::Parser;
use env_logger::Env;
use log::{debug, warn};
use menu::{is_yes, Menu};
use render::{render_details, render_messages, render_table};
use setup::{Cli, Commands};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const DB_ENV: &str = "AGENDA_DB";

struct AppContext {
    api: AgendaApi<SqliteStore>,
    init: CmdResult,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let home = config::home_dir()?;
    debug!("Using agenda home {}", home.display());

    // Config does not need the store
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&home, key.clone(), value.clone());
    }

    let mut ctx = init_context(&cli, &home)?;

    match cli.command {
        Some(Commands::Init) => handle_init(&ctx),
        Some(Commands::Create(args)) => handle_create(&mut ctx, args.into()),
        Some(Commands::List { json }) => handle_list(&ctx, json),
        Some(Commands::View { id }) => handle_view(&ctx, id),
        Some(Commands::Update { id, fields }) => handle_update(&mut ctx, id, fields.into()),
        Some(Commands::Delete { id, yes }) => handle_delete(&mut ctx, id, yes),
        Some(Commands::Export { path }) => handle_export(&ctx, &path),
        Some(Commands::Menu) => handle_menu(&mut ctx),
        Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(&ctx, false),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli, home: &Path) -> Result<AppContext> {
    let config = AgendaConfig::load(home).unwrap_or_else(|e| {
        warn!("Ignoring unreadable config in {}: {}", home.display(), e);
        AgendaConfig::default()
    });

    let db_path = cli
        .db
        .clone()
        .or_else(|| std::env::var_os(DB_ENV).filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| config.database_path(home));

    let store = SqliteStore::open(&db_path).map_err(|e| startup_error(&db_path, e))?;
    let mut api = AgendaApi::new(store).with_list_order(config.list_order);
    let init = api.initialize().map_err(|e| startup_error(&db_path, e))?;

    Ok(AppContext { api, init })
}

fn startup_error(path: &Path, e: AgendaError) -> AgendaError {
    AgendaError::Startup {
        path: path.display().to_string(),
        source: Box::new(e),
    }
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    print_messages(&ctx.init)
}

fn handle_create(ctx: &mut AppContext, input: NewAppointment) -> Result<()> {
    let result = ctx.api.create_appointment(&input)?;
    print_messages(&result)
}

fn handle_list(ctx: &AppContext, json: bool) -> Result<()> {
    let result = ctx.api.list_appointments()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result.listed_appointments)?);
        return Ok(());
    }
    let mut out = io::stdout().lock();
    render_table(&mut out, &result.listed_appointments)?;
    render_messages(&mut out, &result.messages)?;
    Ok(())
}

fn handle_view(ctx: &AppContext, id: i64) -> Result<()> {
    let result = ctx.api.get_appointment(id)?;
    let Some(appointment) = result.listed_appointments.first() else {
        return Err(AgendaError::NotFound(id));
    };
    render_details(&mut io::stdout().lock(), appointment)?;
    Ok(())
}

fn handle_update(ctx: &mut AppContext, id: i64, update: AppointmentUpdate) -> Result<()> {
    let result = ctx.api.update_appointment(id, &update)?;
    print_messages(&result)
}

fn handle_delete(ctx: &mut AppContext, id: i64, yes: bool) -> Result<()> {
    if !yes {
        let found = ctx.api.get_appointment(id)?;
        let Some(appointment) = found.listed_appointments.first() else {
            return Err(AgendaError::NotFound(id));
        };
        let answer = ask(&format!(
            "Delete the appointment of {}? (y/n): ",
            appointment.details.patient_name
        ))?;
        if !is_yes(&answer) {
            println!("Cancelled.");
            return Ok(());
        }
    }
    let result = ctx.api.delete_appointment(id)?;
    print_messages(&result)
}

fn handle_export(ctx: &AppContext, path: &Path) -> Result<()> {
    let result = ctx.api.export_appointments(path)?;
    print_messages(&result)
}

fn handle_menu(ctx: &mut AppContext) -> Result<()> {
    let stdin = io::stdin();
    Menu::new(&mut ctx.api, stdin.lock(), io::stdout()).run()
}

fn handle_config(home: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = agenda::commands::config::run(&AgendaPaths::new(home), action)?;
    if let Some(failure) = result
        .messages
        .iter()
        .find(|m| m.level == MessageLevel::Error)
    {
        return Err(AgendaError::Config(failure.content.clone()));
    }

    if show_all {
        if let Some(cfg) = &result.config {
            for key in config::KEYS {
                println!("{} = {}", key, cfg.get(key).unwrap_or_default());
            }
        }
    }
    print_messages(&result)
}

fn print_messages(result: &CmdResult) -> Result<()> {
    render_messages(&mut io::stdout().lock(), &result.messages)?;
    Ok(())
}

fn ask(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
