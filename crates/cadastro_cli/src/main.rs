//! Interactive registration book binary.
//!
//! # Responsibility
//! - Parse startup flags, bootstrap logging and storage.
//! - Run the synchronous command loop over stdin/stdout.
//!
//! # Invariants
//! - Every command runs to completion before the next line is read; there is
//!   no concurrent access to the store or the durable slot.

use cadastro_core::db::open_db;
use cadastro_core::{RegistrationService, SqliteSlotRepository, UserStore};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

mod app;
mod table;

use app::{parse_command, App, Step};

/// Command-line flags for the interactive registration book.
#[derive(Debug, Parser)]
#[command(name = "cadastro", version, about = "Cadastro de usuários interativo")]
struct Args {
    /// SQLite database file holding the durable slots.
    #[arg(long, default_value = "cadastro.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files; file logging is off when
    /// omitted.
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args
            .log_level
            .as_deref()
            .unwrap_or_else(|| cadastro_core::default_log_level());
        if let Err(err) = cadastro_core::init_logging(level, log_dir) {
            eprintln!("aviso: logging desativado: {err}");
        }
    }

    let conn = match open_db(&args.db) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!(
                "erro: não foi possível abrir `{}`: {err}",
                args.db.display()
            );
            std::process::exit(1);
        }
    };

    let repo = match SqliteSlotRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("erro: banco de dados inválido: {err}");
            std::process::exit(1);
        }
    };

    let mut app = App::new(RegistrationService::new(UserStore::new(repo)));
    let count = app.hydrate();

    println!("Cadastro de Usuários — {count} registro(s) carregado(s).");
    println!("digite `ajuda` para ver os comandos.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(command) => match app.handle(command) {
                Step::Continue(text) => println!("{text}"),
                Step::Quit => break,
            },
            Err(message) => println!("{message}"),
        }
    }
}
