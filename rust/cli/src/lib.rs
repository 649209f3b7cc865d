//! # Meadow CLI Library
//!
//! Command-line front end for the Meadow heads-up Hold'em engine and its AI dealers.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, resolves the configuration and dispatches to a
//! subcommand; [`run_with_input`] does the same with an injected stdin.
//!
//! ```
//! use std::io;
//! let args = vec!["meadow", "deal", "--seed", "42"];
//! let code = meadow_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play hands against an AI dealer over stdin
//! - `sim`: Pit two AI tiers against each other, optionally writing JSONL histories
//! - `deal`: Deal one seeded hand and show it down
//! - `eval`: Evaluate the best hand out of 5 to 7 cards
//! - `cfg`: Display the resolved configuration

use std::io::{BufRead, Write};
use std::path::Path;

use clap::Parser;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{Commands, MeadowCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command,
    handle_sim_command, table_config,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "deal", "eval", "cfg"];

/// Exit code: `0` for success, `2` for any error.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// [`run`] reading interactive input from `input` instead of the process stdin.
pub fn run_with_input<I, S>(
    args: I,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match MeadowCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return 2;
                    }
                    0
                }
                _ => {
                    let _ = write_usage(err, &e);
                    2
                }
            };
        }
    };

    match dispatch(cli.cmd, input, out, err) {
        Ok(()) => 0,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            2
        }
    }
}

fn write_usage(err: &mut dyn Write, e: &clap::Error) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "Meadow Hold'em CLI")?;
    writeln!(err, "Usage: meadow <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: meadow --help")
}

fn dispatch(
    cmd: Commands,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    let base = &resolved.config;

    match cmd {
        Commands::Cfg => handle_cfg_command(&resolved, out),
        Commands::Play {
            difficulty,
            hands,
            think_ms,
            table,
        } => {
            let mut cfg = table_config(base, &table, difficulty)?;
            if let Some(ms) = think_ms {
                cfg.think_ms = ms;
            }
            handle_play_command(&cfg, hands.unwrap_or(1), out, err, input)
        }
        Commands::Sim {
            hands,
            difficulty,
            opponent,
            output,
            table,
        } => {
            let cfg = table_config(base, &table, difficulty)?;
            let opponent = opponent.unwrap_or(cfg.difficulty);
            handle_sim_command(&cfg, hands, opponent, output.as_deref().map(Path::new), out)
        }
        Commands::Deal { seed } => {
            let cfg = table_config(base, &cli::TableArgs::default(), None)?;
            handle_deal_command(cfg.betting(), cfg.stack(), seed.or(cfg.seed), out)
        }
        Commands::Eval { cards } => handle_eval_command(&cards, out),
    }
}
