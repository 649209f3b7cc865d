//! Command handlers for the `meadow` binary.
//!
//! Each command lives in its own module and follows the same pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Dependency injection: output streams (`&mut dyn Write`) and stdin (`&mut dyn BufRead`)
//!   are passed in, so handlers run against buffers in tests
//! - Error propagation: handlers return [`CliError`](crate::error::CliError) and never
//!   print it themselves; [`crate::run`] does

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use meadow_ai::Difficulty;

use crate::cli::TableArgs;
use crate::config::{self, Config};
use crate::error::CliError;

/// Applies command-line overrides on top of the resolved configuration.
pub(crate) fn table_config(
    base: &Config,
    table: &TableArgs,
    difficulty: Option<Difficulty>,
) -> Result<Config, CliError> {
    let cfg = Config {
        stake: table.stake.unwrap_or(base.stake),
        starting_stack: table.stack.or(base.starting_stack),
        difficulty: difficulty.unwrap_or(base.difficulty),
        seed: table.seed.or(base.seed),
        think_ms: base.think_ms,
    };
    config::validate(&cfg)?;
    Ok(cfg)
}
