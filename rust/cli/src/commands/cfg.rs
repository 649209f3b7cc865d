//! Configuration command handler.
//!
//! Prints the resolved configuration as pretty JSON, each setting with the layer it
//! came from, followed by the table limits it implies:
//!
//! ```json
//! {
//!   "stake": { "value": 100, "source": "default" },
//!   "difficulty": { "value": "bloom", "source": "env" },
//!   ...
//!   "table": { "min_bet": 100, "max_bet": 800, "small_blind": 50, "big_blind": 100 }
//! }
//! ```

use std::io::Write;

use crate::config::ConfigResolved;
use crate::error::CliError;

pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "stake": {
            "value": config.stake,
            "source": sources.stake,
        },
        "starting_stack": {
            "value": config.stack(),
            "source": sources.starting_stack,
        },
        "difficulty": {
            "value": config.difficulty,
            "source": sources.difficulty,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "think_ms": {
            "value": config.think_ms,
            "source": sources.think_ms,
        },
        "table": config.betting(),
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
