//! Command-line surface of the `meadow` binary.
//!
//! Flags left unset fall back to the resolved [`crate::config::Config`].

use clap::{Parser, Subcommand};
use meadow_ai::Difficulty;

#[derive(Parser, Debug)]
#[command(
    name = "meadow",
    version,
    about = "Meadow heads-up Hold'em: play or simulate hands against AI dealers"
)]
pub struct MeadowCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Overrides shared by the commands that seat players at a table.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Big blind of the table (at least 50 is used)
    #[arg(long)]
    pub stake: Option<u32>,
    /// Chips each side starts with
    #[arg(long)]
    pub stack: Option<u32>,
    /// Base RNG seed; hand `i` is dealt from `seed + i`
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play hands against an AI dealer over stdin
    Play {
        /// Dealer difficulty: seedling, sprout, bloom or harvest
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        hands: Option<u32>,
        /// Pause before revealing each dealer action
        #[arg(long)]
        think_ms: Option<u64>,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Pit two AI tiers against each other
    Sim {
        #[arg(long, default_value_t = 100)]
        hands: u32,
        /// Tier in the dealer seat
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Tier in the player seat (defaults to the dealer's)
        #[arg(long)]
        opponent: Option<Difficulty>,
        /// Append hand histories to this JSONL file
        #[arg(long)]
        output: Option<String>,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Deal one hand and check it down
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Best five-card hand out of 5 to 7 cards, e.g. `meadow eval As Ks Qs Js Ts`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_flags_parse() {
        let cli = MeadowCli::try_parse_from([
            "meadow",
            "play",
            "--difficulty",
            "bloom",
            "--seed",
            "7",
            "--think-ms",
            "250",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Play {
                difficulty,
                think_ms,
                table,
                hands,
            } => {
                assert_eq!(difficulty, Some(Difficulty::Bloom));
                assert_eq!(think_ms, Some(250));
                assert_eq!(table.seed, Some(7));
                assert_eq!(hands, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        assert!(MeadowCli::try_parse_from(["meadow", "play", "--difficulty", "oak"]).is_err());
    }

    #[test]
    fn eval_takes_positional_cards() {
        let cli = MeadowCli::try_parse_from(["meadow", "eval", "As", "Ks", "Qs", "Js", "Ts"])
            .unwrap();
        match cli.cmd {
            Commands::Eval { cards } => assert_eq!(cards.len(), 5),
            other => panic!("unexpected {:?}", other),
        }
    }
}
