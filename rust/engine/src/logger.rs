use serde::{Deserialize, Serialize};

use crate::betting::BettingConfig;
use crate::cards::Card;
use crate::engine::{HandResult, Street, Winner};
use crate::hand::describe_hand;
use crate::player::{Participant, PlayerAction};

/// A single accepted action.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub actor: Participant,
    /// The betting round the action was taken in
    pub street: Street,
    pub action: PlayerAction,
    /// Chips moved by the action; for a raise, the new round total
    pub amount: u32,
}

/// How a finished hand ended.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandSummary {
    pub winner: Winner,
    pub pot: u32,
    /// True when nobody showed down
    pub folded: bool,
    #[serde(default)]
    pub player_hand: Option<String>,
    #[serde(default)]
    pub dealer_hand: Option<String>,
}

impl From<&HandResult> for HandSummary {
    fn from(r: &HandResult) -> Self {
        Self {
            winner: r.winner,
            pot: r.pot,
            folded: r.folded(),
            player_hand: r.player_hand.as_ref().map(describe_hand),
            dealer_hand: r.dealer_hand.as_ref().map(describe_hand),
        }
    }
}

/// Complete record of a hand, one JSON object per line in a history file.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Seed of the shuffle; replaying it reproduces every card
    pub seed: Option<u64>,
    pub config: BettingConfig,
    pub player_hole: Vec<Card>,
    pub dealer_hole: Vec<Card>,
    /// Community cards (up to 5)
    pub board: Vec<Card>,
    pub actions: Vec<ActionRecord>,
    pub result: Option<HandSummary>,
    /// RFC3339 timestamp, filled in by [`HandLogger::write`] when missing
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`HandRecord`]s to a JSONL file.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that numbers hands under `date` but writes nothing.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
