//! Plain block records as the stage consumes them, already shaped by the
//! upstream store.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single block's summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub hash: String,
    pub height: u64,
    /// Unix seconds.
    pub time: i64,
    pub n_tx: u32,
    /// Total fees in satoshi.
    pub fee: u64,
    #[serde(default)]
    pub size: u64,
}

impl BlockRecord {
    /// UTC calendar day the block was mined on.
    pub fn day(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.time, 0).map(|t| t.date_naive())
    }
}

/// All blocks of one UTC day, ordered by time.
#[derive(Clone, Debug, PartialEq)]
pub struct DayBlocks {
    pub day: NaiveDate,
    pub blocks: Vec<BlockRecord>,
    pub hash_rate: Option<f64>,
}

impl DayBlocks {
    pub fn total_fee(&self) -> u64 {
        self.blocks.iter().map(|b| b.fee).sum()
    }

    pub fn mean_tx_count(&self) -> f64 {
        if self.blocks.is_empty() {
            return 0.0;
        }
        self.blocks.iter().map(|b| b.n_tx as f64).sum::<f64>() / self.blocks.len() as f64
    }
}
