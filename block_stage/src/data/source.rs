use chrono::NaiveDate;

use crate::data::{day_range, BlockRecord, DataError, DayBlocks};

/// Read access to a store of block records.
pub trait BlockSource: Send + 'static {
    /// Blocks with `from <= time < to`, oldest first.
    fn blocks_between(&self, from: i64, to: i64) -> Result<Vec<BlockRecord>, DataError>;

    fn block_by_hash(&self, hash: &str) -> Result<BlockRecord, DataError>;

    fn earliest_block(&self) -> Result<BlockRecord, DataError>;

    fn latest_block(&self) -> Result<BlockRecord, DataError>;

    /// Network hash rate on `day`, when the source has a chart for it.
    fn hash_rate_on(&self, _day: NaiveDate) -> Option<f64> {
        None
    }
}

/// Every block mined on the given UTC day.
pub fn blocks_on_day<S>(source: &S, day: NaiveDate) -> Result<DayBlocks, DataError>
where
    S: BlockSource + ?Sized,
{
    let (from, to) = day_range(day);
    Ok(DayBlocks {
        day,
        blocks: source.blocks_between(from, to)?,
        hash_rate: source.hash_rate_on(day),
    })
}
