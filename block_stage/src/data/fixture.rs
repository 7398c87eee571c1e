//! Block store backed by a JSON fixture file.

use std::path::Path;

use chrono::NaiveDate;

use crate::data::{BlockRecord, BlockSource, DataError, TimeSeries};

/// In-memory block store loaded from a JSON array of block records.
#[derive(Clone, Debug, Default)]
pub struct FixtureSource {
    blocks: Vec<BlockRecord>,
    hash_rate: Option<TimeSeries>,
}

fn read(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl FixtureSource {
    pub fn from_records(mut blocks: Vec<BlockRecord>) -> Self {
        blocks.sort_by_key(|b| b.time);
        Self {
            blocks,
            hash_rate: None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let records: Vec<BlockRecord> = serde_json::from_str(&read(path)?)?;
        Ok(Self::from_records(records))
    }

    pub fn with_hash_rate(mut self, series: TimeSeries) -> Self {
        self.hash_rate = Some(series);
        self
    }

    pub fn with_hash_rate_path(self, path: &Path) -> Result<Self, DataError> {
        let series = TimeSeries::from_json(&read(path)?)?;
        Ok(self.with_hash_rate(series))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl BlockSource for FixtureSource {
    fn blocks_between(&self, from: i64, to: i64) -> Result<Vec<BlockRecord>, DataError> {
        let start = self.blocks.partition_point(|b| b.time < from);
        let end = self.blocks.partition_point(|b| b.time < to);
        Ok(self.blocks[start..end.max(start)].to_vec())
    }

    fn block_by_hash(&self, hash: &str) -> Result<BlockRecord, DataError> {
        self.blocks
            .iter()
            .find(|b| b.hash == hash)
            .cloned()
            .ok_or_else(|| DataError::UnknownBlock(hash.to_string()))
    }

    fn earliest_block(&self) -> Result<BlockRecord, DataError> {
        self.blocks.first().cloned().ok_or(DataError::Empty)
    }

    fn latest_block(&self) -> Result<BlockRecord, DataError> {
        self.blocks.last().cloned().ok_or(DataError::Empty)
    }

    fn hash_rate_on(&self, day: NaiveDate) -> Option<f64> {
        self.hash_rate.as_ref().and_then(|series| series.value_on(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{blocks_on_day, day_range};

    fn block(hash: &str, time: i64) -> BlockRecord {
        BlockRecord {
            hash: hash.to_string(),
            height: time as u64,
            time,
            n_tx: 1,
            fee: 0,
            size: 0,
        }
    }

    fn oct(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 10, day).unwrap()
    }

    fn source() -> FixtureSource {
        let (oct2, oct3) = (day_range(oct(2)).0, day_range(oct(3)).0);
        FixtureSource::from_records(vec![
            block("c", oct3 + 10),
            block("a", oct2),
            block("b", oct3 - 1),
            block("d", oct3),
        ])
    }

    #[test]
    fn records_are_sorted_by_time() {
        let source = source();
        assert_eq!(source.earliest_block().unwrap().hash, "a");
        assert_eq!(source.latest_block().unwrap().hash, "c");
    }

    #[test]
    fn day_includes_midnight_and_excludes_next_midnight() {
        let day = blocks_on_day(&source(), oct(2)).unwrap();
        let hashes: Vec<_> = day.blocks.iter().map(|b| b.hash.as_str()).collect();
        assert_eq!(hashes, ["a", "b"]);

        let next = blocks_on_day(&source(), oct(3)).unwrap();
        let hashes: Vec<_> = next.blocks.iter().map(|b| b.hash.as_str()).collect();
        assert_eq!(hashes, ["d", "c"]);
    }

    #[test]
    fn empty_day_is_not_an_error() {
        let day = blocks_on_day(&source(), oct(20)).unwrap();
        assert!(day.blocks.is_empty());
        assert_eq!(day.hash_rate, None);
    }

    #[test]
    fn unknown_hash_and_empty_store() {
        assert!(matches!(
            source().block_by_hash("zz"),
            Err(DataError::UnknownBlock(hash)) if hash == "zz"
        ));
        assert!(matches!(
            FixtureSource::default().latest_block(),
            Err(DataError::Empty)
        ));
    }

    #[test]
    fn hash_rate_comes_from_the_series() {
        let series = TimeSeries {
            times: vec![day_range(oct(2)).0 + 60],
            values: vec![51.5],
        };
        let source = source().with_hash_rate(series);
        assert_eq!(blocks_on_day(&source, oct(2)).unwrap().hash_rate, Some(51.5));
        assert_eq!(source.hash_rate_on(oct(3)), None);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = FixtureSource::from_path(Path::new("/nonexistent/blocks.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/blocks.json"));
    }
}
