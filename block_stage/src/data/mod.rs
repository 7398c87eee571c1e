mod channel;
mod error;
mod fixture;
mod model;
mod series;
mod source;

use chrono::{NaiveDate, NaiveTime};

pub use channel::{spawn_day_loader, DayChannel};
pub use error::DataError;
pub use fixture::FixtureSource;
pub use model::{BlockRecord, DayBlocks};
pub use series::TimeSeries;
pub use source::{blocks_on_day, BlockSource};

const SECONDS_PER_DAY: i64 = 86_400;

/// Unix-second range `[start, end)` covering a UTC day.
pub fn day_range(day: NaiveDate) -> (i64, i64) {
    let start = day.and_time(NaiveTime::MIN).and_utc().timestamp();
    (start, start + SECONDS_PER_DAY)
}
