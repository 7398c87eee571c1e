//! Chart time series (`{ "values": [{ "x": .., "y": .. }] }`) split into
//! parallel time and value columns.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::data::{day_range, DataError};

#[derive(Debug, Deserialize)]
struct ChartPoint {
    x: i64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct Chart {
    values: Vec<ChartPoint>,
}

/// Samples keyed by unix seconds, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeries {
    pub times: Vec<i64>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn from_json(raw: &str) -> Result<Self, DataError> {
        let chart: Chart = serde_json::from_str(raw)?;
        let (times, values) = chart.values.into_iter().map(|p| (p.x, p.y)).unzip();
        Ok(Self { times, values })
    }

    /// First sample that falls inside `day` (UTC).
    pub fn value_on(&self, day: NaiveDate) -> Option<f64> {
        let (from, to) = day_range(day);
        self.times
            .iter()
            .zip(&self.values)
            .find(|(t, _)| (from..to).contains(*t))
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
