use chrono::NaiveDate;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use bevy::log::{info, warn};

use crate::data::model::DayBlocks;
use crate::data::{blocks_on_day, BlockSource};

const CHANNEL_CAPACITY: usize = 8;

/// Bevy resource connecting the ECS to the day-loader thread.
/// Systems send day requests and drain loaded days each frame.
#[derive(bevy::prelude::Resource)]
pub struct DayChannel {
    requests: Sender<NaiveDate>,
    days: Receiver<DayBlocks>,
}

impl DayChannel {
    /// Queues a day for loading without blocking the frame.
    /// Returns false when the loader is gone or its queue is full.
    pub fn request(&self, day: NaiveDate) -> bool {
        match self.requests.try_send(day) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("day loader busy, dropping request for {day}");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn try_recv(&self) -> Option<DayBlocks> {
        self.days.try_recv().ok()
    }
}

/// Moves the source onto a dedicated thread that answers day requests.
/// Failed loads are logged and skipped.
pub fn spawn_day_loader(source: impl BlockSource) -> DayChannel {
    let (request_tx, request_rx) = crossbeam_channel::bounded::<NaiveDate>(CHANNEL_CAPACITY);
    let (day_tx, day_rx) = crossbeam_channel::bounded(CHANNEL_CAPACITY);

    std::thread::spawn(move || {
        while let Ok(day) = request_rx.recv() {
            match blocks_on_day(&source, day) {
                Ok(blocks) => {
                    info!("loaded {} blocks for {day}", blocks.blocks.len());
                    if day_tx.send(blocks).is_err() {
                        return;
                    }
                }
                Err(err) => warn!("failed to load blocks for {day}: {err}"),
            }
        }
    });

    DayChannel {
        requests: request_tx,
        days: day_rx,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::data::{day_range, BlockRecord, FixtureSource};

    #[test]
    fn loader_answers_requests_in_order() {
        let oct2 = NaiveDate::from_ymd_opt(2018, 10, 2).unwrap();
        let oct3 = oct2.succ_opt().unwrap();
        let source = FixtureSource::from_records(vec![BlockRecord {
            hash: "aa".into(),
            height: 1,
            time: day_range(oct3).0 + 5,
            n_tx: 3,
            fee: 9,
            size: 0,
        }]);
        let channel = spawn_day_loader(source);

        assert!(channel.request(oct2));
        assert!(channel.request(oct3));

        let first = channel.days.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = channel.days.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first.day, oct2);
        assert!(first.blocks.is_empty());
        assert_eq!(second.day, oct3);
        assert_eq!(second.blocks.len(), 1);
    }
}
