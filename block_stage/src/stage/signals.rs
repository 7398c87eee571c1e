//! Named stage signals and the listeners subscribed to them.

use crate::camera::CameraSnapshot;

/// Payload-free signals broadcast by the stage controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageSignal {
    /// Start of a tick, before mouse and camera are updated.
    PreUpdate,
    /// End of a tick's state update, before drawing.
    PostUpdate,
    /// The camera changed depth bucket (debounced).
    CameraMove,
}

pub type Listener = Box<dyn FnMut(StageSignal, &CameraSnapshot) + Send + Sync>;

/// Handle returned by [`SignalBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listeners called synchronously, in subscription order.
#[derive(Default)]
pub struct SignalBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl SignalBus {
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(StageSignal, &CameraSnapshot) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, signal: StageSignal, snapshot: &CameraSnapshot) {
        for (_, listener) in &mut self.listeners {
            listener(signal, snapshot);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
