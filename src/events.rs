//! Typed queue for notifications pushed by the backend.
//!
//! Any thread may emit through an [`EventSink`]; the router drains the
//! matching [`Inbox`] on the UI thread, one event at a time, in arrival order.

use log::{debug, warn};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Notifications from the backend collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// The target directory contents changed; re-list now.
    ImageListUpdate,
    /// Transient message for the user.
    ShowToast(String),
    /// A directory was chosen outside the UI (menu shortcut, command line).
    SetNewDir(String),
}

impl BackendEvent {
    /// Channel name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            BackendEvent::ImageListUpdate => "image-list-update",
            BackendEvent::ShowToast(_) => "show-toast",
            BackendEvent::SetNewDir(_) => "set-new-dir",
        }
    }
}

type Waker = Box<dyn Fn() + Send + Sync>;

/// Sending half of the event queue.
#[derive(Clone)]
pub struct EventSink {
    tx: Sender<BackendEvent>,
    waker: Arc<OnceCell<Waker>>,
}

impl EventSink {
    /// Queues an event and wakes the consumer, if one is registered.
    pub fn emit(&self, event: BackendEvent) {
        debug!("Emit {}", event.name());
        if self.tx.send(event).is_err() {
            warn!("Event dropped: inbox closed");
            return;
        }
        if let Some(wake) = self.waker.get() {
            wake();
        }
    }

    /// Registers the callback run after each emit. Only the first call wins.
    pub fn set_waker<F>(&self, wake: F) -> bool
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.waker.set(Box::new(wake)).is_ok()
    }
}

/// Receiving half of the event queue.
pub struct Inbox {
    rx: Receiver<BackendEvent>,
}

impl Inbox {
    /// Takes the next queued event without blocking.
    pub fn try_next(&self) -> Option<BackendEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Creates a connected sink/inbox pair.
pub fn channel() -> (EventSink, Inbox) {
    let (tx, rx) = mpsc::channel();
    (
        EventSink {
            tx,
            waker: Arc::new(OnceCell::new()),
        },
        Inbox { rx },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn events_arrive_in_emit_order() {
        let (sink, inbox) = channel();
        sink.emit(BackendEvent::ShowToast("one".into()));
        sink.clone().emit(BackendEvent::ImageListUpdate);

        assert_eq!(inbox.try_next(), Some(BackendEvent::ShowToast("one".into())));
        assert_eq!(inbox.try_next(), Some(BackendEvent::ImageListUpdate));
        assert_eq!(inbox.try_next(), None);
    }

    #[test]
    fn waker_runs_once_per_emit() {
        let (sink, _inbox) = channel();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = wakes.clone();

        assert!(sink.set_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(!sink.set_waker(|| {}));

        sink.emit(BackendEvent::ImageListUpdate);
        sink.emit(BackendEvent::SetNewDir("/a".into()));
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }
}
