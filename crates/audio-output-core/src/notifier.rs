//! Route change signalling
//!
//! OS change callbacks run on whatever thread the OS picks, so they must not
//! call into the host directly. Instead they push a unit signal into a
//! bounded flume channel and the host drains it on its own thread:
//!
//! ```text
//! OS callback → RouteChangeListener → flume (cap 1) → ChangeReceiver::forward → HostMessenger
//! ```
//!
//! The channel holds at most one pending signal. A signal carries no detail,
//! so a second one arriving before the first is drained adds nothing and is
//! dropped.

use flume::{Receiver, Sender, TrySendError};

use crate::channel::{HostMessenger, CHANGE_MARKER, INPUT_CHANGED_METHOD};

/// Capacity of the signal channel; pending signals coalesce beyond this
const SIGNAL_CAPACITY: usize = 1;

/// Unit signal: "the active output route may have changed"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteChangeSignal;

impl RouteChangeSignal {
    /// Constant marker delivered with the upward call
    pub fn marker(self) -> i64 {
        CHANGE_MARKER
    }
}

/// Single-method observer registered with an OS notification source
pub trait RouteChangeListener: Send + Sync {
    fn on_route_changed(&self);
}

/// Sending half, handed to adapters and to OS callbacks
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: Sender<RouteChangeSignal>,
}

/// Receiving half, owned by the host side of the plugin
#[derive(Debug, Clone)]
pub struct ChangeReceiver {
    rx: Receiver<RouteChangeSignal>,
}

/// Create a connected notifier/receiver pair
pub fn change_channel() -> (ChangeNotifier, ChangeReceiver) {
    let (tx, rx) = flume::bounded(SIGNAL_CAPACITY);
    (ChangeNotifier { tx }, ChangeReceiver { rx })
}

impl ChangeNotifier {
    /// Schedule one change signal without blocking
    ///
    /// Returns false only if the receiving side is gone.
    pub fn notify(&self) -> bool {
        match self.tx.try_send(RouteChangeSignal) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::trace!("route change signal already pending");
                true
            }
            Err(TrySendError::Disconnected(_)) => {
                log::debug!("route change signal dropped, receiver closed");
                false
            }
        }
    }
}

impl RouteChangeListener for ChangeNotifier {
    fn on_route_changed(&self) {
        self.notify();
    }
}

impl ChangeReceiver {
    /// Take a pending signal (non-blocking)
    pub fn try_recv(&self) -> Option<RouteChangeSignal> {
        self.rx.try_recv().ok()
    }

    /// Whether a signal is waiting
    pub fn has_pending(&self) -> bool {
        !self.rx.is_empty()
    }

    /// Wait for the next signal from an async host loop
    ///
    /// Returns None once every notifier has been dropped.
    pub async fn recv_async(&self) -> Option<RouteChangeSignal> {
        self.rx.recv_async().await.ok()
    }

    /// Deliver any pending signal to the host
    ///
    /// Call this from the host thread (e.g. in its event loop tick).
    /// Returns the number of upward calls made.
    pub fn forward(&self, messenger: &dyn HostMessenger) -> usize {
        let mut delivered = 0;
        while let Some(signal) = self.try_recv() {
            messenger.invoke_method(INPUT_CHANGED_METHOD, signal.marker());
            delivered += 1;
        }
        delivered
    }
}

/// Registration state of the OS change callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState<T> {
    Unregistered,
    /// Listening, holding whatever the OS returned to identify the registration
    Listening(T),
}

impl<T> Default for ListenerState<T> {
    fn default() -> Self {
        ListenerState::Unregistered
    }
}

impl<T> ListenerState<T> {
    pub fn is_listening(&self) -> bool {
        matches!(self, ListenerState::Listening(_))
    }

    /// Move out of Listening, yielding the registration to release
    pub fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, ListenerState::Unregistered) {
            ListenerState::Listening(token) => Some(token),
            ListenerState::Unregistered => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMessenger {
        calls: Mutex<Vec<(String, i64)>>,
    }

    impl HostMessenger for RecordingMessenger {
        fn invoke_method(&self, method: &str, argument: i64) {
            self.calls.lock().unwrap().push((method.to_string(), argument));
        }
    }

    #[test]
    fn test_signals_coalesce() {
        let (notifier, receiver) = change_channel();
        assert!(notifier.notify());
        assert!(notifier.notify());
        assert!(receiver.try_recv().is_some());
        assert!(receiver.try_recv().is_none());
    }

    #[test]
    fn test_forward_uses_marker() {
        let (notifier, receiver) = change_channel();
        let messenger = RecordingMessenger::default();

        notifier.on_route_changed();
        assert_eq!(receiver.forward(&messenger), 1);
        assert_eq!(receiver.forward(&messenger), 0);

        let calls = messenger.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[("inputChanged".to_string(), 1)]);
    }

    #[test]
    fn test_notify_after_receiver_dropped() {
        let (notifier, receiver) = change_channel();
        drop(receiver);
        assert!(!notifier.notify());
    }

    #[test]
    fn test_notify_from_other_thread() {
        let (notifier, receiver) = change_channel();
        std::thread::spawn(move || notifier.on_route_changed())
            .join()
            .unwrap();
        assert!(receiver.has_pending());
    }

    #[tokio::test]
    async fn test_recv_async() {
        let (notifier, receiver) = change_channel();
        notifier.notify();
        assert_eq!(receiver.recv_async().await, Some(RouteChangeSignal));
        drop(notifier);
        assert_eq!(receiver.recv_async().await, None);
    }

    #[test]
    fn test_listener_state_take() {
        let mut state = ListenerState::Listening(7u32);
        assert!(state.is_listening());
        assert_eq!(state.take(), Some(7));
        assert_eq!(state.take(), None);
        assert!(!state.is_listening());
    }
}
