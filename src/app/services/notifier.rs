//! Synchronous fan-out of "settings changed" signals.
//!
//! Listeners are keyed by `Rc` identity: subscribing the same handle twice
//! keeps a single entry. Notification runs on the caller's thread in
//! subscription order, over a snapshot of the registry, so a listener may
//! unsubscribe itself while being notified. A failing listener is logged and
//! skipped; the rest are still notified.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

pub trait SettingsListener {
    fn settings_changed(&self) -> Result<(), ListenerError>;
}

impl<F> SettingsListener for F
where
    F: Fn() -> Result<(), ListenerError>,
{
    fn settings_changed(&self) -> Result<(), ListenerError> {
        self()
    }
}

/// Wrap a closure as a shareable listener handle.
pub fn listener<F>(f: F) -> Rc<dyn SettingsListener>
where
    F: Fn() -> Result<(), ListenerError> + 'static,
{
    Rc::new(f)
}

#[derive(Default)]
pub struct ChangeNotifier {
    listeners: RefCell<Vec<Rc<dyn SettingsListener>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the handle was already subscribed.
    pub fn subscribe(&self, listener: Rc<dyn SettingsListener>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            tracing::debug!("Listener already subscribed, ignoring");
            return false;
        }
        listeners.push(listener);
        tracing::debug!("Listener subscribed ({} total)", listeners.len());
        true
    }

    /// Returns false if the handle was not subscribed.
    pub fn unsubscribe(&self, listener: &Rc<dyn SettingsListener>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        let removed = listeners.len() != before;
        if removed {
            tracing::debug!("Listener unsubscribed ({} left)", listeners.len());
        }
        removed
    }

    /// Notify every subscribed listener. Returns how many of them failed.
    pub fn publish(&self) -> usize {
        let snapshot: Vec<Rc<dyn SettingsListener>> = self.listeners.borrow().clone();
        tracing::trace!("Notifying {} settings listener(s)", snapshot.len());

        let mut failures = 0;
        for (index, listener) in snapshot.iter().enumerate() {
            if let Err(e) = listener.settings_changed() {
                failures += 1;
                tracing::error!("Settings listener #{} failed: {}", index, e);
            }
        }
        failures
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.len())
            .finish()
    }
}

fn same_listener(a: &Rc<dyn SettingsListener>, b: &Rc<dyn SettingsListener>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
