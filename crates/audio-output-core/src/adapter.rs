//! Platform adapter trait
//!
//! Defines the uniform interface both platform adapters implement:
//! - **Android**: lists every *available* output plus a synthetic earpiece entry
//! - **iOS**: lists only the outputs of the *currently active* route
//!
//! The enumeration asymmetry is a platform constraint. Callers must not assume
//! "available" means the same thing on both platforms.

use crate::device::{OutputCategory, OutputDevice};
use crate::error::RouteResult;
use crate::notifier::ChangeNotifier;

/// One platform's view of the OS audio routing
pub trait RouteAdapter {
    /// Short platform label for logs (e.g. "android")
    fn platform(&self) -> &'static str;

    /// Register the OS change callback, forwarding events to `notifier`
    ///
    /// Must be called at most once per attach/detach cycle; a second call
    /// while listening returns `RouteError::AlreadyAttached`.
    fn attach(&mut self, notifier: ChangeNotifier) -> RouteResult<()>;

    /// Remove the OS change callback and reset the session mode
    ///
    /// Idempotent: detaching an unattached adapter does nothing.
    fn detach(&mut self);

    /// Whether the OS change callback is currently registered
    fn is_attached(&self) -> bool;

    /// Enumerate outputs. Never fails; an unavailable query yields no hardware entries.
    fn available_outputs(&self) -> Vec<OutputDevice>;

    /// The output currently carrying audio
    ///
    /// `None` means the platform does not support the query.
    fn current_output(&self) -> Option<OutputDevice>;

    /// Ask the OS to prefer `target` as the active output
    ///
    /// Best effort: `true` means the OS accepted the commands, not that the
    /// physical route changed. OS errors are caught and reported as `false`.
    fn change_to(&mut self, target: OutputCategory) -> bool;

    /// OS name and version, if known
    fn platform_version(&self) -> Option<String> {
        None
    }
}
