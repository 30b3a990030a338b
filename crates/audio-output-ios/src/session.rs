//! Audio session trait for platform bindings
//!
//! Mirrors the subset of `AVAudioSession` the adapter needs, plus the route
//! change notification delivered through the notification center.

use std::sync::Arc;

use audio_output_core::{RouteResult, SessionCategory, SessionMode, SessionSetup};

use crate::port::{PortDescription, RouteDescription};

/// `AVAudioSession.PortOverride`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortOverride {
    /// Let the session route normally (earpiece for play-and-record)
    #[default]
    None,
    /// Force the built-in loudspeaker
    Speaker,
}

/// Subset of `AVAudioSession.CategoryOptions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryOptions {
    pub allow_bluetooth: bool,
    pub allow_bluetooth_a2dp: bool,
}

impl From<&SessionSetup> for CategoryOptions {
    fn from(setup: &SessionSetup) -> Self {
        Self {
            allow_bluetooth: setup.allow_bluetooth,
            allow_bluetooth_a2dp: setup.allow_bluetooth_a2dp,
        }
    }
}

/// `AVAudioSession.RouteChangeReason`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteChangeReason {
    Unknown,
    NewDeviceAvailable,
    OldDeviceUnavailable,
    CategoryChange,
    Override,
    WakeFromSleep,
    NoSuitableRouteForCategory,
    RouteConfigurationChange,
}

impl RouteChangeReason {
    /// Parse the raw `AVAudioSessionRouteChangeReasonKey` value
    pub fn from_raw(raw: u64) -> Option<Self> {
        match raw {
            0 => Some(Self::Unknown),
            1 => Some(Self::NewDeviceAvailable),
            2 => Some(Self::OldDeviceUnavailable),
            3 => Some(Self::CategoryChange),
            4 => Some(Self::Override),
            6 => Some(Self::WakeFromSleep),
            7 => Some(Self::NoSuitableRouteForCategory),
            8 => Some(Self::RouteConfigurationChange),
            _ => None,
        }
    }

    pub fn as_raw(self) -> u64 {
        match self {
            Self::Unknown => 0,
            Self::NewDeviceAvailable => 1,
            Self::OldDeviceUnavailable => 2,
            Self::CategoryChange => 3,
            Self::Override => 4,
            Self::WakeFromSleep => 6,
            Self::NoSuitableRouteForCategory => 7,
            Self::RouteConfigurationChange => 8,
        }
    }
}

/// `routeChangeNotification` as delivered to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteChangeNotification {
    /// Raw reason from the user info, if present
    pub reason: Option<u64>,
}

impl RouteChangeNotification {
    pub fn with_reason(reason: RouteChangeReason) -> Self {
        Self {
            reason: Some(reason.as_raw()),
        }
    }

    /// Parsed reason; `None` if missing or not a known value
    pub fn parsed_reason(&self) -> Option<RouteChangeReason> {
        self.reason.and_then(RouteChangeReason::from_raw)
    }
}

/// Observer registered with the notification center
///
/// Called on whatever queue the OS posts on.
pub trait RouteChangeObserver: Send + Sync {
    fn on_route_change(&self, notification: &RouteChangeNotification);
}

/// Opaque token returned by `add_route_change_observer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverToken(pub u64);

/// The shared audio session
///
/// Setters return `RouteError::SessionRejected` when the OS throws.
pub trait AudioSession {
    fn current_route(&self) -> RouteDescription;

    /// `None` when the session cannot report inputs
    fn available_inputs(&self) -> Option<Vec<PortDescription>>;

    fn override_output_audio_port(&mut self, port: PortOverride) -> RouteResult<()>;
    fn set_preferred_input(&mut self, input: &PortDescription) -> RouteResult<()>;

    fn category(&self) -> SessionCategory;
    fn mode(&self) -> SessionMode;
    fn set_category(
        &mut self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> RouteResult<()>;
    fn set_mode(&mut self, mode: SessionMode) -> RouteResult<()>;
    fn set_active(&mut self, active: bool) -> RouteResult<()>;

    fn add_route_change_observer(
        &mut self,
        observer: Arc<dyn RouteChangeObserver>,
    ) -> RouteResult<ObserverToken>;
    fn remove_observer(&mut self, token: ObserverToken);

    /// `UIDevice.current.systemVersion`
    fn system_version(&self) -> Option<String> {
        None
    }
}
