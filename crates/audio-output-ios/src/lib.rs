//! Output routing for iOS-style audio sessions
//!
//! This crate provides:
//! - Classification of `AVAudioSession.Port` types into output categories
//! - Enumeration of the outputs in the current route
//! - Route switching via output override and preferred input
//! - Route change notifications forwarded as change signals
//!
//! Unlike the Android adapter there is no list of inactive outputs: the
//! session only describes the route that is live right now.

mod adapter;
mod enumerate;
mod port;
mod route;
mod session;
mod simulated;

pub use adapter::IosAdapter;
pub use enumerate::{available_outputs, current_output};
pub use port::{PortDescription, PortType, RouteDescription};
pub use route::{switch_to, RouteRequest};
pub use session::{
    AudioSession, CategoryOptions, ObserverToken, PortOverride, RouteChangeNotification,
    RouteChangeObserver, RouteChangeReason,
};
pub use simulated::SimulatedAudioSession;
