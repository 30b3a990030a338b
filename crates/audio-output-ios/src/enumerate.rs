//! Output enumeration
//!
//! The audio session only exposes the outputs of the *currently active*
//! route; there is no list of available-but-inactive outputs. Unknown port
//! types are reported as such rather than dropped.

use audio_output_core::OutputDevice;

use crate::session::AudioSession;

/// Outputs of the current route, in route order
pub fn available_outputs<S: AudioSession + ?Sized>(session: &S) -> Vec<OutputDevice> {
    session
        .current_route()
        .outputs
        .iter()
        .map(|port| port.to_output_device())
        .collect()
}

/// First output of the current route, or `("unknown", "0")`
pub fn current_output<S: AudioSession + ?Sized>(session: &S) -> OutputDevice {
    session
        .current_route()
        .outputs
        .first()
        .map(|port| port.to_output_device())
        .unwrap_or_else(OutputDevice::unknown)
}
