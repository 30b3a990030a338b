//! Route switching as explicit requests
//!
//! Receiver and speaker are reached through the output override. Wired and
//! Bluetooth routes cannot be forced directly; the session is asked to prefer
//! a matching input port, which drags the output along with it.

use audio_output_core::{OutputCategory, RouteResult};

use crate::port::PortType;
use crate::session::{AudioSession, PortOverride};

/// What to ask of the session for one target category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteRequest {
    /// Set the output override
    Override(PortOverride),
    /// Prefer the first port of any of these types
    PreferPorts(Vec<PortType>),
}

impl RouteRequest {
    /// Request for a target category; `None` for `Unknown`
    pub fn for_target(target: OutputCategory) -> Option<Self> {
        match target {
            OutputCategory::Receiver => Some(Self::Override(PortOverride::None)),
            OutputCategory::Speaker => Some(Self::Override(PortOverride::Speaker)),
            OutputCategory::WiredHeadset => Some(Self::PreferPorts(vec![
                PortType::HeadsetMic,
                PortType::Headphones,
            ])),
            OutputCategory::Bluetooth => Some(Self::PreferPorts(vec![
                PortType::BluetoothLe,
                PortType::BluetoothHfp,
                PortType::BluetoothA2dp,
            ])),
            OutputCategory::Unknown => None,
        }
    }

    /// Execute against the session
    ///
    /// `Ok(false)` means no matching port exists; `Err` means the OS refused.
    pub fn apply<S: AudioSession + ?Sized>(&self, session: &mut S) -> RouteResult<bool> {
        match self {
            RouteRequest::Override(port) => {
                session.override_output_audio_port(*port)?;
                Ok(true)
            }
            RouteRequest::PreferPorts(ports) => prefer_ports(session, ports),
        }
    }
}

/// Already routed to a matching output → true; else prefer a matching input
fn prefer_ports<S: AudioSession + ?Sized>(session: &mut S, ports: &[PortType]) -> RouteResult<bool> {
    let route = session.current_route();
    if route.outputs.iter().any(|output| ports.contains(&output.port_type)) {
        return Ok(true);
    }

    let inputs = session.available_inputs().unwrap_or_default();
    match inputs.iter().find(|input| ports.contains(&input.port_type)) {
        Some(input) => {
            log::debug!("ios: preferring input {}", input.port_name);
            session.set_preferred_input(input)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Switch the session to `target`, catching OS errors
pub fn switch_to<S: AudioSession + ?Sized>(session: &mut S, target: OutputCategory) -> bool {
    let Some(request) = RouteRequest::for_target(target) else {
        return false;
    };
    match request.apply(session) {
        Ok(switched) => switched,
        Err(e) => {
            log::warn!("ios: switch to {} rejected: {}", target, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortDescription;
    use crate::simulated::SimulatedAudioSession;

    #[test]
    fn test_speaker_and_receiver_override() {
        let mut session = SimulatedAudioSession::new();
        assert!(switch_to(&mut session, OutputCategory::Speaker));
        assert_eq!(session.output_override(), PortOverride::Speaker);
        assert!(switch_to(&mut session, OutputCategory::Receiver));
        assert_eq!(session.output_override(), PortOverride::None);
    }

    #[test]
    fn test_already_routed_output() {
        let mut session = SimulatedAudioSession::new();
        session.set_outputs(vec![PortDescription::new(PortType::BluetoothA2dp, "Buds")]);
        assert!(switch_to(&mut session, OutputCategory::Bluetooth));
        assert_eq!(session.preferred_input(), None);
    }

    #[test]
    fn test_prefers_matching_input() {
        let mut session = SimulatedAudioSession::new();
        let mic = PortDescription::new(PortType::BuiltInMic, "iPhone Microphone");
        let hfp = PortDescription::new(PortType::BluetoothHfp, "Car kit");
        session.set_available_inputs(Some(vec![mic, hfp.clone()]));

        assert!(switch_to(&mut session, OutputCategory::Bluetooth));
        assert_eq!(session.preferred_input(), Some(&hfp));
    }

    #[test]
    fn test_no_matching_port() {
        let mut session = SimulatedAudioSession::new();
        assert!(!switch_to(&mut session, OutputCategory::WiredHeadset));
        assert!(!switch_to(&mut session, OutputCategory::Unknown));
    }

    #[test]
    fn test_rejected_preferred_input() {
        let mut session = SimulatedAudioSession::new();
        session.set_available_inputs(Some(vec![PortDescription::new(
            PortType::HeadsetMic,
            "Headset",
        )]));
        session.reject_commands(true);
        assert!(!switch_to(&mut session, OutputCategory::WiredHeadset));
        assert!(!switch_to(&mut session, OutputCategory::Speaker));
    }

    #[test]
    fn test_headset_request_ports() {
        assert_eq!(
            RouteRequest::for_target(OutputCategory::WiredHeadset),
            Some(RouteRequest::PreferPorts(vec![PortType::HeadsetMic, PortType::Headphones]))
        );
    }
}
