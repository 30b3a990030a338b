//! In-memory audio session
//!
//! Stands in for `AVAudioSession` on hosts without native bindings. Route
//! changes made through it are posted to registered observers the way the
//! notification center would post them.

use std::collections::HashMap;
use std::sync::Arc;

use audio_output_core::{RouteError, RouteResult, SessionCategory, SessionMode};

use crate::port::{PortDescription, PortType, RouteDescription};
use crate::session::{
    AudioSession, CategoryOptions, ObserverToken, PortOverride, RouteChangeNotification,
    RouteChangeObserver, RouteChangeReason,
};

#[derive(Default)]
pub struct SimulatedAudioSession {
    route: RouteDescription,
    /// Outputs hidden by a speaker override, restored when it is cleared
    overridden_outputs: Option<Vec<PortDescription>>,
    available_inputs: Option<Vec<PortDescription>>,
    output_override: PortOverride,
    preferred_input: Option<PortDescription>,
    category: SessionCategory,
    mode: SessionMode,
    options: CategoryOptions,
    active: bool,
    observers: HashMap<ObserverToken, Arc<dyn RouteChangeObserver>>,
    next_token: u64,
    reject_commands: bool,
    system_version: Option<String>,
}

impl SimulatedAudioSession {
    pub fn new() -> Self {
        Self {
            available_inputs: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Session reporting the given system version (e.g. "17.2")
    pub fn with_system_version(version: impl Into<String>) -> Self {
        Self {
            system_version: Some(version.into()),
            ..Self::new()
        }
    }

    /// Replace the outputs of the current route and post `NewDeviceAvailable`
    pub fn set_outputs(&mut self, outputs: Vec<PortDescription>) {
        self.route.outputs = outputs;
        self.overridden_outputs = None;
        self.post(RouteChangeNotification::with_reason(
            RouteChangeReason::NewDeviceAvailable,
        ));
    }

    /// Replace the available inputs; `None` makes the query unavailable
    pub fn set_available_inputs(&mut self, inputs: Option<Vec<PortDescription>>) {
        self.available_inputs = inputs;
    }

    /// Deliver a notification to every observer
    pub fn post(&self, notification: RouteChangeNotification) {
        for observer in self.observers.values() {
            observer.on_route_change(&notification);
        }
    }

    /// Make every setter fail with `SessionRejected`
    pub fn reject_commands(&mut self, reject: bool) {
        self.reject_commands = reject;
    }

    pub fn output_override(&self) -> PortOverride {
        self.output_override
    }

    pub fn preferred_input(&self) -> Option<&PortDescription> {
        self.preferred_input.as_ref()
    }

    pub fn options(&self) -> CategoryOptions {
        self.options
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn check(&self, command: &str) -> RouteResult<()> {
        if self.reject_commands {
            Err(RouteError::SessionRejected(format!("{command} refused")))
        } else {
            Ok(())
        }
    }
}

impl AudioSession for SimulatedAudioSession {
    fn current_route(&self) -> RouteDescription {
        self.route.clone()
    }

    fn available_inputs(&self) -> Option<Vec<PortDescription>> {
        self.available_inputs.clone()
    }

    fn override_output_audio_port(&mut self, port: PortOverride) -> RouteResult<()> {
        self.check("overrideOutputAudioPort")?;
        match port {
            PortOverride::Speaker if self.overridden_outputs.is_none() => {
                let speaker = PortDescription::new(PortType::BuiltInSpeaker, "Speaker");
                self.overridden_outputs =
                    Some(std::mem::replace(&mut self.route.outputs, vec![speaker]));
            }
            PortOverride::None => {
                if let Some(outputs) = self.overridden_outputs.take() {
                    self.route.outputs = outputs;
                }
            }
            PortOverride::Speaker => {}
        }
        self.output_override = port;
        self.post(RouteChangeNotification::with_reason(RouteChangeReason::Override));
        Ok(())
    }

    fn set_preferred_input(&mut self, input: &PortDescription) -> RouteResult<()> {
        self.check("setPreferredInput")?;
        self.preferred_input = Some(input.clone());
        self.post(RouteChangeNotification::with_reason(
            RouteChangeReason::RouteConfigurationChange,
        ));
        Ok(())
    }

    fn category(&self) -> SessionCategory {
        self.category
    }

    fn mode(&self) -> SessionMode {
        self.mode
    }

    fn set_category(
        &mut self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> RouteResult<()> {
        self.check("setCategory")?;
        self.category = category;
        self.mode = mode;
        self.options = options;
        Ok(())
    }

    fn set_mode(&mut self, mode: SessionMode) -> RouteResult<()> {
        self.check("setMode")?;
        self.mode = mode;
        Ok(())
    }

    fn set_active(&mut self, active: bool) -> RouteResult<()> {
        self.check("setActive")?;
        self.active = active;
        Ok(())
    }

    fn add_route_change_observer(
        &mut self,
        observer: Arc<dyn RouteChangeObserver>,
    ) -> RouteResult<ObserverToken> {
        let token = ObserverToken(self.next_token);
        self.next_token += 1;
        self.observers.insert(token, observer);
        Ok(token)
    }

    fn remove_observer(&mut self, token: ObserverToken) {
        self.observers.remove(&token);
    }

    fn system_version(&self) -> Option<String> {
        self.system_version.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_override_restores_route() {
        let mut session = SimulatedAudioSession::new();
        let receiver = PortDescription::new(PortType::BuiltInReceiver, "Receiver");
        session.set_outputs(vec![receiver.clone()]);

        session.override_output_audio_port(PortOverride::Speaker).unwrap();
        session.override_output_audio_port(PortOverride::Speaker).unwrap();
        assert_eq!(session.current_route().outputs[0].port_type, PortType::BuiltInSpeaker);

        session.override_output_audio_port(PortOverride::None).unwrap();
        assert_eq!(session.current_route().outputs, vec![receiver]);
    }

    #[test]
    fn test_rejected_commands_leave_state() {
        let mut session = SimulatedAudioSession::new();
        session.reject_commands(true);
        assert!(session.set_active(true).is_err());
        assert!(!session.is_active());
    }
}
