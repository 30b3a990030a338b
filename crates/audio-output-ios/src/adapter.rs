//! iOS route adapter

use std::sync::Arc;

use audio_output_core::{
    ChangeNotifier, ListenerState, OutputCategory, OutputDevice, PluginConfig, RouteAdapter,
    RouteChangeListener, RouteError, RouteResult, SessionMode, SessionSetup,
};

use crate::enumerate;
use crate::route;
use crate::session::{
    AudioSession, CategoryOptions, ObserverToken, RouteChangeNotification, RouteChangeObserver,
};

/// Forwards route change notifications with a readable reason
struct RouteChangeForwarder {
    notifier: ChangeNotifier,
}

impl RouteChangeObserver for RouteChangeForwarder {
    fn on_route_change(&self, notification: &RouteChangeNotification) {
        match notification.parsed_reason() {
            Some(reason) => {
                log::debug!("ios: route changed ({:?})", reason);
                self.notifier.on_route_changed();
            }
            None => log::debug!("ios: ignoring route change without reason"),
        }
    }
}

/// Route adapter over an iOS [`AudioSession`]
pub struct IosAdapter<S: AudioSession> {
    session: S,
    setup: SessionSetup,
    listener: ListenerState<ObserverToken>,
    /// Whether attach activated the session (and detach should deactivate it)
    activated: bool,
}

impl<S: AudioSession> IosAdapter<S> {
    pub fn new(session: S, config: &PluginConfig) -> Self {
        Self {
            session,
            setup: config.session,
            listener: ListenerState::Unregistered,
            activated: false,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    /// Apply category, mode and options, then activate if configured
    fn configure_session(&mut self) -> RouteResult<()> {
        let setup = self.setup;
        self.session
            .set_category(setup.category, setup.mode, CategoryOptions::from(&setup))?;
        if setup.activate_on_attach {
            self.session.set_active(true)?;
            self.activated = true;
        }
        Ok(())
    }
}

impl<S: AudioSession> RouteAdapter for IosAdapter<S> {
    fn platform(&self) -> &'static str {
        "ios"
    }

    fn attach(&mut self, notifier: ChangeNotifier) -> RouteResult<()> {
        if self.listener.is_listening() {
            return Err(RouteError::AlreadyAttached);
        }
        let observer = Arc::new(RouteChangeForwarder { notifier });
        let token = self.session.add_route_change_observer(observer)?;
        self.listener = ListenerState::Listening(token);

        // Routing still works on a misconfigured session, just with fewer routes
        if let Err(e) = self.configure_session() {
            log::warn!("ios: error setting up audio session: {}", e);
        }
        Ok(())
    }

    fn detach(&mut self) {
        let Some(token) = self.listener.take() else {
            return;
        };
        self.session.remove_observer(token);
        if let Err(e) = self.session.set_mode(SessionMode::Default) {
            log::warn!("ios: failed to reset session mode: {}", e);
        }
        if std::mem::take(&mut self.activated) {
            if let Err(e) = self.session.set_active(false) {
                log::warn!("ios: failed to deactivate session: {}", e);
            }
        }
    }

    fn is_attached(&self) -> bool {
        self.listener.is_listening()
    }

    fn available_outputs(&self) -> Vec<OutputDevice> {
        enumerate::available_outputs(&self.session)
    }

    fn current_output(&self) -> Option<OutputDevice> {
        Some(enumerate::current_output(&self.session))
    }

    fn change_to(&mut self, target: OutputCategory) -> bool {
        route::switch_to(&mut self.session, target)
    }

    fn platform_version(&self) -> Option<String> {
        self.session
            .system_version()
            .map(|version| format!("iOS {version}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{PortDescription, PortType};
    use crate::session::{PortOverride, RouteChangeReason};
    use crate::simulated::SimulatedAudioSession;
    use audio_output_core::{AudioOutputPlugin, MethodResponse, SessionCategory};
    use serde_json::json;

    fn plugin() -> AudioOutputPlugin<IosAdapter<SimulatedAudioSession>> {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = PluginConfig::default();
        let adapter = IosAdapter::new(SimulatedAudioSession::with_system_version("17.2"), &config);
        AudioOutputPlugin::new(adapter, config)
    }

    #[test]
    fn test_attach_configures_session() {
        let mut plugin = plugin();
        plugin.attach().unwrap();

        let session = plugin.adapter().session();
        assert_eq!(session.category(), SessionCategory::PlayAndRecord);
        assert_eq!(session.mode(), SessionMode::Default);
        assert!(session.options().allow_bluetooth && session.options().allow_bluetooth_a2dp);
        assert!(session.is_active());
        assert_eq!(session.observer_count(), 1);
    }

    #[test]
    fn test_setup_failure_is_not_fatal() {
        let mut plugin = plugin();
        plugin.adapter_mut().session_mut().reject_commands(true);
        plugin.attach().unwrap();
        assert!(plugin.is_attached());
        assert!(!plugin.adapter().session().is_active());
    }

    #[test]
    fn test_detach_releases_and_resets() {
        let mut plugin = plugin();
        plugin.attach().unwrap();
        plugin
            .adapter_mut()
            .session_mut()
            .set_mode(SessionMode::VoiceChat)
            .unwrap();

        plugin.detach();
        let session = plugin.adapter().session();
        assert_eq!(session.observer_count(), 0);
        assert_eq!(session.mode(), SessionMode::Default);
        assert!(!session.is_active());

        plugin.detach();
        plugin.attach().unwrap();
        plugin.detach();
        assert_eq!(plugin.adapter().session().observer_count(), 0);
    }

    #[test]
    fn test_detach_always_resets_mode() {
        let config: PluginConfig =
            serde_json::from_value(json!({ "reset_mode_on_detach": false })).unwrap();
        let adapter = IosAdapter::new(SimulatedAudioSession::new(), &config);
        let mut plugin = AudioOutputPlugin::new(adapter, config);

        plugin.attach().unwrap();
        plugin
            .adapter_mut()
            .session_mut()
            .set_mode(SessionMode::VoiceChat)
            .unwrap();
        plugin.detach();
        assert_eq!(plugin.adapter().session().mode(), SessionMode::Default);
    }

    #[test]
    fn test_route_changes_are_forwarded() {
        let mut plugin = plugin();
        plugin.attach().unwrap();

        plugin
            .adapter_mut()
            .session_mut()
            .set_outputs(vec![PortDescription::new(PortType::Headphones, "Headphones")]);
        assert!(plugin.change_receiver().try_recv().is_some());

        plugin
            .adapter()
            .session()
            .post(RouteChangeNotification { reason: Some(42) });
        assert!(plugin.change_receiver().try_recv().is_none());

        plugin
            .adapter()
            .session()
            .post(RouteChangeNotification::with_reason(RouteChangeReason::WakeFromSleep));
        assert!(plugin.change_receiver().try_recv().is_some());
    }

    #[test]
    fn test_no_signal_after_detach() {
        let mut plugin = plugin();
        plugin.attach().unwrap();
        plugin.detach();

        plugin
            .adapter_mut()
            .session_mut()
            .set_outputs(vec![PortDescription::new(PortType::BuiltInSpeaker, "Speaker")]);
        assert!(!plugin.change_receiver().has_pending());
    }

    #[test]
    fn test_commands() {
        let mut plugin = plugin();
        plugin.adapter_mut().session_mut().set_outputs(vec![PortDescription::new(
            PortType::BuiltInReceiver,
            "Receiver",
        )]);

        assert_eq!(plugin.handle_value("getCurrentOutput"), Some(json!(["Receiver", "1"])));
        assert_eq!(plugin.handle("changeToSpeaker"), MethodResponse::Bool(true));
        assert_eq!(plugin.adapter().session().output_override(), PortOverride::Speaker);
        assert_eq!(plugin.handle_value("getAvailableOutputs"), Some(json!([["Speaker", "2"]])));
        assert_eq!(plugin.handle("changeToReceiver"), MethodResponse::Bool(true));
        assert_eq!(plugin.handle_value("getCurrentOutput"), Some(json!(["Receiver", "1"])));
        assert_eq!(plugin.handle_value("getPlatformVersion"), Some(json!("iOS 17.2")));
    }

    #[test]
    fn test_bluetooth_without_device_is_tolerated() {
        let mut plugin = plugin();
        assert_eq!(plugin.handle("changeToBluetooth"), MethodResponse::Bool(false));
        assert!(plugin.change_receiver().has_pending());
        assert_eq!(plugin.handle_value("getCurrentOutput"), Some(json!(["unknown", "0"])));
    }

    #[test]
    fn test_headphones_prefers_headset_mic() {
        let mut plugin = plugin();
        let headset = PortDescription::new(PortType::HeadsetMic, "Headset Microphone");
        plugin
            .adapter_mut()
            .session_mut()
            .set_available_inputs(Some(vec![headset.clone()]));

        assert_eq!(plugin.handle("changeToHeadphones"), MethodResponse::Bool(true));
        assert_eq!(plugin.adapter().session().preferred_input(), Some(&headset));
    }

    #[test]
    fn test_unknown_method() {
        let mut plugin = plugin();
        assert_eq!(plugin.handle("getAvailableInputs"), MethodResponse::NotImplemented);
    }
}
