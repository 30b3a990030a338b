//! Android route adapter

use std::sync::Arc;

use audio_output_core::{
    ChangeNotifier, ListenerState, OutputCategory, OutputDevice, PluginConfig, RouteAdapter,
    RouteChangeListener, RouteError, RouteResult,
};

use crate::device_type::AudioDeviceInfo;
use crate::enumerate;
use crate::manager::{AudioDeviceCallback, AudioManager, AudioMode, CallbackId};
use crate::route;

/// Forwards device added/removed events as route change signals
struct DeviceChangeForwarder {
    notifier: ChangeNotifier,
}

impl AudioDeviceCallback for DeviceChangeForwarder {
    fn on_audio_devices_added(&self, added: &[AudioDeviceInfo]) {
        log::debug!("android: {} device(s) added", added.len());
        self.notifier.on_route_changed();
    }

    fn on_audio_devices_removed(&self, removed: &[AudioDeviceInfo]) {
        log::debug!("android: {} device(s) removed", removed.len());
        self.notifier.on_route_changed();
    }
}

/// Route adapter over an Android [`AudioManager`]
pub struct AndroidAdapter<M: AudioManager> {
    manager: M,
    receiver_label: String,
    listener: ListenerState<CallbackId>,
}

impl<M: AudioManager> AndroidAdapter<M> {
    pub fn new(manager: M, config: &PluginConfig) -> Self {
        Self {
            manager,
            receiver_label: config.receiver_label.clone(),
            listener: ListenerState::Unregistered,
        }
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut M {
        &mut self.manager
    }
}

impl<M: AudioManager> RouteAdapter for AndroidAdapter<M> {
    fn platform(&self) -> &'static str {
        "android"
    }

    fn attach(&mut self, notifier: ChangeNotifier) -> RouteResult<()> {
        if self.listener.is_listening() {
            return Err(RouteError::AlreadyAttached);
        }
        let callback = Arc::new(DeviceChangeForwarder { notifier });
        let id = self.manager.register_audio_device_callback(callback)?;
        self.listener = ListenerState::Listening(id);
        Ok(())
    }

    fn detach(&mut self) {
        let Some(id) = self.listener.take() else {
            return;
        };
        self.manager.unregister_audio_device_callback(id);
        if let Err(e) = self.manager.set_mode(AudioMode::Normal) {
            log::warn!("android: failed to reset audio mode: {}", e);
        }
    }

    fn is_attached(&self) -> bool {
        self.listener.is_listening()
    }

    fn available_outputs(&self) -> Vec<OutputDevice> {
        enumerate::available_outputs(&self.manager, &self.receiver_label)
    }

    fn current_output(&self) -> Option<OutputDevice> {
        Some(enumerate::current_output(&self.manager, &self.receiver_label))
    }

    fn change_to(&mut self, target: OutputCategory) -> bool {
        route::switch_to(&mut self.manager, target)
    }

    fn platform_version(&self) -> Option<String> {
        self.manager
            .os_release()
            .map(|release| format!("Android {release}"))
    }
}
