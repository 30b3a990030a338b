//! In-memory audio manager
//!
//! Stands in for the OS service on hosts without native bindings. Devices can
//! be plugged and unplugged at runtime; registered callbacks fire the way the
//! OS would fire them.

use std::collections::HashMap;
use std::sync::Arc;

use audio_output_core::{RouteError, RouteResult};

use crate::device_type::AudioDeviceInfo;
use crate::manager::{AudioDeviceCallback, AudioManager, AudioMode, CallbackId, DeviceFlags};

#[derive(Default)]
pub struct SimulatedAudioManager {
    devices: Vec<AudioDeviceInfo>,
    mode: AudioMode,
    sco_started: bool,
    sco_on: bool,
    speakerphone_on: bool,
    callbacks: HashMap<CallbackId, Arc<dyn AudioDeviceCallback>>,
    next_callback_id: u64,
    query_unavailable: bool,
    reject_commands: bool,
    release: Option<String>,
}

impl SimulatedAudioManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager reporting the given OS release (e.g. "14")
    pub fn with_release(release: impl Into<String>) -> Self {
        Self {
            release: Some(release.into()),
            ..Self::default()
        }
    }

    /// Plug in a device and fire `on_audio_devices_added`
    pub fn connect(&mut self, device: AudioDeviceInfo) {
        log::debug!("simulated: connect {:?}", device.product_name);
        self.devices.push(device.clone());
        for callback in self.callbacks.values() {
            callback.on_audio_devices_added(std::slice::from_ref(&device));
        }
    }

    /// Unplug a device by id and fire `on_audio_devices_removed`
    ///
    /// Returns false if no such device was connected.
    pub fn disconnect(&mut self, id: i32) -> bool {
        let Some(index) = self.devices.iter().position(|d| d.id == id) else {
            return false;
        };
        let device = self.devices.remove(index);
        log::debug!("simulated: disconnect {:?}", device.product_name);
        for callback in self.callbacks.values() {
            callback.on_audio_devices_removed(std::slice::from_ref(&device));
        }
        true
    }

    /// Make `devices()` return `None`
    pub fn set_query_available(&mut self, available: bool) {
        self.query_unavailable = !available;
    }

    /// Make every setter fail with `SessionRejected`
    pub fn reject_commands(&mut self, reject: bool) {
        self.reject_commands = reject;
    }

    /// Whether the SCO link was last started rather than stopped
    pub fn sco_started(&self) -> bool {
        self.sco_started
    }

    /// Number of device callbacks currently registered
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    fn check(&self, command: &str) -> RouteResult<()> {
        if self.reject_commands {
            Err(RouteError::SessionRejected(format!("{command} refused")))
        } else {
            Ok(())
        }
    }
}

impl AudioManager for SimulatedAudioManager {
    fn devices(&self, flags: DeviceFlags) -> Option<Vec<AudioDeviceInfo>> {
        if self.query_unavailable {
            return None;
        }
        Some(
            self.devices
                .iter()
                .filter(|device| flags.admits(device.is_sink))
                .cloned()
                .collect(),
        )
    }

    fn mode(&self) -> AudioMode {
        self.mode
    }

    fn set_mode(&mut self, mode: AudioMode) -> RouteResult<()> {
        self.check("setMode")?;
        self.mode = mode;
        Ok(())
    }

    fn start_bluetooth_sco(&mut self) -> RouteResult<()> {
        self.check("startBluetoothSco")?;
        self.sco_started = true;
        Ok(())
    }

    fn stop_bluetooth_sco(&mut self) -> RouteResult<()> {
        self.check("stopBluetoothSco")?;
        self.sco_started = false;
        Ok(())
    }

    fn is_bluetooth_sco_on(&self) -> bool {
        self.sco_on
    }

    fn set_bluetooth_sco_on(&mut self, on: bool) -> RouteResult<()> {
        self.check("setBluetoothScoOn")?;
        self.sco_on = on;
        Ok(())
    }

    fn is_speakerphone_on(&self) -> bool {
        self.speakerphone_on
    }

    fn set_speakerphone_on(&mut self, on: bool) -> RouteResult<()> {
        self.check("setSpeakerphoneOn")?;
        self.speakerphone_on = on;
        Ok(())
    }

    fn register_audio_device_callback(
        &mut self,
        callback: Arc<dyn AudioDeviceCallback>,
    ) -> RouteResult<CallbackId> {
        let id = CallbackId(self.next_callback_id);
        self.next_callback_id += 1;
        self.callbacks.insert(id, callback);
        Ok(id)
    }

    fn unregister_audio_device_callback(&mut self, id: CallbackId) {
        self.callbacks.remove(&id);
    }

    fn os_release(&self) -> Option<String> {
        self.release.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_type::AudioDeviceType;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        added: AtomicUsize,
        removed: AtomicUsize,
    }

    impl AudioDeviceCallback for Counter {
        fn on_audio_devices_added(&self, added: &[AudioDeviceInfo]) {
            self.added.fetch_add(added.len(), Ordering::Relaxed);
        }

        fn on_audio_devices_removed(&self, removed: &[AudioDeviceInfo]) {
            self.removed.fetch_add(removed.len(), Ordering::Relaxed);
        }
    }

    #[test]
    fn test_callbacks_fire_until_unregistered() {
        let mut manager = SimulatedAudioManager::new();
        let counter = Arc::new(Counter::default());
        let id = manager.register_audio_device_callback(counter.clone()).unwrap();

        manager.connect(AudioDeviceInfo::output(1, "Jack", AudioDeviceType::WIRED_HEADSET));
        assert!(manager.disconnect(1));
        assert!(!manager.disconnect(1));

        manager.unregister_audio_device_callback(id);
        manager.connect(AudioDeviceInfo::output(2, "Jack", AudioDeviceType::WIRED_HEADSET));

        assert_eq!(counter.added.load(Ordering::Relaxed), 1);
        assert_eq!(counter.removed.load(Ordering::Relaxed), 1);
        assert_eq!(manager.callback_count(), 0);
    }
}
