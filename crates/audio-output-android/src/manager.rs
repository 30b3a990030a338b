//! Audio manager trait for platform bindings
//!
//! Mirrors the subset of `android.media.AudioManager` the adapter needs. A
//! JNI binding implements it on device; [`crate::SimulatedAudioManager`]
//! implements it in memory.

use std::sync::Arc;

use audio_output_core::RouteResult;
use serde::{Deserialize, Serialize};

use crate::device_type::AudioDeviceInfo;

/// `AudioManager.MODE_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AudioMode {
    #[default]
    Normal = 0,
    Ringtone = 1,
    InCall = 2,
    InCommunication = 3,
}

/// `AudioManager.GET_DEVICES_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceFlags {
    Inputs = 1,
    Outputs = 2,
    All = 3,
}

impl DeviceFlags {
    /// Whether a device with the given direction passes this filter
    pub fn admits(self, is_sink: bool) -> bool {
        match self {
            DeviceFlags::Inputs => !is_sink,
            DeviceFlags::Outputs => is_sink,
            DeviceFlags::All => true,
        }
    }
}

/// Identifies one registered device callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(pub u64);

/// `android.media.AudioDeviceCallback`
///
/// Invoked on the OS thread chosen at registration.
pub trait AudioDeviceCallback: Send + Sync {
    fn on_audio_devices_added(&self, added: &[AudioDeviceInfo]);
    fn on_audio_devices_removed(&self, removed: &[AudioDeviceInfo]);
}

/// The Android audio manager
///
/// Setters return `RouteError::SessionRejected` when the OS refuses them.
pub trait AudioManager {
    /// `getDevices(flags)`; `None` when the service cannot be queried
    fn devices(&self, flags: DeviceFlags) -> Option<Vec<AudioDeviceInfo>>;

    fn mode(&self) -> AudioMode;
    fn set_mode(&mut self, mode: AudioMode) -> RouteResult<()>;

    fn start_bluetooth_sco(&mut self) -> RouteResult<()>;
    fn stop_bluetooth_sco(&mut self) -> RouteResult<()>;
    fn is_bluetooth_sco_on(&self) -> bool;
    fn set_bluetooth_sco_on(&mut self, on: bool) -> RouteResult<()>;

    fn is_speakerphone_on(&self) -> bool;
    fn set_speakerphone_on(&mut self, on: bool) -> RouteResult<()>;

    fn register_audio_device_callback(
        &mut self,
        callback: Arc<dyn AudioDeviceCallback>,
    ) -> RouteResult<CallbackId>;
    fn unregister_audio_device_callback(&mut self, id: CallbackId);

    /// `Build.VERSION.RELEASE`
    fn os_release(&self) -> Option<String> {
        None
    }
}
