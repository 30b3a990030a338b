//! Output routing for Android-style audio managers
//!
//! This crate provides:
//! - Classification of `AudioDeviceInfo.TYPE_*` codes into output categories
//! - Enumeration of available outputs with a synthetic earpiece entry
//! - Route switching via mode / speakerphone / Bluetooth SCO profiles
//! - Device added/removed callbacks forwarded as route change signals
//!
//! # Example Usage
//!
//! ```ignore
//! use audio_output_android::{AndroidAdapter, SimulatedAudioManager};
//! use audio_output_core::{AudioOutputPlugin, PluginConfig};
//!
//! let config = PluginConfig::default();
//! let adapter = AndroidAdapter::new(SimulatedAudioManager::new(), &config);
//! let mut plugin = AudioOutputPlugin::new(adapter, config);
//! plugin.attach()?;
//! let outputs = plugin.handle("getAvailableOutputs");
//! ```

mod adapter;
mod device_type;
mod enumerate;
mod manager;
mod route;
mod simulated;

pub use adapter::AndroidAdapter;
pub use device_type::{AudioDeviceInfo, AudioDeviceType};
pub use enumerate::{available_outputs, current_output, outputs_in};
pub use manager::{AudioDeviceCallback, AudioManager, AudioMode, CallbackId, DeviceFlags};
pub use route::{switch_to, ScoLink, SessionProfile};
pub use simulated::SimulatedAudioManager;
