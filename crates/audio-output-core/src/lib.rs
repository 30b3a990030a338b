//! Shared core for the audio output routing adapters
//!
//! This crate provides:
//! - The logical output categories and the `[name, code]` device encoding
//! - The host command vocabulary and response encoding
//! - The route change channel (OS callback → flume → host)
//! - The `RouteAdapter` trait both platform adapters implement
//! - `AudioOutputPlugin`, which dispatches host commands to an adapter
//!
//! # Architecture
//!
//! ```text
//! host command ──► AudioOutputPlugin::handle ──► RouteAdapter ──► OS audio API
//! OS event ──► RouteChangeListener ──► flume ──► forward_changes ──► HostMessenger
//! ```

mod adapter;
mod channel;
mod config;
mod device;
mod error;
mod notifier;
mod plugin;

pub use adapter::RouteAdapter;
pub use channel::{
    HostMessenger, MethodCall, MethodResponse, CHANGE_MARKER, DEFAULT_CHANNEL_NAME,
    INPUT_CHANGED_METHOD,
};
pub use config::{
    default_config_path, load_config, save_config, PluginConfig, SessionCategory, SessionMode,
    SessionSetup,
};
pub use device::{OutputCategory, OutputDevice};
pub use error::{RouteError, RouteResult};
pub use notifier::{
    change_channel, ChangeNotifier, ChangeReceiver, ListenerState, RouteChangeListener,
    RouteChangeSignal,
};
pub use plugin::AudioOutputPlugin;
