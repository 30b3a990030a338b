//! Host channel vocabulary
//!
//! The host delivers named commands without arguments and expects one of a
//! few response shapes back. Upward change notifications travel over the same
//! channel as a method call carrying a constant marker.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::device::{OutputCategory, OutputDevice};

/// Default channel name shared with the host
pub const DEFAULT_CHANNEL_NAME: &str = "flutter_audio_output";

/// Upward method invoked when the output route changed
pub const INPUT_CHANGED_METHOD: &str = "inputChanged";

/// Constant argument of the upward change call
pub const CHANGE_MARKER: i64 = 1;

/// Commands the host can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodCall {
    GetAvailableOutputs,
    GetCurrentOutput,
    GetPlatformVersion,
    ChangeTo(OutputCategory),
}

impl MethodCall {
    /// Every recognised command
    pub const ALL: [MethodCall; 7] = [
        MethodCall::GetAvailableOutputs,
        MethodCall::GetCurrentOutput,
        MethodCall::GetPlatformVersion,
        MethodCall::ChangeTo(OutputCategory::Receiver),
        MethodCall::ChangeTo(OutputCategory::Speaker),
        MethodCall::ChangeTo(OutputCategory::WiredHeadset),
        MethodCall::ChangeTo(OutputCategory::Bluetooth),
    ];

    /// Wire name of the command
    pub fn name(self) -> &'static str {
        match self {
            MethodCall::GetAvailableOutputs => "getAvailableOutputs",
            MethodCall::GetCurrentOutput => "getCurrentOutput",
            MethodCall::GetPlatformVersion => "getPlatformVersion",
            MethodCall::ChangeTo(OutputCategory::Receiver) => "changeToReceiver",
            MethodCall::ChangeTo(OutputCategory::Speaker) => "changeToSpeaker",
            MethodCall::ChangeTo(OutputCategory::WiredHeadset) => "changeToHeadphones",
            MethodCall::ChangeTo(OutputCategory::Bluetooth) => "changeToBluetooth",
            // Not constructible through `from_name`
            MethodCall::ChangeTo(OutputCategory::Unknown) => "changeToUnknown",
        }
    }

    /// Look up a command by wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|call| call.name() == name)
    }
}

impl fmt::Display for MethodCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MethodCall {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unrecognised method: {s}"))
    }
}

/// Response handed back to the host for one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodResponse {
    /// Outcome of a route switch
    Bool(bool),
    /// Sequence of devices, each encoded as a pair
    Devices(Vec<OutputDevice>),
    /// A single device pair
    Device(OutputDevice),
    /// Free text (platform version)
    Text(String),
    /// The command does not exist on this platform
    NotImplemented,
}

impl MethodResponse {
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, MethodResponse::NotImplemented)
    }

    /// Encode the response as the host expects it
    ///
    /// `NotImplemented` has no payload and encodes as `null`; use
    /// [`MethodResponse::is_not_implemented`] to tell it apart from a result.
    pub fn to_value(&self) -> Value {
        match self {
            MethodResponse::Bool(ok) => Value::Bool(*ok),
            MethodResponse::Devices(devices) => {
                Value::Array(devices.iter().map(pair_value).collect())
            }
            MethodResponse::Device(device) => pair_value(device),
            MethodResponse::Text(text) => Value::String(text.clone()),
            MethodResponse::NotImplemented => Value::Null,
        }
    }
}

fn pair_value(device: &OutputDevice) -> Value {
    Value::Array(
        device
            .to_pair()
            .into_iter()
            .map(Value::String)
            .collect(),
    )
}

/// Upward half of the host channel
///
/// Implemented by the host integration; the plugin calls it from the host's
/// own thread when forwarding change signals.
pub trait HostMessenger {
    fn invoke_method(&self, method: &str, argument: i64);
}
