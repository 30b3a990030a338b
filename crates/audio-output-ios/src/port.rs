//! Audio session port types and route descriptions
//!
//! Port types follow the raw string values of `AVAudioSession.Port`.
//! Unrecognised values are kept verbatim as [`PortType::Other`].

use std::fmt;

use audio_output_core::{OutputCategory, OutputDevice};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// `AVAudioSession.Port`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PortType {
    // Inputs
    LineIn,
    BuiltInMic,
    HeadsetMic,
    // Outputs
    LineOut,
    Headphones,
    BluetoothA2dp,
    BuiltInReceiver,
    BuiltInSpeaker,
    Hdmi,
    AirPlay,
    BluetoothLe,
    // Input and output
    BluetoothHfp,
    UsbAudio,
    CarAudio,
    Virtual,
    Other(String),
}

impl PortType {
    /// Raw `AVAudioSession.Port` value
    pub fn as_raw(&self) -> &str {
        match self {
            PortType::LineIn => "LineIn",
            PortType::BuiltInMic => "MicrophoneBuiltIn",
            PortType::HeadsetMic => "MicrophoneWired",
            PortType::LineOut => "LineOut",
            PortType::Headphones => "Headphones",
            PortType::BluetoothA2dp => "BluetoothA2DPOutput",
            PortType::BuiltInReceiver => "Receiver",
            PortType::BuiltInSpeaker => "Speaker",
            PortType::Hdmi => "HDMIOutput",
            PortType::AirPlay => "AirPlay",
            PortType::BluetoothLe => "BluetoothLE",
            PortType::BluetoothHfp => "BluetoothHFP",
            PortType::UsbAudio => "USBAudio",
            PortType::CarAudio => "CarAudio",
            PortType::Virtual => "Virtual",
            PortType::Other(raw) => raw,
        }
    }

    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "LineIn" => PortType::LineIn,
            "MicrophoneBuiltIn" => PortType::BuiltInMic,
            "MicrophoneWired" => PortType::HeadsetMic,
            "LineOut" => PortType::LineOut,
            "Headphones" => PortType::Headphones,
            "BluetoothA2DPOutput" => PortType::BluetoothA2dp,
            "Receiver" => PortType::BuiltInReceiver,
            "Speaker" => PortType::BuiltInSpeaker,
            "HDMIOutput" => PortType::Hdmi,
            "AirPlay" => PortType::AirPlay,
            "BluetoothLE" => PortType::BluetoothLe,
            "BluetoothHFP" => PortType::BluetoothHfp,
            "USBAudio" => PortType::UsbAudio,
            "CarAudio" => PortType::CarAudio,
            "Virtual" => PortType::Virtual,
            other => PortType::Other(other.to_string()),
        }
    }

    /// Logical category of this port type
    ///
    /// Total and pure: unlisted port types are `Unknown`.
    pub fn category(&self) -> OutputCategory {
        match self {
            PortType::BuiltInReceiver | PortType::BuiltInMic => OutputCategory::Receiver,
            PortType::BuiltInSpeaker => OutputCategory::Speaker,
            PortType::HeadsetMic | PortType::Headphones => OutputCategory::WiredHeadset,
            PortType::BluetoothA2dp | PortType::BluetoothLe | PortType::BluetoothHfp => {
                OutputCategory::Bluetooth
            }
            _ => OutputCategory::Unknown,
        }
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_raw())
    }
}

impl Serialize for PortType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_raw())
    }
}

impl<'de> Deserialize<'de> for PortType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PortType::from_raw(&raw))
    }
}

/// `AVAudioSessionPortDescription`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDescription {
    pub port_type: PortType,
    pub port_name: String,
    /// System-assigned unique id
    #[serde(default)]
    pub uid: String,
}

impl PortDescription {
    pub fn new(port_type: PortType, port_name: impl Into<String>) -> Self {
        let port_name = port_name.into();
        Self {
            uid: format!("{}:{}", port_type, port_name),
            port_type,
            port_name,
        }
    }

    /// Encode for the host
    pub fn to_output_device(&self) -> OutputDevice {
        OutputDevice::new(self.port_name.clone(), self.port_type.category())
    }
}

/// `AVAudioSessionRouteDescription`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescription {
    #[serde(default)]
    pub inputs: Vec<PortDescription>,
    #[serde(default)]
    pub outputs: Vec<PortDescription>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bluetooth_ports() {
        for port in [PortType::BluetoothA2dp, PortType::BluetoothLe, PortType::BluetoothHfp] {
            assert_eq!(port.category(), OutputCategory::Bluetooth, "{port}");
        }
    }

    #[test]
    fn test_builtin_and_wired_ports() {
        assert_eq!(PortType::BuiltInReceiver.category(), OutputCategory::Receiver);
        assert_eq!(PortType::BuiltInMic.category(), OutputCategory::Receiver);
        assert_eq!(PortType::BuiltInSpeaker.category(), OutputCategory::Speaker);
        assert_eq!(PortType::Headphones.category(), OutputCategory::WiredHeadset);
        assert_eq!(PortType::HeadsetMic.category(), OutputCategory::WiredHeadset);
    }

    #[test]
    fn test_other_ports_are_unknown() {
        for raw in ["AirPlay", "HDMIOutput", "CarAudio", "USBAudio", "SomethingNew"] {
            assert_eq!(PortType::from_raw(raw).category(), OutputCategory::Unknown, "{raw}");
        }
    }

    #[test]
    fn test_raw_values_roundtrip() {
        for raw in ["MicrophoneWired", "BluetoothA2DPOutput", "Receiver", "Vendor Port"] {
            assert_eq!(PortType::from_raw(raw).as_raw(), raw);
        }
    }

    #[test]
    fn test_route_from_json() {
        let route: RouteDescription = serde_json::from_str(
            r#"{"outputs": [{"port_type": "BluetoothHFP", "port_name": "Car kit"}]}"#,
        )
        .unwrap();
        assert!(route.inputs.is_empty());
        assert_eq!(route.outputs[0].port_type, PortType::BluetoothHfp);
        assert_eq!(
            route.outputs[0].to_output_device(),
            OutputDevice::new("Car kit", OutputCategory::Bluetooth)
        );
    }
}
