//! Android device type codes and their classification
//!
//! Codes follow `AudioDeviceInfo.TYPE_*`. The earpiece has its own code but is
//! never listed as a hardware output by the enumerator; a synthetic entry
//! stands in for it instead.

use audio_output_core::OutputCategory;
use serde::{Deserialize, Serialize};

/// Native device type code (`AudioDeviceInfo.getType()`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioDeviceType(pub i32);

impl AudioDeviceType {
    pub const UNKNOWN: Self = Self(0);
    pub const BUILTIN_EARPIECE: Self = Self(1);
    pub const BUILTIN_SPEAKER: Self = Self(2);
    pub const WIRED_HEADSET: Self = Self(3);
    pub const WIRED_HEADPHONES: Self = Self(4);
    pub const LINE_ANALOG: Self = Self(5);
    pub const LINE_DIGITAL: Self = Self(6);
    pub const BLUETOOTH_SCO: Self = Self(7);
    pub const BLUETOOTH_A2DP: Self = Self(8);
    pub const HDMI: Self = Self(9);
    pub const USB_DEVICE: Self = Self(11);
    pub const TELEPHONY: Self = Self(18);
    pub const BUILTIN_MIC: Self = Self(15);
    pub const USB_HEADSET: Self = Self(22);
    pub const HEARING_AID: Self = Self(23);
    pub const BLE_HEADSET: Self = Self(26);
    pub const BLE_SPEAKER: Self = Self(27);
    pub const BLE_BROADCAST: Self = Self(30);

    /// Logical category of this device type
    ///
    /// Total and pure: unlisted codes are `Unknown`, never an error.
    pub fn category(self) -> OutputCategory {
        match self {
            Self::BUILTIN_EARPIECE | Self::BUILTIN_MIC => OutputCategory::Receiver,
            Self::BUILTIN_SPEAKER => OutputCategory::Speaker,
            Self::WIRED_HEADSET | Self::WIRED_HEADPHONES => OutputCategory::WiredHeadset,
            Self::BLUETOOTH_SCO
            | Self::BLUETOOTH_A2DP
            | Self::BLE_HEADSET
            | Self::BLE_SPEAKER
            | Self::BLE_BROADCAST => OutputCategory::Bluetooth,
            _ => OutputCategory::Unknown,
        }
    }
}

impl From<i32> for AudioDeviceType {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

/// One device as reported by `AudioManager.getDevices()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioDeviceInfo {
    /// OS-assigned device id
    pub id: i32,
    /// Product name shown to the user
    pub product_name: String,
    /// Native type code
    #[serde(rename = "type")]
    pub device_type: AudioDeviceType,
    /// True for output devices
    #[serde(default = "default_sink")]
    pub is_sink: bool,
}

fn default_sink() -> bool {
    true
}

impl AudioDeviceInfo {
    pub fn output(id: i32, product_name: impl Into<String>, device_type: AudioDeviceType) -> Self {
        Self {
            id,
            product_name: product_name.into(),
            device_type,
            is_sink: true,
        }
    }

    pub fn category(&self) -> OutputCategory {
        self.device_type.category()
    }
}
