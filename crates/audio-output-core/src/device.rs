//! Logical output categories and the devices reported to the host
//!
//! Both platform adapters classify their native device identifiers into the
//! same small set of categories. The host only ever sees a device as a pair of
//! `[display name, category code]`, where the code is a single decimal digit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical output category
///
/// The discriminant is the wire code sent to the host ("0" through "4").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputCategory {
    /// Anything that does not fit one of the routable groups
    #[default]
    Unknown = 0,
    /// Earpiece / built-in receiver
    Receiver = 1,
    /// Built-in loudspeaker
    Speaker = 2,
    /// Wired headset or headphones
    WiredHeadset = 3,
    /// Bluetooth classic, LE or hands-free
    Bluetooth = 4,
}

impl OutputCategory {
    /// Categories a route switch can target, in dispatch order
    pub const ROUTABLE: [OutputCategory; 4] = [
        OutputCategory::Receiver,
        OutputCategory::Speaker,
        OutputCategory::WiredHeadset,
        OutputCategory::Bluetooth,
    ];

    /// Wire code for this category
    pub fn code(self) -> &'static str {
        match self {
            OutputCategory::Unknown => "0",
            OutputCategory::Receiver => "1",
            OutputCategory::Speaker => "2",
            OutputCategory::WiredHeadset => "3",
            OutputCategory::Bluetooth => "4",
        }
    }

    /// Whether a route switch can target this category
    pub fn is_routable(self) -> bool {
        self != OutputCategory::Unknown
    }
}

impl fmt::Display for OutputCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutputCategory::Unknown => "unknown",
            OutputCategory::Receiver => "receiver",
            OutputCategory::Speaker => "speaker",
            OutputCategory::WiredHeadset => "wired headset",
            OutputCategory::Bluetooth => "bluetooth",
        };
        f.write_str(label)
    }
}

/// An output endpoint as reported to the host
///
/// Created fresh on every query; it carries no identity beyond the query that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDevice {
    /// Human-readable device name (product name or port name)
    pub name: String,
    /// Logical category derived from the native type code
    pub category: OutputCategory,
}

impl OutputDevice {
    pub fn new(name: impl Into<String>, category: OutputCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// Placeholder for a route with no identifiable output
    pub fn unknown() -> Self {
        Self::new("unknown", OutputCategory::Unknown)
    }

    /// Encode as the `[name, code]` pair the host expects
    pub fn to_pair(&self) -> [String; 2] {
        [self.name.clone(), self.category.code().to_string()]
    }
}

impl fmt::Display for OutputDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}
