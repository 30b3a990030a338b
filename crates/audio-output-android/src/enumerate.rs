//! Output enumeration
//!
//! Android lists every *available* output, connected or not to the live
//! route. The earpiece is reported as a single synthetic entry up front,
//! followed by speakers, wired headsets and Bluetooth devices, each group in
//! OS order.

use audio_output_core::{OutputCategory, OutputDevice};

use crate::device_type::AudioDeviceInfo;
use crate::manager::{AudioManager, DeviceFlags};

/// Hardware groups listed after the synthetic receiver, in order
const HARDWARE_GROUPS: [OutputCategory; 3] = [
    OutputCategory::Speaker,
    OutputCategory::WiredHeadset,
    OutputCategory::Bluetooth,
];

/// Output devices in OS order, or an empty list if the query is unavailable
fn output_devices<M: AudioManager + ?Sized>(manager: &M) -> Vec<AudioDeviceInfo> {
    match manager.devices(DeviceFlags::Outputs) {
        Some(devices) => devices,
        None => {
            log::debug!("android: output device query unavailable");
            Vec::new()
        }
    }
}

/// Outputs of one category, in OS order
pub fn outputs_in<M: AudioManager + ?Sized>(
    manager: &M,
    category: OutputCategory,
) -> Vec<AudioDeviceInfo> {
    output_devices(manager)
        .into_iter()
        .filter(|device| device.category() == category)
        .collect()
}

/// All available outputs, synthetic receiver first
///
/// Hardware devices classified as Receiver or Unknown are not listed, so the
/// result always holds exactly one Receiver entry.
pub fn available_outputs<M: AudioManager + ?Sized>(
    manager: &M,
    receiver_label: &str,
) -> Vec<OutputDevice> {
    let devices = output_devices(manager);

    let mut outputs = vec![OutputDevice::new(receiver_label, OutputCategory::Receiver)];
    for group in HARDWARE_GROUPS {
        outputs.extend(
            devices
                .iter()
                .filter(|device| device.category() == group)
                .map(|device| OutputDevice::new(device.product_name.clone(), group)),
        );
    }
    outputs
}

/// The output audio is currently routed to
///
/// Derived from the forced-route flags: speakerphone wins, then Bluetooth SCO,
/// then a plugged wired headset, else the earpiece.
///
/// Names come from the matching device's product name, so hosts get e.g.
/// "Pixel Buds" rather than a fixed "Bluetooth" label. The fixed labels are
/// only used when no device of that category is listed.
pub fn current_output<M: AudioManager + ?Sized>(
    manager: &M,
    receiver_label: &str,
) -> OutputDevice {
    let first_named = |category: OutputCategory, fallback: &str| {
        let name = outputs_in(manager, category)
            .into_iter()
            .next()
            .map(|device| device.product_name)
            .unwrap_or_else(|| fallback.to_string());
        OutputDevice::new(name, category)
    };

    if manager.is_speakerphone_on() {
        return first_named(OutputCategory::Speaker, "Speaker");
    }
    if manager.is_bluetooth_sco_on() {
        return first_named(OutputCategory::Bluetooth, "Bluetooth");
    }
    if let Some(wired) = outputs_in(manager, OutputCategory::WiredHeadset).into_iter().next() {
        return OutputDevice::new(wired.product_name, OutputCategory::WiredHeadset);
    }
    OutputDevice::new(receiver_label, OutputCategory::Receiver)
}
