//! Route switching as explicit session profiles
//!
//! Each target category maps to a fixed [`SessionProfile`]. Switching is then
//! "apply this profile to the manager", so the desired session state can be
//! inspected without touching the OS.

use audio_output_core::{OutputCategory, RouteResult};

use crate::manager::{AudioManager, AudioMode};

/// Bluetooth SCO link command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoLink {
    Start,
    Stop,
}

/// Session state requested for one target category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProfile {
    pub mode: AudioMode,
    pub sco_link: ScoLink,
    pub sco_on: bool,
    /// `None` leaves the speakerphone untouched
    pub speakerphone: Option<bool>,
}

impl SessionProfile {
    /// Profile for a target category; `None` for `Unknown`
    ///
    /// Wired outputs need no command of their own: with speaker and SCO off
    /// the OS routes to a plugged headset, else to the earpiece.
    pub fn for_target(target: OutputCategory) -> Option<Self> {
        match target {
            OutputCategory::Receiver | OutputCategory::WiredHeadset => Some(Self {
                mode: AudioMode::InCommunication,
                sco_link: ScoLink::Stop,
                sco_on: false,
                speakerphone: Some(false),
            }),
            OutputCategory::Speaker => Some(Self {
                mode: AudioMode::Normal,
                sco_link: ScoLink::Stop,
                sco_on: false,
                speakerphone: Some(true),
            }),
            // Start and set-on must both be issued
            OutputCategory::Bluetooth => Some(Self {
                mode: AudioMode::InCommunication,
                sco_link: ScoLink::Start,
                sco_on: true,
                speakerphone: None,
            }),
            OutputCategory::Unknown => None,
        }
    }

    /// Issue the profile's commands in order: mode, SCO link, SCO flag, speakerphone
    pub fn apply<M: AudioManager + ?Sized>(&self, manager: &mut M) -> RouteResult<()> {
        manager.set_mode(self.mode)?;
        match self.sco_link {
            ScoLink::Start => manager.start_bluetooth_sco()?,
            ScoLink::Stop => manager.stop_bluetooth_sco()?,
        }
        manager.set_bluetooth_sco_on(self.sco_on)?;
        if let Some(on) = self.speakerphone {
            manager.set_speakerphone_on(on)?;
        }
        Ok(())
    }
}

/// Switch the manager to `target`, catching OS errors
pub fn switch_to<M: AudioManager + ?Sized>(manager: &mut M, target: OutputCategory) -> bool {
    let Some(profile) = SessionProfile::for_target(target) else {
        return false;
    };
    match profile.apply(manager) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("android: switch to {} rejected: {}", target, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::SimulatedAudioManager;

    #[test]
    fn test_headset_profile_matches_receiver() {
        assert_eq!(
            SessionProfile::for_target(OutputCategory::WiredHeadset),
            SessionProfile::for_target(OutputCategory::Receiver)
        );
        assert_eq!(SessionProfile::for_target(OutputCategory::Unknown), None);
    }

    #[test]
    fn test_speaker_profile() {
        let mut manager = SimulatedAudioManager::new();
        manager.set_mode(AudioMode::InCommunication).unwrap();
        manager.set_bluetooth_sco_on(true).unwrap();

        assert!(switch_to(&mut manager, OutputCategory::Speaker));
        assert_eq!(manager.mode(), AudioMode::Normal);
        assert!(manager.is_speakerphone_on());
        assert!(!manager.is_bluetooth_sco_on());
    }

    #[test]
    fn test_bluetooth_starts_and_sets_sco() {
        let mut manager = SimulatedAudioManager::new();
        manager.set_speakerphone_on(true).unwrap();

        assert!(switch_to(&mut manager, OutputCategory::Bluetooth));
        assert_eq!(manager.mode(), AudioMode::InCommunication);
        assert!(manager.sco_started());
        assert!(manager.is_bluetooth_sco_on());
    }

    #[test]
    fn test_rejected_mode_reports_false() {
        let mut manager = SimulatedAudioManager::new();
        manager.reject_commands(true);
        assert!(!switch_to(&mut manager, OutputCategory::Receiver));
        assert!(!switch_to(&mut manager, OutputCategory::Unknown));
    }
}
