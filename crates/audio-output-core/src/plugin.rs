//! Host-facing plugin: lifecycle plus command dispatch
//!
//! Wraps one [`RouteAdapter`] and owns the change channel. The host:
//! 1. calls [`AudioOutputPlugin::attach`] once it is ready to receive events
//! 2. routes every incoming command through [`AudioOutputPlugin::handle`]
//! 3. periodically calls [`AudioOutputPlugin::forward_changes`] on its own thread
//! 4. calls [`AudioOutputPlugin::detach`] (or drops the plugin) when done

use serde_json::Value;

use crate::adapter::RouteAdapter;
use crate::channel::{HostMessenger, MethodCall, MethodResponse};
use crate::config::PluginConfig;
use crate::error::RouteResult;
use crate::notifier::{change_channel, ChangeNotifier, ChangeReceiver};

pub struct AudioOutputPlugin<A: RouteAdapter> {
    adapter: A,
    config: PluginConfig,
    notifier: ChangeNotifier,
    receiver: ChangeReceiver,
}

impl<A: RouteAdapter> AudioOutputPlugin<A> {
    pub fn new(adapter: A, config: PluginConfig) -> Self {
        let (notifier, receiver) = change_channel();
        Self {
            adapter,
            config,
            notifier,
            receiver,
        }
    }

    /// Channel name the host should bind this plugin to
    pub fn channel_name(&self) -> &str {
        &self.config.channel_name
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Register the OS change callback
    pub fn attach(&mut self) -> RouteResult<()> {
        self.adapter.attach(self.notifier.clone())?;
        log::info!(
            "{}: attached on channel '{}'",
            self.adapter.platform(),
            self.config.channel_name
        );
        Ok(())
    }

    /// Release the OS change callback and reset the session
    pub fn detach(&mut self) {
        if self.adapter.is_attached() {
            self.adapter.detach();
            log::info!("{}: detached", self.adapter.platform());
        }
    }

    pub fn is_attached(&self) -> bool {
        self.adapter.is_attached()
    }

    /// Handle a command by wire name
    ///
    /// Unrecognised names yield [`MethodResponse::NotImplemented`].
    pub fn handle(&mut self, method: &str) -> MethodResponse {
        match method.parse::<MethodCall>() {
            Ok(call) => self.handle_call(call),
            Err(e) => {
                log::debug!("{}: {}, not implemented", self.adapter.platform(), e);
                MethodResponse::NotImplemented
            }
        }
    }

    /// Handle a command and encode the response for the host
    ///
    /// Returns None for [`MethodResponse::NotImplemented`] so the host can
    /// answer with its own not-implemented sentinel.
    pub fn handle_value(&mut self, method: &str) -> Option<Value> {
        let response = self.handle(method);
        (!response.is_not_implemented()).then(|| response.to_value())
    }

    /// Handle an already parsed command
    pub fn handle_call(&mut self, call: MethodCall) -> MethodResponse {
        log::debug!("{}: {}", self.adapter.platform(), call);
        match call {
            MethodCall::GetAvailableOutputs => {
                MethodResponse::Devices(self.adapter.available_outputs())
            }
            MethodCall::GetCurrentOutput => match self.adapter.current_output() {
                Some(device) => MethodResponse::Device(device),
                None => MethodResponse::NotImplemented,
            },
            MethodCall::GetPlatformVersion => match self.adapter.platform_version() {
                Some(version) => MethodResponse::Text(version),
                None => MethodResponse::NotImplemented,
            },
            MethodCall::ChangeTo(target) if target.is_routable() => {
                let ok = self.adapter.change_to(target);
                if !ok {
                    log::warn!("{}: switch to {} failed", self.adapter.platform(), target);
                }
                // Signalled on every attempt, on top of whatever the OS reports later
                self.notifier.notify();
                MethodResponse::Bool(ok)
            }
            MethodCall::ChangeTo(_) => MethodResponse::NotImplemented,
        }
    }

    /// Receiver for hosts that drain change signals themselves
    pub fn change_receiver(&self) -> &ChangeReceiver {
        &self.receiver
    }

    /// Deliver pending change signals through the host channel
    pub fn forward_changes(&self, messenger: &dyn HostMessenger) -> usize {
        self.receiver.forward(messenger)
    }
}

impl<A: RouteAdapter> Drop for AudioOutputPlugin<A> {
    fn drop(&mut self) {
        self.detach();
    }
}
