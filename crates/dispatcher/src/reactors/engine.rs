//! DispatchEngine - reactor that fans content out to delivery channels

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use tracing::{debug, info, instrument, warn};

use contracts::{
    ChannelConfig, ChannelType, Content, ContractError, DeliveryChannel, DeliveryReport, Reactor,
};

use crate::channels::{EmailChannel, OutboxChannel, PopupChannel, SmsChannel};
use crate::error::DispatcherError;
use crate::handle::ChannelHandle;
use crate::metrics::MetricsSnapshot;

/// Dispatch engine configuration
#[derive(Debug, Clone)]
pub struct DispatchEngineConfig {
    /// Reactor name
    pub name: String,
    /// Channel configurations, in delivery order
    pub channels: Vec<ChannelConfig>,
}

/// Builder for creating a DispatchEngine
pub struct DispatchEngineBuilder {
    config: DispatchEngineConfig,
}

impl DispatchEngineBuilder {
    /// Create a new DispatchEngineBuilder
    pub fn new(config: DispatchEngineConfig) -> Self {
        Self { config }
    }

    /// Build the engine with every configured channel
    #[instrument(
        name = "dispatch_engine_builder_build",
        skip(self),
        fields(channel_count = self.config.channels.len())
    )]
    pub fn build(self) -> Result<DispatchEngine, DispatcherError> {
        let engine = DispatchEngine::new(self.config.name);
        for channel_config in &self.config.channels {
            engine.add_channel(create_channel(channel_config)?);
        }
        Ok(engine)
    }
}

/// Create a DeliveryChannel from configuration
#[instrument(
    name = "dispatch_engine_create_channel",
    skip(config),
    fields(channel = %config.name, channel_type = ?config.channel_type)
)]
pub fn create_channel(config: &ChannelConfig) -> Result<Box<dyn DeliveryChannel>, DispatcherError> {
    let channel: Box<dyn DeliveryChannel> = match config.channel_type {
        ChannelType::Email => Box::new(
            EmailChannel::from_params(&config.name, &config.params)
                .map_err(|e| DispatcherError::channel_creation(&config.name, e.to_string()))?,
        ),
        ChannelType::Sms => Box::new(
            SmsChannel::from_params(&config.name, &config.params)
                .map_err(|e| DispatcherError::channel_creation(&config.name, e.to_string()))?,
        ),
        ChannelType::Popup => Box::new(PopupChannel::new(&config.name)),
        ChannelType::Outbox => Box::new(
            OutboxChannel::from_params(&config.name, &config.params)
                .map_err(|e| DispatcherError::channel_creation(&config.name, e.to_string()))?,
        ),
    };
    Ok(channel)
}

/// Reactor that forwards each notification to every registered channel.
///
/// Channels are delivered in registration order. Duplicate channels are
/// allowed. A failing channel never stops delivery to the remaining ones.
///
/// The last report is kept per dispatching thread. An engine attached to
/// several hubs therefore hands each caller the report of its own fan-out.
pub struct DispatchEngine {
    name: String,
    handles: Mutex<Vec<ChannelHandle>>,
    last_reports: Mutex<HashMap<ThreadId, DeliveryReport>>,
}

impl DispatchEngine {
    /// Create an engine with no channels
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handles: Mutex::new(Vec::new()),
            last_reports: Mutex::new(HashMap::new()),
        }
    }

    /// Append a channel
    pub fn add_channel(&self, channel: Box<dyn DeliveryChannel>) {
        let handle = ChannelHandle::new(channel);
        debug!(
            engine = %self.name,
            channel = %handle.name(),
            destination = ?handle.destination(),
            "Channel added"
        );
        self.handles().push(handle);
    }

    pub fn channel_count(&self) -> usize {
        self.handles().len()
    }

    /// Channel names in delivery order
    pub fn channel_names(&self) -> Vec<String> {
        self.handles()
            .iter()
            .map(|h| h.name().to_string())
            .collect()
    }

    /// Get metrics for all channels
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.handles()
            .iter()
            .map(|h| (h.name().to_string(), h.metrics().snapshot()))
            .collect()
    }

    /// Report of the most recent dispatch made on the calling thread
    pub fn last_report(&self) -> Option<DeliveryReport> {
        self.last_reports()
            .get(&thread::current().id())
            .cloned()
    }

    /// Take the calling thread's most recent report, leaving none behind
    pub fn take_last_report(&self) -> Option<DeliveryReport> {
        self.last_reports().remove(&thread::current().id())
    }

    /// Deliver `text` to every channel, in order
    #[instrument(name = "dispatch_engine_dispatch", skip(self, text), fields(engine = %self.name))]
    pub fn dispatch(&self, text: &str) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let mut handles = self.handles();

        for handle in handles.iter_mut() {
            match handle.deliver(text) {
                Ok(()) => report.delivered.push(handle.name().to_string()),
                Err(failure) => report.failures.push(failure),
            }
        }
        drop(handles);
        self.last_reports()
            .insert(thread::current().id(), report.clone());

        if report.is_complete() {
            info!(
                engine = %self.name,
                delivered = report.delivered.len(),
                "Dispatch complete"
            );
        } else {
            warn!(
                engine = %self.name,
                delivered = report.delivered.len(),
                failed = report.failures.len(),
                "Dispatch partially failed"
            );
        }
        report
    }

    // A panicking channel is caught inside the handle, so the list is never left half-updated.
    fn handles(&self) -> MutexGuard<'_, Vec<ChannelHandle>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn last_reports(&self) -> MutexGuard<'_, HashMap<ThreadId, DeliveryReport>> {
        self.last_reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Reactor for DispatchEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_update(&self, content: &dyn Content) -> Result<(), ContractError> {
        let text = content.read();
        let report = self.dispatch(&text);
        if report.is_complete() {
            Ok(())
        } else {
            Err(ContractError::PartialDelivery {
                total: report.attempted(),
                failures: report.failures,
            })
        }
    }
}

/// Convenience function to create an engine from channel configs
#[instrument(name = "dispatch_engine_create", skip(channel_configs))]
pub fn create_engine(
    name: &str,
    channel_configs: Vec<ChannelConfig>,
) -> Result<DispatchEngine, DispatcherError> {
    let config = DispatchEngineConfig {
        name: name.to_string(),
        channels: channel_configs,
    };
    DispatchEngineBuilder::new(config).build()
}
