//! ChannelHandle - owns one channel with its metrics and failure isolation

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, instrument};

use contracts::{DeliveryChannel, DeliveryFailure};

use crate::isolate::isolate;
use crate::metrics::ChannelMetrics;

/// Handle to a registered delivery channel
pub struct ChannelHandle {
    /// Channel name
    name: String,
    /// The channel itself, exclusively owned
    channel: Box<dyn DeliveryChannel>,
    /// Shared metrics
    metrics: Arc<ChannelMetrics>,
}

impl ChannelHandle {
    /// Wrap a channel
    pub fn new(channel: Box<dyn DeliveryChannel>) -> Self {
        Self {
            name: channel.name().to_string(),
            channel,
            metrics: Arc::new(ChannelMetrics::new()),
        }
    }

    /// Get channel name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get channel destination
    pub fn destination(&self) -> Option<&str> {
        self.channel.destination()
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<ChannelMetrics> {
        &self.metrics
    }

    /// Deliver text, never propagating a panic
    ///
    /// Errors and panics both come back as a [`DeliveryFailure`].
    #[instrument(name = "channel_handle_deliver", skip(self, text), fields(channel = %self.name))]
    pub fn deliver(&mut self, text: &str) -> Result<(), DeliveryFailure> {
        let started = Instant::now();
        let outcome = isolate(|| self.channel.deliver(text));
        self.metrics
            .set_last_latency_us(started.elapsed().as_micros() as u64);

        let message = match outcome {
            Ok(Ok(())) => {
                self.metrics.inc_delivered_count();
                debug!(channel = %self.name, "Delivered");
                return Ok(());
            }
            Ok(Err(e)) => e.to_string(),
            Err(panic) => panic,
        };

        self.metrics.inc_failure_count();
        error!(channel = %self.name, error = %message, "Delivery failed");
        // Continue processing - a single channel never aborts the fan-out
        Err(DeliveryFailure::new(&self.name, message))
    }
}
