//! NotificationService - the single write path into a dispatch hub

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use content::DecorationChain;
use contracts::{Content, DeliveryReport, NotifyReport, ServiceBlueprint};
use dispatcher::{create_engine, DispatchEngine, DispatchHub, DispatcherError, LogReactor};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::history::{History, HistoryEntry};

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitReport {
    /// History sequence number assigned to the content
    pub sequence: u64,
    /// Reactor fan-out result
    pub notify: NotifyReport,
    /// Channel fan-out result of the service's own dispatch engine, if it ran
    pub delivery: Option<DeliveryReport>,
}

impl SubmitReport {
    /// True when every reactor (and therefore every channel) succeeded
    pub fn is_clean(&self) -> bool {
        self.notify.is_clean()
    }
}

/// Service facade: owns the hub and the submission history.
///
/// Build one per process and share it as `Arc<NotificationService>`.
/// Submissions are serialised, so history order equals notification order.
/// Reactors must not call back into the service from `on_update`.
pub struct NotificationService {
    name: String,
    hub: DispatchHub,
    history: Mutex<History>,
    decorations: DecorationChain,
    logger: Option<Arc<LogReactor>>,
    engine: Option<Arc<DispatchEngine>>,
}

impl NotificationService {
    /// Service around an existing hub, with no decorations
    pub fn new(hub: DispatchHub) -> Self {
        Self {
            name: "courier".to_string(),
            hub,
            history: Mutex::new(History::default()),
            decorations: DecorationChain::new(),
            logger: None,
            engine: None,
        }
    }

    /// Build the service described by a blueprint.
    ///
    /// The audit logger (if enabled) is attached before the dispatch engine,
    /// so it observes every notification first.
    #[instrument(name = "service_from_blueprint", skip_all, fields(service = %blueprint.service.name))]
    pub fn from_blueprint(blueprint: &ServiceBlueprint) -> Result<Self, DispatcherError> {
        let hub = DispatchHub::new();

        let logger = blueprint.logger.enabled.then(|| {
            let logger = Arc::new(LogReactor::with_retain(
                &blueprint.logger.name,
                blueprint.logger.retain,
            ));
            hub.attach(logger.clone());
            logger
        });

        let engine = if blueprint.channels.is_empty() {
            None
        } else {
            let engine = Arc::new(create_engine(
                &format!("{}-dispatch", blueprint.service.name),
                blueprint.channels.clone(),
            )?);
            hub.attach(engine.clone());
            Some(engine)
        };

        info!(
            reactors = hub.reactor_count(),
            channels = blueprint.channels.len(),
            decorations = blueprint.decorations.len(),
            "Notification service built"
        );

        Ok(Self {
            name: blueprint.service.name.clone(),
            hub,
            history: Mutex::new(History::default()),
            decorations: DecorationChain::from(blueprint.decorations.clone()),
            logger,
            engine,
        })
    }

    /// Builder: decorations used by `compose` and `send`
    pub fn with_decorations(mut self, decorations: DecorationChain) -> Self {
        self.decorations = decorations;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record `content` in history, then push it through the hub.
    ///
    /// The history append is never rolled back, whatever the fan-out reports.
    #[instrument(name = "service_submit", skip_all, fields(service = %self.name))]
    pub fn submit(&self, content: Arc<dyn Content>) -> SubmitReport {
        let mut history = self.lock_history();
        let sequence = history.append(Arc::clone(&content));

        if let Some(engine) = &self.engine {
            engine.take_last_report();
        }
        let started = Instant::now();
        let notify = self.hub.set_content(content);
        let fanout_ms = started.elapsed().as_secs_f64() * 1000.0;
        let delivery = self.engine.as_ref().and_then(|e| e.take_last_report());
        let history_len = history.len();
        drop(history);

        observability::record_submission();
        observability::record_fanout_latency_ms(fanout_ms);
        observability::record_notify_report(&notify);
        if let Some(delivery) = &delivery {
            observability::record_delivery_report(delivery);
        }
        observability::record_history_len(history_len);

        if notify.is_clean() {
            info!(sequence, notified = notify.notified, "Content submitted");
        } else {
            warn!(
                sequence,
                notified = notify.notified,
                failed = notify.failures.len(),
                "Content submitted with reactor failures"
            );
        }

        SubmitReport {
            sequence,
            notify,
            delivery,
        }
    }

    /// Compose `text` with the configured decorations and submit it
    pub fn send(&self, text: impl Into<String>) -> SubmitReport {
        self.submit(Arc::from(self.compose(text)))
    }

    /// Apply the configured decorations to a plain text leaf
    pub fn compose(&self, text: impl Into<String>) -> Box<dyn Content> {
        self.decorations.compose(text)
    }

    /// Snapshot of every submission, oldest first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock_history().snapshot()
    }

    pub fn history_len(&self) -> usize {
        self.lock_history().len()
    }

    /// Registration surface for reactors
    pub fn hub(&self) -> &DispatchHub {
        &self.hub
    }

    pub fn decorations(&self) -> &DecorationChain {
        &self.decorations
    }

    /// Audit logger built from the blueprint, if enabled
    pub fn logger(&self) -> Option<&Arc<LogReactor>> {
        self.logger.as_ref()
    }

    /// Dispatch engine built from the blueprint, if any channel is configured
    pub fn engine(&self) -> Option<&Arc<DispatchEngine>> {
        self.engine.as_ref()
    }

    // History stays consistent across a panic: append is a single push.
    fn lock_history(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
