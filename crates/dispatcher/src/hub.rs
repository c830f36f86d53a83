//! DispatchHub - holds the current content and fans it out to reactors

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, instrument, warn};

use contracts::{Content, NotifyReport, Reactor, ReactorFailure};

use crate::error::DispatcherError;
use crate::isolate::isolate;

#[derive(Default)]
struct HubState {
    current: Option<Arc<dyn Content>>,
    reactors: Vec<Arc<dyn Reactor>>,
}

/// Observable holder of the current notification content.
///
/// Reactors are notified synchronously, on the calling thread, in attachment
/// order. Every notification iterates a snapshot of the reactor list, so
/// attach/detach from other threads (or from inside a reactor) never
/// disturbs a fan-out in flight.
#[derive(Default)]
pub struct DispatchHub {
    state: RwLock<HubState>,
}

impl DispatchHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a reactor
    ///
    /// Returns false (and changes nothing) if this reactor is already attached.
    #[instrument(name = "hub_attach", skip_all, fields(reactor = %reactor.name()))]
    pub fn attach(&self, reactor: Arc<dyn Reactor>) -> bool {
        let mut state = self.write();
        if state.reactors.iter().any(|r| same_reactor(r, &reactor)) {
            debug!("Reactor already attached");
            return false;
        }
        state.reactors.push(reactor);
        debug!(reactors = state.reactors.len(), "Reactor attached");
        true
    }

    /// Detach a reactor
    ///
    /// # Errors
    /// `ReactorNotFound` if the reactor is not attached; the set is unchanged.
    #[instrument(name = "hub_detach", skip_all, fields(reactor = %reactor.name()))]
    pub fn detach<R: Reactor + ?Sized>(&self, reactor: &Arc<R>) -> Result<(), DispatcherError> {
        let target = Arc::as_ptr(reactor).cast::<()>();
        let mut state = self.write();
        let position = state
            .reactors
            .iter()
            .position(|r| Arc::as_ptr(r).cast::<()>() == target)
            .ok_or_else(|| DispatcherError::reactor_not_found(reactor.name()))?;
        state.reactors.remove(position);
        debug!(reactors = state.reactors.len(), "Reactor detached");
        Ok(())
    }

    /// True if this exact reactor is attached
    pub fn is_attached<R: Reactor + ?Sized>(&self, reactor: &Arc<R>) -> bool {
        let target = Arc::as_ptr(reactor).cast::<()>();
        self.read()
            .reactors
            .iter()
            .any(|r| Arc::as_ptr(r).cast::<()>() == target)
    }

    /// Store `content` as current, then notify every reactor
    #[instrument(name = "hub_set_content", skip_all)]
    pub fn set_content(&self, content: Arc<dyn Content>) -> NotifyReport {
        let reactors = {
            let mut state = self.write();
            state.current = Some(Arc::clone(&content));
            state.reactors.clone()
        };
        Self::fan_out(&reactors, content.as_ref())
    }

    /// Notify every reactor of the current content
    ///
    /// With no current content nobody is notified.
    #[instrument(name = "hub_notify", skip_all)]
    pub fn notify(&self) -> NotifyReport {
        let (content, reactors) = {
            let state = self.read();
            (state.current.clone(), state.reactors.clone())
        };
        match content {
            Some(content) => Self::fan_out(&reactors, content.as_ref()),
            None => {
                debug!("No current content, nothing to notify");
                NotifyReport::default()
            }
        }
    }

    /// Read the current content
    pub fn content(&self) -> Option<String> {
        self.current().map(|c| c.read())
    }

    /// Shared handle to the current content
    pub fn current(&self) -> Option<Arc<dyn Content>> {
        self.read().current.clone()
    }

    /// Names of attached reactors, in notification order
    pub fn reactor_names(&self) -> Vec<String> {
        self.read()
            .reactors
            .iter()
            .map(|r| r.name().to_string())
            .collect()
    }

    pub fn reactor_count(&self) -> usize {
        self.read().reactors.len()
    }

    fn fan_out(reactors: &[Arc<dyn Reactor>], content: &dyn Content) -> NotifyReport {
        let mut report = NotifyReport::default();

        for reactor in reactors {
            report.notified += 1;
            let message = match isolate(|| reactor.on_update(content)) {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(panic) => panic,
            };
            warn!(reactor = %reactor.name(), error = %message, "Reactor update failed");
            report
                .failures
                .push(ReactorFailure::new(reactor.name(), message));
        }

        debug!(
            notified = report.notified,
            failed = report.failures.len(),
            "Hub fan-out complete"
        );
        report
    }

    // Guarded data stays consistent if a holder panics: reactors run outside the lock.
    fn read(&self) -> RwLockReadGuard<'_, HubState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HubState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn same_reactor(a: &Arc<dyn Reactor>, b: &Arc<dyn Reactor>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}
