/**
 * Capabilities the embedding host provides to the reporter.
 *
 * - `Environment` — who the client is and where it currently is.
 * - `ErrorEventTarget` (see `events`) — where uncaught errors are delivered.
 * - `Transport` (see `transport`) — how reports reach the collector.
 *
 * `Host` bundles the three so `Reporter::new` takes one argument for the
 * whole platform.
 */
use std::sync::{Arc, RwLock};

use crate::events::{self, ErrorEventTarget};
use crate::transport::{HttpTransport, Transport};

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

pub trait Environment: Send + Sync {
    /// Client identity string, read once when the reporter initializes.
    fn user_agent(&self) -> String;

    /// Current document location, read every time a report is built.
    fn location(&self) -> String;
}

/**
 * An `Environment` backed by plain values. The location can be updated
 * while the reporter is running, e.g. on client-side navigation.
 */
#[derive(Debug)]
pub struct StaticEnvironment {
    user_agent: String,
    location: RwLock<String>,
}

impl StaticEnvironment {
    pub fn new(user_agent: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            location: RwLock::new(location.into()),
        }
    }

    pub fn set_location(&self, location: impl Into<String>) {
        if let Ok(mut current) = self.location.write() {
            *current = location.into();
        }
    }
}

impl Environment for StaticEnvironment {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn location(&self) -> String {
        match self.location.read() {
            Ok(location) => location.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct Host {
    pub environment: Arc<dyn Environment>,
    pub events: Arc<dyn ErrorEventTarget>,
    pub transport: Arc<dyn Transport>,
}

impl Host {
    /**
     * The default platform: the process-wide error channel and a `ureq`
     * transport, with the caller's environment.
     */
    pub fn with_environment(environment: Arc<dyn Environment>) -> Self {
        Self {
            environment,
            events: events::global(),
            transport: Arc::new(HttpTransport::new()),
        }
    }
}
