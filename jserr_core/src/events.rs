/**
 * Uncaught-error event channel.
 *
 * The host delivers each uncaught script error by calling
 * `ErrorChannel::dispatch`. Listeners are stored in a dispatch table and
 * invoked in registration order on the dispatching thread.
 *
 * # Passive listeners
 *
 * A listener registered with `ListenerOptions { passive: true }` cannot
 * suppress the host's default error surfacing: its `prevent_default()`
 * calls are ignored. The reporter always registers passively.
 *
 * # Recursion safety
 *
 * A listener that itself raises an error through the same channel would
 * loop forever. A thread-local flag drops any dispatch that starts while
 * another dispatch is running on the same thread, and every listener runs
 * under `catch_unwind` so one failing listener never affects the others
 * or the host.
 */
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use tracing::{debug, error};

use crate::protocol::types::ErrorOccurrence;

// ---------------------------------------------------------------------------
// Event and listener types
// ---------------------------------------------------------------------------

/**
 * The event object listeners receive.
 */
#[derive(Debug)]
pub struct ErrorEvent {
    occurrence: ErrorOccurrence,
    passive: Cell<bool>,
    default_prevented: Cell<bool>,
}

impl ErrorEvent {
    fn new(occurrence: ErrorOccurrence) -> Self {
        Self {
            occurrence,
            passive: Cell::new(false),
            default_prevented: Cell::new(false),
        }
    }

    pub fn occurrence(&self) -> &ErrorOccurrence {
        &self.occurrence
    }

    /// Suppresses the host's default error surfacing. No-op for passive listeners.
    pub fn prevent_default(&self) {
        if self.passive.get() {
            debug!("prevent_default() ignored inside a passive error listener");
            return;
        }
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Listener = Arc<dyn Fn(&ErrorEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub passive: bool,
}

impl ListenerOptions {
    pub fn passive() -> Self {
        Self { passive: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/**
 * Anything that uncaught-error listeners can be attached to.
 */
pub trait ErrorEventTarget: Send + Sync {
    fn add_listener(&self, listener: Listener, options: ListenerOptions) -> ListenerId;

    /// Returns `false` if no listener with this id was registered.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

// ---------------------------------------------------------------------------
// ErrorChannel
// ---------------------------------------------------------------------------

struct Registration {
    id: ListenerId,
    options: ListenerOptions,
    listener: Listener,
}

thread_local! {
    /// Set while this thread is inside `ErrorChannel::dispatch`.
    static IN_DISPATCH: Cell<bool> = const { Cell::new(false) };
}

/// Clears `IN_DISPATCH` when the dispatch that set it ends.
struct DispatchScope;

impl DispatchScope {
    fn enter() -> Option<Self> {
        IN_DISPATCH.with(|flag| {
            if flag.get() {
                None
            } else {
                flag.set(true);
                Some(DispatchScope)
            }
        })
    }
}

impl Drop for DispatchScope {
    fn drop(&mut self) {
        IN_DISPATCH.with(|flag| flag.set(false));
    }
}

#[derive(Default)]
pub struct ErrorChannel {
    registrations: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
}

impl ErrorChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /**
     * Delivers one uncaught error to every registered listener.
     *
     * Returns `false` if a non-passive listener prevented the default,
     * `true` otherwise (including when the dispatch was dropped as
     * re-entrant).
     */
    pub fn dispatch(&self, occurrence: ErrorOccurrence) -> bool {
        let Some(_scope) = DispatchScope::enter() else {
            debug!("re-entrant error dispatch dropped");
            return true;
        };

        /*
         * Snapshot the table so listeners may add or remove listeners
         * without deadlocking on the lock.
         */
        let snapshot: Vec<(ListenerOptions, Listener)> = match self.registrations.read() {
            Ok(registrations) => registrations
                .iter()
                .map(|r| (r.options, Arc::clone(&r.listener)))
                .collect(),
            Err(_) => return true,
        };

        let event = ErrorEvent::new(occurrence);
        for (options, listener) in snapshot {
            event.passive.set(options.passive);

            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| listener(&event)));
            if result.is_err() {
                error!("error listener panicked");
            }
        }

        !event.default_prevented()
    }

    pub fn listener_count(&self) -> usize {
        self.registrations.read().map(|r| r.len()).unwrap_or(0)
    }
}

impl ErrorEventTarget for ErrorChannel {
    fn add_listener(&self, listener: Listener, options: ListenerOptions) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut registrations) = self.registrations.write() {
            registrations.push(Registration {
                id,
                options,
                listener,
            });
        }
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        match self.registrations.write() {
            Ok(mut registrations) => {
                let before = registrations.len();
                registrations.retain(|r| r.id != id);
                registrations.len() != before
            }
            Err(_) => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Process-wide channel
// ---------------------------------------------------------------------------

static GLOBAL_CHANNEL: OnceLock<Arc<ErrorChannel>> = OnceLock::new();

/**
 * The process-wide error channel, created on first use. This is the
 * channel `jserr::init` subscribes to and `jserr::dispatch_error` feeds.
 */
pub fn global() -> Arc<ErrorChannel> {
    Arc::clone(GLOBAL_CHANNEL.get_or_init(|| Arc::new(ErrorChannel::new())))
}
