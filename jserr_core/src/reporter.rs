/**
 * The reporter — owns the configuration, decides whether to listen at all,
 * and routes qualifying error events to the transport.
 *
 * Lifecycle:
 * 1. `Reporter::new(endpoint, options, host)` validates the endpoint and
 *    takes ownership of the options. Nothing is registered yet.
 * 2. `Reporter::init()` checks the client identity once. A rejected
 *    identity means the reporter never listens. Otherwise a passive
 *    listener is added to the host's error channel.
 * 3. Each delivered error runs through `State::handle`: filename checks,
 *    payload construction, then a fire-and-forget submission.
 *
 * Nothing in this pipeline returns an error to the host: every outcome
 * ends as a diagnostic log line. Calling `init()` twice registers two
 * listeners and therefore sends every report twice.
 */
use std::sync::Arc;

use tracing::{error, info};
use url::Url;

use crate::error::ConfigError;
use crate::events::{ErrorEvent, ListenerId, ListenerOptions};
use crate::filter::{Filter, Verdict};
use crate::host::Host;
use crate::options::Options;
use crate::protocol::constants::NETWORK_SCHEMES;
use crate::protocol::encoding::Request;
use crate::protocol::types::{ErrorOccurrence, Report};
use crate::transport::dispatch;

// ---------------------------------------------------------------------------
// Disposition
// ---------------------------------------------------------------------------

/**
 * What happened to one occurrence. Internal bookkeeping for tests and
 * logs; the host never sees it.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(test), allow(dead_code))]
pub(crate) enum Disposition {
    Dispatched,
    Dropped(DropReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(test), allow(dead_code))]
pub(crate) enum DropReason {
    EmptyFilename,
    FilenameDenied,
    FilenameNotAllowed,
    InvalidFilename,
    NonNetworkScheme,
    EncodeFailed,
    SpawnFailed,
}

// ---------------------------------------------------------------------------
// Reporter
// ---------------------------------------------------------------------------

pub struct Reporter {
    state: Arc<State>,
}

/// Read-only after construction; shared with every registered listener.
struct State {
    endpoint: Url,
    options: Options,
    filename_filter: Filter,
    identity_filter: Filter,
    host: Host,
}

impl Reporter {
    /**
     * Creates a reporter for `endpoint`.
     *
     * # Errors
     * `ConfigError::InvalidEndpoint` if `endpoint` is empty, not a URL, or
     * not an `http`/`https` URL.
     */
    pub fn new(endpoint: &str, options: Options, host: Host) -> Result<Self, ConfigError> {
        let endpoint = parse_endpoint(endpoint)?;

        let state = State {
            endpoint,
            filename_filter: options.filename_filter(),
            identity_filter: options.identity_filter(),
            options,
            host,
        };

        Ok(Self {
            state: Arc::new(state),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.state.endpoint
    }

    pub fn options(&self) -> &Options {
        &self.state.options
    }

    /**
     * Starts listening for uncaught errors.
     *
     * Returns the listener id, or `None` when the client identity was
     * rejected and nothing was registered.
     */
    pub fn init(&self) -> Option<ListenerId> {
        let user_agent = self.state.host.environment.user_agent();

        match self.state.identity_filter.check(&user_agent) {
            Verdict::Accepted => {}
            Verdict::Denied => {
                info!("no error reports will be sent: the user agent matches the deny list");
                return None;
            }
            Verdict::NotAllowed => {
                info!("no error reports will be sent: the user agent does not match the allow list");
                return None;
            }
        }

        let state = Arc::clone(&self.state);
        let listener = Arc::new(move |event: &ErrorEvent| {
            state.handle(event.occurrence());
        });

        Some(
            self.state
                .host
                .events
                .add_listener(listener, ListenerOptions::passive()),
        )
    }

    #[cfg(test)]
    pub(crate) fn handle(&self, occurrence: &ErrorOccurrence) -> Disposition {
        self.state.handle(occurrence)
    }
}

impl State {
    fn handle(&self, occurrence: &ErrorOccurrence) -> Disposition {
        let filename = occurrence.filename.as_str();

        /*
         * Some embedded app webviews fire error events with an empty
         * filename and a 0:0 position. There is nothing useful to report.
         */
        if filename.is_empty() {
            error!("error event filename is empty, report dropped");
            return Disposition::Dropped(DropReason::EmptyFilename);
        }

        match self.filename_filter.check(filename) {
            Verdict::Accepted => {}
            Verdict::Denied => {
                info!(filename, "no error report will be sent: the filename matches the deny list");
                return Disposition::Dropped(DropReason::FilenameDenied);
            }
            Verdict::NotAllowed => {
                info!(filename, "no error report will be sent: the filename does not match the allow list");
                return Disposition::Dropped(DropReason::FilenameNotAllowed);
            }
        }

        match Url::parse(filename) {
            Ok(url) if NETWORK_SCHEMES.contains(&url.scheme()) => {}
            Ok(url) => {
                error!(
                    scheme = url.scheme(),
                    "error raised by a script with a non-HTTP origin (possibly a browser extension), report dropped"
                );
                return Disposition::Dropped(DropReason::NonNetworkScheme);
            }
            Err(err) => {
                error!(filename, %err, "error event filename is not a URL, report dropped");
                return Disposition::Dropped(DropReason::InvalidFilename);
            }
        }

        let location = self.host.environment.location();
        let report = Report::new(&self.options.field_mapping, &location, occurrence);

        let request = match Request::build(
            &self.endpoint,
            &report,
            self.options.encoding,
            &self.options.extra_headers,
        ) {
            Ok(request) => request,
            Err(err) => {
                error!(%err, "failed to encode error report");
                return Disposition::Dropped(DropReason::EncodeFailed);
            }
        };

        if let Err(err) = dispatch::spawn(Arc::clone(&self.host.transport), request) {
            error!(%err, "failed to start error report submission");
            return Disposition::Dropped(DropReason::SpawnFailed);
        }

        Disposition::Dispatched
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    if endpoint.trim().is_empty() {
        return Err(invalid("endpoint is empty".into()));
    }

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    if !NETWORK_SCHEMES.contains(&url.scheme()) {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }

    Ok(url)
}
