/**
 * Fire-and-forget submission of one report.
 *
 * ```text
 *  ┌──────────────┐  spawn   ┌───────────────────┐  POST  ┌───────────┐
 *  │ error event  │ ───────► │ jserr-submit      │ ─────► │ collector │
 *  │ (host thread)│          │ (one per report)  │        └───────────┘
 *  └──────────────┘          └───────────────────┘
 * ```
 *
 * Every qualifying occurrence gets its own short-lived thread, so the
 * event-delivery thread never waits on the network. Submissions are
 * independent: no queue, no ordering between reports, no cancellation
 * once started.
 */
use std::io;
use std::sync::Arc;
use std::thread;

use tracing::{debug, error};

use super::http::{deliver, Transport};
use crate::protocol::encoding::Request;

/**
 * Sends `request` on a new thread. Only fails if the thread could not be
 * spawned; the outcome of the POST itself is logged by `submit`.
 */
pub fn spawn(transport: Arc<dyn Transport>, request: Request) -> io::Result<()> {
    thread::Builder::new()
        .name("jserr-submit".into())
        .spawn(move || {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                submit(transport.as_ref(), &request);
            }));

            if result.is_err() {
                error!("report submission panicked, report dropped");
            }
        })
        .map(|_| ())
}

/**
 * Delivers one report and writes the outcome to the diagnostic log.
 * Never returns an error: failures end here.
 */
pub fn submit(transport: &dyn Transport, request: &Request) {
    match deliver(transport, request) {
        Ok(response) => {
            debug!(url = %response.url, status = response.status, "error report delivered");
        }
        Err(err) => {
            error!("{err}");
        }
    }
}
