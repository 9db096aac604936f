//! Shared test doubles: a recording transport and a log capture helper.

use std::io;
use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};
use tracing_subscriber::fmt::MakeWriter;

use crate::error::SubmitError;
use crate::protocol::encoding::Request;
use crate::transport::{Response, Transport};

/// Forwards every posted request to a channel and answers with a fixed status.
pub(crate) struct RecordingTransport {
    sender: Sender<Request>,
    status: u16,
    network_error: Option<String>,
}

impl RecordingTransport {
    pub(crate) fn new(status: u16) -> (Self, Receiver<Request>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let transport = Self {
            sender,
            status,
            network_error: None,
        };
        (transport, receiver)
    }

    /// A transport whose requests never produce a response.
    pub(crate) fn failing(message: &str) -> Self {
        let (mut transport, _) = Self::new(0);
        transport.network_error = Some(message.to_string());
        transport
    }
}

impl Transport for RecordingTransport {
    fn post(&self, request: &Request) -> Result<Response, SubmitError> {
        if let Some(message) = &self.network_error {
            return Err(SubmitError::Network(message.clone()));
        }

        let _ = self.sender.send(request.clone());
        let status_text = match self.status {
            200 => "OK",
            500 => "Internal Server Error",
            _ => "",
        };
        Ok(Response {
            url: request.url.to_string(),
            status: self.status,
            status_text: status_text.to_string(),
        })
    }
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuf {
    type Writer = SharedBuf;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a thread-local subscriber and returns its result plus the formatted log output.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buf = SharedBuf::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buf.0.lock().unwrap()).into_owned();
    (result, logs)
}
