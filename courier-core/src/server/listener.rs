//! A single serial accept loop.
//!
//! The loop accepts one connection, lets its [`Service`] read exactly
//! one request, writes exactly one reply line, closes the connection and
//! only then accepts the next one. Faults inside a connection become a
//! `FAIL` outcome and an `Unexpected error: …` reply; they never end the
//! loop. Only the shutdown token does.

use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::CourierError;
use crate::network::{Endpoint, write_line};
use crate::outcome::Outcome;
use crate::protocol::failure_reply;
use crate::state::ListenerPhase;

/// Reads one request from an accepted connection.
#[async_trait]
pub trait Service: Send + Sync + 'static {
    /// Consume exactly one request from `stream` and return the reply text.
    async fn handle(&self, stream: &mut TcpStream) -> Result<String, CourierError>;
}

// ── Listener ─────────────────────────────────────────────────────

pub struct Listener {
    name: &'static str,
    listener: TcpListener,
    local_addr: SocketAddr,
    phase: watch::Sender<ListenerPhase>,
}

impl Listener {
    /// Bind `endpoint` and move to `Listening`.
    pub async fn bind(name: &'static str, endpoint: Endpoint) -> Result<Self, CourierError> {
        let listener = TcpListener::bind(endpoint.socket_addr()).await?;
        let local_addr = listener.local_addr()?;
        let (phase, _) = watch::channel(ListenerPhase::Stopped);

        let this = Self {
            name,
            listener,
            local_addr,
            phase,
        };
        this.transition(ListenerPhase::begin_listening);
        info!("{name} listener bound on {local_addr}");
        Ok(this)
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Observe the loop's phase changes.
    pub fn phase(&self) -> watch::Receiver<ListenerPhase> {
        self.phase.subscribe()
    }

    /// Serve connections one at a time until `shutdown` is cancelled.
    ///
    /// A pending accept is raced against the token, so an idle loop
    /// stops immediately. A connection already being served runs to
    /// completion first.
    pub async fn run<S: Service>(self, service: S, shutdown: CancellationToken) {
        let name = self.name;

        loop {
            if shutdown.is_cancelled() {
                break;
            }

            self.transition(ListenerPhase::begin_accepting);
            debug!("{name} listener waiting for a connection");

            let accept = tokio::select! {
                result = self.listener.accept() => result,
                _ = shutdown.cancelled() => break,
            };

            let (stream, peer) = match accept {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("{name} listener accept error: {e}");
                    continue;
                }
            };

            self.transition(ListenerPhase::begin_serving);
            self.serve(&service, stream, peer).await;
        }

        self.transition(ListenerPhase::stop);
        info!("{name} listener stopped");
        // Dropping `self.listener` releases the socket.
    }

    // ── Internal ─────────────────────────────────────────────────

    async fn serve<S: Service>(&self, service: &S, mut stream: TcpStream, peer: SocketAddr) {
        let name = self.name;
        debug!("{name} connection from {peer}");

        let outcome = Outcome::from_result(service.handle(&mut stream).await);
        let reply = if outcome.is_ok() {
            info!("{}", outcome.message());
            outcome.into_message()
        } else {
            let reply = failure_reply(outcome.message());
            warn!("{name} request from {peer} failed: {reply}");
            reply
        };

        let sent = Outcome::from_result(write_line(&mut stream, &reply).await.map(|_| String::new()));
        if sent.is_fail() {
            warn!("{name} could not reply to {peer}: {}", sent.message());
        }

        if let Err(e) = stream.shutdown().await {
            debug!("{name} shutdown of {peer} failed: {e}");
        }
    }

    fn transition(&self, step: fn(&mut ListenerPhase) -> Result<(), CourierError>) {
        let name = self.name;
        self.phase.send_modify(|phase| {
            if let Err(e) = step(phase) {
                warn!("{name} listener: {e}");
            }
        });
    }
}
