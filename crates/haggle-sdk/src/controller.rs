//! Request lifecycle.
//!
//! A [`RequestController`] owns the one outbound negotiation. At most one
//! request is in flight; a submit while [`RequestState::Loading`] is refused
//! and never queued. There is no automatic retry.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use haggle_core::{HaggleError, NegotiationRequest, NegotiationResult, NegotiationStrength, Result};
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::transport::NegotiationTransport;

/// Text shown to the user when a submission fails. The diagnostic goes in
/// the technical details.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "We had trouble fetching deals. Please try again in a moment.";

/// State of the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    /// Nothing submitted, or the last submission was abandoned.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last submission succeeded.
    Success(NegotiationResult),
    /// The last submission failed; holds the diagnostic message.
    Error(String),
}

impl RequestState {
    /// Returns true while a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// The active result, if the last submission succeeded.
    pub fn result(&self) -> Option<&NegotiationResult> {
        match self {
            RequestState::Success(result) => Some(result),
            _ => None,
        }
    }

    /// The diagnostic message, if the last submission failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Bookkeeping for the most recent accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionInfo {
    /// Unique ID for this submission.
    pub id: Uuid,

    /// The trimmed query that was sent.
    pub query: String,

    /// Strength selected for it.
    pub strength: NegotiationStrength,

    /// When the request was issued.
    pub started_at: DateTime<Utc>,

    /// When the request settled, if it has.
    pub finished_at: Option<DateTime<Utc>>,
}

impl SubmissionInfo {
    fn start(request: &NegotiationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: request.query().to_string(),
            strength: request.strength(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Round budget that was sent.
    pub fn max_rounds(&self) -> u32 {
        self.strength.max_rounds()
    }

    /// Time from issue to settlement.
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }
}

#[derive(Debug)]
struct Inner {
    state: RequestState,
    last_submission: Option<SubmissionInfo>,
    closed: bool,
}

impl Inner {
    fn is_current(&self, id: Uuid) -> bool {
        self.last_submission.as_ref().map(|s| s.id) == Some(id)
    }

    fn finish(&mut self, id: Uuid) {
        if let Some(submission) = self.last_submission.as_mut().filter(|s| s.id == id) {
            submission.finished_at = Some(Utc::now());
        }
    }

    /// Drop a submission whose future went away before settling.
    fn abandon(&mut self, id: Uuid) {
        if self.state.is_loading() && self.is_current(id) {
            self.state = RequestState::Idle;
            self.finish(id);
        }
    }
}

/// Drives negotiation requests through Idle → Loading → Success | Error.
pub struct RequestController<T> {
    transport: Arc<T>,
    inner: Arc<RwLock<Inner>>,
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl<T> Clone for RequestController<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            inner: self.inner.clone(),
            shutdown_tx: self.shutdown_tx.clone(),
        }
    }
}

impl<T: NegotiationTransport> RequestController<T> {
    /// Create an idle controller.
    pub fn new(transport: T) -> Self {
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            transport: Arc::new(transport),
            inner: Arc::new(RwLock::new(Inner {
                state: RequestState::Idle,
                last_submission: None,
                closed: false,
            })),
            shutdown_tx: Arc::new(shutdown_tx),
        }
    }

    /// The transport in use.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> RequestState {
        self.inner.read().await.state.clone()
    }

    /// Returns true while a request is in flight.
    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.state.is_loading()
    }

    /// The most recent accepted submission.
    pub async fn last_submission(&self) -> Option<SubmissionInfo> {
        self.inner.read().await.last_submission.clone()
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub async fn is_closed(&self) -> bool {
        self.inner.read().await.closed
    }

    /// Submit a query and wait for it to settle.
    ///
    /// Refused without any network call when the trimmed query is empty
    /// ([`HaggleError::EmptyQuery`]), while another request is in flight
    /// ([`HaggleError::RequestInFlight`]) or after [`close`](Self::close)
    /// ([`HaggleError::ControllerClosed`]). A refusal leaves the state as it
    /// was. Otherwise exactly one transport call is made and the settled
    /// state is returned.
    pub async fn submit(&self, query: &str, strength: NegotiationStrength) -> Result<RequestState> {
        let request = NegotiationRequest::new(query, strength)?;

        let submission = {
            let mut inner = self.inner.write().await;

            if inner.closed {
                return Err(HaggleError::ControllerClosed);
            }

            if inner.state.is_loading() {
                warn!(query = %request.query(), "Submit refused: request already in flight");
                return Err(HaggleError::RequestInFlight);
            }

            let submission = SubmissionInfo::start(&request);
            inner.state = RequestState::Loading;
            inner.last_submission = Some(submission.clone());
            submission
        };

        info!(
            id = %submission.id,
            strength = %submission.strength,
            max_rounds = submission.max_rounds(),
            "Negotiation submitted"
        );

        let mut guard = InFlight {
            inner: self.inner.clone(),
            id: submission.id,
            settled: false,
        };

        let payload = request.payload();
        let outcome = tokio::select! {
            outcome = self.transport.negotiate(&payload) => outcome,
            _ = wait_closed(self.shutdown_tx.subscribe()) => Err(HaggleError::Cancelled),
        };

        let mut inner = self.inner.write().await;
        guard.settled = true;

        if inner.closed || !inner.is_current(submission.id) {
            info!(id = %submission.id, "Negotiation cancelled");
            return Err(HaggleError::Cancelled);
        }

        inner.finish(submission.id);
        inner.state = match outcome {
            Ok(result) => {
                info!(
                    id = %submission.id,
                    offers = result.ranked_offers.len(),
                    rounds = result.negotiation_log.len(),
                    "Negotiation succeeded"
                );
                RequestState::Success(result)
            }
            Err(err) => {
                warn!(id = %submission.id, error = %err, "Negotiation failed");
                RequestState::Error(err.to_string())
            }
        };

        Ok(inner.state.clone())
    }

    /// Abort any in-flight request and refuse further submissions.
    ///
    /// The state returns to [`RequestState::Idle`].
    pub async fn close(&self) {
        {
            let mut inner = self.inner.write().await;
            if inner.closed {
                return;
            }
            inner.closed = true;
            if let Some(id) = inner.last_submission.as_ref().map(|s| s.id) {
                inner.abandon(id);
            }
            inner.state = RequestState::Idle;
        }

        self.shutdown_tx.send_replace(true);
        info!("Request controller closed");
    }
}

/// Resolves once the controller is closed.
async fn wait_closed(mut rx: watch::Receiver<bool>) {
    loop {
        let closed = *rx.borrow_and_update();
        if closed {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender gone: the controller no longer exists to close.
            std::future::pending::<()>().await;
        }
    }
}

/// Returns the controller to Idle if a submit future is dropped mid-flight.
struct InFlight {
    inner: Arc<RwLock<Inner>>,
    id: Uuid,
    settled: bool,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let id = self.id;
        match self.inner.try_write() {
            Ok(mut inner) => inner.abandon(id),
            Err(_) => {
                if let Ok(handle) = tokio::runtime::Handle::try_current() {
                    let inner = self.inner.clone();
                    handle.spawn(async move {
                        inner.write().await.abandon(id);
                    });
                }
            }
        }
    }
}
