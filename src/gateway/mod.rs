//! Remote gateway boundary.
//!
//! The search session never performs I/O itself. It issues [`Ticket`]s naming
//! the call to make, something implementing [`Gateway`] performs the call, and
//! the result comes back as a [`Reply`] tagged with the ticket's sequence number.

use crate::model::{GatewayError, MetricsSnapshot, PageWindow, SearchQuery, SearchResponse};

pub mod dispatcher;
pub mod http;

pub use dispatcher::{DispatchMode, RequestDispatcher};
pub use http::HttpGateway;

/// Operations exposed by the remote search service.
///
/// Implementations must treat timeouts as failures; the caller never waits on
/// its own clock.
pub trait Gateway: Send + Sync {
    /// Fetch one page of results for a query.
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, GatewayError>;

    /// Fetch the current crawler metrics.
    fn fetch_metrics(&self) -> Result<MetricsSnapshot, GatewayError>;

    /// Check that the service is alive.
    fn health(&self) -> Result<(), GatewayError>;
}

/// Parameters of a single search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// What to search for.
    pub query: SearchQuery,
    /// Which slice of the ranked results to return.
    pub window: PageWindow,
}

/// Monotonically increasing request number, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    /// Wrap a raw sequence number.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A call the session wants made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `GET /search`
    Search(SearchRequest),
    /// `GET /metrics`
    Metrics,
}

/// A request tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Sequence number; the reply must carry the same one.
    pub seq: RequestSeq,
    /// The call to make.
    pub request: Request,
}

/// Result of a gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Result of a search call.
    Search(Result<SearchResponse, GatewayError>),
    /// Result of a metrics call.
    Metrics(Result<MetricsSnapshot, GatewayError>),
}

/// A completed call, tagged with the sequence number of its ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Sequence number of the ticket this answers.
    pub seq: RequestSeq,
    /// What the gateway returned.
    pub outcome: Outcome,
}

impl Reply {
    /// A failed reply to `ticket`, shaped like the outcome its request expects.
    pub fn failure(ticket: &Ticket, error: GatewayError) -> Self {
        let outcome = match ticket.request {
            Request::Search(_) => Outcome::Search(Err(error)),
            Request::Metrics => Outcome::Metrics(Err(error)),
        };
        Reply {
            seq: ticket.seq,
            outcome,
        }
    }
}

/// Perform the call a ticket describes. Blocks for the duration of the call.
pub fn execute(gateway: &dyn Gateway, ticket: &Ticket) -> Reply {
    let outcome = match &ticket.request {
        Request::Search(request) => Outcome::Search(gateway.search(request)),
        Request::Metrics => Outcome::Metrics(gateway.fetch_metrics()),
    };
    Reply {
        seq: ticket.seq,
        outcome,
    }
}

#[cfg(test)]
pub(crate) mod fake;
