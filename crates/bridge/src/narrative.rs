//! Presentation seam for the proving narrative.
//!
//! The bridge reports progress as plain lines plus one final result. Where
//! those end up (a log, a proof panel, a streaming response) is decided by
//! the [`NarrativeSink`] passed into each request.

use memory_core::ProofRecord;
use tokio::sync::mpsc;
use tracing::info;

/// Receives the progress narrative of a single proving request.
pub trait NarrativeSink: Send + Sync {
    /// Appends a line to the visible proof narrative.
    fn log_line(&self, line: &str);

    /// Renders the finalized result for a record.
    fn show_result(&self, record: &ProofRecord);
}

/// Writes the narrative to the `narrative` tracing target.
#[derive(Debug, Clone, Default)]
pub struct TracingNarrative {
    request_id: Option<String>,
}

impl TracingNarrative {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags every line with a request identifier.
    pub fn for_request(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
        }
    }
}

impl NarrativeSink for TracingNarrative {
    fn log_line(&self, line: &str) {
        match &self.request_id {
            Some(id) => info!(target: "narrative", request = %id, "{}", line),
            None => info!(target: "narrative", "{}", line),
        }
    }

    fn show_result(&self, record: &ProofRecord) {
        info!(
            target: "narrative",
            request = self.request_id.as_deref().unwrap_or("-"),
            hash = record.hash(),
            score = record.score(),
            remaining_time = record.remaining_time(),
            matched_pairs = record.matched_pairs(),
            provenance = %record.provenance(),
            "Proof verified"
        );
    }
}

/// One item of the narrative as delivered by [`ChannelNarrative`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrativeEvent {
    Line(String),
    Result(ProofRecord),
}

/// Forwards the narrative over an unbounded channel.
///
/// Sending never blocks the proving request; events are dropped once the
/// receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelNarrative {
    tx: mpsc::UnboundedSender<NarrativeEvent>,
}

impl ChannelNarrative {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NarrativeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NarrativeSink for ChannelNarrative {
    fn log_line(&self, line: &str) {
        if self.tx.send(NarrativeEvent::Line(line.to_string())).is_err() {
            tracing::trace!("Narrative receiver dropped");
        }
    }

    fn show_result(&self, record: &ProofRecord) {
        if self
            .tx
            .send(NarrativeEvent::Result(record.clone()))
            .is_err()
        {
            tracing::trace!("Narrative receiver dropped");
        }
    }
}
