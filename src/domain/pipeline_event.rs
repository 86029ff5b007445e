//! Progress events emitted by the pipeline scheduler.
//!
//! Facts about what happened, published over an mpsc channel at a bounded
//! cadence so observers (the CLI, tests) can render status without being
//! flooded. Dropping the receiver never stalls the pipeline.

use serde::Serialize;

use crate::domain::inventory::Stats;

/// The three sequential phases a run moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    Crawl,
    Filter,
    Verify,
}

impl PipelinePhase {
    pub fn label(self) -> &'static str {
        match self {
            PipelinePhase::Crawl => "Crawl",
            PipelinePhase::Filter => "Filter",
            PipelinePhase::Verify => "Verify",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    CrawlStarted {
        seed_keyword: String,
        target: usize,
        append: bool,
    },

    SuggestionsLoaded {
        count: usize,
    },

    /// The name-suggestion collaborator failed; generation continues with
    /// keyword-derived names only.
    SuggestionsUnavailable {
        reason: String,
    },

    CrawlProgress {
        accepted: usize,
        target: usize,
    },

    CrawlCompleted {
        accepted: usize,
        total_in_inventory: usize,
    },

    FilterStarted {
        pending: usize,
    },

    FilterCompleted {
        passed: usize,
        rejected: usize,
    },

    VerificationStarted {
        pending: usize,
    },

    VerificationProgress {
        checked: usize,
        pending: usize,
    },

    VerificationCompleted {
        clean: usize,
        penalized: usize,
    },

    RunCompleted {
        stats: Stats,
    },

    RunCancelled {
        phase: PipelinePhase,
        stats: Stats,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = PipelineEvent::CrawlProgress {
            accepted: 120,
            target: 500,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "crawl_progress");
        assert_eq!(json["accepted"], 120);
    }

    #[test]
    fn test_cancelled_event_carries_phase() {
        let event = PipelineEvent::RunCancelled {
            phase: PipelinePhase::Verify,
            stats: Stats::default(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["phase"], "verify");
    }
}
