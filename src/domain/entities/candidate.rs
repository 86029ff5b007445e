//! Domain candidate entity and its lifecycle state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Lifecycle status of a candidate within the pipeline.
///
/// `Pending` is the sole initial state. The qualification filter moves
/// pending candidates to `Analyzing` (passed) or `Rejected` (failed); the
/// penalty verifier moves analyzing candidates to `Clean` or `Penalized`.
/// `Ignored` is reachable only through an explicit user action. Transitions
/// are forward-only; the inventory refuses anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Pending,
    Analyzing,
    Clean,
    Rejected,
    Penalized,
    Ignored,
}

impl CandidateStatus {
    /// Whether the pipeline itself can still act on this status.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CandidateStatus::Clean
                | CandidateStatus::Rejected
                | CandidateStatus::Penalized
                | CandidateStatus::Ignored
        )
    }

    /// Legal forward transitions of the lifecycle graph.
    pub fn can_transition(self, next: CandidateStatus) -> bool {
        use CandidateStatus::*;
        matches!(
            (self, next),
            (Pending, Analyzing)
                | (Pending, Rejected)
                | (Analyzing, Clean)
                | (Analyzing, Penalized)
                | (Pending, Ignored)
                | (Analyzing, Ignored)
                | (Clean, Ignored)
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            CandidateStatus::Pending => "Pending",
            CandidateStatus::Analyzing => "Analyzing",
            CandidateStatus::Clean => "Clean",
            CandidateStatus::Rejected => "Rejected",
            CandidateStatus::Penalized => "Penalized",
            CandidateStatus::Ignored => "Ignored",
        }
    }
}

/// Anchor-text profile observed in the candidate's backlink history.
///
/// An attribute of the synthesized backlink data — not to be confused with
/// the lifecycle states above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorStatus {
    Clean,
    Spam,
    Mixed,
}

/// Where the listing was found.
///
/// `Registry` is plain hand-registration at the registrar; the other two
/// sources can carry live auctions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marketplace {
    Registry,
    Closeouts,
    Auctions,
}

impl Marketplace {
    pub fn is_auction_capable(self) -> bool {
        matches!(self, Marketplace::Closeouts | Marketplace::Auctions)
    }

    pub fn label(self) -> &'static str {
        match self {
            Marketplace::Registry => "Registry",
            Marketplace::Closeouts => "Closeouts",
            Marketplace::Auctions => "Auctions",
        }
    }
}

/// Third-party link-authority scores plus a traffic estimate.
///
/// Each score is an independent bounded integer; the pipeline never derives
/// one from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityMetrics {
    pub domain_rating: u8,
    pub url_rating: u8,
    pub referring_domains: u16,
    pub trust_flow: u8,
    pub citation_flow: u8,
    /// Estimated monthly organic visits.
    pub traffic: u32,
}

/// A discovered expired-domain candidate flowing through the pipeline.
///
/// Authority, trust, and commercial fields are write-once at creation; only
/// `status` and `check_progress` mutate afterwards, and only through the
/// inventory's transition methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainCandidate {
    pub id: String,
    pub name: String,
    pub tld: String,

    pub metrics: AuthorityMetrics,
    pub anchor_status: AnchorStatus,

    pub indexed: bool,
    pub wayback_clean: bool,
    pub archive_snapshot_count: u32,
    pub archive_first_seen_year: i32,

    pub price: f64,
    pub marketplace: Marketplace,
    pub is_auction: bool,
    pub auction_ends_at: Option<DateTime<Utc>>,
    pub bid_count: Option<u32>,

    /// Years since the first archive sighting.
    pub age: u32,
    pub is_expired: bool,

    pub status: CandidateStatus,
    /// Advisory verification progress, 0–100. UI feedback only.
    pub check_progress: u8,
    pub created_at: DateTime<Utc>,
}

impl DomainCandidate {
    /// Display key: root label plus TLD, e.g. `cryptonews.com`.
    pub fn full_name(&self) -> String {
        format!("{}{}", self.name, self.tld)
    }

    pub fn is_clean(&self) -> bool {
        self.status == CandidateStatus::Clean
    }

    /// Moves the candidate forward through the lifecycle graph.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] for any transition the graph does not
    /// allow (including backward moves).
    pub fn transition(&mut self, next: CandidateStatus) -> Result<(), AppError> {
        if !self.status.can_transition(next) {
            return Err(AppError::conflict(
                "Illegal candidate status transition",
                serde_json::json!({
                    "id": self.id,
                    "from": self.status.label(),
                    "to": next.label(),
                }),
            ));
        }

        self.status = next;
        Ok(())
    }
}
