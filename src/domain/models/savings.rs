use serde::{Deserialize, Serialize};

/// Aggregate storage saved by server-side deduplication.
///
/// Recomputed by the server on demand; the client treats it as stale until
/// refetched and never versions it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub size: f64,
    pub unit: String,
}
