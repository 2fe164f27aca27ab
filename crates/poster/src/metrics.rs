use metrics::{Counter, Histogram};
use metrics_derive::Metrics;

/// The metrics for the [`super::ProofPoster`].
#[derive(Metrics, Clone)]
#[metrics(scope = "proof_poster")]
pub struct PosterMetrics {
    /// The duration of successful proof posts.
    pub post_duration: Histogram,
    /// The number of posted proofs.
    pub posted_proofs: Counter,
    /// The number of posted chunks.
    pub posted_chunks: Counter,
    /// The number of posted proof bytes.
    pub posted_bytes: Counter,
    /// The number of failed proof posts.
    pub failed_posts: Counter,
}
