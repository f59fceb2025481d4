use log::{debug, info, warn};

use crate::RunStats;

/// Log the end-of-run totals. Each skip or failure was already reported when it happened.
pub fn summarize_run(stats: &RunStats) {
    debug!(
        "Visited {} files: {} indexed, {} already indexed, {} skipped, {} failed",
        stats.visited(),
        stats.indexed,
        stats.already_indexed,
        stats.skipped,
        stats.failed
    );
    if stats.skipped > 0 {
        info!("Skipped {} entries", stats.skipped);
    }
    if stats.failed > 0 {
        warn!(
            "Failed to index {} files due to read or write errors",
            stats.failed
        );
    }
}
