//! Progress logging utilities.

use log::info;

/// Logs progress of a dataset build.
///
/// # Arguments
///
/// * `start_time` - The start time of the build
/// * `completed` - Number of URLs whose row has been collected
/// * `total` - Number of URLs in the build
pub fn log_progress(start_time: std::time::Instant, completed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Extracted {}/{} URLs in {:.2} seconds (~{:.2} URLs/sec)",
        completed, total, elapsed_secs, rate
    );
}
