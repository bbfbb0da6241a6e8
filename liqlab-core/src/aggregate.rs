//! Averaging a metric across independent sources, tolerating partial failure.

/// Run `compute` for each source and average the successful results.
///
/// One success is enough to produce an aggregate; `None` only when every
/// source failed. A successful value passes through the mean unchanged when
/// it is the sole survivor. Failure logging belongs to the closure — the
/// aggregator just drops the `None`s.
pub fn average_of_sources<S, F>(sources: &[S], mut compute: F) -> Option<f64>
where
    F: FnMut(&S) -> Option<f64>,
{
    let successes: Vec<f64> = sources.iter().filter_map(|s| compute(s)).collect();
    if successes.is_empty() {
        return None;
    }
    Some(successes.iter().sum::<f64>() / successes.len() as f64)
}
