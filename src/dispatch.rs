//! Dispatcher for running probes with bounded parallelism.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};

use crate::config::Target;
use crate::probe::{probe_target, HttpSender, Outcome, CANDIDATE_PATHS};

/// Run one probe per target with at most `concurrency` in flight.
///
/// Outcomes come back in the original target order regardless of
/// completion order; each completed probe reports through a channel
/// tagged with its input index and the receive loop fills the matching
/// slot. A cap of 0 is clamped to 1. Targets fail independently.
pub async fn run_probes(
    sender: Arc<dyn HttpSender>,
    targets: Vec<Target>,
    concurrency: usize,
) -> Vec<Outcome> {
    run_probes_on(sender, targets, concurrency, CANDIDATE_PATHS).await
}

async fn run_probes_on(
    sender: Arc<dyn HttpSender>,
    targets: Vec<Target>,
    concurrency: usize,
    paths: &'static [&'static str],
) -> Vec<Outcome> {
    let total = targets.len();
    if total == 0 {
        return Vec::new();
    }

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let (tx, mut rx) = mpsc::channel::<(usize, Outcome)>(total);

    for (index, target) in targets.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        let sender = sender.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            let permit = match semaphore.acquire_owned().await {
                Ok(p) => p,
                Err(_) => return, // semaphore closed, run is over
            };

            tracing::info!("Pinging {} ...", target.name);
            let outcome = probe_target(sender.as_ref(), &target, paths).await;
            drop(permit);

            let _ = tx.send((index, outcome)).await;
        });
    }
    drop(tx);

    let mut slots: Vec<Option<Outcome>> = Vec::with_capacity(total);
    slots.resize_with(total, || None);

    while let Some((index, outcome)) = rx.recv().await {
        slots[index] = Some(outcome);
    }

    slots.into_iter().flatten().collect()
}
