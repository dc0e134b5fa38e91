//! Bounded fan-out for per-key point reads.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

/// Run `fetch` over every key on at most `workers` scoped threads.
///
/// Results come back in key order regardless of completion order. The
/// first failure (lowest key index) is returned; once any worker fails the
/// others stop picking up new keys.
pub(super) fn fetch_ordered<T, E, F>(keys: &[String], workers: usize, fetch: F) -> Result<Vec<T>, E>
where
    T: Send,
    E: Send,
    F: Fn(&str) -> Result<T, E> + Sync,
{
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let workers = workers.clamp(1, keys.len());
    let next = AtomicUsize::new(0);
    let failed = AtomicBool::new(false);
    let mut slots: Vec<Option<Result<T, E>>> = (0..keys.len()).map(|_| None).collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut done = Vec::new();
                    while !failed.load(Ordering::Relaxed) {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(key) = keys.get(index) else {
                            break;
                        };
                        let result = fetch(key);
                        if result.is_err() {
                            failed.store(true, Ordering::Relaxed);
                        }
                        done.push((index, result));
                    }
                    done
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(done) => {
                    for (index, result) in done {
                        slots[index] = Some(result);
                    }
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });

    // Slots left empty were skipped after a failure; the failure itself is
    // always filled in, so collecting stops at it.
    slots.into_iter().flatten().collect()
}
