//! Fixed-size worker pool for CPU/disk-bound batch work.
//!
//! Workers pull index-tagged tasks from a shared channel and push results
//! back; the caller gets results in submission order regardless of which
//! worker finished first. Used for the two embarrassingly parallel phases
//! of a build: per-item base construction and per-block level reduction.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

/// Runs `work` over every task on up to `threads` workers, returning the
/// results in task order.
pub(crate) fn run_tasks<T, R, F>(tasks: Vec<T>, threads: usize, work: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync,
{
    let count = tasks.len();
    if count == 0 {
        return Vec::new();
    }
    let threads = threads.clamp(1, count);
    if threads == 1 {
        return tasks.into_iter().map(work).collect();
    }

    let (task_tx, task_rx) = mpsc::channel::<(usize, T)>();
    let task_rx = Arc::new(Mutex::new(task_rx));
    let (result_tx, result_rx) = mpsc::channel::<(usize, R)>();

    for task in tasks.into_iter().enumerate() {
        task_tx.send(task).expect("task channel open before workers start");
    }
    // Closing the sender lets workers drain the queue and exit.
    drop(task_tx);

    let mut results: Vec<Option<R>> = (0..count).map(|_| None).collect();
    thread::scope(|s| {
        for _ in 0..threads {
            let task_rx = Arc::clone(&task_rx);
            let result_tx = result_tx.clone();
            let work = &work;
            s.spawn(move || loop {
                let next = { task_rx.lock().unwrap().recv() };
                match next {
                    Ok((index, task)) => {
                        if result_tx.send((index, work(task))).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            });
        }
        drop(result_tx);
        for (index, result) in result_rx.iter() {
            results[index] = Some(result);
        }
    });

    results
        .into_iter()
        .map(|r| r.expect("every task produced a result"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_results_keep_submission_order() {
        let tasks: Vec<u32> = (0..100).collect();
        let results = run_tasks(tasks, 8, |n| n * 2);
        assert_eq!(results, (0..100).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input() {
        let results: Vec<u32> = run_tasks(Vec::<u32>::new(), 4, |n| n);
        assert!(results.is_empty());
    }

    #[test]
    fn test_single_thread_fallback() {
        let results = run_tasks(vec![1, 2, 3], 1, |n: i32| n + 1);
        assert_eq!(results, vec![2, 3, 4]);
    }

    #[test]
    fn test_every_task_runs_exactly_once() {
        let counter = AtomicUsize::new(0);
        let results = run_tasks((0..57).collect::<Vec<_>>(), 4, |n: usize| {
            counter.fetch_add(1, Ordering::SeqCst);
            n
        });
        assert_eq!(results.len(), 57);
        assert_eq!(counter.load(Ordering::SeqCst), 57);
    }

    #[test]
    fn test_errors_are_ordinary_results() {
        let results = run_tasks((0..10).collect::<Vec<u32>>(), 3, |n| {
            if n % 2 == 0 {
                Ok(n)
            } else {
                Err(format!("task {n} failed"))
            }
        });
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 5);
        assert_eq!(results[4], Ok(4));
    }
}
