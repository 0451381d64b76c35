//! The bounded worker executor (spec.md §4.1, §5): a fixed-size pool of OS
//! threads fed by a bounded FIFO queue. Submission never blocks the
//! caller — a full queue is a rejection, not a panic.

use parking_lot::Mutex;
use std::sync::mpsc::{self, SyncSender};
use std::sync::Arc;
use std::thread::JoinHandle;

type Job = Box<dyn FnOnce() + Send + 'static>;

pub struct WorkerPool {
    sender: SyncSender<Job>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(pool_size: usize, queue_capacity: usize) -> Self {
        let (sender, receiver) = mpsc::sync_channel::<Job>(queue_capacity);
        let receiver = Arc::new(Mutex::new(receiver));
        let workers = (0..pool_size.max(1))
            .map(|_| {
                let receiver = receiver.clone();
                std::thread::spawn(move || loop {
                    let job = receiver.lock().recv();
                    match job {
                        Ok(job) => job(),
                        Err(_) => break,
                    }
                })
            })
            .collect();
        Self { sender, workers }
    }

    /// Submit a job; returns `false` on a full queue (rejection policy —
    /// the caller is expected to log and roll back any optimistic
    /// bookkeeping, never to observe an exception).
    pub fn try_submit<F>(&self, job: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender.try_send(Box::new(job)).is_ok()
    }

    pub fn pool_size(&self) -> usize {
        self.workers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn submits_and_runs_jobs() {
        let pool = WorkerPool::new(2, 10);
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..5 {
            let counter = counter.clone();
            assert!(pool.try_submit(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }
        // Give the pool a moment to drain; a real test would use a barrier.
        std::thread::sleep(std::time::Duration::from_millis(100));
        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn full_queue_rejects_without_panicking() {
        let pool = WorkerPool::new(1, 1);
        let (tx, rx) = mpsc::channel::<()>();
        assert!(pool.try_submit(move || {
            let _ = rx.recv();
        }));
        // Fill the bounded queue, then force a rejection.
        let mut rejected = false;
        for _ in 0..100 {
            if !pool.try_submit(|| {}) {
                rejected = true;
                break;
            }
        }
        let _ = tx.send(());
        assert!(rejected);
    }
}
