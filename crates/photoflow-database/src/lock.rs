//! FIFO mutual exclusion for document read-modify-write cycles.
//!
//! Built on [`tokio::sync::Mutex`], which hands the lock to waiters in
//! arrival order. The guard releases on drop, so every exit path of a
//! critical section (return, `?`, panic unwind, cancellation) frees the
//! lock for the next waiter.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, MutexGuard};

/// Admits one critical section at a time, serving waiters strictly FIFO.
///
/// There is no timeout: a section that never completes stalls every
/// later caller.
#[derive(Debug, Default)]
pub struct SerializationLock {
    inner: Mutex<()>,
    waiting: AtomicUsize,
}

/// Proof of holding the [`SerializationLock`]. Dropping it releases the lock.
#[derive(Debug)]
pub struct LockGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

/// Decrements the waiter count even if the acquiring future is dropped.
struct WaitTicket<'a>(&'a AtomicUsize);

impl Drop for WaitTicket<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SerializationLock {
    /// Create a free lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the lock, queuing behind earlier callers.
    pub async fn acquire(&self) -> LockGuard<'_> {
        self.waiting.fetch_add(1, Ordering::SeqCst);
        let _ticket = WaitTicket(&self.waiting);
        let guard = self.inner.lock().await;
        LockGuard { _guard: guard }
    }

    /// Run `operation` while holding the lock and return its outcome.
    ///
    /// The lock is released before the outcome is handed back, whether the
    /// operation succeeded or failed.
    pub async fn with_lock<F, Fut, T>(&self, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let guard = self.acquire().await;
        let outcome = operation().await;
        drop(guard);
        outcome
    }

    /// Number of callers currently queued in [`acquire`](Self::acquire),
    /// including one that is about to be granted the lock.
    pub fn waiters(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    /// Whether a critical section is running right now.
    pub fn is_locked(&self) -> bool {
        self.inner.try_lock().is_err()
    }
}
