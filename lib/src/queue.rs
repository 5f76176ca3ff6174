use crate::results::StorageError;
use crate::storage::PersistenceGateway;
use log::warn;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use std::sync::mpsc;
use std::sync::Arc;

/// Moves writes to a background thread while keeping them in issue order.
///
/// All writes run one at a time, first in first out, on a single worker thread. A later write to
/// a key therefore always lands after an earlier one, so the last issued value wins. Reads wait
/// for every write issued before them.
///
/// Write failures can't be reported to the caller of [`set`](PersistenceGateway::set); they are
/// logged instead.
pub struct WriteQueue<S> {
    inner: Arc<S>,
    worker: ThreadPool,
}

impl<S: PersistenceGateway + 'static> WriteQueue<S> {
    /// Wraps the given gateway.
    pub fn new(inner: S) -> Result<Self, StorageError> {
        let worker = ThreadPoolBuilder::new()
            .num_threads(1)
            .thread_name(|_| "word-scramble-writer".to_string())
            .build()
            .map_err(|_| StorageError::QueueClosed)?;
        Ok(WriteQueue {
            inner: Arc::new(inner),
            worker,
        })
    }

    /// Blocks until every write issued so far has completed.
    pub fn flush(&self) -> Result<(), StorageError> {
        let (done_sender, done_receiver) = mpsc::channel();
        self.worker.spawn_fifo(move || {
            // The receiver only goes away if the flushing thread has given up waiting.
            let _ = done_sender.send(());
        });
        done_receiver.recv().map_err(|_| StorageError::QueueClosed)
    }

    /// The wrapped gateway. Reads from it directly may miss pending writes.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: PersistenceGateway + 'static> PersistenceGateway for WriteQueue<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.flush()?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let inner = Arc::clone(&self.inner);
        let key = key.to_string();
        self.worker.spawn_fifo(move || {
            if let Err(err) = inner.set(&key, value) {
                warn!("Background write of {key} failed: {err}");
            }
        });
        Ok(())
    }
}

impl<S> Drop for WriteQueue<S> {
    fn drop(&mut self) {
        // Dropping a rayon pool doesn't wait for queued jobs.
        let (done_sender, done_receiver) = mpsc::channel::<()>();
        self.worker.spawn_fifo(move || {
            let _ = done_sender.send(());
        });
        let _ = done_receiver.recv();
    }
}
