use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use tracing::instrument;

pub trait Queue<T> {
    fn new() -> Self;

    fn push(&self, val: T);

    fn pop(&self) -> Option<T>;

    fn peek(&self) -> Option<T>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;
}

/// FIFO queue used to hand recycled block numbers out of the free list.
#[derive(Debug, Clone)]
pub struct QueueImpl<T: Clone + Debug> {
    inner: Arc<Mutex<VecDeque<T>>>,
}

impl<T: Clone + Debug> Queue<T> for QueueImpl<T> {
    #[inline]
    fn new() -> Self
    where
        Self: Sized,
    {
        QueueImpl {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    #[inline]
    #[instrument]
    fn push(&self, val: T) {
        let mut inner = self.inner.lock().unwrap();
        inner.push_back(val);
    }

    #[inline]
    #[instrument]
    fn pop(&self) -> Option<T> {
        let mut inner = self.inner.lock().unwrap();
        inner.pop_front()
    }

    #[inline]
    fn peek(&self) -> Option<T> {
        let inner = self.inner.lock().unwrap();
        inner.front().cloned()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.is_empty()
    }

    #[inline]
    fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.len()
    }
}
