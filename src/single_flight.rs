//! Single-flight memoization of an asynchronous producer.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outcome of one producer run. `Err` carries the panic message when the
/// producer panicked instead of returning.
type Outcome<T, E> = Result<Result<T, E>, String>;

type Producer<T, E> = Box<dyn Fn() -> BoxFuture<'static, Outcome<T, E>> + Send + Sync>;

enum CacheState<T, E> {
    /// Nothing has run, or the last run failed.
    Empty,
    /// A run is in progress; every caller awaits the same shared future.
    Pending {
        generation: u64,
        shared: Shared<BoxFuture<'static, Outcome<T, E>>>,
    },
    /// A run succeeded; its value is served forever.
    Done(T),
}

struct Inner<T, E> {
    state: CacheState<T, E>,
    generation: u64,
}

/// Runs a producer at most once at a time and caches its first success.
///
/// - The first call starts the producer.
/// - Calls made while it runs share its outcome; the producer is not started
///   again.
/// - A success is stored permanently and returned to every later call.
/// - A failure is returned to the callers that were waiting on it and the
///   cache goes back to empty, so the next call starts a fresh run.
/// - A panic in the producer also empties the cache, then resumes in every
///   caller that was waiting on that run.
///
/// # Example
///
/// ```rust
/// use java_discovery::SingleFlight;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let cache = SingleFlight::new(|| async { Ok::<_, String>(42) });
///     assert_eq!(cache.get().await, Ok(42));
///     assert!(cache.is_resolved());
/// }
/// ```
pub struct SingleFlight<T, E> {
    producer: Producer<T, E>,
    inner: Mutex<Inner<T, E>>,
}

impl<T, E> SingleFlight<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Wrap `producer`. Nothing runs until the first [`get`](Self::get).
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            producer: Box::new(move || {
                AssertUnwindSafe(producer())
                    .catch_unwind()
                    .map(|outcome| outcome.map_err(panic_message))
                    .boxed()
            }),
            inner: Mutex::new(Inner {
                state: CacheState::Empty,
                generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The cached value, or the outcome of the run this call joins or starts.
    pub async fn get(&self) -> Result<T, E> {
        let (generation, shared) = {
            let mut inner = self.lock();
            let joined = match &inner.state {
                CacheState::Done(value) => return Ok(value.clone()),
                CacheState::Pending { generation, shared } => Some((*generation, shared.clone())),
                CacheState::Empty => None,
            };
            match joined {
                Some(pending) => pending,
                None => {
                    inner.generation += 1;
                    let generation = inner.generation;
                    let shared = (self.producer)().shared();
                    inner.state = CacheState::Pending {
                        generation,
                        shared: shared.clone(),
                    };
                    (generation, shared)
                }
            }
        };

        let outcome = shared.await;

        {
            let mut inner = self.lock();
            if matches!(&inner.state, CacheState::Pending { generation: g, .. } if *g == generation)
            {
                inner.state = match &outcome {
                    Ok(Ok(value)) => CacheState::Done(value.clone()),
                    Ok(Err(_)) | Err(_) => CacheState::Empty,
                };
            }
        }

        match outcome {
            Ok(result) => result,
            Err(message) => std::panic::resume_unwind(Box::new(message)),
        }
    }

    /// Whether a successful result is cached.
    pub fn is_resolved(&self) -> bool {
        matches!(self.lock().state, CacheState::Done(_))
    }

    /// Whether a run is currently in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self.lock().state, CacheState::Pending { .. })
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => message.to_string(),
            Err(_) => "single-flight producer panicked".to_string(),
        },
    }
}
