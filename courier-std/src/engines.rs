//! Adapters turning async engines into [`ClientEngine`]s.

use courier_core::{ClientEngine, LocalAsyncEngine, Message, Next};

/// Drives an async engine to completion on the calling thread.
///
/// The connection blocks whichever thread performs it, so pair this with
/// [`Spawn`](crate::perform::Spawn) to keep callers responsive.
///
/// # Example
///
/// ```rust,ignore
/// client.set_engine(BlockingEngine::new(MyHttpEngine::new()));
/// let completion = client.spawn(call, &ThreadExecutor::new());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlockingEngine<E> {
    engine: E,
}

impl<E> BlockingEngine<E> {
    /// Wrap `engine`.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// The wrapped engine.
    pub fn inner(&self) -> &E {
        &self.engine
    }
}

impl<T, E> ClientEngine<T> for BlockingEngine<E>
where
    T: Message,
    E: LocalAsyncEngine<T> + Send + Sync + 'static,
{
    fn connect(&self, call: T, next: Next<T>) {
        next.complete(futures::executor::block_on(self.engine.connect(call)))
    }
}

#[cfg(feature = "tokio")]
pub use self::tokio_engine::TokioEngine;

#[cfg(feature = "tokio")]
mod tokio_engine {
    use courier_core::{AsyncEngine, ClientEngine, Message, Next};
    use std::sync::Arc;
    use tokio::runtime::Handle;

    /// Runs an async engine as a task on a tokio runtime.
    ///
    /// `connect` returns immediately; `next` is completed from the task.
    #[derive(Debug)]
    pub struct TokioEngine<E> {
        engine: Arc<E>,
        handle: Handle,
    }

    impl<E> TokioEngine<E> {
        /// Run `engine` on the runtime behind `handle`.
        pub fn new(engine: E, handle: Handle) -> Self {
            Self {
                engine: Arc::new(engine),
                handle,
            }
        }

        /// Run `engine` on the runtime of the current context.
        ///
        /// Returns `None` outside a tokio runtime.
        pub fn current(engine: E) -> Option<Self> {
            Handle::try_current()
                .ok()
                .map(|handle| Self::new(engine, handle))
        }
    }

    impl<E> Clone for TokioEngine<E> {
        fn clone(&self) -> Self {
            Self {
                engine: Arc::clone(&self.engine),
                handle: self.handle.clone(),
            }
        }
    }

    impl<T, E> ClientEngine<T> for TokioEngine<E>
    where
        T: Message,
        E: AsyncEngine<T> + Send + Sync + 'static,
    {
        fn connect(&self, call: T, next: Next<T>) {
            let engine = Arc::clone(&self.engine);
            // Detached: a panicking task drops `next`, which reports abandonment.
            drop(self.handle.spawn(async move {
                next.complete(engine.connect(call).await);
            }));
        }
    }
}
