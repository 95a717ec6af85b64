//! Builder for constructing a [`Client`].

use super::Client;
use courier_core::{Action, ClientEngine, Event, IntoCallbackResult, Message, Middleware, Pipe};
use std::any::Any;

type Setup<T> = Box<dyn FnOnce(&Client<T>) + Send>;

/// Builder for constructing a [`Client`].
///
/// Steps are applied in the order they were added, so middleware added after
/// a callback sees that callback registered.
pub struct ClientBuilder<T: Message> {
    steps: Vec<Setup<T>>,
}

impl<T: Message> Default for ClientBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Message> ClientBuilder<T> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn step<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&Client<T>) + Send + 'static,
    {
        self.steps.push(Box::new(setup));
        self
    }

    /// Register a callback.
    pub fn on<F, R>(self, action: Action<T>, callback: F) -> Self
    where
        F: Fn(&Client<T>, &Event<'_, T>) -> R + Send + Sync + 'static,
        R: IntoCallbackResult,
    {
        self.step(move |client| {
            client.on(action, callback);
        })
    }

    /// Append a pipe running before the engine.
    pub fn before<P: Pipe<T>>(self, pipe: P) -> Self {
        self.step(move |client| {
            client.before(pipe);
        })
    }

    /// Append a pipe running after the engine.
    pub fn after<P: Pipe<T>>(self, pipe: P) -> Self {
        self.step(move |client| {
            client.after(pipe);
        })
    }

    /// Install the engine.
    pub fn engine<E: ClientEngine<T>>(self, engine: E) -> Self {
        self.step(move |client| {
            client.set_engine(engine);
        })
    }

    /// Store an extra value.
    pub fn extra<V>(self, key: impl Into<String>, value: V) -> Self
    where
        V: Any + Send + Sync,
    {
        let key = key.into();
        self.step(move |client| {
            client.set_extra(key, value);
        })
    }

    /// Inject middleware.
    pub fn middleware<M>(self, middleware: M) -> Self
    where
        M: Middleware<Client<T>> + 'static,
    {
        self.step(move |client| {
            client.use_middleware(&middleware);
        })
    }

    /// Build the client.
    pub fn build(self) -> Client<T> {
        let client = Client::new();
        for setup in self.steps {
            setup(&client);
        }
        client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{Emission, Next};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn test_build_applies_steps_in_order() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let client = ClientBuilder::<u32>::new()
            .on(Action::CONNECT, move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .middleware(|client: &Client<u32>| {
                assert_eq!(client.callback_count(), 1);
                client.set_extra("injected", true);
            })
            .engine(|call: u32, next: Next<u32>| next.proceed(call))
            .extra("name", "builder")
            .build();

        assert!(client.has_engine());
        assert_eq!(client.extra::<bool>("injected").as_deref(), Some(&true));
        assert_eq!(client.extra::<&str>("name").as_deref(), Some(&"builder"));
        client.emit(Emission::CONNECT, &0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_built_client_connects() {
        let client = Client::builder()
            .before(|call: u32, next: Next<u32>| next.proceed(call + 1))
            .engine(|call: u32, next: Next<u32>| next.proceed(call * 2))
            .after(|call: u32, next: Next<u32>| next.proceed(call + 3))
            .build();
        assert_eq!(client.connect(4).unwrap(), 13);
    }
}
