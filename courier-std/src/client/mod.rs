//! The client: callback registry, extras, pipeline and engine.
//!
//! A [`Client`] ties the pieces of `courier-core` together. Middleware
//! registers callbacks and pipes on it, an engine performs the transport, and
//! [`Client::perform`] runs the whole connection under a chosen
//! [`Performer`].
//!
//! # Connection Flow
//!
//! 1. `CONNECT` is emitted with the call
//! 2. the `before` pipes run in registration order
//! 3. the engine performs the call
//! 4. the `after` pipes run in registration order
//! 5. `CONNECTED` then `DISCONNECTED` are emitted
//!
//! Any failure along the way is raised as an `EXCEPTION` event and returned
//! to the caller through the performer's output.
//!
//! # Thread Safety
//!
//! Every piece of client state sits behind its own lock and every method takes
//! `&self`. Dispatch copies the registry before invoking callbacks, so a
//! callback may register or unregister callbacks on the client it was fired
//! by.

mod builder;
mod extras;
mod registry;

pub use builder::ClientBuilder;
pub use extras::{ExtraValue, Extras};
pub use registry::{CallbackHandle, Registration, SharedCallback};

use crate::{
    completion::Completion,
    perform::{Spawn, Suspend, Wait},
};
use courier_core::{
    Action, BoxError, BoxPipe, Callback, ClientEngine, DispatchError, Emission, Event, Executor,
    IntoCallbackResult, Message, Middleware, Next, Performer, Pipe, PipeError, combine,
};
use registry::Registry;
use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

type SharedEngine<T> = Arc<dyn ClientEngine<T>>;

struct Shared<T: Message> {
    registry: RwLock<Registry<Client<T>, T>>,
    extras: RwLock<Extras>,
    before: RwLock<Vec<BoxPipe<T>>>,
    after: RwLock<Vec<BoxPipe<T>>>,
    engine: RwLock<Option<SharedEngine<T>>>,
}

/// A client orchestrating connections of calls of type `T`.
///
/// # Cloning
///
/// `clone()` is a shallow structural copy. The clone gets its own registry,
/// extras map, pipe lists and engine slot, so registering on one never shows
/// up on the other. The callbacks, actions, pipes, engine and extra values
/// themselves are shared by reference.
///
/// # Example
///
/// ```rust,ignore
/// let client = Client::new();
/// client.set_engine(my_engine);
/// client.on(Action::CONNECTED, |_, event| {
///     tracing::info!(kind = %event.kind(), "done");
/// });
/// let call = client.connect(call)?;
/// ```
pub struct Client<T: Message> {
    shared: Arc<Shared<T>>,
}

fn read<L>(lock: &RwLock<L>) -> RwLockReadGuard<'_, L> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<L>(lock: &RwLock<L>) -> RwLockWriteGuard<'_, L> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Message> Client<T> {
    /// Create a client with no callbacks, pipes or engine.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: RwLock::new(Registry::new()),
                extras: RwLock::new(Extras::new()),
                before: RwLock::new(Vec::new()),
                after: RwLock::new(Vec::new()),
                engine: RwLock::new(None),
            }),
        }
    }

    /// Start building a client.
    pub fn builder() -> ClientBuilder<T> {
        ClientBuilder::new()
    }

    /// Another handle to this very client (not a copy).
    fn handle(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }

    // ------------------------------------------------------------------
    // Callbacks
    // ------------------------------------------------------------------

    /// Register `callback` to fire on events accepted by `action`.
    pub fn on<F, R>(&self, action: Action<T>, callback: F) -> CallbackHandle
    where
        F: Fn(&Client<T>, &Event<'_, T>) -> R + Send + Sync + 'static,
        R: IntoCallbackResult,
    {
        self.register(Arc::new(callback), vec![action])
    }

    /// Register `callback` under several actions at once.
    ///
    /// The callback still fires at most once per emission.
    pub fn on_any<I, F, R>(&self, actions: I, callback: F) -> CallbackHandle
    where
        I: IntoIterator<Item = Action<T>>,
        F: Fn(&Client<T>, &Event<'_, T>) -> R + Send + Sync + 'static,
        R: IntoCallbackResult,
    {
        self.register(Arc::new(callback), actions.into_iter().collect())
    }

    /// Register a [`Callback`] implementation.
    pub fn on_callback<K>(&self, action: Action<T>, callback: K) -> CallbackHandle
    where
        K: Callback<Client<T>, T>,
    {
        self.register(Arc::new(callback), vec![action])
    }

    /// Register an already shared callback.
    ///
    /// Registering the same `Arc` twice creates two registrations.
    pub fn on_shared(
        &self,
        action: Action<T>,
        callback: SharedCallback<Client<T>, T>,
    ) -> CallbackHandle {
        self.register(callback, vec![action])
    }

    fn register(
        &self,
        callback: SharedCallback<Client<T>, T>,
        actions: Vec<Action<T>>,
    ) -> CallbackHandle {
        write(&self.shared.registry).insert(callback, actions)
    }

    /// Add `action` to an existing registration.
    ///
    /// Returns `false` if `handle` was unregistered.
    pub fn attach(&self, handle: CallbackHandle, action: Action<T>) -> bool {
        write(&self.shared.registry).attach(handle, action)
    }

    /// Unregister a callback. Returns `false` if it was already gone.
    pub fn off(&self, handle: CallbackHandle) -> bool {
        write(&self.shared.registry).remove(handle)
    }

    /// The registration behind `handle`.
    pub fn registration(&self, handle: CallbackHandle) -> Option<Registration<Client<T>, T>> {
        read(&self.shared.registry).get(handle).cloned()
    }

    /// Number of registered callbacks.
    pub fn callback_count(&self) -> usize {
        read(&self.shared.registry).len()
    }

    // ------------------------------------------------------------------
    // Middleware, pipes and engine
    // ------------------------------------------------------------------

    /// Inject `middleware` into this client.
    pub fn use_middleware<M>(&self, middleware: &M) -> &Self
    where
        M: Middleware<Client<T>> + ?Sized,
    {
        middleware.inject(self);
        self
    }

    /// Append a pipe running before the engine.
    pub fn before<P: Pipe<T>>(&self, pipe: P) -> &Self {
        write(&self.shared.before).push(Arc::new(pipe));
        self
    }

    /// Append a pipe running after the engine.
    pub fn after<P: Pipe<T>>(&self, pipe: P) -> &Self {
        write(&self.shared.after).push(Arc::new(pipe));
        self
    }

    /// Install the engine, replacing any previous one.
    pub fn set_engine<E: ClientEngine<T>>(&self, engine: E) -> &Self {
        *write(&self.shared.engine) = Some(Arc::new(engine));
        self
    }

    /// Whether an engine is installed.
    pub fn has_engine(&self) -> bool {
        read(&self.shared.engine).is_some()
    }

    // ------------------------------------------------------------------
    // Extras
    // ------------------------------------------------------------------

    /// Store an extra value under `key`, returning the previous one.
    pub fn set_extra<V>(&self, key: impl Into<String>, value: V) -> Option<ExtraValue>
    where
        V: Any + Send + Sync,
    {
        write(&self.shared.extras).insert(key, value)
    }

    /// The extra value under `key`, if present and of type `V`.
    pub fn extra<V>(&self, key: &str) -> Option<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        read(&self.shared.extras).get(key)
    }

    /// Remove the extra value under `key`.
    pub fn remove_extra(&self, key: &str) -> Option<ExtraValue> {
        write(&self.shared.extras).remove(key)
    }

    /// A snapshot of all extra values.
    pub fn extras(&self) -> Extras {
        read(&self.shared.extras).clone()
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Fire `emission` with `call`.
    ///
    /// Each registered callback fires at most once, on the first of its
    /// actions matching one of the emission's kinds. Callback failures are
    /// raised as exception events and never interrupt the loop. Returns the
    /// number of callbacks fired.
    ///
    /// The exception kind is ignored here; use [`Client::raise`].
    pub fn emit(&self, emission: Emission, call: &T) -> usize {
        self.emit_with(emission, call, |error| {
            self.raise(&*error);
        })
    }

    /// Like [`Client::emit`], but callback failures go to `sink`.
    pub fn emit_with<S>(&self, emission: Emission, call: &T, mut sink: S) -> usize
    where
        S: FnMut(BoxError),
    {
        let events: Vec<Event<'_, T>> = emission
            .kinds()
            .filter_map(|kind| Event::lifecycle(kind, call))
            .collect();
        self.dispatch(&events, &mut sink)
    }

    /// Fire an exception event carrying `error`.
    ///
    /// Exception callbacks that fail are logged and not raised again. Returns
    /// the number of callbacks fired; zero means nobody observed the error.
    pub fn raise(&self, error: &(dyn std::error::Error + Send + Sync + 'static)) -> usize {
        let fired = self.dispatch(&[Event::Exception(error)], &mut |failure: BoxError| {
            tracing::error!(error = %failure, "exception callback failed");
        });
        if fired == 0 {
            tracing::warn!(%error, "unobserved exception");
        }
        fired
    }

    fn dispatch(&self, events: &[Event<'_, T>], sink: &mut dyn FnMut(BoxError)) -> usize {
        // Copy first: callbacks may mutate the registry.
        let registrations = read(&self.shared.registry).snapshot();
        let mut fired = 0;
        for (handle, registration) in registrations {
            let matched = events.iter().find(|event| {
                registration
                    .actions()
                    .iter()
                    .any(|action| action.test(event))
            });
            let Some(event) = matched else {
                continue;
            };
            fired += 1;
            tracing::trace!(callback = handle.index(), kind = %event.kind(), "firing callback");
            if let Err(error) = invoke(registration.callback().as_ref(), self, event) {
                tracing::debug!(callback = handle.index(), %error, "callback failed");
                sink(error);
            }
        }
        fired
    }

    // ------------------------------------------------------------------
    // Performing
    // ------------------------------------------------------------------

    /// Perform a connection of `call` under `performer`.
    pub fn perform<P>(&self, call: T, performer: &P) -> P::Output
    where
        P: Performer<T> + ?Sized,
    {
        let client = self.handle();
        performer.perform(Box::new(move |next: Next<T>| client.run(call, next)))
    }

    /// Perform on the calling thread and block until done.
    pub fn connect(&self, call: T) -> Result<T, BoxError> {
        self.perform(call, &Wait)
    }

    /// Perform and return a future of the outcome.
    pub fn connect_async(&self, call: T) -> Completion<T> {
        self.perform(call, &Suspend)
    }

    /// Perform on `executor`.
    pub fn spawn<X>(&self, call: T, executor: &X) -> Completion<T>
    where
        X: Executor + Clone,
    {
        self.perform(call, &Spawn::new(executor.clone()))
    }

    fn run(self, call: T, next: Next<T>) {
        tracing::debug!("connection started");
        self.emit(Emission::CONNECT, &call);

        let engine = read(&self.shared.engine).clone();
        let stages: Vec<BoxPipe<T>> = read(&self.shared.before)
            .iter()
            .cloned()
            .chain(std::iter::once(EngineStage { engine }.boxed()))
            .chain(read(&self.shared.after).iter().cloned())
            .collect();

        let client = self;
        combine(stages).pipe(
            call,
            Next::new(move |result| match result {
                Ok(call) => {
                    tracing::debug!("connection completed");
                    client.emit(Emission::CONNECTED, &call);
                    client.emit(Emission::DISCONNECTED, &call);
                    next.proceed(call);
                }
                Err(error) => {
                    tracing::debug!(%error, "connection failed");
                    client.raise(&*error);
                    next.fail(error);
                }
            }),
        );
    }
}

/// Invoke a callback, turning a panic into a [`DispatchError::Panic`].
fn invoke<T: Message>(
    callback: &dyn Callback<Client<T>, T>,
    client: &Client<T>,
    event: &Event<'_, T>,
) -> Result<(), BoxError> {
    match panic::catch_unwind(AssertUnwindSafe(|| callback.call(client, event))) {
        Ok(result) => result,
        Err(payload) => Err(Box::new(DispatchError::Panic(panic_message(payload.as_ref())))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// The engine as a pipeline stage.
struct EngineStage<T> {
    engine: Option<SharedEngine<T>>,
}

impl<T: Message> Pipe<T> for EngineStage<T> {
    fn pipe(&self, parameter: T, next: Next<T>) {
        match &self.engine {
            Some(engine) => engine.connect(parameter, next),
            None => next.fail(PipeError::NoEngine),
        }
    }
}

impl<T: Message> Default for Client<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Message> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: RwLock::new(read(&self.shared.registry).clone()),
                extras: RwLock::new(read(&self.shared.extras).clone()),
                before: RwLock::new(read(&self.shared.before).clone()),
                after: RwLock::new(read(&self.shared.after).clone()),
                engine: RwLock::new(read(&self.shared.engine).clone()),
            }),
        }
    }
}

impl<T: Message> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("callbacks", &self.callback_count())
            .field("extras", &*read(&self.shared.extras))
            .field("before", &read(&self.shared.before).len())
            .field("after", &read(&self.shared.after).len())
            .field("engine", &self.has_engine())
            .finish()
    }
}
