//! Standard pipes: conditional stages and synchronous transforms.

use courier_core::{BoxError, Message, Next, Pipe};

/// A pipe that conditionally runs an inner pipe.
///
/// The inner pipe only runs if the condition returns `true`. Otherwise the
/// call is passed on unchanged.
///
/// # Example
///
/// ```rust,ignore
/// // Only sign calls to the internal API
/// let signing = Conditional::new(
///     |call: &Call| call.request().uri().host().is_some_and(|h| h.as_str() == "api.internal"),
///     SigningPipe::new(key),
/// );
/// client.before(signing);
/// ```
pub struct Conditional<C, P> {
    condition: C,
    inner: P,
}

impl<C, P> Conditional<C, P> {
    /// Create a new `Conditional`.
    ///
    /// The inner pipe will only run when `condition(call)` returns `true`.
    pub fn new(condition: C, inner: P) -> Self {
        Self { condition, inner }
    }
}

impl<T, C, P> Pipe<T> for Conditional<C, P>
where
    T: Message,
    C: Fn(&T) -> bool + Send + Sync + 'static,
    P: Pipe<T>,
{
    fn pipe(&self, parameter: T, next: Next<T>) {
        if (self.condition)(&parameter) {
            self.inner.pipe(parameter, next)
        } else {
            next.proceed(parameter)
        }
    }
}

/// A pipe that runs one of two inner pipes based on a condition.
pub struct Branch<C, A, B> {
    condition: C,
    then_pipe: A,
    else_pipe: B,
}

impl<C, A, B> Branch<C, A, B> {
    /// Create a new `Branch`.
    pub fn new(condition: C, then_pipe: A, else_pipe: B) -> Self {
        Self {
            condition,
            then_pipe,
            else_pipe,
        }
    }
}

impl<T, C, A, B> Pipe<T> for Branch<C, A, B>
where
    T: Message,
    C: Fn(&T) -> bool + Send + Sync + 'static,
    A: Pipe<T>,
    B: Pipe<T>,
{
    fn pipe(&self, parameter: T, next: Next<T>) {
        if (self.condition)(&parameter) {
            self.then_pipe.pipe(parameter, next)
        } else {
            self.else_pipe.pipe(parameter, next)
        }
    }
}

/// A synchronous stage mapping the call to a new call or an error.
///
/// ```rust,ignore
/// client.before(Transform::new(|mut call: Call| {
///     call.request_mut().headers_mut().insert("Accept", "application/json")?;
///     Ok::<_, HttpError>(call)
/// }));
/// ```
pub struct Transform<F> {
    transform: F,
}

impl<F> Transform<F> {
    /// Create a new `Transform`.
    pub fn new(transform: F) -> Self {
        Self { transform }
    }
}

impl<T, F, E> Pipe<T> for Transform<F>
where
    T: Message,
    F: Fn(T) -> Result<T, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    fn pipe(&self, parameter: T, next: Next<T>) {
        next.complete((self.transform)(parameter).map_err(Into::into))
    }
}
