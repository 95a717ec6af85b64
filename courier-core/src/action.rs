//! # Actions
//!
//! An [`Action`] decides whether a registered callback wants a given event.
//! It names the [`Emission`] it nominally triggers on and may narrow it with a
//! predicate over the event payload.

use crate::event::{Emission, Event};
use std::{fmt, sync::Arc};

type Predicate<T> = Arc<dyn Fn(&Event<'_, T>) -> bool + Send + Sync>;

/// A selector over events.
///
/// # Example
///
/// ```rust,ignore
/// // Every lifecycle event.
/// client.on(Action::ALL, |_, event| println!("{}", event.kind()));
///
/// // Only connections to a given host.
/// let action = Action::CONNECT.filter(|event: &Event<'_, Call>| {
///     event.call().is_some_and(|call| call.request().uri().host() == Some("example.com"))
/// });
/// ```
pub struct Action<T> {
    emission: Emission,
    predicate: Option<Predicate<T>>,
}

impl<T> Action<T> {
    /// Matches every lifecycle event, never an exception.
    pub const ALL: Self = Self::on(Emission::LIFECYCLE);

    /// Matches only exception events.
    pub const EXCEPTION: Self = Self::on(Emission::EXCEPTION);

    /// Matches [`Event::Connect`].
    pub const CONNECT: Self = Self::on(Emission::CONNECT);

    /// Matches [`Event::Connected`].
    pub const CONNECTED: Self = Self::on(Emission::CONNECTED);

    /// Matches [`Event::Disconnected`].
    pub const DISCONNECTED: Self = Self::on(Emission::DISCONNECTED);

    /// An action matching every event whose kind is in `emission`.
    pub const fn on(emission: Emission) -> Self {
        Self {
            emission,
            predicate: None,
        }
    }

    /// An action matching events of `emission` accepted by `predicate`.
    pub fn when<F>(emission: Emission, predicate: F) -> Self
    where
        F: Fn(&Event<'_, T>) -> bool + Send + Sync + 'static,
    {
        Self {
            emission,
            predicate: Some(Arc::new(predicate)),
        }
    }

    /// Narrows this action: both it and `predicate` must accept the event.
    pub fn filter<F>(self, predicate: F) -> Self
    where
        T: 'static,
        F: Fn(&Event<'_, T>) -> bool + Send + Sync + 'static,
    {
        match self.predicate {
            None => Self::when(self.emission, predicate),
            Some(existing) => Self::when(self.emission, move |event| {
                existing(event) && predicate(event)
            }),
        }
    }

    /// Union of the given actions: the result accepts an event if any of
    /// them does. An empty union accepts nothing.
    pub fn combine<I>(actions: I) -> Self
    where
        T: 'static,
        I: IntoIterator<Item = Action<T>>,
    {
        let actions: Vec<Action<T>> = actions.into_iter().collect();
        let emission = Emission::combine(actions.iter().map(Action::emission));
        if actions.iter().all(|action| action.predicate.is_none()) {
            return Self::on(emission);
        }
        Self::when(emission, move |event| {
            actions.iter().any(|action| action.test(event))
        })
    }

    /// The kinds this action nominally triggers on.
    pub fn emission(&self) -> Emission {
        self.emission
    }

    /// Whether this action accepts `event`.
    pub fn test(&self, event: &Event<'_, T>) -> bool {
        if !self.emission.contains(event.kind().emission()) {
            return false;
        }
        match &self.predicate {
            Some(predicate) => predicate(event),
            None => true,
        }
    }
}

impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self {
            emission: self.emission,
            predicate: self.predicate.clone(),
        }
    }
}

impl<T> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("emission", &self.emission)
            .field("filtered", &self.predicate.is_some())
            .finish()
    }
}

impl<T> From<Emission> for Action<T> {
    fn from(emission: Emission) -> Self {
        Self::on(emission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> std::io::Error {
        std::io::Error::other("failure")
    }

    #[test]
    fn test_all_skips_exception() {
        let err = failure();
        let call = 1u32;
        assert!(Action::<u32>::ALL.test(&Event::Connect(&call)));
        assert!(Action::<u32>::ALL.test(&Event::Disconnected(&call)));
        assert!(!Action::<u32>::ALL.test(&Event::Exception(&err)));
    }

    #[test]
    fn test_exception_only_matches_errors() {
        let err = failure();
        let call = 1u32;
        assert!(Action::<u32>::EXCEPTION.test(&Event::Exception(&err)));
        assert!(!Action::<u32>::EXCEPTION.test(&Event::Connected(&call)));
    }

    #[test]
    fn test_when_applies_predicate() {
        let even = Action::when(Emission::CONNECT, |event: &Event<'_, u32>| {
            event.call().is_some_and(|n| n % 2 == 0)
        });
        assert!(even.test(&Event::Connect(&2)));
        assert!(!even.test(&Event::Connect(&3)));
        assert!(!even.test(&Event::Connected(&2)));
    }

    #[test]
    fn test_filter_narrows() {
        let big = Action::<u32>::ALL
            .filter(|event| event.call().is_some_and(|n| *n > 10))
            .filter(|event| event.call().is_some_and(|n| *n < 20));
        assert!(big.test(&Event::Connected(&15)));
        assert!(!big.test(&Event::Connected(&25)));
        assert!(!big.test(&Event::Connected(&5)));
    }

    #[test]
    fn test_combine_is_a_union() {
        let small = Action::when(Emission::CONNECT, |event: &Event<'_, u32>| {
            event.call().is_some_and(|n| *n < 5)
        });
        let either = Action::combine([small, Action::CONNECTED]);
        assert_eq!(either.emission(), Emission::CONNECT | Emission::CONNECTED);
        assert!(either.test(&Event::Connect(&1)));
        assert!(!either.test(&Event::Connect(&9)));
        assert!(either.test(&Event::Connected(&9)));
        assert!(!either.test(&Event::Disconnected(&1)));
    }

    #[test]
    fn test_empty_combine_matches_nothing() {
        let none = Action::<u32>::combine([]);
        assert!(!none.test(&Event::Connect(&1)));
        assert!(none.emission().is_empty());
    }
}
