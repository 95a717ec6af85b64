//! # Events
//!
//! A client reports the life of a connection through a closed set of event
//! kinds. Each kind carries a typed payload, so callbacks pattern-match
//! instead of comparing names.

use std::fmt;

/// The kinds of events a client emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A connection is about to be performed.
    Connect,
    /// The engine finished and every stage succeeded.
    Connected,
    /// A successful connection is over; follows `Connected`. Failed
    /// connections end with `Exception` instead.
    Disconnected,
    /// Something failed, either a stage, the engine or a callback.
    Exception,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const VARIANTS: [EventKind; 4] = [
        EventKind::Connect,
        EventKind::Connected,
        EventKind::Disconnected,
        EventKind::Exception,
    ];

    /// The stable lowercase name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::Connect => "connect",
            EventKind::Connected => "connected",
            EventKind::Disconnected => "disconnected",
            EventKind::Exception => "exception",
        }
    }

    /// The single-kind emission for this kind.
    pub const fn emission(self) -> Emission {
        match self {
            EventKind::Connect => Emission::CONNECT,
            EventKind::Connected => Emission::CONNECTED,
            EventKind::Disconnected => Emission::DISCONNECTED,
            EventKind::Exception => Emission::EXCEPTION,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// A set of event kinds fired together by a single emission.
    ///
    /// Combining emissions is a plain union of their kinds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Emission: u8 {
        /// See [`EventKind::Connect`].
        const CONNECT = 1 << 0;
        /// See [`EventKind::Connected`].
        const CONNECTED = 1 << 1;
        /// See [`EventKind::Disconnected`].
        const DISCONNECTED = 1 << 2;
        /// See [`EventKind::Exception`].
        const EXCEPTION = 1 << 3;
    }
}

impl Emission {
    /// Every kind except [`EventKind::Exception`].
    pub const LIFECYCLE: Self = Self::CONNECT
        .union(Self::CONNECTED)
        .union(Self::DISCONNECTED);

    /// Union of all the given emissions.
    pub fn combine<I>(emissions: I) -> Self
    where
        I: IntoIterator<Item = Emission>,
    {
        emissions
            .into_iter()
            .fold(Emission::empty(), |acc, emission| acc.union(emission))
    }

    /// Iterate the kinds of this emission in declaration order.
    pub fn kinds(self) -> impl Iterator<Item = EventKind> {
        EventKind::VARIANTS
            .into_iter()
            .filter(move |kind| self.contains(kind.emission()))
    }
}

impl From<EventKind> for Emission {
    fn from(kind: EventKind) -> Self {
        kind.emission()
    }
}

/// A single event with its typed payload.
#[derive(Debug)]
pub enum Event<'a, T> {
    /// The call is about to be performed.
    Connect(&'a T),
    /// The call completed successfully.
    Connected(&'a T),
    /// The successful call is finished.
    Disconnected(&'a T),
    /// A failure occurred.
    Exception(&'a (dyn std::error::Error + Send + Sync + 'static)),
}

impl<'a, T> Event<'a, T> {
    /// Build the lifecycle event of `kind` for `call`.
    ///
    /// Returns `None` for [`EventKind::Exception`], whose payload is an error.
    pub fn lifecycle(kind: EventKind, call: &'a T) -> Option<Self> {
        match kind {
            EventKind::Connect => Some(Event::Connect(call)),
            EventKind::Connected => Some(Event::Connected(call)),
            EventKind::Disconnected => Some(Event::Disconnected(call)),
            EventKind::Exception => None,
        }
    }

    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Connect(_) => EventKind::Connect,
            Event::Connected(_) => EventKind::Connected,
            Event::Disconnected(_) => EventKind::Disconnected,
            Event::Exception(_) => EventKind::Exception,
        }
    }

    /// The call carried by a lifecycle event.
    pub fn call(&self) -> Option<&'a T> {
        match *self {
            Event::Connect(call) | Event::Connected(call) | Event::Disconnected(call) => {
                Some(call)
            }
            Event::Exception(_) => None,
        }
    }

    /// The error carried by an exception event.
    pub fn error(&self) -> Option<&'a (dyn std::error::Error + Send + Sync + 'static)> {
        match *self {
            Event::Exception(error) => Some(error),
            _ => None,
        }
    }
}

impl<T> Clone for Event<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Event<'_, T> {}
