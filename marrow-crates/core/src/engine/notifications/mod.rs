//! Domain events and the subscriptions of propagators to them.
//!
//! Narrowing a domain only records a [`DomainEvent`] in the [`EventSink`]; the space later drains
//! the sink and looks up the subscribed propagators in the [`WatchList`].

mod domain_event;
mod domain_events;
mod event_sink;
mod opaque_domain_event;
mod watch_list;

pub use domain_event::DomainEvent;
pub use domain_events::DomainEvents;
pub(crate) use event_sink::EventSink;
pub use opaque_domain_event::OpaqueDomainEvent;
pub(crate) use watch_list::WatchList;
pub use watch_list::Watchers;
