use enumset::EnumSet;

use super::DomainEvent;
use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;

/// While a propagator runs, the changes it makes are captured as events in the event sink. When
/// the propagator finishes, the space drains the sink to notify the propagators that subscribe to
/// those events.
///
/// The event sink ignores duplicate events, so a domain that changes several times before the
/// next drain schedules each watcher once.
#[derive(Default, Clone, Debug)]
pub(crate) struct EventSink {
    present: KeyedVec<DomainId, EnumSet<DomainEvent>>,
    events: Vec<(DomainEvent, DomainId)>,
}

impl EventSink {
    pub(crate) fn grow(&mut self) {
        let _ = self.present.push(EnumSet::new());
    }

    pub(crate) fn event_occurred(&mut self, event: DomainEvent, domain: DomainId) {
        let elem = &mut self.present[domain];

        if elem.insert(event) {
            self.events.push((event, domain));
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (DomainEvent, DomainId)> + '_ {
        self.events.drain(..).inspect(|&(event, domain)| {
            let _ = self.present[domain].remove(event);
        })
    }

    /// Forget all pending events, for when the space fails or backtracks.
    pub(crate) fn clear(&mut self) {
        for (_, domain) in self.events.drain(..) {
            self.present[domain].clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink_with_domains(num_domains: usize) -> EventSink {
        let mut sink = EventSink::default();
        for _ in 0..num_domains {
            sink.grow();
        }
        sink
    }

    #[test]
    fn the_default_sink_is_empty() {
        let mut sink = EventSink::default();

        assert!(sink.is_empty());
        assert_eq!(0, sink.drain().count());
    }

    #[test]
    fn a_captured_event_is_observed_in_the_drain() {
        let mut sink = sink_with_domains(2);

        sink.event_occurred(DomainEvent::LowerBound, DomainId::new(0));
        sink.event_occurred(DomainEvent::UpperBound, DomainId::new(1));

        let events = sink.drain().collect::<Vec<_>>();

        assert_eq!(
            vec![
                (DomainEvent::LowerBound, DomainId::new(0)),
                (DomainEvent::UpperBound, DomainId::new(1))
            ],
            events
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn duplicate_events_are_ignored_until_drained() {
        let mut sink = sink_with_domains(1);

        sink.event_occurred(DomainEvent::LowerBound, DomainId::new(0));
        sink.event_occurred(DomainEvent::LowerBound, DomainId::new(0));
        assert_eq!(1, sink.drain().count());

        sink.event_occurred(DomainEvent::LowerBound, DomainId::new(0));
        assert_eq!(1, sink.drain().count());
    }

    #[test]
    fn clearing_forgets_pending_events() {
        let mut sink = sink_with_domains(1);

        sink.event_occurred(DomainEvent::Removal, DomainId::new(0));
        sink.clear();
        assert!(sink.is_empty());

        sink.event_occurred(DomainEvent::Removal, DomainId::new(0));
        assert_eq!(1, sink.drain().count());
    }
}
