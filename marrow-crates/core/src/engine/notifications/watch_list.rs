use enumset::EnumSet;

use super::DomainEvent;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;
use crate::propagation::PropagatorId;
use crate::propagation::PropagatorVarId;

/// The subscription graph: for every domain and every [`DomainEvent`], the propagators (together
/// with the [`crate::propagation::LocalId`] of the view they registered) to notify.
///
/// Changes made after the first checkpoint are trailed, so that subscriptions made or cancelled
/// deeper in a search are undone when the owning space restores an earlier checkpoint.
#[derive(Default, Debug, Clone)]
pub(crate) struct WatchList {
    watchers: KeyedVec<DomainId, Watcher>,
    /// For every propagator, the domains it may be watching.
    watched_domains: KeyedVec<PropagatorId, Vec<DomainId>>,
    trail: Trail<SubscriptionChange>,
}

#[derive(Debug, Default, Clone)]
struct Watcher {
    lower_bound_watchers: Vec<PropagatorVarId>,
    upper_bound_watchers: Vec<PropagatorVarId>,
    assign_watchers: Vec<PropagatorVarId>,
    removal_watchers: Vec<PropagatorVarId>,
}

impl Watcher {
    fn watchers_mut(&mut self, event: DomainEvent) -> &mut Vec<PropagatorVarId> {
        match event {
            DomainEvent::Assign => &mut self.assign_watchers,
            DomainEvent::LowerBound => &mut self.lower_bound_watchers,
            DomainEvent::UpperBound => &mut self.upper_bound_watchers,
            DomainEvent::Removal => &mut self.removal_watchers,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SubscriptionChange {
    Watched {
        domain: DomainId,
        event: DomainEvent,
        watcher: PropagatorVarId,
    },
    Unwatched {
        domain: DomainId,
        event: DomainEvent,
        watcher: PropagatorVarId,
    },
}

impl WatchList {
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(Watcher::default());
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    pub(crate) fn synchronise(&mut self, checkpoint: usize) {
        let undone = self.trail.synchronise(checkpoint).collect::<Vec<_>>();

        for change in undone {
            match change {
                SubscriptionChange::Watched {
                    domain,
                    event,
                    watcher,
                } => self.watchers[domain]
                    .watchers_mut(event)
                    .retain(|&other| other != watcher),
                SubscriptionChange::Unwatched {
                    domain,
                    event,
                    watcher,
                } => self.watchers[domain].watchers_mut(event).push(watcher),
            }
        }
    }

    pub(crate) fn get_affected_propagators(
        &self,
        event: DomainEvent,
        domain: DomainId,
    ) -> &[PropagatorVarId] {
        let watcher = &self.watchers[domain];

        match event {
            DomainEvent::Assign => &watcher.assign_watchers,
            DomainEvent::LowerBound => &watcher.lower_bound_watchers,
            DomainEvent::UpperBound => &watcher.upper_bound_watchers,
            DomainEvent::Removal => &watcher.removal_watchers,
        }
    }

    /// Subscribe `watcher` to the `events` of `domain`. Subscribing twice to the same event is a
    /// no-op.
    pub(crate) fn watch_all(
        &mut self,
        domain: DomainId,
        events: EnumSet<DomainEvent>,
        watcher: PropagatorVarId,
    ) {
        self.watched_domains.accomodate(watcher.propagator, vec![]);
        if !self.watched_domains[watcher.propagator].contains(&domain) {
            self.watched_domains[watcher.propagator].push(domain);
        }

        for event in events {
            let watchers = self.watchers[domain].watchers_mut(event);
            if watchers.contains(&watcher) {
                continue;
            }

            watchers.push(watcher);
            if self.trail.get_checkpoint() > 0 {
                self.trail.push(SubscriptionChange::Watched {
                    domain,
                    event,
                    watcher,
                });
            }
        }
    }

    /// Cancel the subscription of `watcher` to the `events` of `domain`.
    pub(crate) fn unwatch_all(
        &mut self,
        domain: DomainId,
        events: EnumSet<DomainEvent>,
        watcher: PropagatorVarId,
    ) {
        for event in events {
            let watchers = self.watchers[domain].watchers_mut(event);
            let Some(position) = watchers.iter().position(|&other| other == watcher) else {
                continue;
            };

            let _ = watchers.remove(position);
            if self.trail.get_checkpoint() > 0 {
                self.trail.push(SubscriptionChange::Unwatched {
                    domain,
                    event,
                    watcher,
                });
            }
        }
    }

    /// Cancel every subscription of the given propagator.
    pub(crate) fn unwatch_propagator(&mut self, propagator: PropagatorId) {
        let Some(domains) = self.watched_domains.get(propagator).cloned() else {
            return;
        };

        for domain in domains {
            for event in EnumSet::<DomainEvent>::all() {
                let subscribed = self
                    .get_affected_propagators(event, domain)
                    .iter()
                    .filter(|watcher| watcher.propagator == propagator)
                    .copied()
                    .collect::<Vec<_>>();

                for watcher in subscribed {
                    self.unwatch_all(domain, EnumSet::only(event), watcher);
                }
            }
        }
    }

    /// The distinct propagators subscribed to any event of `domain`.
    pub(crate) fn propagators_watching(&self, domain: DomainId) -> Vec<PropagatorId> {
        let mut propagators = EnumSet::<DomainEvent>::all()
            .iter()
            .flat_map(|event| self.get_affected_propagators(event, domain))
            .map(|watcher| watcher.propagator)
            .collect::<Vec<_>>();
        propagators.sort_unstable();
        propagators.dedup();
        propagators
    }

    pub(crate) fn num_subscriptions(&self, propagator: PropagatorId) -> usize {
        let Some(domains) = self.watched_domains.get(propagator) else {
            return 0;
        };

        domains
            .iter()
            .flat_map(|&domain| {
                EnumSet::<DomainEvent>::all()
                    .iter()
                    .map(move |event| (domain, event))
            })
            .map(|(domain, event)| {
                self.get_affected_propagators(event, domain)
                    .iter()
                    .filter(|watcher| watcher.propagator == propagator)
                    .count()
            })
            .sum()
    }
}

/// Used to register a propagator for notifications about events to a particular variable
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_var: PropagatorVarId,
    watch_list: &'a mut WatchList,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(propagator_var: PropagatorVarId, watch_list: &'a mut WatchList) -> Self {
        Watchers {
            propagator_var,
            watch_list,
        }
    }

    pub(crate) fn watch_all(&mut self, domain: DomainId, events: EnumSet<DomainEvent>) {
        self.watch_list
            .watch_all(domain, events, self.propagator_var);
    }

    pub(crate) fn unwatch_all(&mut self, domain: DomainId, events: EnumSet<DomainEvent>) {
        self.watch_list
            .unwatch_all(domain, events, self.propagator_var);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::LocalId;

    fn watcher(propagator: u32, variable: u32) -> PropagatorVarId {
        PropagatorVarId {
            propagator: PropagatorId(propagator),
            variable: LocalId::from(variable),
        }
    }

    #[test]
    fn subscribing_twice_is_idempotent() {
        let mut watch_list = WatchList::default();
        watch_list.grow();
        let domain = DomainId::new(0);

        watch_list.watch_all(domain, EnumSet::only(DomainEvent::LowerBound), watcher(0, 0));
        watch_list.watch_all(
            domain,
            DomainEvent::LowerBound | DomainEvent::UpperBound,
            watcher(0, 0),
        );

        assert_eq!(
            &[watcher(0, 0)],
            watch_list.get_affected_propagators(DomainEvent::LowerBound, domain)
        );
        assert_eq!(2, watch_list.num_subscriptions(PropagatorId(0)));
    }

    #[test]
    fn unwatching_a_propagator_removes_all_its_edges() {
        let mut watch_list = WatchList::default();
        watch_list.grow();
        watch_list.grow();

        watch_list.watch_all(DomainId::new(0), EnumSet::all(), watcher(0, 0));
        watch_list.watch_all(DomainId::new(1), EnumSet::all(), watcher(0, 1));
        watch_list.watch_all(DomainId::new(1), EnumSet::all(), watcher(1, 0));

        watch_list.unwatch_propagator(PropagatorId(0));

        assert_eq!(0, watch_list.num_subscriptions(PropagatorId(0)));
        assert_eq!(4, watch_list.num_subscriptions(PropagatorId(1)));
    }

    #[test]
    fn subscription_changes_are_undone_on_synchronise() {
        let mut watch_list = WatchList::default();
        watch_list.grow();
        let domain = DomainId::new(0);

        watch_list.watch_all(domain, EnumSet::only(DomainEvent::Assign), watcher(0, 0));

        watch_list.new_checkpoint();
        watch_list.watch_all(domain, EnumSet::only(DomainEvent::Removal), watcher(1, 0));
        watch_list.unwatch_propagator(PropagatorId(0));
        assert!(watch_list
            .get_affected_propagators(DomainEvent::Assign, domain)
            .is_empty());

        watch_list.synchronise(0);

        assert_eq!(
            &[watcher(0, 0)],
            watch_list.get_affected_propagators(DomainEvent::Assign, domain)
        );
        assert!(watch_list
            .get_affected_propagators(DomainEvent::Removal, domain)
            .is_empty());
    }
}
