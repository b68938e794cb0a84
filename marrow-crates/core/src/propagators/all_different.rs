use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
use crate::predicate;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
use crate::propagation::Priority;
use crate::propagation::Propagation;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;
use crate::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`AllDifferentPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct AllDifferentPropagatorArgs<Var> {
    pub(crate) vars: Box<[Var]>,
}

impl<Var> PropagatorConstructor for AllDifferentPropagatorArgs<Var>
where
    Var: IntegerVariable,
{
    type PropagatorImpl = AllDifferentPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        for (i, x_i) in self.vars.iter().enumerate() {
            context.register(x_i.clone(), DomainEvents::BOUNDS, LocalId::from(i as u32));
        }

        AllDifferentPropagator { vars: self.vars }
    }
}

/// Propagator for the constraint that all `vars` take pairwise distinct values.
///
/// The value of every assigned variable is removed from the other variables until no new
/// assignment follows. Afterwards, the variables are checked for fitting in the interval spanned
/// by their bounds.
#[derive(Clone, Debug)]
pub(crate) struct AllDifferentPropagator<Var> {
    vars: Box<[Var]>,
}

impl<Var: IntegerVariable> AllDifferentPropagator<Var> {
    fn assignment_conflict(&self, i: usize, j: usize, value: i32) -> PropagatorConflict {
        PropagatorConflict {
            conjunction: vec![
                predicate!(self.vars[i] == value),
                predicate!(self.vars[j] == value),
            ],
        }
    }

    fn pigeonhole_conflict(&self, domains: &impl ReadDomains, lb: i32, ub: i32) -> PropagatorConflict {
        PropagatorConflict {
            conjunction: self
                .vars
                .iter()
                .flat_map(|var| {
                    [
                        predicate!(var >= lb.max(domains.lower_bound(var))),
                        predicate!(var <= ub.min(domains.upper_bound(var))),
                    ]
                })
                .collect(),
        }
    }
}

impl<Var: IntegerVariable> Propagator for AllDifferentPropagator<Var> {
    fn name(&self) -> &str {
        "AllDiff"
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn propagate_from_scratch(&self, mut context: PropagationContext) -> PropagationStatusCP {
        let mut processed = vec![false; self.vars.len()];

        loop {
            let Some(i) = (0..self.vars.len())
                .find(|&i| !processed[i] && context.is_fixed(&self.vars[i]))
            else {
                break;
            };
            processed[i] = true;
            let value = context.lower_bound(&self.vars[i]);

            for j in (0..self.vars.len()).filter(|&j| j != i) {
                if context.fixed_value(&self.vars[j]) == Some(value) {
                    return Err(self.assignment_conflict(i, j, value).into());
                }
                let _ = context.remove(&self.vars[j], value)?;
            }
        }

        if processed.iter().all(|&fixed| fixed) {
            return Ok(Propagation::Subsumed);
        }

        let lb = self
            .vars
            .iter()
            .map(|var| context.lower_bound(var))
            .min()
            .unwrap_or_default();
        let ub = self
            .vars
            .iter()
            .map(|var| context.upper_bound(var))
            .max()
            .unwrap_or_default();

        if ((ub as i64 - lb as i64 + 1) as usize) < self.vars.len() {
            return Err(self.pigeonhole_conflict(&context, lb, ub).into());
        }

        Ok(Propagation::AtFixpoint)
    }
}
