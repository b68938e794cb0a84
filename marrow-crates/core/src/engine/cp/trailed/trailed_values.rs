use super::TrailedInteger;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;

#[derive(Debug, Clone)]
struct TrailedChange {
    old_value: i64,
    reference: TrailedInteger,
}

#[derive(Default, Debug, Clone)]
pub(crate) struct TrailedValues {
    trail: Trail<TrailedChange>,
    values: KeyedVec<TrailedInteger, i64>,
}

impl TrailedValues {
    pub(crate) fn grow(&mut self, initial_value: i64) -> TrailedInteger {
        self.values.push(initial_value)
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint()
    }

    pub(crate) fn read(&self, trailed_integer: TrailedInteger) -> i64 {
        self.values[trailed_integer]
    }

    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) {
        self.trail
            .synchronise(new_checkpoint)
            .for_each(|state_change| self.values[state_change.reference] = state_change.old_value)
    }

    fn write(&mut self, trailed_integer: TrailedInteger, value: i64) {
        let old_value = self.values[trailed_integer];
        if old_value == value {
            return;
        }

        if self.trail.get_checkpoint() > 0 {
            self.trail.push(TrailedChange {
                old_value,
                reference: trailed_integer,
            });
        }
        self.values[trailed_integer] = value;
    }

    pub(crate) fn add_assign(&mut self, trailed_integer: TrailedInteger, addition: i64) {
        self.write(trailed_integer, self.values[trailed_integer] + addition);
    }

    pub(crate) fn assign(&mut self, trailed_integer: TrailedInteger, value: i64) {
        self.write(trailed_integer, value);
    }
}

#[cfg(test)]
mod tests {
    use super::TrailedValues;

    #[test]
    fn writes_are_undone_per_checkpoint() {
        let mut trailed_values = TrailedValues::default();
        let trailed_integer = trailed_values.grow(0);

        trailed_values.add_assign(trailed_integer, 2);
        assert_eq!(2, trailed_values.read(trailed_integer));

        trailed_values.new_checkpoint();
        trailed_values.add_assign(trailed_integer, 5);
        trailed_values.add_assign(trailed_integer, 5);
        assert_eq!(12, trailed_values.read(trailed_integer));

        trailed_values.new_checkpoint();
        trailed_values.assign(trailed_integer, -1);
        assert_eq!(-1, trailed_values.read(trailed_integer));

        trailed_values.synchronise(1);
        assert_eq!(12, trailed_values.read(trailed_integer));

        trailed_values.synchronise(0);
        assert_eq!(2, trailed_values.read(trailed_integer));
    }
}
