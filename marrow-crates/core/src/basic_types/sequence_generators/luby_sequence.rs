use super::SequenceGenerator;

// The Luby sequence is a recursive sequence of the form:
// 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2....
// The above sequence is multiplied with a given constant 'base_value'.
// Generating the next element is computed in constant time using Knuth's 'reluctant doubling'
// formula.
#[derive(Debug, Copy, Clone)]
pub struct LubySequence {
    u: i64,
    v: i64,
    base_value: i64,
}

impl LubySequence {
    pub fn new(base_value: i64) -> LubySequence {
        LubySequence {
            u: 1,
            v: 1,
            base_value,
        }
    }
}

impl SequenceGenerator for LubySequence {
    fn next(&mut self) -> i64 {
        let next_value = self.v;
        if (self.u & (-self.u)) == self.v {
            self.u += 1;
            self.v = 1;
        } else {
            self.v *= 2;
        }
        next_value.saturating_mul(self.base_value)
    }
}
