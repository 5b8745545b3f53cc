use crate::Variable;
use std::fmt;

/// A single row of a truth table, identified by its assignment index.
///
/// The binary expansion of the index, written on `width` bits, gives the value of each variable:
/// the first variable is the most significant bit.
///
/// ```
/// use qmkit::{State, Variable};
///
/// let state = State::new(0b0110, 4);
/// assert_eq!(state.is_active(Variable::from(0)), false);
/// assert_eq!(state.is_active(Variable::from(1)), true);
/// assert_eq!(state.is_active(Variable::from(2)), true);
/// assert_eq!(state.is_active(Variable::from(3)), false);
/// assert_eq!(format!("{}", state), "0110");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    index: usize,
    width: usize,
}

impl State {
    pub fn new(index: usize, width: usize) -> Self {
        Self { index, width }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Test if a specific variable is active in this state
    pub fn is_active(&self, var: Variable) -> bool {
        var.uid() < self.width && (self.index >> var.shift(self.width)) & 1 == 1
    }

    /// Iterate over all rows of a truth table with the given number of variables
    pub fn all(width: usize) -> impl Iterator<Item = State> {
        (0..1usize << width).map(move |index| State::new(index, width))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.index, width = self.width)
    }
}
