use crate::{State, VarSet, VarSpace};
use bit_set::BitSet;
use std::fmt;

/// Common API for all Boolean rules.
///
/// This trait defines the API to evaluate and display Boolean rules.
/// Cubes, lists of implicants and expressions are all rules: they can be evaluated
/// on every row of a truth table to recover the set of rows where they hold.
pub trait Rule {
    /// Display the rule using the names of a variable space
    fn fmt_rule(&self, f: &mut fmt::Formatter, namer: &VarSpace) -> fmt::Result;

    /// Evaluate the rule on the given state
    fn eval(&self, state: &State) -> bool;

    /// Add all regulators to the set of variables
    fn collect_regulators(&self, regulators: &mut VarSet);

    /// Construct the set of regulators
    fn get_regulators(&self) -> VarSet {
        let mut regulators = VarSet::default();
        self.collect_regulators(&mut regulators);
        regulators
    }

    /// Collect the indices of all rows where this rule is true
    fn truth_set(&self, width: usize) -> BitSet {
        State::all(width)
            .filter(|s| self.eval(s))
            .map(|s| s.index())
            .collect()
    }
}
