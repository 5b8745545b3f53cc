//! Variables, literals and sets of variables

use crate::*;

use bit_set::BitSet;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Not;

/// A single Boolean input of a truth table, identified by its position.
///
/// The position defines the bit order used everywhere in the crate: position 0 is the
/// most significant bit of an assignment index, the last position is the least significant one.
///
/// Variables are usually obtained from a [variable space](VarSpace) which associates them to a name.
#[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// Create a new variable at a specific position
    pub fn new(uid: usize) -> Self {
        Self(uid)
    }

    /// Return the position of this variable
    pub fn uid(&self) -> usize {
        self.0
    }

    /// Shift of the bit carrying the value of this variable in an assignment index
    pub(crate) fn shift(&self, width: usize) -> usize {
        width - 1 - self.0
    }

    /// The asserted literal of this variable
    pub fn asserted(self) -> Literal {
        Literal::new(self, Polarity::Asserted)
    }

    /// The complemented literal of this variable
    pub fn complemented(self) -> Literal {
        Literal::new(self, Polarity::Complemented)
    }
}

impl From<usize> for Variable {
    fn from(uid: usize) -> Self {
        Self(uid)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}_", self.0)
    }
}

impl Not for Variable {
    type Output = Literal;

    fn not(self) -> Literal {
        self.complemented()
    }
}

/// Polarity of a literal: the variable itself or its complement.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Polarity {
    /// The literal is true when the variable is true
    Asserted,
    /// The literal is true when the variable is false
    Complemented,
}

impl Polarity {
    /// The polarity of a literal which is true when the variable takes the given value
    pub fn from_value(value: bool) -> Self {
        match value {
            true => Polarity::Asserted,
            false => Polarity::Complemented,
        }
    }

    /// The value of the variable which makes a literal with this polarity true
    pub fn value(self) -> bool {
        self == Polarity::Asserted
    }
}

impl Not for Polarity {
    type Output = Polarity;

    fn not(self) -> Polarity {
        match self {
            Polarity::Asserted => Polarity::Complemented,
            Polarity::Complemented => Polarity::Asserted,
        }
    }
}

/// A variable associated to a polarity, the atom of all printed expressions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Literal {
    pub variable: Variable,
    pub polarity: Polarity,
}

impl Literal {
    pub fn new(variable: Variable, polarity: Polarity) -> Self {
        Self { variable, polarity }
    }

    /// Test if this literal is true in the given state
    pub fn eval(&self, state: &State) -> bool {
        state.is_active(self.variable) == self.polarity.value()
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal::new(self.variable, !self.polarity)
    }
}

/// A set of selected variables with efficient bitwise operations.
///
/// A VarSet is an abstraction over [BitSet], providing a similar API.
/// Cubes store their fixed variables in a pair of VarSets, one for each value.
///
/// ```
/// use qmkit::{Variable, VarSet};
///
/// let mut vs = VarSet::default();
/// vs.insert(Variable::from(1));
/// vs.insert(Variable::from(3));
/// vs.remove(Variable::from(3));
///
/// # assert!(!vs.contains(Variable::from(0)));
/// # assert!( vs.contains(Variable::from(1)));
/// # assert!(!vs.contains(Variable::from(3)));
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct VarSet {
    pub variables: BitSet,
}

impl VarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an iterator over the contained variables
    pub fn iter(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Add a variable to this set
    pub fn insert(&mut self, var: Variable) {
        self.variables.insert(var.uid());
    }

    /// Remove a variable from this set
    pub fn remove(&mut self, var: Variable) {
        self.variables.remove(var.uid());
    }

    /// Test if a specific variable is part of this set
    pub fn contains(&self, var: Variable) -> bool {
        self.variables.contains(var.uid())
    }

    /// Remove all variables from the other set
    pub fn difference_with(&mut self, vars: &Self) {
        self.variables.difference_with(&vars.variables);
    }

    /// Retain only the variables also included in the other set
    pub fn intersect_with(&mut self, vars: &Self) {
        self.variables.intersect_with(&vars.variables);
    }

    /// Add all variables from the other set
    pub fn union_with(&mut self, vars: &Self) {
        self.variables.union_with(&vars.variables);
    }

    /// Retain the variables contained in exactly one of the two sets
    pub fn symmetric_difference_with(&mut self, vars: &Self) {
        self.variables.symmetric_difference_with(&vars.variables);
    }

    /// Return true if this set contains all variables of the other set
    pub fn contains_all(&self, other: &Self) -> bool {
        self.variables.is_superset(&other.variables)
    }

    /// Return true if the two sets have no common variable
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.variables.is_disjoint(&other.variables)
    }

    /// Return the number of variables in this set
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Return whether there are no selected variable in this set
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl From<BitSet> for VarSet {
    fn from(variables: BitSet) -> Self {
        Self { variables }
    }
}

impl FromIterator<Variable> for VarSet {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        let mut vs = VarSet::default();
        vs.extend(iter);
        vs
    }
}

impl Extend<Variable> for VarSet {
    fn extend<T: IntoIterator<Item = Variable>>(&mut self, iter: T) {
        for v in iter {
            self.insert(v);
        }
    }
}

/// Iterate over variables in a [VarSet]
pub struct Iter<'a>(bit_set::Iter<'a, u32>);

impl Iterator for Iter<'_> {
    type Item = Variable;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|uid| uid.into())
    }
}

impl<'a> IntoIterator for &'a VarSet {
    type Item = Variable;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.variables.iter())
    }
}
