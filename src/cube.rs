use crate::*;

use std::fmt;
use std::str::FromStr;

/// A subspace of a truth table defined by sets of variables fixed at 1 and at 0, the others are free.
///
/// They are represented as a pair of [VarSet] to store positive and negative variables,
/// together with the total number of variables. A cube is written as a sequence of symbols,
/// one for each variable: ```1``` for a positive variable, ```0``` for a negative one and ```-```
/// for a free one. This string is the identity of the cube.
///
/// A cube with ```k``` free variables covers exactly ```2^k``` assignment indices.
///
/// # Merging cubes
///
/// Two cubes can be merged if they have the same free variables and disagree on the value of
/// exactly one fixed variable. The merged cube frees this variable and covers the assignments
/// of both cubes.
///
/// ```
/// use qmkit::Cube;
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
/// let c1: Cube = "1-01".parse()?;
/// let c2: Cube = "1-11".parse()?;
/// let c3: Cube = "0-00".parse()?;
///
/// assert!(c1.mergeable(&c2));
/// assert_eq!(c1.merge(&c2).unwrap().identity(), "1--1");
/// assert!(!c1.mergeable(&c3));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Cube {
    pub(crate) width: usize,
    pub(crate) positive: VarSet,
    pub(crate) negative: VarSet,
}

/// The three symbols used to describe each variable of a cube.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Symbol {
    Zero,
    One,
    Free,
}

impl Cube {
    /// Create a cube where all variables are free, covering the whole truth table
    pub fn full(width: usize) -> Self {
        Self {
            width,
            positive: VarSet::default(),
            negative: VarSet::default(),
        }
    }

    /// Create a cube restricted to a single assignment.
    ///
    /// Bits of the index beyond the width of the cube are ignored.
    pub fn from_assignment(index: usize, width: usize) -> Self {
        let state = State::new(index, width);
        let mut cube = Self::full(width);
        for var in (0..width).map(Variable::from) {
            match state.is_active(var) {
                true => cube.positive.insert(var),
                false => cube.negative.insert(var),
            }
        }
        cube
    }

    /// The number of variables of this cube (fixed or free)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the symbol describing a variable in this cube
    pub fn symbol(&self, var: Variable) -> Symbol {
        if self.positive.contains(var) {
            Symbol::One
        } else if self.negative.contains(var) {
            Symbol::Zero
        } else {
            Symbol::Free
        }
    }

    /// Iterate over the symbols of all variables, in bit order
    pub fn iter_symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.width).map(move |uid| self.symbol(Variable::from(uid)))
    }

    /// Iterate over the fixed variables and their value, in bit order
    pub fn iter_fixed_values(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        (0..self.width)
            .map(Variable::from)
            .filter_map(move |var| match self.symbol(var) {
                Symbol::One => Some((var, true)),
                Symbol::Zero => Some((var, false)),
                Symbol::Free => None,
            })
    }

    /// Test if all variables are free in this cube
    pub fn is_full(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Number of fixed variables, the cost of the corresponding product term
    pub fn literal_count(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// Number of free variables
    pub fn free_count(&self) -> usize {
        self.width - self.literal_count()
    }

    /// Number of variables fixed at 1, used to group merge candidates
    pub fn ones(&self) -> usize {
        self.positive.len()
    }

    /// Number of assignments covered by this cube
    pub fn size(&self) -> usize {
        1 << self.free_count()
    }

    /// Canonical string describing this cube
    pub fn identity(&self) -> String {
        format!("{}", self)
    }

    /// Test if this cube can be merged with another one.
    ///
    /// The two cubes must have the same width and the same free variables,
    /// and exactly one of the fixed variables must be fixed at different values.
    pub fn mergeable(&self, other: &Self) -> bool {
        self.conflict(other).is_some()
    }

    /// Merge two cubes if possible.
    ///
    /// The resulting cube frees the single conflicting variable and keeps all other restrictions.
    /// Merging is commutative. Returns None if the cubes are not [mergeable](Cube::mergeable).
    pub fn merge(&self, other: &Self) -> Option<Self> {
        let var = self.conflict(other)?;
        let mut merged = self.clone();
        merged.positive.remove(var);
        merged.negative.remove(var);
        Some(merged)
    }

    /// Identify the single variable fixed at different values in two cubes sharing the same free variables
    fn conflict(&self, other: &Self) -> Option<Variable> {
        if self.width != other.width || self.literal_count() != other.literal_count() {
            return None;
        }

        // the fixed variables must be the same
        let mut fixed = self.positive.clone();
        fixed.union_with(&self.negative);
        if !other.positive.iter().all(|v| fixed.contains(v))
            || !other.negative.iter().all(|v| fixed.contains(v))
        {
            return None;
        }

        let mut diff = self.positive.clone();
        diff.symmetric_difference_with(&other.positive);
        let mut conflicts = diff.iter();
        match (conflicts.next(), conflicts.next()) {
            (Some(var), None) => Some(var),
            _ => None,
        }
    }

    /// Check if an assignment is contained in this cube
    pub fn contains_index(&self, index: usize) -> bool {
        self.contains_state(&State::new(index, self.width))
    }

    /// Check if a state is contained in this cube
    pub fn contains_state(&self, state: &State) -> bool {
        self.positive.iter().all(|v| state.is_active(v))
            && self.negative.iter().all(|v| !state.is_active(v))
    }

    /// Test if this cube contains the given cube.
    pub fn contains(&self, c: &Cube) -> bool {
        c.positive.contains_all(&self.positive) && c.negative.contains_all(&self.negative)
    }

    /// Check if this cube shares at least one assignment with another cube
    pub fn overlaps(&self, other: &Cube) -> bool {
        self.positive.is_disjoint(&other.negative) && self.negative.is_disjoint(&other.positive)
    }
}

impl FromStr for Cube {
    type Err = QmkitError;

    fn from_str(descr: &str) -> Result<Cube, QmkitError> {
        let mut c = Cube::full(0);
        for ch in descr.chars() {
            let var = Variable(c.width);
            match ch {
                ' ' | '\t' | '\'' => continue, // skip spacing and ` for formatting
                '-' => (),
                '0' => c.negative.insert(var),
                '1' => c.positive.insert(var),
                _ => return Err(QmkitError::InvalidPattern(descr.into())),
            };
            c.width += 1;
        }
        Ok(c)
    }
}

impl Rule for Cube {
    fn fmt_rule(&self, f: &mut fmt::Formatter, namer: &VarSpace) -> fmt::Result {
        let mut ef = efmt::InfixFormatter::named(f, namer);
        ef.write_cube(self, efmt::Form::Sop)
    }

    fn eval(&self, state: &State) -> bool {
        self.contains_state(state)
    }

    fn collect_regulators(&self, regulators: &mut VarSet) {
        regulators.union_with(&self.positive);
        regulators.union_with(&self.negative);
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s: String = self
            .iter_symbols()
            .map(|s| match s {
                Symbol::One => '1',
                Symbol::Zero => '0',
                Symbol::Free => '-',
            })
            .collect();
        write!(f, "{}", &s)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::str::FromStr;

    #[test]
    fn construct_and_display() -> Result<(), QmkitError> {
        let c = Cube::from_str("-0--01-11--0")?;
        assert_eq!(c.width(), 12);
        assert_eq!(format!("{}", c), "-0--01-11--0");
        assert_eq!(c.literal_count(), 6);
        assert_eq!(c.ones(), 3);

        let c = Cube::from_str("10 1'1")?;
        assert_eq!(c.identity(), "1011");

        assert!(Cube::from_str("10x1").is_err());
        Ok(())
    }

    #[test]
    fn from_assignment() {
        let c = Cube::from_assignment(0b1011, 4);
        assert_eq!(c.identity(), "1011");
        assert_eq!(c.size(), 1);
        assert!(c.contains_index(11));
        assert!(!c.contains_index(10));

        assert_eq!(Cube::from_assignment(1, 3).identity(), "001");
        assert_eq!(Cube::full(3).identity(), "---");
    }

    #[test]
    fn merge_rules() -> Result<(), QmkitError> {
        let a: Cube = "10-1".parse()?;
        let b: Cube = "11-1".parse()?;
        assert_eq!(a.merge(&b), b.merge(&a));
        assert_eq!(a.merge(&b).unwrap().identity(), "1--1");

        // Free variables must be aligned
        let c: Cube = "1-01".parse()?;
        assert!(!a.mergeable(&c));

        // Exactly one conflict
        let d: Cube = "01-1".parse()?;
        assert!(!a.mergeable(&d));
        assert!(!a.mergeable(&a));

        // Different widths never merge
        let e: Cube = "10-".parse()?;
        assert!(!a.mergeable(&e));
        Ok(())
    }

    #[test]
    fn contained() -> Result<(), QmkitError> {
        let big: Cube = "1--".parse()?;
        let small: Cube = "1-0".parse()?;
        let other: Cube = "0-0".parse()?;
        assert!(big.contains(&small));
        assert!(!small.contains(&big));
        assert!(!big.contains(&other));
        assert!(!big.overlaps(&other));
        assert!(small.overlaps(&"--0".parse()?));
        Ok(())
    }
}
