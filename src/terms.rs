//! Truth tables and enumeration of the assignments covered by cubes.

use crate::*;

use bit_set::BitSet;
use std::fmt;

/// Lazy enumeration of the assignment indices contained in a cube.
///
/// The indices are produced in increasing order. The iterator can be cloned to restart the enumeration.
#[derive(Clone, Debug)]
pub struct Expand {
    base: usize,
    free_shifts: Vec<usize>,
    next: usize,
    end: usize,
}

impl Iterator for Expand {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.end {
            return None;
        }
        // Distribute the bits of the counter over the free positions, lowest bits first
        let counter = self.next;
        self.next += 1;
        let index = self
            .free_shifts
            .iter()
            .enumerate()
            .filter(|(bit, _)| counter >> bit & 1 == 1)
            .fold(self.base, |index, (_, shift)| index | 1 << shift);
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Expand {}

impl Cube {
    /// Enumerate all assignment indices consistent with this cube.
    ///
    /// ```
    /// use qmkit::Cube;
    /// # use qmkit::QmkitError;
    /// # fn main() -> Result<(), QmkitError> {
    /// let cube: Cube = "1-0-".parse()?;
    /// assert_eq!(cube.expand().collect::<Vec<_>>(), vec![8, 9, 12, 13]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn expand(&self) -> Expand {
        let base = self
            .positive
            .iter()
            .fold(0, |index, var| index | 1 << var.shift(self.width));
        let mut free_shifts: Vec<usize> = (0..self.width)
            .map(Variable::from)
            .filter(|v| self.symbol(*v) == Symbol::Free)
            .map(|v| v.shift(self.width))
            .collect();
        free_shifts.sort_unstable();
        Expand {
            base,
            end: 1 << free_shifts.len(),
            free_shifts,
            next: 0,
        }
    }
}

/// Expected value of a truth table row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    Zero,
    One,
    DontCare,
}

impl Output {
    /// Parse an output symbol: ```0```, ```1```, or one of ```X```, ```x```, ```-```, ```*``` for don't-cares
    pub fn from_char(c: char) -> Result<Self, QmkitError> {
        match c {
            '0' => Ok(Output::Zero),
            '1' => Ok(Output::One),
            'X' | 'x' | '-' | '*' => Ok(Output::DontCare),
            _ => Err(QmkitError::InvalidOutput(c)),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Zero => write!(f, "0"),
            Output::One => write!(f, "1"),
            Output::DontCare => write!(f, "X"),
        }
    }
}

/// A completely or partially specified Boolean function of 2 to 6 variables.
///
/// The function is given by the set of required minterms (rows where it must be true)
/// and an optional set of don't-cares (rows where its value does not matter).
/// All other rows are maxterms.
///
/// ```
/// use qmkit::{Output, TruthTable, VarSpace};
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
/// let vs = VarSpace::alphabetic(3)?;
/// let table = TruthTable::new(vs.clone(), [1, 3], [7])?;
/// assert_eq!(table.output(7), Output::DontCare);
/// assert_eq!(table.maxterms().iter().collect::<Vec<_>>(), vec![0, 2, 4, 5, 6]);
///
/// let same = TruthTable::from_output_str(vs, "0101000X")?;
/// assert_eq!(table, same);
///
/// assert!(TruthTable::new(VarSpace::alphabetic(2)?, [4], []).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTable {
    space: VarSpace,
    required: BitSet,
    dont_cares: BitSet,
}

impl TruthTable {
    /// Define a truth table from its minterms and don't-cares.
    ///
    /// Fails if the number of variables is not supported, if an index is outside of the
    /// table, or if an index is both required and a don't-care.
    pub fn new(
        space: VarSpace,
        required: impl IntoIterator<Item = usize>,
        dont_cares: impl IntoIterator<Item = usize>,
    ) -> Result<Self, QmkitError> {
        space.check_width()?;
        let size = 1 << space.len();
        let collect = |indices: &mut dyn Iterator<Item = usize>| -> Result<BitSet, QmkitError> {
            let mut set = BitSet::with_capacity(size);
            for index in indices {
                if index >= size {
                    return Err(QmkitError::IndexOutOfRange { index, size });
                }
                set.insert(index);
            }
            Ok(set)
        };
        let required = collect(&mut required.into_iter())?;
        let dont_cares = collect(&mut dont_cares.into_iter())?;
        if let Some(index) = required.intersection(&dont_cares).next() {
            return Err(QmkitError::OverlappingIndex(index));
        }

        Ok(Self {
            space,
            required,
            dont_cares,
        })
    }

    /// Define a truth table from the output value of every row
    pub fn from_outputs(space: VarSpace, outputs: &[Output]) -> Result<Self, QmkitError> {
        space.check_width()?;
        let expected = 1 << space.len();
        if outputs.len() != expected {
            return Err(QmkitError::OutputLength {
                expected,
                found: outputs.len(),
            });
        }
        let select = |value: Output| {
            outputs
                .iter()
                .enumerate()
                .filter(move |(_, o)| **o == value)
                .map(|(i, _)| i)
        };
        Self::new(space, select(Output::One), select(Output::DontCare))
    }

    /// Define a truth table from a string of output symbols, spaces are ignored
    pub fn from_output_str(space: VarSpace, outputs: &str) -> Result<Self, QmkitError> {
        let outputs = outputs
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Output::from_char)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_outputs(space, &outputs)
    }

    /// Define the truth table of a rule, without don't-cares
    pub fn from_rule(space: VarSpace, rule: &impl Rule) -> Result<Self, QmkitError> {
        space.check_width()?;
        let required = rule.truth_set(space.len());
        Self::new(space, required.iter(), [])
    }

    pub fn space(&self) -> &VarSpace {
        &self.space
    }

    /// Number of variables
    pub fn width(&self) -> usize {
        self.space.len()
    }

    /// Number of rows
    pub fn size(&self) -> usize {
        1 << self.width()
    }

    pub fn required(&self) -> &BitSet {
        &self.required
    }

    pub fn dont_cares(&self) -> &BitSet {
        &self.dont_cares
    }

    /// The rows where the function must be false
    pub fn maxterms(&self) -> BitSet {
        (0..self.size())
            .filter(|i| !self.required.contains(*i) && !self.dont_cares.contains(*i))
            .collect()
    }

    /// The expected value of a row
    pub fn output(&self, index: usize) -> Output {
        if self.required.contains(index) {
            Output::One
        } else if self.dont_cares.contains(index) {
            Output::DontCare
        } else {
            Output::Zero
        }
    }

    /// The function is false on every row
    pub fn is_constant_zero(&self) -> bool {
        self.required.is_empty()
    }

    /// The function is true on every row
    pub fn is_constant_one(&self) -> bool {
        self.required.len() == self.size()
    }

    /// The negated function: maxterms become required, don't-cares are unchanged
    pub fn complement(&self) -> TruthTable {
        TruthTable {
            space: self.space.clone(),
            required: self.maxterms(),
            dont_cares: self.dont_cares.clone(),
        }
    }

    /// Create one single-assignment implicant for each minterm and don't-care
    pub fn initial_cubes(&self) -> Vec<Implicant> {
        initial_cubes(&self.required, &self.dont_cares, self.width())
    }

    /// Sum of all minterms, without simplification
    pub fn canonical_sop(&self) -> String {
        let cubes: Vec<Cube> = self
            .required
            .iter()
            .map(|i| Cube::from_assignment(i, self.width()))
            .collect();
        efmt::to_sop(&cubes, &self.space)
    }

    /// Product of all maxterms, without simplification
    pub fn canonical_pos(&self) -> String {
        let cubes: Vec<Cube> = self
            .maxterms()
            .iter()
            .map(|i| Cube::from_assignment(i, self.width()))
            .collect();
        efmt::to_pos(&cubes, &self.space)
    }
}

/// Create one single-assignment implicant for each index of the two sets, tagged with its origin.
///
/// Indices listed in both sets are considered as required.
pub fn initial_cubes(required: &BitSet, dont_cares: &BitSet, width: usize) -> Vec<Implicant> {
    let required_cubes = required
        .iter()
        .map(|i| Implicant::from_assignment(i, width, Origin::Required));
    let dc_cubes = dont_cares
        .difference(required)
        .map(|i| Implicant::from_assignment(i, width, Origin::DontCare));
    required_cubes.chain(dc_cubes).collect()
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn expand_cubes() -> Result<(), QmkitError> {
        let cube: Cube = "-1-".parse()?;
        let exp = cube.expand();
        assert_eq!(exp.len(), 4);
        assert_eq!(exp.clone().collect::<Vec<_>>(), vec![2, 3, 6, 7]);
        // restartable
        assert_eq!(exp.collect::<Vec<_>>(), vec![2, 3, 6, 7]);

        assert_eq!(Cube::from_assignment(5, 3).expand().collect::<Vec<_>>(), vec![5]);
        assert_eq!(Cube::full(3).expand().count(), 8);
        Ok(())
    }

    #[test]
    fn validation() -> Result<(), QmkitError> {
        let vs = VarSpace::alphabetic(3)?;
        assert_eq!(
            TruthTable::new(vs.clone(), [1, 8], []),
            Err(QmkitError::IndexOutOfRange { index: 8, size: 8 })
        );
        assert_eq!(
            TruthTable::new(vs.clone(), [1, 2], [2, 3]),
            Err(QmkitError::OverlappingIndex(2))
        );
        assert_eq!(
            TruthTable::from_output_str(vs.clone(), "0110"),
            Err(QmkitError::OutputLength {
                expected: 8,
                found: 4
            })
        );
        assert_eq!(
            TruthTable::from_output_str(vs, "0110 01?0"),
            Err(QmkitError::InvalidOutput('?'))
        );

        let mut single = VarSpace::default();
        single.add("A")?;
        assert_eq!(
            TruthTable::new(single, [0], []),
            Err(QmkitError::VariableCount(1))
        );
        Ok(())
    }

    #[test]
    fn initial() -> Result<(), QmkitError> {
        let table = TruthTable::new(VarSpace::alphabetic(2)?, [0, 3], [1])?;
        let cubes = table.initial_cubes();
        let descr: Vec<(String, Origin)> = cubes
            .iter()
            .map(|i| (i.identity(), i.origin()))
            .collect();
        assert_eq!(
            descr,
            vec![
                ("00".to_string(), Origin::Required),
                ("11".to_string(), Origin::Required),
                ("01".to_string(), Origin::DontCare),
            ]
        );
        Ok(())
    }

    #[test]
    fn complement_and_canonical_forms() -> Result<(), QmkitError> {
        let table = TruthTable::new(VarSpace::alphabetic(2)?, [1, 2, 3], [])?;
        assert_eq!(table.canonical_sop(), "AB + AB' + A'B");
        assert_eq!(table.canonical_pos(), "(A + B)");

        let neg = table.complement();
        assert_eq!(neg.required().iter().collect::<Vec<_>>(), vec![0]);
        assert!(!neg.is_constant_zero());
        assert!(TruthTable::new(VarSpace::alphabetic(2)?, 0..4, [])?.is_constant_one());
        Ok(())
    }
}
