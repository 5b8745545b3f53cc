//! Implicant records and lists of implicants.

use crate::*;

use bit_set::BitSet;
use std::fmt;
use std::iter::FromIterator;
use std::slice::Iter;
use std::str::FromStr;
use std::vec::IntoIter;

pub(crate) static PATTERN_SEPARATORS: [char; 4] = [',', ';', '|', '\n'];

/// Tell if an initial cube comes from a required minterm or from a don't-care.
///
/// Merged cubes are required as soon as one of their parents is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Required,
    DontCare,
}

impl Origin {
    fn combine(self, other: Origin) -> Origin {
        match (self, other) {
            (Origin::DontCare, Origin::DontCare) => Origin::DontCare,
            _ => Origin::Required,
        }
    }
}

/// A cube with the set of original assignment indices it covers.
///
/// The cover of an implicant produced by merging is the union of the covers of its parents,
/// it always matches the full expansion of its cube.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Implicant {
    cube: Cube,
    covers: BitSet,
    origin: Origin,
}

impl Implicant {
    /// Create the implicant of a single assignment
    pub fn from_assignment(index: usize, width: usize, origin: Origin) -> Self {
        let mut covers = BitSet::with_capacity(1 << width);
        covers.insert(index);
        Self {
            cube: Cube::from_assignment(index, width),
            covers,
            origin,
        }
    }

    /// Create an implicant covering all assignments of a cube
    pub fn from_cube(cube: Cube) -> Self {
        let covers = cube.expand().collect();
        Self {
            cube,
            covers,
            origin: Origin::Required,
        }
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn covers(&self) -> &BitSet {
        &self.covers
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// The covered indices, in increasing order
    pub fn covered_indices(&self) -> Vec<usize> {
        self.covers.iter().collect()
    }

    pub fn literal_count(&self) -> usize {
        self.cube.literal_count()
    }

    pub fn identity(&self) -> String {
        self.cube.identity()
    }

    /// Test if this implicant covers a specific assignment
    pub fn covers_index(&self, index: usize) -> bool {
        self.covers.contains(index)
    }

    /// Merge two implicants if their cubes are mergeable, joining their covers.
    pub fn merge(&self, other: &Self) -> Option<Self> {
        let cube = self.cube.merge(&other.cube)?;
        let mut covers = self.covers.clone();
        covers.union_with(&other.covers);
        Some(Self {
            cube,
            covers,
            origin: self.origin.combine(other.origin),
        })
    }

    /// Absorb a duplicate of this implicant produced by another merge.
    ///
    /// The two covers are expected to be equal, a difference denotes a broken merge.
    pub(crate) fn absorb(&mut self, other: Implicant) -> Result<(), InternalError> {
        if self.cube != other.cube || self.covers != other.covers {
            return Err(InternalError::InconsistentCover(self.identity()));
        }
        self.origin = self.origin.combine(other.origin);
        Ok(())
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.cube)?;
        for (i, idx) in self.covers.iter().enumerate() {
            match i {
                0 => write!(f, "{}", idx)?,
                _ => write!(f, ",{}", idx)?,
            }
        }
        write!(f, "}}")
    }
}

/// Boolean function represented as a list of implicants.
///
/// An implicant of a Boolean function is a cube such that the function is true for all covered states.
/// The implicants in a list of implicants cover exactly all true states of the function.
#[derive(Clone, Default, Debug)]
pub struct Implicants {
    implicants: Vec<Implicant>,
}

impl Implicants {
    pub(crate) fn with(implicants: Vec<Implicant>) -> Self {
        Self { implicants }
    }

    pub fn iter(&self) -> Iter<'_, Implicant> {
        self.implicants.iter()
    }

    pub fn get(&self, idx: usize) -> Option<&Implicant> {
        self.implicants.get(idx)
    }

    /// Add an implicant at the end of the list
    pub fn push(&mut self, implicant: Implicant) {
        self.implicants.push(implicant);
    }

    /// Sort the implicants by increasing cost, then by identity
    pub fn sort_canonical(&mut self) {
        self.implicants
            .sort_by_cached_key(|i| (i.literal_count(), i.identity()));
    }

    /// Extract the cubes of all implicants
    pub fn cubes(&self) -> Vec<Cube> {
        self.implicants.iter().map(|i| i.cube.clone()).collect()
    }

    /// Test if the given index is covered by at least one implicant in this list.
    pub fn covers_index(&self, index: usize) -> bool {
        self.iter().any(|t| t.covers_index(index))
    }

    /// Get the number of implicants in this list
    pub fn len(&self) -> usize {
        self.implicants.len()
    }

    /// Return whether there are no implicant (the rule is always false)
    pub fn is_empty(&self) -> bool {
        self.implicants.is_empty()
    }
}

impl FromIterator<Implicant> for Implicants {
    fn from_iter<I: IntoIterator<Item = Implicant>>(iter: I) -> Self {
        Self::with(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Implicants {
    type Item = &'a Implicant;
    type IntoIter = Iter<'a, Implicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.implicants.iter()
    }
}

impl IntoIterator for Implicants {
    type Item = Implicant;
    type IntoIter = IntoIter<Implicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.implicants.into_iter()
    }
}

impl FromStr for Implicants {
    type Err = QmkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(&PATTERN_SEPARATORS[..])
            .filter(|elt| !elt.trim().is_empty())
            .map(|elt| elt.parse().map(Implicant::from_cube))
            .collect()
    }
}

impl Rule for Implicants {
    fn fmt_rule(&self, f: &mut fmt::Formatter, namer: &VarSpace) -> fmt::Result {
        let cubes = self.cubes();
        let mut ef = efmt::InfixFormatter::named(f, namer);
        ef.write_cubes(&cubes, efmt::Form::Sop)
    }

    fn eval(&self, state: &State) -> bool {
        self.implicants.iter().any(|i| i.cube.contains_state(state))
    }

    fn collect_regulators(&self, regulators: &mut VarSet) {
        for i in &self.implicants {
            i.cube.collect_regulators(regulators);
        }
    }
}

impl fmt::Display for Implicants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in &self.implicants {
            writeln!(f, "{}", i.cube)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn parsing() -> Result<(), QmkitError> {
        let is1: Implicants = "--01".parse()?;
        assert_eq!(is1.len(), 1);
        assert_eq!(is1.get(0).unwrap().covered_indices(), vec![1, 5, 9, 13]);

        let is2 = "1-01\n1101;\n".parse::<Implicants>()?;
        assert_eq!(is2.len(), 2);
        assert!(is2.covers_index(9));
        assert!(!is2.covers_index(12));

        assert!("0-10;0x11".parse::<Implicants>().is_err());
        Ok(())
    }

    #[test]
    fn merge_implicants() {
        let a = Implicant::from_assignment(5, 3, Origin::Required);
        let b = Implicant::from_assignment(7, 3, Origin::DontCare);
        let c = Implicant::from_assignment(6, 3, Origin::DontCare);

        let ab = a.merge(&b).unwrap();
        assert_eq!(ab.identity(), "1-1");
        assert_eq!(ab.covered_indices(), vec![5, 7]);
        assert_eq!(ab.origin(), Origin::Required);
        assert_eq!(format!("{}", ab), "1-1 {5,7}");

        let bc = b.merge(&c).unwrap();
        assert_eq!(bc.origin(), Origin::DontCare);
        assert!(a.merge(&c).is_none());
    }

    #[test]
    fn absorb_duplicates() -> Result<(), QmkitError> {
        let a = Implicant::from_assignment(5, 3, Origin::Required);
        let b = Implicant::from_assignment(7, 3, Origin::Required);
        let mut ab = a.merge(&b).unwrap();
        ab.absorb(b.merge(&a).unwrap())?;
        assert_eq!(ab.covered_indices(), vec![5, 7]);

        // same cube with a truncated cover
        let broken = Implicant {
            cube: ab.cube().clone(),
            covers: [5].into_iter().collect(),
            origin: Origin::Required,
        };
        let err = ab.absorb(broken).unwrap_err();
        assert_eq!(err, InternalError::InconsistentCover("1-1".into()));
        assert!(QmkitError::from(err).is_internal());
        Ok(())
    }

    #[test]
    fn sorted() -> Result<(), QmkitError> {
        let mut list: Implicants = "1-1; 0--; -10; --1".parse()?;
        list.sort_canonical();
        let ids: Vec<String> = list.iter().map(|i| i.identity()).collect();
        assert_eq!(ids, vec!["--1", "0--", "-10", "1-1"]);
        Ok(())
    }

    #[test]
    fn evaluate() -> Result<(), QmkitError> {
        let list: Implicants = "1-; -1".parse()?;
        assert_eq!(list.truth_set(2).iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        Ok(())
    }
}
