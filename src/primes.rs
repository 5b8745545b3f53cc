use crate::*;

use delegate::delegate;
use itertools::Itertools;
use log::{debug, trace};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::slice::Iter;
use std::vec::IntoIter;

/// Boolean function represented as the list of its prime implicants.
///
/// This is a special case of [Implicants].
/// An implicant is "prime" if it can not be merged into a larger implicant.
///
/// The list is built by the Quine-McCluskey tabulation: single-assignment cubes are merged pairwise,
/// generation after generation, until no merge is possible. The cubes which never took part
/// in a merge are the prime implicants. The list is sorted by increasing number of literals, then
/// by cube identity, which makes the result independent of the order of the input.
///
/// ```
/// use qmkit::{Primes, TruthTable, VarSpace};
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
/// let table = TruthTable::new(VarSpace::alphabetic(3)?, [3, 5, 6, 7], [])?;
/// let primes = Primes::from_table(&table)?;
///
/// let ids: Vec<String> = primes.iter().map(|p| p.identity()).collect();
/// assert_eq!(ids, vec!["-11", "1-1", "11-"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Primes {
    implicants: Implicants,
    passes: usize,
}

impl Primes {
    delegate! {
        to self.implicants {
            /// Get the number of prime implicants
            pub fn len(&self) -> usize;
            /// Return whether there are no prime implicant (the rule is always false)
            pub fn is_empty(&self) -> bool;
            pub fn iter(&self) -> Iter<'_, Implicant>;
            pub fn get(&self, idx: usize) -> Option<&Implicant>;
            pub fn cubes(&self) -> Vec<Cube>;
        }
    }

    pub fn as_implicants(&self) -> &Implicants {
        &self.implicants
    }

    pub fn into_implicants(self) -> Implicants {
        self.implicants
    }

    /// Number of merge passes which produced new cubes
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// The single prime implicant of a function which is true everywhere
    pub(crate) fn full(width: usize) -> Self {
        let mut implicants = Implicants::default();
        implicants.push(Implicant::from_cube(Cube::full(width)));
        Self {
            implicants,
            passes: 0,
        }
    }

    /// Compute the prime implicants of the minterms and don't-cares of a truth table
    pub fn from_table(table: &TruthTable) -> Result<Self, QmkitError> {
        Self::generate(table.initial_cubes(), table.width())
    }

    /// Compute the prime implicants from a list of initial implicants.
    ///
    /// Each pass groups the current cubes by number of positive variables: mergeable cubes
    /// always belong to consecutive groups. All successful merges give the next generation of cubes,
    /// the cubes of the current generation which were not consumed by any merge are prime.
    ///
    /// A cube gains a free variable at each generation, the tabulation thus stops after at most
    /// ```width``` productive passes. Failing to do so is reported as an internal error.
    pub fn generate(initial: Vec<Implicant>, width: usize) -> Result<Self, QmkitError> {
        let mut primes: HashMap<String, Implicant> = HashMap::new();
        let mut current = dedup(initial)?;
        let mut passes = 0;

        while !current.is_empty() {
            if passes > width {
                return Err(InternalError::MergeDidNotTerminate { passes }.into());
            }

            let groups = current
                .iter()
                .enumerate()
                .into_group_map_by(|(_, imp)| imp.cube().ones());

            let mut consumed = bit_set::BitSet::with_capacity(current.len());
            let mut next: HashMap<String, Implicant> = HashMap::new();
            for ones in 0..width {
                let (low, high) = match (groups.get(&ones), groups.get(&(ones + 1))) {
                    (Some(low), Some(high)) => (low, high),
                    _ => continue,
                };
                for ((i, a), (j, b)) in low.iter().cartesian_product(high.iter()) {
                    let merged = match a.merge(b) {
                        None => continue,
                        Some(merged) => merged,
                    };
                    trace!("merge {} + {} -> {}", a.cube(), b.cube(), merged.cube());
                    consumed.insert(*i);
                    consumed.insert(*j);
                    match next.entry(merged.identity()) {
                        Entry::Occupied(mut e) => e.get_mut().absorb(merged)?,
                        Entry::Vacant(e) => {
                            e.insert(merged);
                        }
                    }
                }
            }

            let count = current.len();
            for imp in current
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !consumed.contains(*i))
                .map(|(_, imp)| imp)
            {
                primes.entry(imp.identity()).or_insert(imp);
            }
            debug!(
                "merge pass {}: {} cubes, {} consumed, {} new cubes, {} primes so far",
                passes,
                count,
                consumed.len(),
                next.len(),
                primes.len()
            );

            if !next.is_empty() {
                passes += 1;
            }
            current = next.into_values().collect();
        }

        let mut implicants: Implicants = primes.into_values().collect();
        implicants.sort_canonical();
        Ok(Self { implicants, passes })
    }
}

/// Fold duplicated initial cubes, a cube listed twice keeps the strongest origin
fn dedup(initial: Vec<Implicant>) -> Result<Vec<Implicant>, QmkitError> {
    let mut unique: HashMap<String, Implicant> = HashMap::new();
    for imp in initial {
        match unique.entry(imp.identity()) {
            Entry::Occupied(mut e) => e.get_mut().absorb(imp)?,
            Entry::Vacant(e) => {
                e.insert(imp);
            }
        }
    }
    Ok(unique.into_values().collect())
}

impl<'a> IntoIterator for &'a Primes {
    type Item = &'a Implicant;
    type IntoIter = Iter<'a, Implicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.implicants.iter()
    }
}

impl IntoIterator for Primes {
    type Item = Implicant;
    type IntoIter = IntoIter<Implicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.implicants.into_iter()
    }
}

impl Rule for Primes {
    fn fmt_rule(&self, f: &mut fmt::Formatter, namer: &VarSpace) -> fmt::Result {
        self.implicants.fmt_rule(f, namer)
    }

    fn eval(&self, state: &State) -> bool {
        self.implicants.eval(state)
    }

    fn collect_regulators(&self, regulators: &mut VarSet) {
        self.implicants.collect_regulators(regulators);
    }
}

// delegate Display impl to the implicant list
impl fmt::Display for Primes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.implicants, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use itertools::Itertools;
    use test_log::test;

    fn prime_ids(table: &TruthTable) -> Result<Vec<String>, QmkitError> {
        Ok(Primes::from_table(table)?
            .iter()
            .map(|p| p.identity())
            .collect())
    }

    #[test]
    fn count_primes() -> Result<(), QmkitError> {
        // Classical example: f(A,B,C,D) = m(4,8,10,11,12,15) + d(9,14)
        let table = TruthTable::new(VarSpace::alphabetic(4)?, [4, 8, 10, 11, 12, 15], [9, 14])?;
        assert_eq!(
            prime_ids(&table)?,
            vec!["1--0", "1-1-", "10--", "-100"]
        );

        let primes = Primes::from_table(&table)?;
        assert_eq!(primes.passes(), 2);
        let p = primes.get(0).unwrap();
        assert_eq!(p.covered_indices(), vec![8, 10, 12, 14]);
        Ok(())
    }

    #[test]
    fn order_independence() -> Result<(), QmkitError> {
        let table = TruthTable::new(VarSpace::alphabetic(4)?, [0, 1, 2, 5, 6, 7, 8, 9, 10, 14], [])?;
        let mut initial = table.initial_cubes();
        let forward = Primes::generate(initial.clone(), 4)?;
        initial.reverse();
        let backward = Primes::generate(initial, 4)?;
        assert_eq!(forward.cubes(), backward.cubes());
        Ok(())
    }

    #[test]
    fn duplicated_inputs() -> Result<(), QmkitError> {
        let mut initial = vec![
            Implicant::from_assignment(0, 2, Origin::DontCare),
            Implicant::from_assignment(1, 2, Origin::Required),
        ];
        initial.push(Implicant::from_assignment(0, 2, Origin::Required));
        let primes = Primes::generate(initial, 2)?;
        assert_eq!(primes.len(), 1);
        assert_eq!(primes.get(0).unwrap().identity(), "0-");
        assert_eq!(primes.get(0).unwrap().origin(), Origin::Required);
        Ok(())
    }

    #[test]
    fn full_and_empty() -> Result<(), QmkitError> {
        let table = TruthTable::new(VarSpace::alphabetic(3)?, 0..8, [])?;
        assert_eq!(prime_ids(&table)?, vec!["---"]);
        assert_eq!(Primes::from_table(&table)?.passes(), 3);

        let table = TruthTable::new(VarSpace::alphabetic(3)?, [], [])?;
        assert!(Primes::from_table(&table)?.is_empty());
        Ok(())
    }

    #[test]
    fn primes_cover_everything() -> Result<(), QmkitError> {
        for mask in 0u32..256 {
            let required: Vec<usize> = (0..8).filter(|i| mask >> i & 1 == 1).collect();
            let table = TruthTable::new(VarSpace::alphabetic(3)?, required.clone(), [])?;
            let primes = Primes::from_table(&table)?;
            for idx in &required {
                assert!(primes.as_implicants().covers_index(*idx));
            }
            // every prime is an implicant and its cover is its full expansion
            for p in &primes {
                let expanded: Vec<usize> = p.cube().expand().collect();
                assert_eq!(p.covered_indices(), expanded);
                assert!(expanded.iter().all(|i| required.contains(i)));
            }
            // no prime contains another one
            for (a, b) in primes.iter().tuple_combinations() {
                assert!(!a.cube().contains(b.cube()) && !b.cube().contains(a.cube()));
            }
        }
        Ok(())
    }
}
