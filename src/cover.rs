//! Select a set of prime implicants covering all required minterms.

use crate::*;

use bit_set::BitSet;
use log::debug;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

/// Relation between each required minterm and the prime implicants covering it.
///
/// Prime implicants are identified by their position in the [Primes] list.
#[derive(Clone, Debug, Default)]
pub struct CoverageMap {
    entries: BTreeMap<usize, Vec<usize>>,
}

impl CoverageMap {
    /// Build the coverage relation for the required minterms.
    ///
    /// Don't-cares are never part of the map. Returns an internal error if a required minterm
    /// is not covered by any prime implicant.
    pub fn build(primes: &Primes, required: &BitSet) -> Result<Self, QmkitError> {
        let mut entries = BTreeMap::new();
        for minterm in required {
            let covering: Vec<usize> = primes
                .iter()
                .enumerate()
                .filter(|(_, p)| p.covers_index(minterm))
                .map(|(idx, _)| idx)
                .collect();
            if covering.is_empty() {
                return Err(InternalError::UncoveredMinterm(minterm).into());
            }
            entries.insert(minterm, covering);
        }
        Ok(Self { entries })
    }

    /// The prime implicants covering a minterm
    pub fn covering(&self, minterm: usize) -> Option<&[usize]> {
        self.entries.get(&minterm).map(|v| v.as_slice())
    }

    /// Iterate over the minterms and their covering prime implicants
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.entries.iter().map(|(m, c)| (*m, c.as_slice()))
    }

    /// Number of required minterms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The prime implicants which are the only cover of at least one minterm
    pub fn essential_primes(&self) -> BTreeSet<usize> {
        self.entries
            .values()
            .filter(|c| c.len() == 1)
            .map(|c| c[0])
            .collect()
    }
}

/// A selection of prime implicants covering all required minterms.
///
/// The selection contains all essential prime implicants, completed by a greedy choice:
/// the implicant covering the largest number of remaining minterms is picked first, ties are broken
/// by the number of literals and then by the identity of the cube. Finally, any picked implicant
/// which became redundant is removed, essential implicants are always kept.
///
/// The greedy completion does not guarantee a globally minimal solution,
/// but the result is irredundant and deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cover {
    essentials: Vec<usize>,
    selected: Vec<usize>,
}

impl Cover {
    /// Select prime implicants covering the required minterms
    pub fn solve(primes: &Primes, required: &BitSet) -> Result<Self, QmkitError> {
        let map = CoverageMap::build(primes, required)?;
        let implicants: Vec<&Implicant> = primes.iter().collect();

        let essentials = map.essential_primes();
        let mut remaining = required.clone();
        for e in &essentials {
            remaining.difference_with(implicants[*e].covers());
        }
        debug!(
            "{} essential prime implicants out of {}, {} minterms left",
            essentials.len(),
            implicants.len(),
            remaining.len()
        );

        let mut chosen: BTreeSet<usize> = essentials.clone();
        let mut picks = Vec::new();
        while !remaining.is_empty() {
            let best = implicants
                .iter()
                .enumerate()
                .filter(|(idx, _)| !chosen.contains(idx))
                .map(|(idx, p)| (idx, p.covers().intersection(&remaining).count()))
                .min_by_key(|&(idx, score)| (Reverse(score), idx));

            match best {
                Some((idx, score)) if score > 0 => {
                    debug!("pick {} covering {} remaining minterms", implicants[idx].cube(), score);
                    remaining.difference_with(implicants[idx].covers());
                    chosen.insert(idx);
                    picks.push(idx);
                }
                _ => {
                    let minterm = remaining.iter().next().unwrap_or_default();
                    return Err(InternalError::UncoveredMinterm(minterm).into());
                }
            }
        }

        // Drop the picks made redundant by later choices, latest picks first
        for idx in picks.iter().rev() {
            let others = chosen
                .iter()
                .filter(|o| *o != idx)
                .fold(BitSet::new(), |mut acc, o| {
                    acc.union_with(implicants[*o].covers());
                    acc
                });
            let mut own = implicants[*idx].covers().clone();
            own.intersect_with(required);
            if own.is_subset(&others) {
                debug!("drop redundant {}", implicants[*idx].cube());
                chosen.remove(idx);
            }
        }

        Ok(Self {
            essentials: essentials.into_iter().collect(),
            selected: chosen.into_iter().collect(),
        })
    }

    /// Positions of the essential prime implicants
    pub fn essentials(&self) -> &[usize] {
        &self.essentials
    }

    /// Positions of all selected prime implicants, essential or not
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn is_essential(&self, idx: usize) -> bool {
        self.essentials.contains(&idx)
    }

    /// Retrieve the selected implicants from the list of prime implicants
    pub fn implicants<'a>(&self, primes: &'a Primes) -> Vec<&'a Implicant> {
        self.selected.iter().filter_map(|i| primes.get(*i)).collect()
    }

    /// Retrieve the essential implicants from the list of prime implicants
    pub fn essential_implicants<'a>(&self, primes: &'a Primes) -> Vec<&'a Implicant> {
        self.essentials.iter().filter_map(|i| primes.get(*i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use bit_set::BitSet;
    use test_log::test;

    fn solve(table: &TruthTable) -> Result<(Primes, Cover), QmkitError> {
        let primes = Primes::from_table(table)?;
        let cover = Cover::solve(&primes, table.required())?;
        Ok((primes, cover))
    }

    fn ids(implicants: Vec<&Implicant>) -> Vec<String> {
        implicants.iter().map(|i| i.identity()).collect()
    }

    #[test]
    fn essential_only() -> Result<(), QmkitError> {
        let table = TruthTable::new(VarSpace::alphabetic(4)?, [4, 8, 10, 11, 12, 15], [9, 14])?;
        let (primes, cover) = solve(&table)?;

        // 4 is only covered by -100, 15 only by 1-1-
        assert_eq!(ids(cover.essential_implicants(&primes)), vec!["1-1-", "-100"]);
        // 8 is left: 1--0 and 10-- both cover it with the same cost
        assert_eq!(ids(cover.implicants(&primes)), vec!["1--0", "1-1-", "-100"]);
        Ok(())
    }

    #[test]
    fn cyclic_core() -> Result<(), QmkitError> {
        // No essential prime implicant: the greedy choice is the only way out
        let table = TruthTable::new(VarSpace::alphabetic(3)?, [0, 1, 2, 5, 6, 7], [])?;
        let (primes, cover) = solve(&table)?;
        assert_eq!(primes.len(), 6);
        assert!(cover.essentials().is_empty());

        // The minimum needs 3 of them, the greedy choice may need one more
        let selected = cover.implicants(&primes);
        assert!((3..=4).contains(&selected.len()));
        let mut covered = BitSet::new();
        selected.iter().for_each(|i| covered.union_with(i.covers()));
        assert_eq!(&covered, table.required());

        // The choice among equivalent covers is stable
        let (_, again) = solve(&table)?;
        assert_eq!(cover, again);
        Ok(())
    }

    #[test]
    fn coverage_map() -> Result<(), QmkitError> {
        let table = TruthTable::new(VarSpace::alphabetic(3)?, [3, 5, 6, 7], [])?;
        let primes = Primes::from_table(&table)?;
        let map = CoverageMap::build(&primes, table.required())?;
        assert_eq!(map.len(), 4);
        assert_eq!(map.covering(7).map(|c| c.len()), Some(3));
        assert_eq!(map.covering(3).map(|c| c.len()), Some(1));
        assert_eq!(map.covering(0), None);
        assert_eq!(map.essential_primes().len(), 3);
        Ok(())
    }

    #[test]
    fn missing_cover_is_internal() -> Result<(), QmkitError> {
        let primes = Primes::from_table(&TruthTable::new(VarSpace::alphabetic(2)?, [0], [])?)?;
        let required: BitSet = [0, 3].into_iter().collect();
        let err = Cover::solve(&primes, &required).unwrap_err();
        assert!(err.is_internal());
        assert_eq!(err, QmkitError::from(InternalError::UncoveredMinterm(3)));
        Ok(())
    }

    #[test]
    fn essentials_are_unique_covers() -> Result<(), QmkitError> {
        for mask in 0u32..(1 << 8) {
            let required: Vec<usize> = (0..8).filter(|i| mask >> i & 1 == 1).collect();
            let table = TruthTable::new(VarSpace::alphabetic(3)?, required, [])?;
            let (primes, cover) = solve(&table)?;
            let map = CoverageMap::build(&primes, table.required())?;
            for e in cover.essentials() {
                assert!(map.iter().any(|(_, c)| c == [*e]));
                assert!(cover.selected().contains(e));
            }
        }
        Ok(())
    }
}
