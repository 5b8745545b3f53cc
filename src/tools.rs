//! Some helper functions

/// Reflected binary Gray code of an integer.
///
/// Consecutive integers have codes differing by exactly one bit, and so do the first and last
/// codes of a sequence of ```2^k``` integers.
///
/// ```
/// # use qmkit::tools::{gray, gray_rank};
/// let codes: Vec<usize> = (0..4).map(gray).collect();
/// assert_eq!(codes, vec![0b00, 0b01, 0b11, 0b10]);
///
/// for i in 0..16 {
///     assert_eq!(gray_rank(gray(i)), i);
/// }
/// ```
pub fn gray(i: usize) -> usize {
    i ^ (i >> 1)
}

/// Position of a code in the reflected Gray sequence (inverse of [gray]).
pub fn gray_rank(code: usize) -> usize {
    let mut rank = code;
    let mut shift = code >> 1;
    while shift != 0 {
        rank ^= shift;
        shift >>= 1;
    }
    rank
}

/// The full reflected Gray sequence of codes of the given bit-width
pub fn gray_sequence(bits: usize) -> Vec<usize> {
    (0..1usize << bits).map(gray).collect()
}

#[cfg(test)]
mod tests {
    use crate::tools::*;

    #[test]
    fn cyclic_single_bit_steps() {
        for bits in 1..=4 {
            let seq = gray_sequence(bits);
            assert_eq!(seq.len(), 1 << bits);
            for (i, code) in seq.iter().enumerate() {
                let next = seq[(i + 1) % seq.len()];
                assert_eq!((code ^ next).count_ones(), 1);
            }
        }
    }

    #[test]
    fn sequence_is_permutation() {
        let mut seq = gray_sequence(3);
        assert_eq!(seq, vec![0, 1, 3, 2, 6, 7, 5, 4]);
        seq.sort_unstable();
        assert_eq!(seq, (0..8).collect::<Vec<_>>());
    }
}
