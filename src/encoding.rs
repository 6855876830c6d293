//! Conversions between restricted growth sequences and explicit blocks.
//!
//! A restricted growth sequence `a` represents the partition of {1..n} in which element
//! `i` belongs to the block labelled `a[i - 1]`. Blocks are listed in order of label,
//! which is also the order of their smallest elements.

use crate::error::{Error, Result};
use crate::traits::{index, label, Label};
use arrayvec::ArrayVec;
use std::cmp::Ordering;
use std::collections::{btree_map, hash_map, BTreeMap, HashMap};
use std::hash::Hash;

/// Blocks of a partition of at most 16 elements, stored without allocation
pub type SmallBlocks = ArrayVec<ArrayVec<u8, 16>, 16>;

/// Returns the blocks of the partition represented by `a`, as lists of 1-based elements.
///
/// Runs in linear time on restricted growth sequences. Any other sequence is grouped by label
/// and the groups are ordered by label value.
pub fn to_blocks<T: Label>(a: &[T]) -> Vec<Vec<usize>> {
    let mut blocks: Vec<Vec<usize>> = Vec::new();
    for (i, l) in a.iter().enumerate() {
        let l = index(*l);
        match l.cmp(&blocks.len()) {
            Ordering::Less => blocks[l].push(i + 1),
            Ordering::Equal => blocks.push(vec![i + 1]),
            Ordering::Greater => return group_by_label(a),
        }
    }
    blocks
}

fn group_by_label<T: Label>(a: &[T]) -> Vec<Vec<usize>> {
    let mut groups: BTreeMap<T, Vec<usize>> = BTreeMap::new();
    for (i, l) in a.iter().enumerate() {
        groups.entry(*l).or_default().push(i + 1);
    }
    groups.into_values().collect()
}

/// Like `to_blocks`, for restricted growth sequences of at most 16 elements.
pub fn to_small_blocks<T: Label>(a: &[T]) -> Result<SmallBlocks> {
    if a.len() > 16 {
        return Err(Error::Capacity { len: a.len(), capacity: 16 });
    }
    check(a)?;

    let mut blocks = SmallBlocks::new();
    for (i, l) in a.iter().enumerate() {
        let l = index(*l);
        if l == blocks.len() {
            blocks.push(ArrayVec::new());
        }
        blocks[l].push((i + 1) as u8);
    }
    Ok(blocks)
}

/// Returns the restricted growth sequence of the partition of {1..n} given by `blocks`.
///
/// The blocks may be listed in any order, and elements within a block in any order;
/// labels are assigned by first appearance when scanning the elements 1, 2, ..., n.
pub fn from_blocks<T: Label, B: AsRef<[usize]>>(blocks: &[B], n: usize) -> Result<Vec<T>> {
    let mut owner: Vec<Option<usize>> = vec![None; n];
    for (j, block) in blocks.iter().enumerate() {
        let block = block.as_ref();
        if block.is_empty() {
            return Err(Error::InvalidBlocks(format!("block {} is empty", j)));
        }
        for &e in block {
            if e == 0 || e > n {
                return Err(Error::InvalidBlocks(format!("element {} is outside 1..={}", e, n)));
            }
            if owner[e - 1].replace(j).is_some() {
                return Err(Error::InvalidBlocks(format!("element {} appears twice", e)));
            }
        }
    }

    let mut provisional = Vec::with_capacity(n);
    for (i, o) in owner.into_iter().enumerate() {
        match o {
            Some(j) => provisional.push(j),
            None => return Err(Error::InvalidBlocks(format!("element {} is missing", i + 1))),
        }
    }
    canonicalize(provisional).map(|(a, _)| a)
}

macro_rules! do_canonicalize {
    ($T:ty, $iter:expr, $map:expr, $map_mod:tt) => {
        {
            let mut map = $map;
            let mut a = Vec::new();
            for v in $iter {
                let fresh = map.len();
                let l: $T = match map.entry(v) {
                    $map_mod::Entry::Occupied(e) => *e.get(),
                    $map_mod::Entry::Vacant(e) => *e.insert(label(fresh)?),
                };
                a.push(l);
            }
            Ok((a, map))
        }
    }
}

/// Relabels a sequence of `Hash`-implementing values into its restricted growth sequence.
///
/// Returns the sequence and a map from values to labels. Use `canonicalize_ord` if `Hash`
/// is not implemented on the values.
pub fn canonicalize<T, I>(iter: I) -> Result<(Vec<T>, HashMap<I::Item, T>)>
    where T: Label, I: IntoIterator, I::Item: Hash + Eq
{
    do_canonicalize!(T, iter, HashMap::new(), hash_map)
}

/// Relabels a sequence of `Ord`-implementing values into its restricted growth sequence.
///
/// Returns the sequence and a map from values to labels.
pub fn canonicalize_ord<T, I>(iter: I) -> Result<(Vec<T>, BTreeMap<I::Item, T>)>
    where T: Label, I: IntoIterator, I::Item: Ord
{
    do_canonicalize!(T, iter, BTreeMap::new(), btree_map)
}

/// Checks if a sequence is a restricted growth sequence
pub fn is_restricted_growth<T, I>(iter: I) -> bool
    where T: Label, I: IntoIterator<Item = T>
{
    first_violation(iter).is_none()
}

/// Checks that `a` is a restricted growth sequence, reporting the first offending position
pub fn check<T: Label>(a: &[T]) -> Result<()> {
    match first_violation(a.iter().copied()) {
        Some(position) => Err(Error::NotRestrictedGrowth { position }),
        None => Ok(()),
    }
}

fn first_violation<T, I>(iter: I) -> Option<usize>
    where T: Label, I: IntoIterator<Item = T>
{
    // m is one more than the largest label so far, i.e. the largest label allowed next
    let mut m = T::zero();
    for (i, ai) in iter.into_iter().enumerate() {
        if ai > m {
            return Some(i);
        }
        if ai == m {
            m = match m.checked_add(&T::one()) {
                Some(m) => m,
                None => return Some(i),
            };
        }
    }
    None
}

/// Returns the number of blocks of the partition represented by a restricted growth sequence
pub fn num_blocks<T: Label>(a: &[T]) -> usize {
    a.iter().max().map_or(0, |m| index(*m) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partitions;

    #[test]
    fn round_trip() {
        for n in 0..8 {
            for a in partitions(n) {
                let blocks = to_blocks(&a);
                assert_eq!(from_blocks::<usize, _>(&blocks, n).unwrap(), a);
                assert_eq!(blocks.len(), num_blocks(&a));
                assert!(check(&a).is_ok());
            }
        }
    }

    #[test]
    fn blocks_in_any_order() {
        let blocks = vec![vec![5, 3], vec![4, 1], vec![2]];
        assert_eq!(from_blocks::<u8, _>(&blocks, 5).unwrap(), vec![0, 1, 2, 0, 2]);
        assert_eq!(to_blocks(&[0u8, 1, 2, 0, 2]), vec![vec![1, 4], vec![2], vec![3, 5]]);
    }

    #[test]
    fn invalid_blocks() {
        let err = |blocks: Vec<Vec<usize>>, n| from_blocks::<usize, _>(&blocks, n).unwrap_err();
        assert!(matches!(err(vec![vec![1, 2], vec![]], 2), Error::InvalidBlocks(_)));
        assert!(matches!(err(vec![vec![1, 2, 3]], 2), Error::InvalidBlocks(_)));
        assert!(matches!(err(vec![vec![0, 1]], 2), Error::InvalidBlocks(_)));
        assert!(matches!(err(vec![vec![1], vec![1, 2]], 2), Error::InvalidBlocks(_)));
        assert_eq!(err(vec![vec![1, 3]], 3), Error::InvalidBlocks("element 2 is missing".into()));
        assert_eq!(from_blocks::<usize, Vec<usize>>(&[], 0).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn not_restricted_growth() {
        assert_eq!(to_blocks(&[1usize, 0, 1]), vec![vec![2], vec![1, 3]]);
        assert_eq!(to_blocks::<u8>(&[]), Vec::<Vec<usize>>::new());

        assert!(is_restricted_growth(vec![0u8, 1, 0, 2, 1]));
        assert!(is_restricted_growth(Vec::<u8>::new()));
        assert!(!is_restricted_growth(vec![1u8]));
        assert!(!is_restricted_growth(vec![0u8, 2]));
        assert_eq!(check(&[0u16, 1, 1, 3]), Err(Error::NotRestrictedGrowth { position: 3 }));
    }

    #[test]
    fn canonical_labels() {
        let (a, map) = canonicalize::<u8, _>("abracadabra".chars()).unwrap();
        assert_eq!(a, vec![0, 1, 2, 0, 3, 0, 4, 0, 1, 2, 0]);
        assert_eq!(map[&'c'], 3);

        let (b, map) = canonicalize_ord::<usize, _>(vec![7, 7, 3, 9, 3]).unwrap();
        assert_eq!(b, vec![0, 0, 1, 2, 1]);
        assert_eq!(map.len(), 3);

        // 256 distinct values need label 255 at most; 257 do not fit into u8
        assert!(canonicalize::<u8, _>(0..256).is_ok());
        assert_eq!(canonicalize::<u8, _>(0..257).unwrap_err(), Error::LabelOverflow { label: 256 });
    }

    #[test]
    fn small_blocks() {
        for n in 0..7 {
            for a in partitions(n) {
                let small = to_small_blocks(&a).unwrap();
                let big: Vec<Vec<usize>> = small.iter()
                    .map(|b| b.iter().map(|e| *e as usize).collect())
                    .collect();
                assert_eq!(big, to_blocks(&a));
            }
        }
        assert_eq!(to_small_blocks(&[0u8; 17]).unwrap_err(), Error::Capacity { len: 17, capacity: 16 });
        assert_eq!(to_small_blocks(&[0u8, 2]).unwrap_err(), Error::NotRestrictedGrowth { position: 1 });
    }
}
