use proptest::prelude::*;
use rgs_partitions::encoding::{canonicalize, check, from_blocks, is_restricted_growth, num_blocks, to_blocks};
use rgs_partitions::stirling::stirling2;
use rgs_partitions::{
    partitions, partitions_between, partitions_exactly, partitions_exactly_repaired, ExactPartitions, Query,
    RangePartitions,
};

proptest! {
    #[test]
    fn repair_and_retry_agree(n in 0..10usize, k in 0..11usize) {
        let retry: Vec<_> = partitions_exactly(n, k).collect();
        let repair: Vec<_> = partitions_exactly_repaired(n, k).collect();
        prop_assert_eq!(retry.len() as u64, stirling2(n, k).unwrap());
        prop_assert_eq!(retry, repair);
    }

    #[test]
    fn range_merges_exact_counts(n in 0..9usize, kmin in 0..10usize, kmax in 0..10usize) {
        let range: Vec<_> = partitions_between(n, kmin, kmax).collect();

        let mut merged: Vec<Vec<usize>> = Vec::new();
        if kmax <= n && (kmax > 0 || n == 0) {
            for k in kmin..=kmax {
                merged.extend(partitions_exactly(n, k));
            }
        }
        merged.sort();
        prop_assert_eq!(&range, &merged);

        // strictly increasing, so no duplicates
        for w in range.windows(2) {
            prop_assert!(w[0] < w[1]);
        }
        for a in &range {
            prop_assert!(check(a).is_ok());
            prop_assert!((kmin..=kmax).contains(&num_blocks(a)));
        }
        prop_assert_eq!(Some(range.len() as u64), Query::between(n, kmin, kmax).count());
    }

    #[test]
    fn every_sequence_has_a_canonical_form(values in prop::collection::vec(0..6u32, 0..24)) {
        let (a, map) = canonicalize::<u8, _>(values.iter().copied()).unwrap();
        prop_assert!(is_restricted_growth(a.iter().copied()));
        prop_assert_eq!(num_blocks(&a), map.len());

        // same value, same block
        for i in 0..values.len() {
            for j in 0..values.len() {
                prop_assert_eq!(values[i] == values[j], a[i] == a[j]);
            }
        }

        let blocks = to_blocks(&a);
        prop_assert_eq!(blocks.iter().map(Vec::len).sum::<usize>(), values.len());
        prop_assert_eq!(from_blocks::<u8, _>(&blocks, values.len()).unwrap(), a);
    }

    #[test]
    fn exhausted_cursors_start_over(n in 0..9usize, k in 0..10usize, steps in 0..50usize) {
        if let Some(mut x) = ExactPartitions::first(n, k) {
            let fresh = x.clone();
            for _ in 0..steps {
                if !x.increment() {
                    prop_assert_eq!(&x, &fresh);
                    break;
                }
            }
            while x.increment() {}
            prop_assert_eq!(&x, &fresh);
        }
        if let Some(mut z) = RangePartitions::first(n, k.min(n), n) {
            let fresh = z.clone();
            while z.increment() {}
            prop_assert_eq!(&z, &fresh);
        }
    }

    #[test]
    fn queries_round_trip(n in 0..1000usize, a in 0..1000usize, b in 0..1000usize, form in 0..3u8) {
        let q = match form {
            0 => Query::all(n),
            1 => Query::exactly(n, a),
            _ => Query::between(n, a, b),
        };
        prop_assert_eq!(q.to_string().parse::<Query>(), Ok(q));
    }
}

#[test]
fn all_partitions_are_sorted_and_distinct() {
    for n in 0..=9 {
        let all: Vec<_> = partitions(n).collect();
        assert!(all.windows(2).all(|w| w[0] < w[1]), "n = {}", n);
        assert_eq!(Some(all.len() as u64), rgs_partitions::bell_number(n));
    }
}
