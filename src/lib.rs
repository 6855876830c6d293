#![deny(missing_docs)]

//! The **rgs-partitions** crate enumerates the partitions of the set {1..n},
//! optionally restricted to exactly `k` blocks or to a range of block counts,
//! in lexicographic order of their restricted growth sequences.
//!
//! Set partitions are represented as sequences of labels, one for each element of
//! the partitioned set, such that two elements are in the same block exactly when
//! the sequence has the same label at the corresponding indices. Labels start at 0
//! and each new label is one more than the largest label seen so far; this makes the
//! representative of a partition unique.
//!
//! Every enumerator keeps the current sequence `a` together with a bound array `b`,
//! where `b[i]` is the largest label in `a[..i]`, and updates both in place, so that
//! moving to the next partition does not rebuild the state from scratch.
//!
//! See Stamatelatos and Efraimidis, "Lexicographic Enumeration of Set Partitions",
//! <https://arxiv.org/abs/2105.07472>, for the algorithms used here.
//!
//! # How to use
//!
//! For all partitions, use `AllPartitions` (or the `partitions` iterator).
//! For partitions with exactly `k` blocks, use `ExactPartitions`; `RepairedExactPartitions`
//! produces the same sequence with a different successor strategy.
//! For partitions whose block count lies in `[kmin, kmax]`, use `RangePartitions`.
//!
//! Labels are stored as `usize` in a `Vec` by default. Any unsigned integer type can be used
//! as the label type, and `ArrayVec` can be used as storage to avoid allocation; `SmallAllPartitions`
//! and friends use `u8` labels in 16-entry `ArrayVec`s.
//!
//! To enumerate, call `increment()` until it returns `false`, and use `get()`, `num_blocks()`
//! or `blocks()` to examine the partition. Alternatively, iterate over `Encodings` or `BlockLists`.
//!
//! The number of partitions grows very quickly with `n` (see `bell_number` and
//! `stirling::stirling2`); no limit on `n` is imposed here.

use std::borrow::Borrow;
use std::cmp::{max, Ordering};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::{Deref, Index};
use std::slice;

pub mod encoding;
pub mod error;
pub mod query;
pub mod recursion;
pub mod stirling;

pub use crate::error::{Error, Result};
pub use crate::query::{AnyPartitions, BlockCount, Query, Strategy};

/// Traits shared by the enumerators
pub mod traits
{
    use crate::error::{Error, Result};
    use arrayvec::ArrayVec;
    use num_traits::{AsPrimitive, NumCast, One, PrimInt, Unsigned};
    use std::fmt::Debug;
    use std::hash::Hash;
    use std::ops::{Add, AddAssign, DerefMut};

    /// Trait for things that can be incremented, like labels
    pub trait Incrementable
    {
        /// Increment self by mutable reference
        fn increment(&mut self);

        /// Increment self and return it
        fn incremented(mut self) -> Self
            where Self: Sized
        {
            self.increment();
            self
        }
    }

    impl<T> Incrementable for T
        where T: One + Add<T, Output = T> + AddAssign<T>
    {
        fn increment(&mut self) {
            *self += One::one();
        }

        fn incremented(self) -> T {
            self + <T as One>::one()
        }
    }

    /// Unsigned integer type used to store block labels
    pub trait Label: PrimInt + Unsigned + AsPrimitive<usize> + Incrementable + Default + Debug + Hash {}

    impl<T> Label for T
        where T: PrimInt + Unsigned + AsPrimitive<usize> + Incrementable + Default + Debug + Hash {}

    /// Converts `x` into a label, failing if the label type is too narrow
    pub fn label<T: Label>(x: usize) -> Result<T> {
        <T as NumCast>::from(x).ok_or(Error::LabelOverflow { label: x })
    }

    /// Converts a label back into an index
    #[inline]
    pub fn index<T: Label>(x: T) -> usize {
        x.as_()
    }

    /// Backing array of an enumeration session.
    ///
    /// Implemented for `Vec` (unbounded) and `ArrayVec` (bounded, no allocation).
    pub trait Store<T>: DerefMut<Target = [T]> + Clone + Debug
    {
        /// Returns an array holding `len` copies of `value`
        fn try_filled(len: usize, value: T) -> Result<Self>
            where Self: Sized;
    }

    impl<T: Clone + Debug> Store<T> for Vec<T>
    {
        fn try_filled(len: usize, value: T) -> Result<Self> {
            Ok(vec![value; len])
        }
    }

    impl<T: Clone + Debug, const N: usize> Store<T> for ArrayVec<T, N>
    {
        fn try_filled(len: usize, value: T) -> Result<Self> {
            if len > N {
                return Err(Error::Capacity { len, capacity: N });
            }
            Ok(std::iter::repeat(value).take(len).collect())
        }
    }

    /// Common interface of the enumerators: look at the current encoding, then advance.
    pub trait Cursor
    {
        /// Label type of the encodings
        type Label;

        /// Returns the current encoding
        fn get(&self) -> &[Self::Label];

        /// Moves to the next encoding, returning `true`, or back to the first one, returning `false`.
        fn advance(&mut self) -> bool;
    }
}
use crate::traits::{index, label, Cursor, Incrementable, Label, Store};

/// Resets `a[from..]` to 0 and recomputes the bounds of the suffix.
#[inline]
fn reset_suffix<T: Label>(a: &mut [T], b: &mut [T], from: usize) {
    for i in from..a.len() {
        a[i] = T::zero();
        b[i] = max(a[i - 1], b[i - 1]);
    }
}

/// Writes the lexicographically smallest sequence with exactly `k` labels:
/// zeroes followed by the tail `1, 2, ..., k-1`.
fn place_tail<T: Label>(a: &mut [T], b: &mut [T], k: usize) {
    let n = a.len();
    for x in a.iter_mut() {
        *x = T::zero();
    }
    for x in b.iter_mut() {
        *x = T::zero();
    }
    // the label is bumped before it is written, so the largest label k-1 never overflows
    let mut m = T::zero();
    for i in (n + 1 - k.max(1))..n {
        b[i] = m;
        m.increment();
        a[i] = m;
    }
}

macro_rules! impl_cursor {
    ($C:ident) => {
        impl<T: Label, S: Store<T>> $C<T, S> {
            /// Returns a reference to the sequence representing the partition
            pub fn get(&self) -> &[T] {
                &self.a
            }

            /// Returns the size of the set being partitioned
            pub fn len(&self) -> usize {
                self.a.len()
            }

            /// Returns `true` if the set being partitioned is empty
            pub fn is_empty(&self) -> bool {
                self.a.is_empty()
            }

            /// Returns the number of blocks of the current partition
            pub fn num_blocks(&self) -> usize {
                let n = self.a.len();
                if n == 0 {
                    return 0;
                }
                index(max(self.a[n - 1], self.b[n - 1])) + 1
            }

            /// Returns the blocks of the current partition, as 1-based elements
            pub fn blocks(&self) -> Vec<Vec<usize>> {
                encoding::to_blocks(&self.a)
            }

            /// Returns a copy of the sequence representing the partition
            pub fn to_vec(&self) -> Vec<T> {
                self.a.to_vec()
            }
        }

        impl<T: Label, S: Store<T>> Cursor for $C<T, S> {
            type Label = T;

            fn get(&self) -> &[T] {
                &self.a
            }

            fn advance(&mut self) -> bool {
                self.increment()
            }
        }

        impl<T: Label, S: Store<T>> PartialEq for $C<T, S> {
            fn eq(&self, other: &Self) -> bool {
                self.get() == other.get()
            }
        }

        impl<T: Label, S: Store<T>> Eq for $C<T, S> {}

        impl<T: Label, S: Store<T>> PartialOrd for $C<T, S> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<T: Label, S: Store<T>> Ord for $C<T, S> {
            fn cmp(&self, other: &Self) -> Ordering {
                self.get().cmp(other.get())
            }
        }

        impl<T: Label, S: Store<T>> Hash for $C<T, S> {
            fn hash<HH: Hasher>(&self, state: &mut HH) {
                self.get().hash(state);
            }
        }

        impl<T: Label, S: Store<T>> Deref for $C<T, S> {
            type Target = [T];

            fn deref(&self) -> &[T] {
                self.get()
            }
        }

        impl<T: Label, S: Store<T>> AsRef<[T]> for $C<T, S> {
            fn as_ref(&self) -> &[T] {
                self.get()
            }
        }

        impl<T: Label, S: Store<T>> Borrow<[T]> for $C<T, S> {
            fn borrow(&self) -> &[T] {
                self.get()
            }
        }

        impl<T: Label, S: Store<T>> Index<usize> for $C<T, S> {
            type Output = T;

            fn index(&self, index: usize) -> &T {
                &self.get()[index]
            }
        }

        impl<'a, T: Label, S: Store<T>> IntoIterator for &'a $C<T, S> {
            type Item = &'a T;
            type IntoIter = slice::Iter<'a, T>;

            fn into_iter(self) -> slice::Iter<'a, T> {
                self.get().iter()
            }
        }
    }
}

/// Enumerates all partitions of a set of `n` elements.
///
/// There are `bell_number(n)` of them.
#[derive(Debug, Clone)]
pub struct AllPartitions<T = usize, S = Vec<T>>
    where T: Label, S: Store<T>
{
    a: S,
    b: S,
    top: T
}

impl<T: Label, S: Store<T>> AllPartitions<T, S> {
    /// Starts at the partition with a single block (all labels 0).
    ///
    /// Fails if the label type cannot hold `n - 1` or the storage cannot hold `n` labels.
    pub fn try_first(n: usize) -> Result<Self> {
        let top = label(n.saturating_sub(1))?;
        let r = AllPartitions {
            a: S::try_filled(n, T::zero())?,
            b: S::try_filled(n, T::zero())?,
            top
        };
        tracing::debug!(n, "enumerating all partitions");
        Ok(r)
    }

    /// Go back to the first partition
    pub fn reset(&mut self) {
        for x in self.a.iter_mut() {
            *x = T::zero();
        }
        for x in self.b.iter_mut() {
            *x = T::zero();
        }
    }

    /// Move to the next partition in lexicographic order of sequences,
    /// returning `true`, or back to the first partition, returning `false`.
    #[inline]
    pub fn increment(&mut self) -> bool {
        let n = self.a.len();
        if n < 2 {
            return false;
        }

        let mut c = n - 1;
        while self.a[c] == self.top || self.a[c] > self.b[c] {
            c -= 1;
            if c == 0 {
                tracing::trace!(n, "all partitions exhausted");
                self.reset();
                return false;
            }
        }
        self.a[c].increment();
        reset_suffix(&mut self.a, &mut self.b, c + 1);
        true
    }
}

impl AllPartitions {
    /// Starts at the partition of `n` elements with a single block
    pub fn first(n: usize) -> Self {
        match Self::try_first(n) {
            Ok(r) => r,
            Err(_) => unreachable!("usize labels in a Vec always fit"),
        }
    }
}

impl_cursor!(AllPartitions);

/// Enumerates the partitions of a set of `n` elements into exactly `k` blocks.
///
/// After each step, states which do not use exactly `k` labels are skipped by
/// searching again from the end of the sequence. `RepairedExactPartitions` produces the
/// same sequence by patching the state instead.
///
/// There are `stirling::stirling2(n, k)` of them.
#[derive(Debug, Clone)]
pub struct ExactPartitions<T = usize, S = Vec<T>>
    where T: Label, S: Store<T>
{
    a: S,
    b: S,
    top: T,
    k: usize,
    single: bool,
    rejected: u64
}

impl<T: Label, S: Store<T>> ExactPartitions<T, S> {
    /// Starts at the lexicographically smallest partition with `k` blocks.
    ///
    /// Returns `Ok(None)` if there is no such partition, and fails if the label type
    /// or the storage is too small.
    pub fn try_first(n: usize, k: usize) -> Result<Option<Self>> {
        if k > n || (k == 0 && n > 0) {
            tracing::debug!(n, k, "no partitions with exactly k blocks");
            return Ok(None);
        }
        let mut r = ExactPartitions {
            a: S::try_filled(n, T::zero())?,
            b: S::try_filled(n, T::zero())?,
            top: label(k.saturating_sub(1))?,
            k,
            single: k <= 1 || k == n,
            rejected: 0
        };
        r.reset();
        tracing::debug!(n, k, strategy = "retry", "enumerating partitions with exactly k blocks");
        Ok(Some(r))
    }

    /// Returns the number of blocks every partition of this enumeration has
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of intermediate states skipped since the enumeration started,
    /// because they did not use exactly `k` labels.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Go back to the first partition
    pub fn reset(&mut self) {
        place_tail(&mut self.a, &mut self.b, self.k);
    }

    /// Move to the next partition with `k` blocks, returning `true`,
    /// or back to the first one, returning `false`.
    pub fn increment(&mut self) -> bool {
        if self.single {
            return false;
        }

        // here 2 <= k < n
        let n = self.a.len();
        loop {
            let mut c = n - 1;
            while self.a[c] == self.top || self.a[c] > self.b[c] {
                c -= 1;
                if c == 0 {
                    tracing::trace!(n, k = self.k, rejected = self.rejected, "exact partitions exhausted");
                    self.reset();
                    return false;
                }
            }
            self.a[c].increment();
            reset_suffix(&mut self.a, &mut self.b, c + 1);

            if max(self.a[n - 1], self.b[n - 1]) == self.top {
                return true;
            }
            self.rejected += 1;
        }
    }
}

impl ExactPartitions {
    /// Starts at the smallest partition of `n` elements into `k` blocks, if there is one
    pub fn first(n: usize, k: usize) -> Option<Self> {
        match Self::try_first(n, k) {
            Ok(r) => r,
            Err(_) => unreachable!("usize labels in a Vec always fit"),
        }
    }
}

impl_cursor!(ExactPartitions);

/// Enumerates the partitions of a set of `n` elements into exactly `k` blocks,
/// in the same order as `ExactPartitions`.
///
/// When a step leaves fewer than `k` labels, the end of the sequence is overwritten with
/// `k-1, k-2, ...` until it reaches the bound, instead of searching again.
#[derive(Debug, Clone)]
pub struct RepairedExactPartitions<T = usize, S = Vec<T>>
    where T: Label, S: Store<T>
{
    a: S,
    b: S,
    top: T,
    k: usize,
    single: bool
}

impl<T: Label, S: Store<T>> RepairedExactPartitions<T, S> {
    /// Starts at the lexicographically smallest partition with `k` blocks.
    ///
    /// Returns `Ok(None)` if there is no such partition, and fails if the label type
    /// or the storage is too small.
    pub fn try_first(n: usize, k: usize) -> Result<Option<Self>> {
        if k > n || (k == 0 && n > 0) {
            tracing::debug!(n, k, "no partitions with exactly k blocks");
            return Ok(None);
        }
        let mut r = RepairedExactPartitions {
            a: S::try_filled(n, T::zero())?,
            b: S::try_filled(n, T::zero())?,
            top: label(k.saturating_sub(1))?,
            k,
            single: k <= 1 || k == n
        };
        r.reset();
        tracing::debug!(n, k, strategy = "repair", "enumerating partitions with exactly k blocks");
        Ok(Some(r))
    }

    /// Returns the number of blocks every partition of this enumeration has
    pub fn k(&self) -> usize {
        self.k
    }

    /// Go back to the first partition
    pub fn reset(&mut self) {
        let n = self.a.len();
        for x in self.a.iter_mut() {
            *x = T::zero();
        }
        for x in self.b.iter_mut() {
            *x = T::zero();
        }
        let start = n - self.k;
        for i in start..n {
            self.b[i] = if i > 0 { max(self.a[i - 1], self.b[i - 1]) } else { T::zero() };
            self.a[i] = if i == start { T::zero() } else { self.b[i].incremented() };
        }
    }

    /// Move to the next partition with `k` blocks, returning `true`,
    /// or back to the first one, returning `false`.
    pub fn increment(&mut self) -> bool {
        if self.single {
            return false;
        }

        let n = self.a.len();
        let mut c = n - 1;
        while self.a[c] == self.top || self.a[c] > self.b[c] {
            c -= 1;
            if c == 0 {
                tracing::trace!(n, k = self.k, "repaired exact partitions exhausted");
                self.reset();
                return false;
            }
        }
        self.a[c].increment();
        reset_suffix(&mut self.a, &mut self.b, c + 1);

        if max(self.a[n - 1], self.b[n - 1]) != self.top {
            let mut i = n - 1;
            let mut m = self.top;
            while i > 0 && m > self.b[i] {
                self.a[i] = m;
                self.b[i] = m - T::one();
                i -= 1;
                m = m - T::one();
            }
        }
        true
    }
}

impl RepairedExactPartitions {
    /// Starts at the smallest partition of `n` elements into `k` blocks, if there is one
    pub fn first(n: usize, k: usize) -> Option<Self> {
        match Self::try_first(n, k) {
            Ok(r) => r,
            Err(_) => unreachable!("usize labels in a Vec always fit"),
        }
    }
}

impl_cursor!(RepairedExactPartitions);

/// Enumerates the partitions of a set of `n` elements into at least `kmin`
/// and at most `kmax` blocks.
///
/// The bound array has one more entry than the sequence, so this needs room for `n + 1` labels.
#[derive(Debug, Clone)]
pub struct RangePartitions<T = usize, S = Vec<T>>
    where T: Label, S: Store<T>
{
    a: S,
    b: S,
    top: T,
    kmin: usize,
    kmax: usize
}

impl<T: Label, S: Store<T>> RangePartitions<T, S> {
    /// Starts at the lexicographically smallest partition with `kmin` blocks.
    ///
    /// Returns `Ok(None)` if no partition has a block count in range, and fails if the
    /// label type or the storage is too small.
    pub fn try_first(n: usize, kmin: usize, kmax: usize) -> Result<Option<Self>> {
        if kmin > kmax || kmax > n || (kmax == 0 && n > 0) {
            tracing::debug!(n, kmin, kmax, "no partitions with block count in range");
            return Ok(None);
        }
        let mut r = RangePartitions {
            a: S::try_filled(n, T::zero())?,
            b: S::try_filled(n + 1, T::zero())?,
            top: label(kmax.saturating_sub(1))?,
            kmin,
            kmax
        };
        r.reset();
        tracing::debug!(n, kmin, kmax, "enumerating partitions with block count in range");
        Ok(Some(r))
    }

    /// Returns the allowed range of block counts
    pub fn block_range(&self) -> (usize, usize) {
        (self.kmin, self.kmax)
    }

    /// Go back to the first partition
    pub fn reset(&mut self) {
        let n = self.a.len();
        place_tail(&mut self.a, &mut self.b[..n], self.kmin);
        self.b[n] = T::zero();
    }

    /// Move to the next partition with a block count in range, returning `true`,
    /// or back to the first one, returning `false`.
    pub fn increment(&mut self) -> bool {
        let n = self.a.len();
        if n < 2 {
            return false;
        }

        let mut i = n - 1;
        while self.a[i] == self.top || self.a[i] > self.b[i] {
            i -= 1;
            if i == 0 {
                tracing::trace!(n, kmin = self.kmin, kmax = self.kmax, "range partitions exhausted");
                self.reset();
                return false;
            }
        }
        self.a[i].increment();
        self.b[i + 1] = max(self.a[i], self.b[i]);

        // positions which may still take label 0 without falling below kmin labels
        let mut zeroes = (index(self.b[i + 1]) + n - i).saturating_sub(self.kmin);
        i += 1;
        while zeroes > 0 && i < n {
            self.a[i] = T::zero();
            self.b[i + 1] = self.b[i];
            i += 1;
            zeroes -= 1;
        }
        while i < n {
            self.a[i] = self.b[i].incremented();
            self.b[i + 1] = self.a[i];
            i += 1;
        }
        true
    }
}

impl RangePartitions {
    /// Starts at the smallest partition of `n` elements into `kmin` blocks, if any
    /// partition has a block count in `[kmin, kmax]`
    pub fn first(n: usize, kmin: usize, kmax: usize) -> Option<Self> {
        match Self::try_first(n, kmin, kmax) {
            Ok(r) => r,
            Err(_) => unreachable!("usize labels in a Vec always fit"),
        }
    }
}

impl_cursor!(RangePartitions);

/// Enumerates all partitions with `u8` labels stored in 16-entry `ArrayVec`s
pub type SmallAllPartitions = AllPartitions<u8, arrayvec::ArrayVec<u8, 16>>;

/// Enumerates partitions into exactly `k` blocks with `u8` labels stored in 16-entry `ArrayVec`s
pub type SmallExactPartitions = ExactPartitions<u8, arrayvec::ArrayVec<u8, 16>>;

/// Like `SmallExactPartitions`, using the repairing successor
pub type SmallRepairedExactPartitions = RepairedExactPartitions<u8, arrayvec::ArrayVec<u8, 16>>;

/// Enumerates partitions with a bounded block count with `u8` labels stored in
/// 16-entry `ArrayVec`s (so at most 15 elements)
pub type SmallRangePartitions = RangePartitions<u8, arrayvec::ArrayVec<u8, 16>>;

/// Lazy sequence of the encodings visited by a cursor.
///
/// The first item is the cursor's current state; iteration stops once the cursor is exhausted.
#[derive(Debug, Clone)]
pub struct Encodings<C>
{
    cursor: Option<C>,
    started: bool
}

impl<C: Cursor> Encodings<C> {
    /// Iterates from the current state of `cursor`; `None` gives the empty sequence
    pub fn new(cursor: Option<C>) -> Self {
        Encodings { cursor, started: false }
    }

    /// Decodes each encoding into its blocks
    pub fn blocks(self) -> BlockLists<C> {
        BlockLists { inner: self }
    }

    fn step(&mut self) -> Option<&[C::Label]> {
        if !self.started {
            self.started = true;
        } else if !self.cursor.as_mut()?.advance() {
            self.cursor = None;
        }
        self.cursor.as_ref().map(|c| c.get())
    }
}

impl<C: Cursor> Iterator for Encodings<C>
    where C::Label: Clone
{
    type Item = Vec<C::Label>;

    fn next(&mut self) -> Option<Vec<C::Label>> {
        self.step().map(|a| a.to_vec())
    }
}

impl<C: Cursor> FusedIterator for Encodings<C>
    where C::Label: Clone {}

/// Lazy sequence of partitions as lists of blocks of 1-based elements
#[derive(Debug, Clone)]
pub struct BlockLists<C>
{
    inner: Encodings<C>
}

impl<C: Cursor> Iterator for BlockLists<C>
    where C::Label: Label
{
    type Item = Vec<Vec<usize>>;

    fn next(&mut self) -> Option<Vec<Vec<usize>>> {
        self.inner.step().map(encoding::to_blocks)
    }
}

impl<C: Cursor> FusedIterator for BlockLists<C>
    where C::Label: Label {}

/// All partitions of {1..n} as encodings
pub fn partitions(n: usize) -> Encodings<AllPartitions> {
    Encodings::new(Some(AllPartitions::first(n)))
}

/// The partitions of {1..n} into exactly `k` blocks as encodings
pub fn partitions_exactly(n: usize, k: usize) -> Encodings<ExactPartitions> {
    Encodings::new(ExactPartitions::first(n, k))
}

/// Same sequence as `partitions_exactly`, produced by `RepairedExactPartitions`
pub fn partitions_exactly_repaired(n: usize, k: usize) -> Encodings<RepairedExactPartitions> {
    Encodings::new(RepairedExactPartitions::first(n, k))
}

/// The partitions of {1..n} into between `kmin` and `kmax` blocks (inclusive) as encodings
pub fn partitions_between(n: usize, kmin: usize, kmax: usize) -> Encodings<RangePartitions> {
    Encodings::new(RangePartitions::first(n, kmin, kmax))
}

// bigger ones don't fit into u64
static BELL_NUMBERS: [u64; 26] = [
    1,
    1,
    2,
    5,
    15,
    52,
    203,
    877,
    4140,
    21147,
    115975,
    678570,
    4213597,
    27644437,
    190899322,
    1382958545,
    10480142147,
    82864869804,
    682076806159,
    5832742205057,
    51724158235372,
    474869816156751,
    4506715738447323,
    44152005855084346,
    445958869294805289,
    4638590332229999353
];

/// Number of partitions of a set of `n` elements.
///
/// Simply returns the `n`-th Bell number, or `None` if it's too large to fit into `u64`.
pub fn bell_number(n: usize) -> Option<u64>
{
    BELL_NUMBERS.get(n).copied()
}
