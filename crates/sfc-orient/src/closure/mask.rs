//! Dense task bitset sized to `D · 2^D` bits.

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct TaskMask {
    words: Vec<u64>,
}

impl TaskMask {
    pub fn new(nbits: usize) -> Self {
        Self {
            words: vec![0; nbits.div_ceil(64)],
        }
    }

    #[inline]
    pub fn insert(&mut self, i: usize) {
        self.words[i / 64] |= 1 << (i % 64);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    pub fn union_with(&mut self, other: &TaskMask) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= *b;
        }
    }

    #[inline]
    pub fn is_subset(&self, other: &TaskMask) -> bool {
        self.words.iter().zip(&other.words).all(|(a, b)| a & !b == 0)
    }

    /// Members of `self` missing from `base`.
    #[inline]
    pub fn count_outside(&self, base: &TaskMask) -> usize {
        self.words
            .iter()
            .zip(&base.words)
            .map(|(a, b)| (a & !b).count_ones() as usize)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &w)| {
            (0..64).filter(move |b| (w >> b) & 1 == 1).map(move |b| wi * 64 + b)
        })
    }
}
