//! Bipartitions of a labelled sample into two pseudo-groups.
//!
//! Group membership is a boolean mask, so the complement costs one pass
//! over the indices.

use rand::seq::index;
use rand::Rng;

use crate::error::{Error, Result};

/// Split of `0..len` into group A (exactly `group_size` indices) and group B
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bipartition {
    in_a: Vec<bool>,
    group_size: usize,
}

impl Bipartition {
    /// Uniformly random subset of `group_size` indices out of `0..total`,
    /// drawn without replacement
    pub fn random<R: Rng + ?Sized>(total: usize, group_size: usize, rng: &mut R) -> Result<Self> {
        if group_size > total {
            return Err(Error::InvalidPartition {
                combined: total,
                group_size,
            });
        }

        let mut in_a = vec![false; total];
        for i in index::sample(rng, total, group_size) {
            in_a[i] = true;
        }
        Ok(Self { in_a, group_size })
    }

    /// Bipartition whose group A is exactly `group_a`
    pub fn from_group_a(total: usize, group_a: &[usize]) -> Result<Self> {
        let mut in_a = vec![false; total];
        for &i in group_a {
            match in_a.get_mut(i) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(Error::InvalidPartition {
                        combined: total,
                        group_size: group_a.len(),
                    })
                }
            }
        }
        Ok(Self {
            in_a,
            group_size: group_a.len(),
        })
    }

    /// Total number of labelled items
    pub fn len(&self) -> usize {
        self.in_a.len()
    }

    /// True when there are no labelled items
    pub fn is_empty(&self) -> bool {
        self.in_a.is_empty()
    }

    /// Size of group A
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn is_member_of_a(&self, index: usize) -> bool {
        self.in_a.get(index).copied().unwrap_or(false)
    }

    /// Indices in group A, ascending
    pub fn group_a(&self) -> impl Iterator<Item = usize> + '_ {
        self.in_a.iter().enumerate().filter(|&(_, &a)| a).map(|(i, _)| i)
    }

    /// Indices in group B, ascending
    pub fn group_b(&self) -> impl Iterator<Item = usize> + '_ {
        self.in_a.iter().enumerate().filter(|&(_, &a)| !a).map(|(i, _)| i)
    }

    /// Borrow the items of each group from `items`
    pub fn split<'a, T>(&self, items: &'a [T]) -> (Vec<&'a T>, Vec<&'a T>) {
        let mut a = Vec::with_capacity(self.group_size);
        let mut b = Vec::with_capacity(items.len().saturating_sub(self.group_size));
        for (item, &in_a) in items.iter().zip(&self.in_a) {
            if in_a {
                a.push(item);
            } else {
                b.push(item);
            }
        }
        (a, b)
    }

    /// The same split with the group labels exchanged
    pub fn complement(&self) -> Self {
        Self {
            in_a: self.in_a.iter().map(|a| !a).collect(),
            group_size: self.in_a.len() - self.group_size,
        }
    }
}
