//! Per-session hue and id allocation.
//!
//! Model
//! - Hues are integers in `0..360`. Each draw is uniform over the hues not yet
//!   issued; once all 360 are out, the pool is cleared and reuse begins.
//! - Ids are short random alphanumeric tokens. They carry no ordering and are
//!   only meant for equality comparison.
//!
//! One `Allocator` belongs to one session. Sharing a pool across sessions
//! would need external locking; the crate never does that.

use std::collections::BTreeSet;
use std::fmt;

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Size of the hue space.
pub const HUE_COUNT: u16 = 360;
/// Length of generated id tokens.
pub const ID_LEN: usize = 9;

/// A hue in degrees, `0..360`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hue(u16);

impl Hue {
    #[inline]
    pub fn degrees(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, 70%, 50%)", self.0)
    }
}

/// Opaque constraint identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintId(String);

impl ConstraintId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConstraintId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Hue pool plus id source for one session.
#[derive(Clone, Debug)]
pub struct Allocator {
    rng: StdRng,
    issued: BTreeSet<u16>,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator {
    /// Allocator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            issued: BTreeSet::new(),
        }
    }

    /// Reproducible allocator; equal seeds yield equal hue and id sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            issued: BTreeSet::new(),
        }
    }

    /// Number of hues issued since the last reset.
    #[inline]
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    /// Draw an unused hue; clears the pool first when it is saturated.
    pub fn allocate_color(&mut self) -> Hue {
        if self.issued.len() >= HUE_COUNT as usize {
            tracing::debug!("hue pool exhausted; resetting");
            self.issued.clear();
        }
        let free = HUE_COUNT as usize - self.issued.len();
        let k = self.rng.gen_range(0..free);
        let hue = (0..HUE_COUNT)
            .filter(|h| !self.issued.contains(h))
            .nth(k)
            .unwrap_or(0);
        self.issued.insert(hue);
        Hue(hue)
    }

    pub fn allocate_id(&mut self) -> ConstraintId {
        let token: String = (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(ID_LEN)
            .map(char::from)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        ConstraintId(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn hues_do_not_repeat_until_pool_saturates() {
        let mut alloc = Allocator::with_seed(7);
        let mut seen = HashSet::new();
        for _ in 0..HUE_COUNT {
            let h = alloc.allocate_color();
            assert!(h.degrees() < HUE_COUNT);
            assert!(seen.insert(h), "hue {h} issued twice before saturation");
        }
        assert_eq!(alloc.issued_count(), HUE_COUNT as usize);
        // Next draw resets the pool.
        let _ = alloc.allocate_color();
        assert_eq!(alloc.issued_count(), 1);
    }

    #[test]
    fn seeded_allocators_replay() {
        let mut a = Allocator::with_seed(42);
        let mut b = Allocator::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.allocate_color(), b.allocate_color());
            assert_eq!(a.allocate_id(), b.allocate_id());
        }
    }

    #[test]
    fn ids_are_short_and_distinct() {
        let mut alloc = Allocator::with_seed(1);
        let ids: HashSet<_> = (0..1000).map(|_| alloc.allocate_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.as_str().len() == ID_LEN));
    }
}
