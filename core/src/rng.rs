//! Deterministic random number generation for sample datasets.
//!
//! RULE: Sample data never touches a platform RNG.
//! Every stream is derived from one master seed, so the same seed always
//! yields the same dataset, record for record.
//!
//! Each concern gets its own stream, seeded from
//! (master_seed XOR stream_index * golden-ratio constant). Adding a new
//! stream never changes what the existing ones draw.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A deterministic RNG for one sampling concern.
pub struct SampleRng {
    inner: Pcg64Mcg,
}

impl SampleRng {
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }

    /// Weighted pick; `weights` must be non-empty and parallel to `items`.
    pub fn pick_weighted<'a, T>(&mut self, items: &'a [T], weights: &[f64]) -> &'a T {
        debug_assert_eq!(items.len(), weights.len());
        let total: f64 = weights.iter().sum();
        let mut roll = self.next_f64() * total;
        for (item, weight) in items.iter().zip(weights) {
            if roll < *weight {
                return item;
            }
            roll -= weight;
        }
        &items[items.len() - 1]
    }
}

/// All sampling streams for one seed, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, slot: StreamSlot) -> SampleRng {
        SampleRng::new(self.master_seed, slot as u64)
    }
}

/// Stable stream assignments.
/// NEVER reorder or remove entries, only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Identity = 0,
    Service = 1,
    Payment = 2,
    Schedule = 3,
    // Add new streams here, append only.
}
