//! Tiny deterministic PRNG (xorshift32).
//!
//! Every random decision in a game (gate placement, input bits, which
//! pseudocode is picked) goes through one `Rng`, so a seeded game replays
//! identically in tests.

#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Create a generator. A zero seed would lock xorshift at zero, so it is
    /// replaced by a fixed non-zero constant.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// Seed from the browser clock. Native builds (tests) get a fixed seed.
    pub fn from_clock() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let ms = js_sys::Date::now() as u64;
            Self::new((ms ^ (ms >> 32)) as u32)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(42)
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform-ish value in `0..n`. `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u32() as usize) % n
    }

    pub fn next_bool(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }

    /// Fisher–Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..20 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_does_not_stick() {
        let mut r = Rng::new(0);
        assert_ne!(r.next_u32(), 0);
    }

    #[test]
    fn below_stays_in_range() {
        let mut r = Rng::new(123);
        for _ in 0..500 {
            assert!(r.below(6) < 6);
        }
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut r = Rng::new(99);
        let mut v: Vec<u32> = (0..10).collect();
        r.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }
}
