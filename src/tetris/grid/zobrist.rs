/// xorshift64* generator with the multiplier the grid hash table is built from.
/// Not cryptographic; chosen only for cheap, well-distributed 64-bit output.
struct XorShift64Star {
    state: u64,
}

const MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;

impl XorShift64Star {
    fn new(seed: u64) -> XorShift64Star {
        XorShift64Star { state: if seed == 0 { 1 } else { seed } }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(MULTIPLIER)
    }
}

/// Seeds from wall time XOR an address of the table under construction: cheap,
/// unique-enough entropy for a non-cryptographic per-grid hash (§4.3).
fn seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let marker = Box::new(0u8);
    let addr = &*marker as *const u8 as u64;

    nanos ^ addr
}

/// Builds a fresh `W x H` table of pseudo-random 64-bit values, indexed `[x][y]`.
pub(super) fn build_table(width: usize, height: usize) -> Vec<Vec<u64>> {
    let mut rng = XorShift64Star::new(seed());
    (0..width)
        .map(|_| (0..height).map(|_| rng.next()).collect())
        .collect()
}
