use rand::RngCore;

/// Always yields the midpoint of its range: `random::<f64>()` is exactly 0.5,
/// so noise terms of the form `u - 0.5` vanish.
pub struct MidpointRng;

impl RngCore for MidpointRng {
    fn next_u32(&mut self) -> u32 {
        1 << 31
    }

    fn next_u64(&mut self) -> u64 {
        1 << 63
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0x80);
    }
}
