//! Randomized helpers backed by the platform entropy source.

use crate::error::{Error, Result};

fn next_u64() -> u64 {
    let mut buf = [0u8; 8];
    getrandom::getrandom(&mut buf).expect("OS entropy failed");
    u64::from_le_bytes(buf)
}

/// Returns a uniformly distributed integer in `[0, n)`.
///
/// Backed by the operating system's pseudo-random source: not
/// cryptographically vetted for this use, not seedable, and not reproducible
/// across runs, so tests should assert range properties only. Draws are
/// rejected above the largest multiple of `n` so every residue is equally
/// likely.
///
/// # Errors
///
/// `n == 0` describes the empty range `[0, 0)` and yields
/// [`Error::InvalidInput`].
pub fn random_below(n: u64) -> Result<u64> {
    if n == 0 {
        return Err(Error::invalid_input("random_below: empty range [0, 0)"));
    }
    // Largest multiple of n representable in u64; draws at or above it
    // would bias the low residues.
    let zone = u64::MAX - u64::MAX % n;
    loop {
        let draw = next_u64();
        if draw < zone {
            return Ok(draw % n);
        }
    }
}

/// Builds the integer whose decimal numeral is `digit` written `n + 1` times.
///
/// The repeat count is `n + 1`, not `n`: `repeat_digit(7, 2)` is `777`, and
/// asking for "zero repeats" still yields one occurrence. The numeral is
/// produced textually and parsed back, so leading zeros collapse:
/// `repeat_digit(0, k)` is `0` for every `k`. Both behaviors are
/// contractual.
///
/// # Errors
///
/// [`Error::InvalidInput`] when `digit` is not a decimal digit, or when the
/// numeral does not fit in a `u64`.
pub fn repeat_digit(digit: u8, n: u32) -> Result<u64> {
    if digit > 9 {
        return Err(Error::invalid_input(format!(
            "repeat_digit: {digit} is not a decimal digit"
        )));
    }
    let numeral = digit.to_string().repeat(n as usize + 1);
    numeral.parse::<u64>().map_err(|_| {
        Error::invalid_input(format!("repeat_digit: {numeral} does not fit in a u64"))
    })
}
