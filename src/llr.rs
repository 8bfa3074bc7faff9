// Copyright 2017 Adam Greig
// Licensed under the MIT license, see LICENSE for details.

//! Hard/soft conversion utilities for callers of the message-passing decoder.
//!
//! Sign convention, load-bearing throughout this crate: a **positive** LLR
//! favours bit 0, a **negative** LLR favours bit 1, and an LLR of exactly
//! zero is neutral. `llrs_to_hard` resolves ties (`llr == 0`) to bit 1.

use crate::bits::{get_bit, set_bit};
use crate::code::LdpcCode;
use crate::error::{require, Result};

const DEFAULT_BER: f32 = 0.05;

/// Converts `n` hard-decision bits into `n` LLRs using a fixed assumed
/// channel bit-error rate of 0.05.
///
/// `hard` must hold at least `code.n()/8` bytes, MSB-first packed; `llrs`
/// must hold at least `code.n()` elements. Equivalent to
/// `hard_to_llrs_ber(code, hard, llrs, 0.05)`.
pub fn hard_to_llrs(code: LdpcCode, hard: &[u8], llrs: &mut [f32]) -> Result<()> {
    hard_to_llrs_ber(code, hard, llrs, DEFAULT_BER)
}

/// As [`hard_to_llrs`], but the LLR magnitude is derived from the given
/// assumed bit-error rate as `|ln(ber)|` instead of the default 0.05.
pub fn hard_to_llrs_ber(code: LdpcCode, hard: &[u8], llrs: &mut [f32], ber: f32) -> Result<()> {
    let n = code.params().n;
    require("hard", hard.len(), n / 8)?;
    require("llrs", llrs.len(), n)?;
    if n == 0 {
        return Ok(());
    }

    let magnitude = -libm_ln(ber);
    for (i, llr) in llrs.iter_mut().take(n).enumerate() {
        *llr = if get_bit(hard, i) { -magnitude } else { magnitude };
    }
    Ok(())
}

/// Converts `n` LLRs back into packed hard-decision bits: bit `i` is 1 iff
/// `llrs[i] <= 0`. Clears `hard` before packing, so that a subsequent call
/// is idempotent and `llrs_to_hard(hard_to_llrs(r)) == r` for any observed
/// hard bits `r`.
pub fn llrs_to_hard(code: LdpcCode, llrs: &[f32], hard: &mut [u8]) -> Result<()> {
    let n = code.params().n;
    require("llrs", llrs.len(), n)?;
    require("hard", hard.len(), n / 8)?;
    if n == 0 {
        return Ok(());
    }

    for byte in hard.iter_mut().take(n / 8) {
        *byte = 0;
    }
    for (i, &llr) in llrs.iter().take(n).enumerate() {
        if llr <= 0.0 {
            set_bit(hard, i, true);
        }
    }
    Ok(())
}

/// `f32::ln` via `libm`-free Newton iteration would be overkill here: `core`
/// exposes no transcendental functions, so this crate takes the one
/// dependency-free route available, a small fixed-iteration natural log
/// good to single-precision accuracy over the `(0, 1)` domain callers use it
/// for (assumed bit-error rates).
fn libm_ln(x: f32) -> f32 {
    // Range-reduce x = m * 2^e with m in [0.5, 1) via the IEEE-754 bit
    // layout, then use the identity ln(x) = ln(m) + e*ln(2) with a
    // Pade-style rational approximation of ln(m) accurate to within a few
    // ULPs over that reduced range.
    debug_assert!(x > 0.0);
    let bits = x.to_bits();
    let exponent = ((bits >> 23) & 0xff) as i32 - 126;
    let mantissa_bits = (bits & 0x007f_ffff) | 0x3f00_0000;
    let m = f32::from_bits(mantissa_bits);

    // ln(m) for m in [0.5, 1) via ln(m) = 2*atanh((m-1)/(m+1)) series.
    let z = (m - 1.0) / (m + 1.0);
    let z2 = z * z;
    let ln_m = 2.0 * z * (1.0 + z2 * (1.0 / 3.0 + z2 * (1.0 / 5.0 + z2 * (1.0 / 7.0))));

    const LN2: f32 = core::f32::consts::LN_2;
    ln_m + exponent as f32 * LN2
}
