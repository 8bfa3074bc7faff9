// Copyright 2017 Adam Greig
// Licensed under the MIT license, see LICENSE for details.

//! The bit-flipping (BF) decoder: an iterative hard-decision decoder based
//! on the original Gallager algorithm.
//!
//! BF is a heuristic -- a `false` return means its fixed iteration schedule
//! didn't converge, not that the input was undecodable. It is, however,
//! cheap and allocation-free, which is why it is the decoder of choice on
//! constrained platforms; [`crate::mp`] trades that for closer-to-optimal
//! decoding using soft information.

use crate::bits::{get_bit, set_bit};
use crate::code::LdpcCode;
use crate::erasure::decode_erasures;
use crate::error::{require, Result};

const MAX_ITERS: usize = 20;

/// Decodes `hard` (the received `n/8`-byte hard-decision bitstream) into
/// `output` (the full `code.output_len()`-byte codeword, including
/// reconstructed punctured parity). `scratch` is `n+p` bytes of
/// caller-owned working area, reused first by the erasure pre-decoder (for
/// punctured codes) and then as this decoder's per-variable violation
/// counters.
///
/// Returns `(converged, iterations)`. On success the first `k/8` bytes of
/// `output` are the recovered information bits. On failure `output` still
/// holds the last candidate, which typically contains most corrections.
pub fn decode_bf(
    code: LdpcCode,
    ci: &[u16],
    cs: &[u16],
    vi: &[u16],
    vs: &[u16],
    hard: &[u8],
    output: &mut [u8],
    scratch: &mut [u8],
) -> Result<(bool, usize)> {
    let params = code.params();
    require("hard", hard.len(), params.n / 8)?;
    require("output", output.len(), code.output_len())?;
    require("scratch", scratch.len(), params.n + params.p)?;

    if matches!(code, LdpcCode::None) {
        return Ok((false, 0));
    }

    let n = params.n;
    let total = n + params.p;
    let num_checks = code.num_checks();

    output[..n / 8].copy_from_slice(&hard[..n / 8]);

    if params.p > 0 {
        decode_erasures(code, ci, cs, vi, vs, output, scratch)?;
    }

    for iter in 0..MAX_ITERS {
        for v in scratch[..total].iter_mut() {
            *v = 0;
        }

        for i in 0..num_checks {
            let neighbours = &ci[cs[i] as usize..cs[i + 1] as usize];
            let mut parity = 0u8;
            for &a in neighbours {
                parity ^= get_bit(output, a as usize) as u8;
            }
            if parity & 1 == 1 {
                for &a in neighbours {
                    let a = a as usize;
                    scratch[a] = scratch[a].saturating_add(1);
                }
            }
        }

        let max_violations = scratch[..total].iter().copied().max().unwrap_or(0);
        if max_violations == 0 {
            #[cfg(feature = "logging")]
            log::trace!("bf decode converged for {code:?} after {iter} iterations");
            return Ok((true, iter));
        }

        // Flip every bit at the maximum violation count simultaneously.
        // This is the original Gallager tie-breaking rule and what the
        // fixture-level test vectors assume; flipping a single
        // deterministically-chosen bit instead would converge differently.
        for a in 0..total {
            if scratch[a] == max_violations {
                let cur = get_bit(output, a);
                set_bit(output, a, !cur);
            }
        }
    }

    #[cfg(feature = "logging")]
    log::trace!("bf decode failed to converge for {code:?} after {MAX_ITERS} iterations");
    Ok((false, MAX_ITERS))
}
