// Copyright 2017 Adam Greig
// Licensed under the MIT license, see LICENSE for details.

//! The message-passing (MP) decoder: a min-sum decoder with self-correction
//! over the sparse Tanner graph.
//!
//! This is the performance-critical centrepiece of the crate. Every
//! operation here runs in place over caller-supplied `u`/`v` message
//! buffers; nothing is allocated per iteration, and nothing allocated at
//! all. The algorithm is the min-sum approximation to belief propagation
//! (product-of-signs times minimum magnitude in place of the exact
//! `tanh`-based check update) plus Savin's self-correction rule, which zeros
//! any variable-to-check message whose sign flips from one iteration to the
//! next to damp oscillation on short trapping sets.

use crate::bits::{get_bit, set_bit};
use crate::code::LdpcCode;
use crate::error::{require, Result};

const MAX_ITERS: usize = 20;

#[inline]
fn sign(x: f32) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Position within `ci[cs[check]..cs[check+1])` holding `var`, i.e. the
/// index into `u` of the message check `check` sends to variable `var`.
///
/// A linear scan, since per-check degree is small; precomputing an inverse
/// permutation would trade this for `2*s` extra memory, a pure performance
/// tradeoff this crate doesn't take (see the code compact module's docs).
#[inline]
fn twin_in_check(ci: &[u16], cs: &[u16], check: usize, var: u16) -> usize {
    let start = cs[check] as usize;
    let end = cs[check + 1] as usize;
    start + ci[start..end].iter().position(|&x| x == var).expect("graph invariant violated: missing twin edge")
}

/// Position within `vi[vs[var]..vs[var+1])` holding `check`, i.e. the index
/// into `v` of the message variable `var` sends to check `check`.
#[inline]
fn twin_in_var(vi: &[u16], vs: &[u16], var: usize, check: u16) -> usize {
    let start = vs[var] as usize;
    let end = vs[var + 1] as usize;
    start + vi[start..end].iter().position(|&x| x == check).expect("graph invariant violated: missing twin edge")
}

/// Runs the variable-to-check update (P1) and the check-to-variable update
/// plus global parity test (P2) once, writing the iteration's hard
/// decisions into `output` and returning whether every parity check is now
/// satisfied.
///
/// Exposed at crate level (not just folded into `decode_mp`'s loop) so that
/// the self-correction invariant -- any `v[e]` whose sign flips between
/// consecutive calls must land on exactly zero -- can be exercised directly
/// across two calls in tests.
pub(crate) fn mp_iteration(
    code: LdpcCode,
    ci: &[u16],
    cs: &[u16],
    vi: &[u16],
    vs: &[u16],
    llrs: &[f32],
    output: &mut [u8],
    u: &mut [f32],
    v: &mut [f32],
) -> bool {
    let params = code.params();
    let n = params.n;
    let total = n + params.p;
    let num_checks = code.num_checks();

    for byte in output[..total / 8].iter_mut() {
        *byte = 0;
    }

    // P1: variable-to-check update and hard-decision marginals.
    for a in 0..total {
        let l_a = if a < n { llrs[a] } else { 0.0 };
        let start = vs[a] as usize;
        let end = vs[a + 1] as usize;

        let mut llr_a = l_a;
        for e_i in start..end {
            let i = vi[e_i] as usize;
            let twin = twin_in_check(ci, cs, i, a as u16);
            llr_a += u[twin];
        }

        for e_i in start..end {
            let i = vi[e_i] as usize;
            let twin = twin_in_check(ci, cs, i, a as u16);
            let prev = v[e_i];
            let mut new_v = llr_a - u[twin];
            if prev != 0.0 && sign(new_v) != sign(prev) {
                new_v = 0.0;
            }
            v[e_i] = new_v;
        }

        if llr_a <= 0.0 {
            set_bit(output, a, true);
        }
    }

    // P2: check-to-variable update and global parity test.
    let mut all_satisfied = true;
    for i in 0..num_checks {
        let start = cs[i] as usize;
        let end = cs[i + 1] as usize;
        let mut parity = 0u8;

        for e_a in start..end {
            let a = ci[e_a] as usize;
            let mut sgn = 1i32;
            let mut min_mag = f32::INFINITY;
            for e_b in start..end {
                if e_b == e_a {
                    continue;
                }
                let b = ci[e_b] as usize;
                let twin = twin_in_var(vi, vs, b, i as u16);
                let val = v[twin];
                sgn *= sign(val);
                let mag = val.abs();
                if mag < min_mag {
                    min_mag = mag;
                }
            }
            u[e_a] = if min_mag.is_finite() { sgn as f32 * min_mag } else { 0.0 };
            parity ^= get_bit(output, a) as u8;
        }

        if parity & 1 == 1 {
            all_satisfied = false;
        }
    }

    all_satisfied
}

/// Decodes soft `llrs` (`code.n()` single-precision LLRs, positive favouring
/// bit 0) into `output` (`code.output_len()` bytes). `u` and `v` are each
/// `s`-float caller-owned working areas; both are zeroed at the start of the
/// call and meaningful only for its duration.
///
/// Returns `(converged, iterations)`. Iteration counts are 1-based here (a
/// zero-error input converges on the first pass, reported as iteration 1)
/// to distinguish "decoded on the first pass" from the BF decoder's 0-based
/// "no flips needed" -- both mean the same thing, checked immediately
/// without having done any corrective work.
pub fn decode_mp(
    code: LdpcCode,
    ci: &[u16],
    cs: &[u16],
    vi: &[u16],
    vs: &[u16],
    llrs: &[f32],
    output: &mut [u8],
    u: &mut [f32],
    v: &mut [f32],
) -> Result<(bool, usize)> {
    let params = code.params();
    require("llrs", llrs.len(), params.n)?;
    require("output", output.len(), code.output_len())?;
    require("u", u.len(), params.s)?;
    require("v", v.len(), params.s)?;

    if matches!(code, LdpcCode::None) {
        return Ok((false, 0));
    }

    for m in u[..params.s].iter_mut() {
        *m = 0.0;
    }
    for m in v[..params.s].iter_mut() {
        *m = 0.0;
    }

    for iter in 0..MAX_ITERS {
        let satisfied = mp_iteration(code, ci, cs, vi, vs, llrs, output, u, v);
        if satisfied {
            #[cfg(feature = "logging")]
            log::trace!("mp decode converged for {code:?} after {} iterations", iter + 1);
            return Ok((true, iter + 1));
        }
    }

    #[cfg(feature = "logging")]
    log::trace!("mp decode failed to converge for {code:?} after {MAX_ITERS} iterations");
    Ok((false, MAX_ITERS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::LdpcCode;
    use crate::graph::build;
    use crate::llr::hard_to_llrs;
    use std::vec;
    use std::vec::Vec;

    const ALL: [LdpcCode; 6] = [
        LdpcCode::Tc128,
        LdpcCode::Tc256,
        LdpcCode::Tc512,
        LdpcCode::Tm1280,
        LdpcCode::Tm1536,
        LdpcCode::Tm2048,
    ];

    fn graph(code: LdpcCode) -> (Vec<u16>, Vec<u16>, Vec<u16>, Vec<u16>) {
        let mut ci = vec![0u16; code.sparse_ci_len()];
        let mut cs = vec![0u16; code.sparse_cs_len()];
        let mut vi = vec![0u16; code.sparse_vi_len()];
        let mut vs = vec![0u16; code.sparse_vs_len()];
        build(code, &mut ci, &mut cs, &mut vi, &mut vs).unwrap();
        (ci, cs, vi, vs)
    }

    #[test]
    fn zero_error_converges_on_first_pass() {
        for code in ALL {
            let (ci, cs, vi, vs) = graph(code);
            let hard = vec![0u8; code.params().n / 8];
            let mut llrs = vec![0f32; code.params().n];
            hard_to_llrs(code, &hard, &mut llrs).unwrap();

            let mut output = vec![0u8; code.output_len()];
            let mut u = vec![0f32; code.params().s];
            let mut v = vec![0f32; code.params().s];
            let (ok, iters) =
                decode_mp(code, &ci, &cs, &vi, &vs, &llrs, &mut output, &mut u, &mut v).unwrap();
            assert!(ok, "{code:?}");
            assert_eq!(iters, 1, "{code:?}");
            assert!(output.iter().all(|&b| b == 0), "{code:?}");
        }
    }

    #[test]
    fn no_nans_or_infinities_after_iterating() {
        let code = LdpcCode::Tm1280;
        let (ci, cs, vi, vs) = graph(code);
        let hard = vec![0xA5u8; code.params().n / 8];
        let mut llrs = vec![0f32; code.params().n];
        hard_to_llrs(code, &hard, &mut llrs).unwrap();

        let mut output = vec![0u8; code.output_len()];
        let mut u = vec![0f32; code.params().s];
        let mut v = vec![0f32; code.params().s];
        let _ = decode_mp(code, &ci, &cs, &vi, &vs, &llrs, &mut output, &mut u, &mut v).unwrap();

        assert!(u.iter().all(|x| x.is_finite()));
        assert!(v.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn self_correction_zeros_sign_flips() {
        let code = LdpcCode::Tc128;
        let (ci, cs, vi, vs) = graph(code);
        let mut hard = vec![0u8; code.params().n / 8];
        hard[0] ^= 0x80;
        let mut llrs = vec![0f32; code.params().n];
        hard_to_llrs(code, &hard, &mut llrs).unwrap();

        let mut output = vec![0u8; code.output_len()];
        let mut u = vec![0f32; code.params().s];
        let mut v = vec![0f32; code.params().s];

        mp_iteration(code, &ci, &cs, &vi, &vs, &llrs, &mut output, &mut u, &mut v);
        let before = v.clone();
        mp_iteration(code, &ci, &cs, &vi, &vs, &llrs, &mut output, &mut u, &mut v);

        for (prev, now) in before.iter().zip(v.iter()) {
            if *prev != 0.0 && sign(*now) != sign(*prev) {
                assert_eq!(*now, 0.0, "sign flip must land on exactly zero");
            }
        }
    }

    #[test]
    fn sentinel_is_noop() {
        let (ok, iters) = decode_mp(LdpcCode::None, &[], &[], &[], &[], &[], &mut [], &mut [], &mut []).unwrap();
        assert!(!ok);
        assert_eq!(iters, 0);
    }
}
