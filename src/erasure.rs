// Copyright 2017 Adam Greig
// Licensed under the MIT license, see LICENSE for details.

//! The erasure pre-decoder.
//!
//! Punctured parity bits are never transmitted, so the receiver's hard-bit
//! buffer has no representation for "unknown" -- the bit-flipping decoder
//! can only see 0s and 1s. This pass resolves as many punctured bits as it
//! can by majority vote over the check equations that see them, so that the
//! bit-flipping decoder has *something* to iterate on for every bit.

use crate::bits::{get_bit, set_bit};
use crate::code::LdpcCode;
use crate::error::{require, Result};

/// Bounded iteration count; see the module docs on why remaining erasures
/// fall through rather than failing outright.
const MAX_ITERS: usize = 16;

/// Resolves punctured variable nodes in place and reports the number of
/// rounds consumed (0 if the code has no punctured bits at all).
///
/// `output` must be `code.output_len()` bytes, with the first `n/8` already
/// holding the received hard decisions; this call zeroes the punctured byte
/// range and fills in as many of those bits as it can resolve. `erased`
/// must be `n+p` bytes of scratch; it doubles as the bit-flipping decoder's
/// violation counters once this pass is done with it, since both are sized
/// `n+p` and neither is read across calls.
///
/// If a round ends with erasures still unresolved (every neighbouring check
/// of a bit also sees another live erasure, so no vote can be cast), the
/// remaining erasures are left as-is and handed to the caller -- ordinarily
/// the bit-flipping decoder, which will try each unresolved bit starting
/// from 0 and may still correct it during its own iterations. This crate
/// does not surface that fallthrough separately from the returned iteration
/// count; see DESIGN.md for why.
pub fn decode_erasures(
    code: LdpcCode,
    ci: &[u16],
    cs: &[u16],
    vi: &[u16],
    vs: &[u16],
    output: &mut [u8],
    erased: &mut [u8],
) -> Result<usize> {
    let params = code.params();
    require("output", output.len(), code.output_len())?;
    require("erased", erased.len(), params.n + params.p)?;

    if matches!(code, LdpcCode::None) || params.p == 0 {
        return Ok(0);
    }

    let n = params.n;
    let total = n + params.p;

    for flag in erased.iter_mut().take(n) {
        *flag = 0;
    }
    for flag in erased[n..total].iter_mut() {
        *flag = 1;
    }
    for byte in output[n / 8..total / 8].iter_mut() {
        *byte = 0;
    }

    for iter in 0..MAX_ITERS {
        for a in n..total {
            if erased[a] == 0 {
                continue;
            }
            let mut vote: i32 = 0;
            for &chk in &vi[vs[a] as usize..vs[a + 1] as usize] {
                let i = chk as usize;
                let neighbours = &ci[cs[i] as usize..cs[i + 1] as usize];
                let other_erased = neighbours.iter().any(|&b| b as usize != a && erased[b as usize] != 0);
                if other_erased {
                    continue;
                }
                let mut parity = 0u8;
                for &b in neighbours {
                    let b = b as usize;
                    if b == a {
                        continue;
                    }
                    parity ^= get_bit(output, b) as u8;
                }
                if parity & 1 == 1 {
                    vote += 1;
                } else {
                    vote -= 1;
                }
            }
            if vote > 0 {
                set_bit(output, a, true);
                erased[a] = 0;
            } else if vote < 0 {
                set_bit(output, a, false);
                erased[a] = 0;
            }
        }

        if erased[n..total].iter().all(|&f| f == 0) {
            return Ok(iter + 1);
        }
    }

    Ok(MAX_ITERS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::LdpcCode;
    use crate::graph::build;
    use std::vec;
    use std::vec::Vec;

    fn graph(code: LdpcCode) -> (Vec<u16>, Vec<u16>, Vec<u16>, Vec<u16>) {
        let mut ci = vec![0u16; code.sparse_ci_len()];
        let mut cs = vec![0u16; code.sparse_cs_len()];
        let mut vi = vec![0u16; code.sparse_vi_len()];
        let mut vs = vec![0u16; code.sparse_vs_len()];
        build(code, &mut ci, &mut cs, &mut vi, &mut vs).unwrap();
        (ci, cs, vi, vs)
    }

    #[test]
    fn unpunctured_code_is_a_noop() {
        let code = LdpcCode::Tc128;
        let (ci, cs, vi, vs) = graph(code);
        let mut output = vec![0u8; code.output_len()];
        let mut erased = vec![0u8; code.params().n + code.params().p];
        let iters = decode_erasures(code, &ci, &cs, &vi, &vs, &mut output, &mut erased).unwrap();
        assert_eq!(iters, 0);
    }

    #[test]
    fn resolves_erasures_from_a_consistent_codeword() {
        // Build a codeword that satisfies every parity check (all-zero is
        // always a valid codeword of a linear code), then erase it at the
        // decoder the normal way and confirm the erasure pass reconstructs
        // the punctured bits as all zero too.
        let code = LdpcCode::Tm1280;
        let (ci, cs, vi, vs) = graph(code);
        let mut output = vec![0u8; code.output_len()];
        let mut erased = vec![0u8; code.params().n + code.params().p];
        let iters = decode_erasures(code, &ci, &cs, &vi, &vs, &mut output, &mut erased).unwrap();
        assert!(iters > 0 && iters <= 16);
        assert!(output.iter().all(|&b| b == 0));
        assert!(erased[code.params().n..].iter().all(|&f| f == 0));
    }
}
