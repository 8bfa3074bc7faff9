// Copyright 2017 Adam Greig
// Licensed under the MIT license, see LICENSE for details.

//! The sparse graph builder: expands a code's compact parity-check
//! representation into the doubly-indexed Tanner graph consumed by every
//! decoder.
//!
//! `build` is a pure function of the code identifier -- calling it twice
//! with freshly zeroed buffers produces identical output, and the graph it
//! produces is reusable across arbitrarily many decode calls for that code.
//! Callers typically build a code's graph once at startup and hold onto it
//! for the process lifetime.

use crate::code::LdpcCode;
use crate::error::{require, Result};

/// Fills `ci`/`cs`/`vi`/`vs` with the Tanner graph for `code`.
///
/// `ci`/`cs` index edges by check node; `vi`/`vs` index the same edges by
/// variable node. Required lengths are `code.sparse_*_len()`; passing larger
/// buffers is fine; the builder only ever writes the first required
/// elements of each.
///
/// Edges within a single check's slice are ordered by ascending variable
/// index, and edges within a single variable's slice by ascending check
/// index -- this holds by construction here, not by an explicit sort, since
/// the protograph's block columns (or rows) are visited in ascending order
/// and each one contributes a contiguous, disjoint range of variable (or
/// check) indices.
///
/// The sentinel [`LdpcCode::None`] is a no-op: its required lengths are all
/// zero, so there is nothing to write.
pub fn build(code: LdpcCode, ci: &mut [u16], cs: &mut [u16], vi: &mut [u16], vs: &mut [u16]) -> Result<()> {
    require("ci", ci.len(), code.sparse_ci_len())?;
    require("cs", cs.len(), code.sparse_cs_len())?;
    require("vi", vi.len(), code.sparse_vi_len())?;
    require("vs", vs.len(), code.sparse_vs_len())?;

    if matches!(code, LdpcCode::None) {
        return Ok(());
    }

    let compact = code.compact_parity_check();
    let b = compact.b;
    let rows = compact.rows;
    let total_cols = compact.total_cols();

    build_checks(&compact, b, rows, total_cols, ci, cs);
    build_vars(&compact, b, rows, total_cols, vi, vs);

    Ok(())
}

fn build_checks(
    compact: &crate::code::compact::CompactParityCheck,
    b: u32,
    rows: u32,
    total_cols: u32,
    ci: &mut [u16],
    cs: &mut [u16],
) {
    let mut pos = 0u32;
    cs[0] = 0;
    for br in 0..rows {
        for r in 0..b {
            for bc in 0..total_cols {
                if let Some(shift) = compact.shift(br, bc) {
                    let var = bc * b + ((r + shift) % b);
                    ci[pos as usize] = var as u16;
                    pos += 1;
                }
            }
            let check_index = br * b + r;
            cs[(check_index + 1) as usize] = pos as u16;
        }
    }
}

fn build_vars(
    compact: &crate::code::compact::CompactParityCheck,
    b: u32,
    rows: u32,
    total_cols: u32,
    vi: &mut [u16],
    vs: &mut [u16],
) {
    let mut pos = 0u32;
    vs[0] = 0;
    for bc in 0..total_cols {
        for c in 0..b {
            for br in 0..rows {
                if let Some(shift) = compact.shift(br, bc) {
                    let check = br * b + ((c + b - shift % b) % b);
                    vi[pos as usize] = check as u16;
                    pos += 1;
                }
            }
            let var_index = bc * b + c;
            vs[(var_index + 1) as usize] = pos as u16;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::LdpcCode;
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

    fn built(code: LdpcCode) -> (Vec<u16>, Vec<u16>, Vec<u16>, Vec<u16>) {
        let mut ci = vec![0u16; code.sparse_ci_len()];
        let mut cs = vec![0u16; code.sparse_cs_len()];
        let mut vi = vec![0u16; code.sparse_vi_len()];
        let mut vs = vec![0u16; code.sparse_vs_len()];
        build(code, &mut ci, &mut cs, &mut vi, &mut vs).unwrap();
        (ci, cs, vi, vs)
    }

    #[test]
    fn sentinel_is_noop() {
        build(LdpcCode::None, &mut [], &mut [], &mut [], &mut []).unwrap();
    }

    #[test]
    fn rejects_undersized_buffers() {
        let mut ci = vec![0u16; 1];
        let mut cs = vec![0u16; code_cs_len()];
        let mut vi = vec![0u16; LdpcCode::Tc128.sparse_vi_len()];
        let mut vs = vec![0u16; LdpcCode::Tc128.sparse_vs_len()];
        assert!(build(LdpcCode::Tc128, &mut ci, &mut cs, &mut vi, &mut vs).is_err());
    }

    fn code_cs_len() -> usize {
        LdpcCode::Tc128.sparse_cs_len()
    }

    #[test]
    fn prefixes_are_monotone_and_terminate_at_s() {
        for code in ALL {
            let (_, cs, _, vs) = built(code);
            assert_eq!(cs[0], 0);
            assert_eq!(*cs.last().unwrap() as usize, code.params().s, "{code:?}");
            assert!(cs.windows(2).all(|w| w[0] <= w[1]), "{code:?} cs monotone");

            assert_eq!(vs[0], 0);
            assert_eq!(*vs.last().unwrap() as usize, code.params().s, "{code:?}");
            assert!(vs.windows(2).all(|w| w[0] <= w[1]), "{code:?} vs monotone");
        }
    }

    #[test]
    fn ci_cs_and_vi_vs_encode_the_same_graph() {
        for code in ALL {
            let (ci, cs, vi, vs) = built(code);
            let num_checks = code.num_checks();
            let num_vars = code.num_vars();

            for i in 0..num_checks {
                for &a in &ci[cs[i] as usize..cs[i + 1] as usize] {
                    let a = a as usize;
                    let found = vi[vs[a] as usize..vs[a + 1] as usize].iter().any(|&x| x as usize == i);
                    assert!(found, "{code:?}: edge ({i},{a}) in ci missing from vi");
                }
            }
            for a in 0..num_vars {
                for &i in &vi[vs[a] as usize..vs[a + 1] as usize] {
                    let i = i as usize;
                    let found = ci[cs[i] as usize..cs[i + 1] as usize].iter().any(|&x| x as usize == a);
                    assert!(found, "{code:?}: edge ({i},{a}) in vi missing from ci");
                }
            }
        }
    }

    #[test]
    fn edges_within_a_slice_are_ascending() {
        for code in ALL {
            let (ci, cs, vi, vs) = built(code);
            for i in 0..code.num_checks() {
                let slice = &ci[cs[i] as usize..cs[i + 1] as usize];
                assert!(slice.windows(2).all(|w| w[0] < w[1]), "{code:?} check {i}");
            }
            for a in 0..code.num_vars() {
                let slice = &vi[vs[a] as usize..vs[a + 1] as usize];
                assert!(slice.windows(2).all(|w| w[0] < w[1]), "{code:?} var {a}");
            }
        }
    }

    #[test]
    fn idempotent_across_calls() {
        for code in ALL {
            let first = built(code);
            let second = built(code);
            assert_eq!(first, second, "{code:?}");
        }
    }
}
