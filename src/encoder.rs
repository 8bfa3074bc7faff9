// Copyright 2017 Adam Greig
// Licensed under the MIT license, see LICENSE for details.

//! Systematic encoding.
//!
//! Encoding is explicitly out of scope for this crate's core (see the
//! crate-level Non-goals): the decoding subsystems are the focus, and a
//! real deployment's encoder is free to use whatever generator-matrix
//! representation it likes as long as it produces systematic codewords in
//! the packed layout the decoders expect. This module exists only so the
//! test suite can produce valid codewords to corrupt and recover, without
//! needing a second, independent implementation of the parity-check
//! structure.
//!
//! Because the parity section of every supported code's compact
//! representation is a bidiagonal accumulator (see
//! [`crate::code::compact`]), encoding reduces to one forward-substitution
//! sweep over the parity-check rows: row `i`'s equation has exactly one
//! unknown (the parity bit it's the diagonal for), so it can be solved
//! immediately from the information bits and the previously solved parity
//! bit.

use crate::bits::get_bit;
use crate::bits::set_bit;
use crate::code::LdpcCode;
use crate::error::{require, Result};

/// Encodes `info` (`code.k()/8` bytes) into `output` (`code.output_len()`
/// bytes), including the codeword's punctured parity bits. `ci`/`cs` must
/// already be built for `code` (see [`crate::graph::build`]).
pub fn encode(code: LdpcCode, ci: &[u16], cs: &[u16], info: &[u8], output: &mut [u8]) -> Result<()> {
    let params = code.params();
    require("info", info.len(), params.k / 8)?;
    require("output", output.len(), code.output_len())?;

    if matches!(code, LdpcCode::None) {
        return Ok(());
    }

    output[..params.k / 8].copy_from_slice(&info[..params.k / 8]);
    for byte in output[params.k / 8..].iter_mut() {
        *byte = 0;
    }

    for i in 0..code.num_checks() {
        let neighbours = &ci[cs[i] as usize..cs[i + 1] as usize];
        let diagonal = params.k + i;
        let mut parity = false;
        for &a in neighbours {
            let a = a as usize;
            if a == diagonal {
                continue;
            }
            parity ^= get_bit(output, a);
        }
        set_bit(output, diagonal, parity);
    }

    Ok(())
}
