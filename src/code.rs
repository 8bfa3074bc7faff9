// Copyright 2017 Adam Greig
// Licensed under the MIT license, see LICENSE for details.

//! The code registry: the closed set of supported CCSDS LDPC codes and
//! their parameters.
//!
//! Nothing in this module allocates or performs I/O; `CodeParams` are plain
//! `const` data and `compact_parity_check` is a pure function of the code
//! identifier. See the crate-level docs for the bit ordering and sign
//! conventions shared by every other module.

pub(crate) mod compact;

/// One of the seven closed-set code identifiers: the sentinel `None`, the
/// three unpunctured rate-1/2 telecommand (TC) codes, and the three
/// punctured telemetry (TM) codes.
///
/// This is a closed enumeration by design (see the crate's Non-goals): there
/// is no way to construct a code outside this set, and every operation
/// dispatches on it with a single match rather than any dynamic lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LdpcCode {
    /// Sentinel value. Every operation treats this as a no-op: decoders
    /// return `(false, 0)` without touching their output buffers, and
    /// `params()` returns all-zero.
    None,
    /// CCSDS 231.1-O-1 telecommand code, n=128, k=64, rate 1/2.
    Tc128,
    /// CCSDS 231.1-O-1 telecommand code, n=256, k=128, rate 1/2.
    Tc256,
    /// CCSDS 231.1-O-1 telecommand code, n=512, k=256, rate 1/2.
    Tc512,
    /// CCSDS 131.0-B-2 telemetry code, n=1280, k=1024, 128 punctured bits.
    Tm1280,
    /// CCSDS 131.0-B-2 telemetry code, n=1536, k=1024, 256 punctured bits.
    Tm1536,
    /// CCSDS 131.0-B-2 telemetry code, n=2048, k=1024, 512 punctured bits.
    Tm2048,
}

/// The immutable parameter tuple associated with one code.
///
/// Invariants (checked by this module's tests rather than at runtime, since
/// they hold for every value of the closed `LdpcCode` enum): `k <= n`, each
/// of `n`, `k`, `p` is a multiple of 8, and `s` equals the number of 1-bits
/// in the expanded `(n-k+p) x (n+p)` parity-check matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodeParams {
    /// Codeword length in bits: the number of bits physically transmitted.
    pub n: usize,
    /// Information length in bits.
    pub k: usize,
    /// Punctured parity bits: produced by the encoder, never transmitted,
    /// reconstructed by the decoder from the erasure channel.
    pub p: usize,
    /// Protograph sub-matrix order (number of circulant block rows in the
    /// parity section). Exposed alongside `b` for parity with the source
    /// standard's parameter naming; see DESIGN.md for how the two relate in
    /// this implementation.
    pub m: usize,
    /// Circulant permutation block size, in bits.
    pub b: usize,
    /// Total number of edges in the Tanner graph (1-bits of the expanded
    /// parity-check matrix).
    pub s: usize,
}

impl LdpcCode {
    /// Returns this code's parameter tuple. Total function: the sentinel
    /// code returns all-zero rather than panicking.
    pub const fn params(self) -> CodeParams {
        match self {
            LdpcCode::None => CodeParams { n: 0, k: 0, p: 0, m: 0, b: 0, s: 0 },
            LdpcCode::Tc128 => CodeParams { n: 128, k: 64, p: 0, m: 4, b: 16, s: 304 },
            LdpcCode::Tc256 => CodeParams { n: 256, k: 128, p: 0, m: 4, b: 32, s: 608 },
            LdpcCode::Tc512 => CodeParams { n: 512, k: 256, p: 0, m: 4, b: 64, s: 1216 },
            LdpcCode::Tm1280 => CodeParams { n: 1280, k: 1024, p: 128, m: 3, b: 128, s: 3712 },
            LdpcCode::Tm1536 => CodeParams { n: 1536, k: 1024, p: 256, m: 3, b: 256, s: 4352 },
            LdpcCode::Tm2048 => CodeParams { n: 2048, k: 1024, p: 512, m: 3, b: 512, s: 5632 },
        }
    }

    /// Number of check-node rows of the (logical, n-k+p by n+p) parity-check
    /// matrix, i.e. the number of parity equations including punctured ones.
    pub const fn num_checks(self) -> usize {
        let p = self.params();
        p.n - p.k + p.p
    }

    /// Number of variable-node columns of the logical parity-check matrix,
    /// i.e. the codeword length including punctured parity bits.
    pub const fn num_vars(self) -> usize {
        let p = self.params();
        p.n + p.p
    }

    /// Length in bytes of the fully assembled output codeword, `(n+p)/8`.
    pub const fn output_len(self) -> usize {
        self.num_vars() / 8
    }

    /// Required length of the `ci` sparse graph array (edges, check-major).
    pub const fn sparse_ci_len(self) -> usize {
        self.params().s
    }

    /// Required length of the `cs` sparse graph prefix-offset array.
    pub const fn sparse_cs_len(self) -> usize {
        self.num_checks() + 1
    }

    /// Required length of the `vi` sparse graph array (edges, variable-major).
    pub const fn sparse_vi_len(self) -> usize {
        self.params().s
    }

    /// Required length of the `vs` sparse graph prefix-offset array.
    pub const fn sparse_vs_len(self) -> usize {
        self.num_vars() + 1
    }

    /// Returns this code's compact parity-check view, as consumed by the
    /// sparse graph builder. See [`compact::CompactParityCheck`].
    pub(crate) fn compact_parity_check(self) -> compact::CompactParityCheck {
        compact::CompactParityCheck::for_code(self)
    }
}
