// Copyright 2017 Adam Greig
// Licensed under the MIT license, see LICENSE for details.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]

//! `ccsds-ldpc` implements the core of an LDPC encoder/decoder for the CCSDS
//! telecommand (231.1-O-1) and telemetry (131.0-B-2) standards: six fixed
//! codes, a sparse Tanner-graph builder, and three decoders of increasing
//! sophistication.
//!
//! It is designed to run with no dynamic allocation and no dependency on
//! `std`: every method that needs working memory takes it as a
//! caller-supplied slice, sized per the `LdpcCode` method of the same name
//! (`output_len`, `sparse_ci_len`, and so on). This makes the crate usable
//! both on a workstation and on a memory-constrained embedded target, at the
//! cost of a less ergonomic calling convention than an allocating API would
//! give you.
//!
//! ## Example
//!
//! ```
//! use ccsds_ldpc::{graph, bf, encoder, LdpcCode};
//!
//! let code = LdpcCode::Tc128;
//!
//! // Build the graph once; it's reusable across every decode for this code.
//! let mut ci = vec![0u16; code.sparse_ci_len()];
//! let mut cs = vec![0u16; code.sparse_cs_len()];
//! let mut vi = vec![0u16; code.sparse_vi_len()];
//! let mut vs = vec![0u16; code.sparse_vs_len()];
//! graph::build(code, &mut ci, &mut cs, &mut vi, &mut vs).unwrap();
//!
//! // Encode some data (encoding itself is out of this crate's scope; this
//! // reference encoder exists only to produce test codewords).
//! let info: Vec<u8> = (0..code.params().k / 8).map(|i| i as u8).collect();
//! let mut tx = vec![0u8; code.output_len()];
//! encoder::encode(code, &ci, &cs, &info, &mut tx).unwrap();
//!
//! // Corrupt a bit and recover it with the bit-flipping decoder.
//! let mut rx = tx.clone();
//! rx[0] ^= 0x80;
//! let mut rxdata = vec![0u8; code.output_len()];
//! let mut scratch = vec![0u8; code.params().n + code.params().p];
//! let n8 = code.params().n / 8;
//! let (ok, _iters) = bf::decode_bf(code, &ci, &cs, &vi, &vs, &rx[..n8], &mut rxdata, &mut scratch).unwrap();
//! assert!(ok);
//! assert_eq!(&rxdata[..info.len()], &info[..]);
//! ```
//!
//! ## Codes
//!
//! Two code families are available, matching the two CCSDS documents this
//! crate targets:
//!
//! * The telecommand (TC) codes, rate 1/2, unpunctured: `Tc128` (n=128,
//!   k=64), `Tc256` (n=256, k=128), `Tc512` (n=512, k=256). These are short
//!   and cheap to decode, suitable for constrained uplinks.
//! * The telemetry (TM) codes, all k=1024, punctured to give three
//!   effective rates: `Tm1280` (128 punctured bits), `Tm1536` (256
//!   punctured), `Tm2048` (512 punctured). Puncturing means some parity
//!   bits are never transmitted; the receiver must reconstruct them as
//!   erasures before a hard-decision decoder can use them at all (see
//!   `erasure`), or let the soft-decision decoder handle them natively
//!   (their LLR is implicitly zero).
//!
//! `LdpcCode::None` is the sentinel seventh value: every operation treats it
//! as a no-op, returning zeroed parameters or `(false, 0)` as appropriate,
//! rather than panicking.
//!
//! ## Decoders
//!
//! * [`bf::decode_bf`], the bit-flipping decoder: hard-decision, the
//!   cheapest in both memory and runtime, roughly 1-2dB from optimal. For
//!   punctured codes it first runs [`erasure::decode_erasures`] to resolve
//!   as many punctured bits as it can by majority vote, since bit-flipping
//!   has no notion of "unknown".
//! * [`mp::decode_mp`], the message-passing decoder: soft-decision min-sum
//!   with self-correction, much closer to optimal belief propagation at the
//!   cost of needing one `f32` of working state per bit of input and two
//!   `f32`s per graph edge.
//!
//! Both report `(converged, iterations)`; a `false` first element means the
//! fixed iteration budget was exhausted, not that the input was provably
//! undecodable -- the last candidate is still written to the output buffer
//! and often has most of its errors corrected.
//!
//! ## Memory
//!
//! Every buffer size below is available both at compile time, from
//! [`code::CodeParams`], and at runtime via `LdpcCode` methods, so callers
//! can allocate statically or dynamically as their platform allows.
//!
//! | Buffer            | Size                     | Used by              |
//! |--------------------|--------------------------|-----------------------|
//! | `ci`, `vi`         | `s` x `u16`              | graph, every decoder  |
//! | `cs`               | `(n-k+p+1)` x `u16`      | graph, every decoder  |
//! | `vs`               | `(n+p+1)` x `u16`        | graph, erasure + mp   |
//! | BF scratch         | `n+p` bytes              | `bf::decode_bf`       |
//! | MP `u`, `v`        | `s` x `f32` each         | `mp::decode_mp`       |
//! | LLRs               | `n` x `f32`              | `mp::decode_mp`       |
//! | Output codeword    | `(n+p)/8` bytes          | every decoder         |

pub mod bf;
mod bits;
pub mod code;
pub mod encoder;
pub mod erasure;
pub mod error;
pub mod graph;
pub mod llr;
pub mod mp;

pub use code::{CodeParams, LdpcCode};
pub use error::{LdpcError, Result};
