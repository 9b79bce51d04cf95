//! Pre-serialized specification data.
//!
//! Each model node carries its specification list twice: as XML elements and
//! as an opaque blob in `SpecificationData`. The blob layout belongs to the
//! consuming database, so encoding sits behind [`SpecificationEncoder`].

use crate::models::Specification;
use bytes::{BufMut, BytesMut};

/// Produces the opaque `SpecificationData` blob for a specification list.
pub trait SpecificationEncoder: Send + Sync {
    fn encode(&self, specifications: &[Specification]) -> Vec<u8>;
}

/// Version-2 little-endian record layout.
///
/// ```text
/// u8   version (2)
/// u32  count
/// per specification:
///   [u8; 16] type key, mixed-endian GUID byte order
///   f64      min
///   f64      max
///   f64      best
///   i32      axle
///   u8       adjustable flag
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySpecificationEncoder;

impl BinarySpecificationEncoder {
    pub const VERSION: u8 = 2;
    /// Encoded size of one specification.
    pub const RECORD_LEN: usize = 16 + 8 * 3 + 4 + 1;
}

impl SpecificationEncoder for BinarySpecificationEncoder {
    fn encode(&self, specifications: &[Specification]) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(5 + specifications.len() * Self::RECORD_LEN);
        buf.put_u8(Self::VERSION);
        buf.put_u32_le(specifications.len() as u32);
        for spec in specifications {
            buf.put_slice(&spec.type_key.to_bytes_le());
            buf.put_f64_le(spec.min_value);
            buf.put_f64_le(spec.max_value);
            buf.put_f64_le(spec.best_value);
            buf.put_i32_le(spec.axle);
            buf.put_u8(u8::from(spec.is_adjustable));
        }
        buf.to_vec()
    }
}
