//! Memory backend identifiers.

use std::fmt;

/// Which implementation backs a region or byte codec.
///
/// Both kinds honour the same get/put contract. They differ in bounds
/// policy and byte order:
///
/// | kind      | storage              | byte order | unchecked surface |
/// |-----------|----------------------|------------|-------------------|
/// | `Fast`    | raw allocator block  | native     | yes (`unsafe`)    |
/// | `Checked` | boxed byte slice     | little     | no                |
///
/// Bytes written by `Fast` on a big-endian target are not compatible with
/// bytes written by `Checked`. Anything persisting raw region contents must
/// pin one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Raw pointer access, native byte order.
    Fast,
    /// Always-validated, portable, little-endian.
    Checked,
}

impl BackendKind {
    /// Whether values are stored little-endian regardless of the target.
    pub const fn is_portable_byte_order(self) -> bool {
        match self {
            Self::Fast => cfg!(target_endian = "little"),
            Self::Checked => true,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Checked => write!(f, "checked"),
        }
    }
}
