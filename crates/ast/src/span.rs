use std::fmt;

/// A byte range into the text of a source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first byte.
    pub lo: u32,
    /// Offset one past the last byte.
    pub hi: u32,
}

impl Span {
    /// The span of a synthesized node, which has no position in any file.
    pub const DUMMY: Self = Self { lo: u32::MAX, hi: u32::MAX };

    pub fn new(lo: u32, hi: u32) -> Self {
        debug_assert!(lo <= hi, "span starts after it ends: {lo}..{hi}");
        Self { lo, hi }
    }

    pub fn is_dummy(&self) -> bool {
        *self == Self::DUMMY
    }

    pub fn len(&self) -> u32 {
        self.hi.saturating_sub(self.lo)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dummy() {
            write!(f, "<synthesized>")
        } else {
            write!(f, "{}..{}", self.lo, self.hi)
        }
    }
}
