//! Node identity and flag types.

bitflags::bitflags! {
    /// Flags for syntax nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        const NONE        = 0;
        /// This node or one of its descendants came out of error recovery.
        const HAS_ERROR   = 1 << 0;
        /// The node was made up by the parser to stand in for missing or
        /// skipped source (recovery nodes and identifiers wrapping them).
        const SYNTHESIZED = 1 << 1;
    }
}

/// Identifies a syntax node within its tree.
///
/// Ids are allocated by the parser in creation order and are unique within
/// one syntax tree.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
