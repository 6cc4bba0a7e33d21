/// Built-in Diffie-Hellman group identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DhGroupId {
    /// RFC 3526 group 14: 2048-bit MODP prime, generator 2.
    Modp2048,
}

impl DhGroupId {
    /// Parameter width in bytes for values in this group.
    pub fn width(self) -> usize {
        match self {
            DhGroupId::Modp2048 => 256,
        }
    }
}
