//! Entity implementation

use slotmap::Key;

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// A slot index plus a generation counter: a handle to a destroyed entity
    /// stays invalid even after its slot has been reused.
    pub struct Entity;
}

impl Entity {
    /// Get the packed id (generation in the high bits, slot in the low bits)
    pub fn id(&self) -> u64 {
        self.data().as_ffi()
    }

    /// Slot index of the entity
    #[allow(clippy::cast_possible_truncation)]
    pub fn index(&self) -> u32 {
        (self.id() & 0xFFFF_FFFF) as u32
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index(), self.id() >> 32)
    }
}
