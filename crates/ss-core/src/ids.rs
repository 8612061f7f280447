//! Typed identifiers for agents and states.
//!
//! Both are plain `u32` newtypes with a `MAX` sentinel.  The inner integer is
//! `pub` so the SoA agent store can index with `id.index()`; listeners
//! usually declare their states as `const FOO: StateId = StateId(n)`.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel: no agent / no state entered yet.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        // `agent#7`, `state#2`, `state#-` for the sentinel.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($label, "#{}"), self.0)
                } else {
                    f.write_str(concat!($label, "#-"))
                }
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Position of an agent in the population.  Ids are dense and never reused;
    /// a removed agent keeps its slot.
    pub struct AgentId(u32) => "agent";
}

typed_id! {
    /// Identity of a behavioral state.
    ///
    /// States are supplied by the application and are not enumerated by the
    /// framework; the value is only a lookup key into the listener registry.
    pub struct StateId(u32) => "state";
}
