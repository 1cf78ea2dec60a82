//! Strongly typed identifiers for stored rows.
use std::fmt;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $prefix, self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

row_id!(
    /// Identifier of a candidate name in the shared catalog.
    NameId,
    "name"
);
row_id!(
    /// Identifier of a game instance.
    GameId,
    "game"
);
row_id!(
    /// Identifier of one player's progress record within one game.
    TournamentStateId,
    "state"
);
row_id!(
    /// Identifier of a persisted battle record.
    BattleId,
    "battle"
);
