//! Observable object states
//!
//! Objects that support states expose them as a flag set. Scenes query
//! membership only; state values and their dynamics live with the object.

bitflags::bitflags! {
    /// Set of states an object supports
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ObjectStates: u32 {
        /// Can be opened (doors, drawers, lids)
        const OPEN = 1 << 0;
        /// Can be cooked
        const COOKED = 1 << 1;
        /// Can be burnt
        const BURNT = 1 << 2;
        /// Can be frozen
        const FROZEN = 1 << 3;
        /// Has an on/off toggle
        const TOGGLED_ON = 1 << 4;
        /// Can be sliced
        const SLICED = 1 << 5;
        /// Can absorb liquid
        const SOAKED = 1 << 6;
        /// Can accumulate dust
        const DUSTY = 1 << 7;
        /// Can be stained
        const STAINED = 1 << 8;
        /// Emits heat
        const HEAT_SOURCE = 1 << 9;
        /// Emits water
        const WATER_SOURCE = 1 << 10;
        /// Removes dust or stains
        const CLEANING_TOOL = 1 << 11;
    }
}
