//! GPIO / peripheral pin assignments for the garage node.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Door contacts (normally-closed reed switches, dynamic pull-up)
// ---------------------------------------------------------------------------

/// Door sensor A.
pub const DOOR_A_GPIO: i32 = 4;
/// Door sensor B.
pub const DOOR_B_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Power module
// ---------------------------------------------------------------------------

/// Relay coil driver on the power module. HIGH = energised.
pub const RELAY_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// User interface
// ---------------------------------------------------------------------------

/// On-board status LED (active HIGH).
pub const LED_GPIO: i32 = 18;
