//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements    | Connects to                     |
//! |-------------|---------------|---------------------------------|
//! | `hardware`  | RelayPort     | Relay coil GPIO                 |
//! |             | IndicatorPort | Status LED GPIO                 |
//! |             | SwitchPort    | Debounced door contact levels   |
//! |             | RadioPort     | Forwards to the inner radio     |
//! | `log_radio` | RadioPort     | Log output                      |
//! | `time`      | ClockPort     | ESP32 system timer / `Instant`  |

pub mod hardware;
pub mod log_radio;
pub mod time;
