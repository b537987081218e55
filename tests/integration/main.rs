//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the node against mock
//! adapters. All tests run on the host (x86_64) with no real hardware
//! required.

mod mock_hw;
mod node_tests;
mod scenario_tests;
