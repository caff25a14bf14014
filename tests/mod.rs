//! Integration tests for cleanstream
//!
//! Tests are organized by component:
//! - tmdb_test: TMDB client against a mock server
//! - torrentio_test: Torrentio client against a mock server
//! - cli_test: Argument parsing and command handlers
//! - e2e_test: Router in-process (request -> metadata + streams -> display)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
