//! Config module tests
//!
//! Filesystem-backed tests for the I/O boundary: manager validation,
//! transactional writes, and preset lifecycle. All tests run against
//! `tempfile` directories.
