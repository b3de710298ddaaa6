//! Unit tests for palette format implementations.
//!
//! These tests verify encoding, decoding, and the failure modes each format
//! reports for malformed input.
