//! Cryptographic utilities
//!
//! This module provides SHA-256 hashing for snapshot integrity checks.

pub mod hash;

pub use hash::{sha256, sha256_hex, verify_sha256_hex};
