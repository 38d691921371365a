//! Property-based tests for plan determinism

mod determinism;
