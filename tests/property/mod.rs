//! Property-based tests for propagation guarantees

mod propagation;
