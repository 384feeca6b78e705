//! Integration tests for command interception

mod config_integration;
mod interception_scenarios;
mod manifest_tree;
mod test_utils;
