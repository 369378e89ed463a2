//! Discovery: list every target name the registry knows.

use crate::registry::Registry;

/// Sorted handler names, duplicates kept. Never fails and calls no handler.
pub fn discover(registry: &Registry) -> Vec<String> {
    registry.names()
}
