//! Flutter-facing bindings for the Remindly core.

pub mod api;
