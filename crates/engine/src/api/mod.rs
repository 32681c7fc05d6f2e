//! API layer - HTTP entry points of the dialogue oracle proxy.

pub mod http;
