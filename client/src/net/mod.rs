//! Server communication: REST helpers and the response types they decode.

pub mod api;
pub mod types;
