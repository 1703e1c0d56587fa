//! Public web layer: the bio page visitors see.

pub mod handlers;
pub mod routes;
