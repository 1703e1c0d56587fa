//! Handlers for the public HTML page.

pub mod bio;

pub use bio::bio_page_handler;
