pub mod config;
pub mod document;
pub mod logging;
pub mod lsp;
mod pattern;
pub mod services;
