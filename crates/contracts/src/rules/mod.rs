pub mod api;
pub mod ast;
