pub mod dev;
pub mod lexer;
pub mod symbols;
