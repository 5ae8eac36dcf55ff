pub mod commands;
pub mod env;
pub mod expander;
pub mod prompt;
pub mod tokenizer;
