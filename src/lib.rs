pub mod ai;
pub mod anthropic;
pub mod anyscale;
pub mod chat;
pub mod cli;
pub mod core;
pub mod openai;
