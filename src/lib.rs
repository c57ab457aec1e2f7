pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod probe;
