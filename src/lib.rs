// Reusable library API — visible to both the CLI and embedding callers
pub mod config;
pub mod errors;
pub mod generator;
pub mod grid;
pub mod lexicon;
pub mod log;
pub mod placer;
pub mod report;
pub mod scanner;
pub mod wordlist;
