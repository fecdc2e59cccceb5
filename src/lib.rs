// Library module for hash-sample
// Re-exports modules for use in integration tests and the command-line binary

pub mod sample;
