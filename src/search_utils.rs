pub mod debouncer;
pub mod orchestrator;
pub mod result_normalizer;
