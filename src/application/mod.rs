// Application layer - Chart orchestration and its ports
pub mod chart_backend;
pub mod chart_manager;
pub mod dispatcher;
pub mod errors;
pub mod history_source;

#[cfg(test)]
pub mod testing;
