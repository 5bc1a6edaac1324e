// Presentation layer - HTTP surface over the rendered dashboard
pub mod app_state;
pub mod handlers;
