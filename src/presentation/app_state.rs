// Application state for HTTP handlers
use crate::application::dispatcher::CommandSender;
use crate::infrastructure::render_surface::RenderSurface;
use std::collections::HashSet;

#[derive(Clone)]
pub struct AppState {
    pub surface: RenderSurface,
    pub commands: CommandSender,
    pub devices: HashSet<String>,
}
