#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod parser;
pub mod render;
pub mod route_dump;
pub mod routing;
pub mod scene;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderConfig, RouterConfig};
pub use error::SceneError;
pub use ir::Scene;
pub use parser::parse_scene;
pub use routing::{ConnectorPoint, Point, Rectangle, Route, RouteKind, Side, route_connector};
pub use scene::{SceneLayout, route_scene};

/// Parse, route and render a scene document to SVG in one call.
pub fn render_scene(input: &str, config: &Config) -> anyhow::Result<String> {
    let scene = parse_scene(input)?;
    let layout = route_scene(&scene, &config.router)?;
    Ok(render::render_svg(&layout, &config.theme, &config.render))
}
