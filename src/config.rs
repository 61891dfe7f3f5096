use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Clearance kept around every shape, and the distance connector endpoints
/// are pushed out of their shape.
pub const DEFAULT_MARGIN: f32 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    pub margin: f32,
    /// Treat every shape in a scene as an obstacle, not just the two shapes
    /// a connector attaches to.
    pub avoid_all_shapes: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            avoid_all_shapes: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Smallest canvas width. Larger scenes grow the canvas past it.
    pub width: f32,
    /// Smallest canvas height.
    pub height: f32,
    pub padding: f32,
    pub stroke_width: f32,
    pub show_midpoints: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 200.0,
            padding: 24.0,
            stroke_width: 1.4,
            show_midpoints: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub router: RouterConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    shape_fill: Option<String>,
    shape_stroke: Option<String>,
    text_color: Option<String>,
    line_color: Option<String>,
    fallback_line_color: Option<String>,
    handle_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouterConfigFile {
    margin: Option<f32>,
    avoid_all_shapes: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    stroke_width: Option<f32>,
    show_midpoints: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    router: Option<RouterConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Apply a JSON config document on top of the defaults. Every field is
/// optional.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown theme '{theme_name}'"))?;
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.shape_fill {
            config.theme.shape_fill = v;
        }
        if let Some(v) = vars.shape_stroke {
            config.theme.shape_stroke = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.fallback_line_color {
            config.theme.fallback_line_color = v;
        }
        if let Some(v) = vars.handle_color {
            config.theme.handle_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(router) = parsed.router {
        if let Some(v) = router.margin {
            if !v.is_finite() || v < 0.0 {
                return Err(anyhow::anyhow!("Router margin must be a non-negative number, got {v}"));
            }
            config.router.margin = v;
        }
        if let Some(v) = router.avoid_all_shapes {
            config.router.avoid_all_shapes = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.stroke_width {
            config.render.stroke_width = v;
        }
        if let Some(v) = render.show_midpoints {
            config.render.show_midpoints = v;
        }
    }

    Ok(config)
}
