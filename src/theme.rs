#[derive(Debug, Clone)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub shape_fill: String,
    pub shape_stroke: String,
    pub text_color: String,
    pub line_color: String,
    pub fallback_line_color: String,
    pub handle_color: String,
    pub background: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 14.0,
            shape_fill: "#ECECFF".to_string(),
            shape_stroke: "#9370DB".to_string(),
            text_color: "#333333".to_string(),
            line_color: "#333333".to_string(),
            fallback_line_color: "#D9534F".to_string(),
            handle_color: "#9370DB".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            shape_fill: "#F8FAFF".to_string(),
            shape_stroke: "#C7D2E5".to_string(),
            text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            fallback_line_color: "#E0777D".to_string(),
            handle_color: "#4C6EF5".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "modern" => Some(Self::modern()),
            "classic" | "default" | "base" => Some(Self::classic()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_name() {
        assert_eq!(Theme::by_name("modern").map(|t| t.line_color), Some(Theme::modern().line_color));
        assert_eq!(Theme::by_name("base").map(|t| t.shape_fill), Some(Theme::classic().shape_fill));
        assert!(Theme::by_name("neon").is_none());
        assert_eq!(Theme::default().background, Theme::modern().background);
    }
}
