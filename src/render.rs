use crate::config::RenderConfig;
use crate::routing::{Point, points_to_path};
use crate::scene::{ConnectorLayout, SceneLayout, ShapeLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &SceneLayout, theme: &Theme, config: &RenderConfig) -> String {
    let mut svg = String::new();
    let pad = config.padding.max(0.0);
    let extent = layout.extent;
    let width = (extent.width + pad * 2.0).max(config.width);
    let height = (extent.height + pad * 2.0).max(config.height);
    let offset_x = pad - extent.left;
    let offset_y = pad - extent.top;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str("<defs>");
    for (id, color) in [
        ("arrow", &theme.line_color),
        ("arrow-fallback", &theme.fallback_line_color),
    ] {
        svg.push_str(&format!(
            "<marker id=\"{id}\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{color}\"/></marker>",
        ));
    }
    svg.push_str("</defs>");

    svg.push_str(&format!(
        "<g transform=\"translate({offset_x:.2} {offset_y:.2})\">"
    ));

    for shape in &layout.shapes {
        svg.push_str(&shape_svg(shape, theme, config));
    }

    for connector in &layout.connectors {
        svg.push_str(&connector_svg(connector, theme, config));
    }

    svg.push_str("</g>");
    svg.push_str("</svg>");
    svg
}

fn shape_svg(shape: &ShapeLayout, theme: &Theme, config: &RenderConfig) -> String {
    let b = shape.bounds;
    let mut out = format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"6\" ry=\"6\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        b.left, b.top, b.width, b.height, theme.shape_fill, theme.shape_stroke, config.stroke_width
    );
    if let Some(label) = &shape.label {
        out.push_str(&text_svg(b.center(), label, theme));
    }
    out
}

fn connector_svg(connector: &ConnectorLayout, theme: &Theme, config: &RenderConfig) -> String {
    let mut out = String::new();
    // Route coordinates are re-emitted with fixed precision; `connector.path`
    // keeps the shortest form for consumers that diff it.
    let d = svg_path(&connector.drawn_points);
    if connector.route.is_fallback() {
        out.push_str(&format!(
            "<path d=\"{d}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-dasharray=\"6 4\" marker-end=\"url(#arrow-fallback)\"/>",
            theme.fallback_line_color, config.stroke_width
        ));
    } else {
        out.push_str(&format!(
            "<path d=\"{d}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" marker-end=\"url(#arrow)\"/>",
            theme.line_color, config.stroke_width
        ));
    }

    if config.show_midpoints {
        for mid in &connector.midpoints {
            out.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"3\" fill=\"{}\" data-segment=\"{}\"/>",
                mid.x, mid.y, theme.handle_color, mid.segment_index
            ));
        }
    }

    if let (Some(label), Some(anchor)) = (&connector.label, connector.label_anchor) {
        let w = estimate_text_width(label, theme.font_size) + 12.0;
        let h = theme.font_size + 8.0;
        out.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"4\" ry=\"4\" fill=\"{}\" stroke=\"none\"/>",
            anchor.x - w / 2.0,
            anchor.y - h / 2.0,
            theme.background
        ));
        out.push_str(&text_svg(anchor, label, theme));
    }
    out
}

fn svg_path(points: &[Point]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let rounded: Vec<Point> = points
        .iter()
        .map(|p| Point::new((p.x * 100.0).round() / 100.0, (p.y * 100.0).round() / 100.0))
        .collect();
    points_to_path(&rounded)
}

fn text_svg(center: Point, label: &str, theme: &Theme) -> String {
    format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        center.x,
        center.y,
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.text_color,
        escape_xml(label)
    )
}

fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.6
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .or_else(|| usvg::Size::from_wh(800.0, 600.0))
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
