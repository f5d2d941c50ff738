//! SVG document emission.
//!
//! Layers are written back to front in a fixed order:
//!
//! 1. filter and gradient definitions (lighting only)
//! 2. background rectangle
//! 3. back-ray layer (screen blend)
//! 4. frame layer
//! 5. artwork layer (one path per cell)
//! 6. front-ray layer (soft-light in light mode, screen in dark)
//! 7. glow layer (multiply in light mode, screen in dark)
//!
//! Emission is a pure function of its inputs and formats every
//! coordinate with two decimal places, so identical inputs produce
//! byte-identical documents.

use std::fmt::Write as _;

use glam::Vec2;

use crate::color::Rgb;
use crate::frame::FrameLayer;
use crate::lighting::{LightSettings, LitScene, Ray};
use crate::sample::ColoredCell;

/// Stroke parameters for the lead lines.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitOptions {
    /// Lead line width, `0.5..=10`.
    pub line_width: f32,
    pub line_color: Rgb,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            line_color: Rgb::new(0x1a, 0x1a, 0x1a),
        }
    }
}

/// Background fill when lighting runs in dark mode.
const DARK_BACKGROUND: &str = "#1a1a1a";
const LIGHT_BACKGROUND: &str = "#ffffff";

/// How much ray gradient origins are brightened toward white.
const RAY_BRIGHTEN: f32 = 0.4;

/// Emit the complete vector document.
pub fn emit(
    width: u32,
    height: u32,
    scene: &LitScene,
    frame: &FrameLayer,
    lighting: &LightSettings,
    options: &EmitOptions,
) -> String {
    let mut doc = String::with_capacity(scene.cells.len() * 96 + 1024);
    let _ = writeln!(
        doc,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = width,
        h = height
    );

    // 1. Definitions.
    if lighting.enabled {
        write_defs(&mut doc, scene, width, height);
    }

    // 2. Background.
    let background = if lighting.enabled && lighting.dark_mode {
        DARK_BACKGROUND
    } else {
        LIGHT_BACKGROUND
    };
    let _ = writeln!(
        doc,
        r#"  <rect width="{}" height="{}" fill="{}"/>"#,
        width, height, background
    );

    // 3. Back rays, behind everything else, additive.
    if !scene.back_rays.is_empty() {
        let _ = writeln!(
            doc,
            r#"  <g style="mix-blend-mode:screen" filter="url(#ray-blur)">"#
        );
        for (i, ray) in scene.back_rays.iter().enumerate() {
            write_ray_path(&mut doc, ray, &format!("ray-grad-b{}", i));
        }
        let _ = writeln!(doc, "  </g>");
    }

    // 4. Frame.
    if !frame.elements.is_empty() {
        let _ = writeln!(doc, r#"  <g stroke-linejoin="round">"#);
        for element in &frame.elements {
            let _ = writeln!(
                doc,
                r#"    <path d="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                path_data(&element.polygon),
                element.color.to_hex(),
                options.line_color.to_hex(),
                format_number(options.line_width),
            );
        }
        let _ = writeln!(doc, "  </g>");
    }

    // 5. Artwork.
    let _ = writeln!(doc, r#"  <g stroke-linejoin="round">"#);
    for cell in &scene.cells {
        write_cell_path(&mut doc, cell, options);
    }
    let _ = writeln!(doc, "  </g>");

    // 6. Front rays, over the glass.
    if !scene.front_rays.is_empty() {
        let blend = if lighting.dark_mode {
            "screen"
        } else {
            "soft-light"
        };
        let _ = writeln!(
            doc,
            r#"  <g style="mix-blend-mode:{}" filter="url(#ray-blur)">"#,
            blend
        );
        for (i, ray) in scene.front_rays.iter().enumerate() {
            write_ray_path(&mut doc, ray, &format!("ray-grad-f{}", i));
        }
        let _ = writeln!(doc, "  </g>");
    }

    // 7. Glow.
    if let Some(glow) = &scene.glow {
        let blend = if lighting.dark_mode {
            "screen"
        } else {
            "multiply"
        };
        let _ = writeln!(
            doc,
            r#"  <g style="mix-blend-mode:{}" filter="url(#glow-blur)" opacity="{}">"#,
            blend,
            format_number(glow.opacity),
        );
        for cell in &glow.cells {
            let _ = writeln!(
                doc,
                r#"    <path d="{}" fill="{}"/>"#,
                path_data(&cell.polygon),
                cell.color.to_hex(),
            );
        }
        let _ = writeln!(doc, "  </g>");
    }

    doc.push_str("</svg>\n");
    doc
}

/// Filters and per-ray gradients.
fn write_defs(doc: &mut String, scene: &LitScene, width: u32, height: u32) {
    let has_rays = !scene.back_rays.is_empty() || !scene.front_rays.is_empty();
    let has_glow = scene.glow.is_some();
    if !has_rays && !has_glow {
        return;
    }

    let _ = writeln!(doc, "  <defs>");
    if let Some(glow) = &scene.glow {
        let _ = writeln!(
            doc,
            r#"    <filter id="glow-blur" x="-20%" y="-20%" width="140%" height="140%"><feGaussianBlur stdDeviation="{}"/></filter>"#,
            format_number(glow.sigma),
        );
    }
    if has_rays {
        let diagonal = ((width * width + height * height) as f32).sqrt();
        let sigma = (diagonal / 100.0).max(4.0);
        let _ = writeln!(
            doc,
            r#"    <filter id="ray-blur" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="{}"/></filter>"#,
            format_number(sigma),
        );
        for (i, ray) in scene.back_rays.iter().enumerate() {
            write_ray_gradient(doc, ray, &format!("ray-grad-b{}", i));
        }
        for (i, ray) in scene.front_rays.iter().enumerate() {
            write_ray_gradient(doc, ray, &format!("ray-grad-f{}", i));
        }
    }
    let _ = writeln!(doc, "  </defs>");
}

/// A linear gradient running the ray's centerline: brightened color at
/// the origin fading to zero alpha at the end.
fn write_ray_gradient(doc: &mut String, ray: &Ray, id: &str) {
    let end = ray.end();
    let color = ray.color.lighten(RAY_BRIGHTEN).to_hex();
    let _ = writeln!(
        doc,
        r#"    <linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"><stop offset="0" stop-color="{color}" stop-opacity="{op}"/><stop offset="1" stop-color="{color}" stop-opacity="0"/></linearGradient>"#,
        id = id,
        x1 = format_number(ray.origin.x),
        y1 = format_number(ray.origin.y),
        x2 = format_number(end.x),
        y2 = format_number(end.y),
        color = color,
        op = format_number(ray.opacity),
    );
}

fn write_ray_path(doc: &mut String, ray: &Ray, gradient_id: &str) {
    let _ = writeln!(
        doc,
        r#"    <path d="{}" fill="url(#{})"/>"#,
        path_data(&ray.polygon()),
        gradient_id,
    );
}

fn write_cell_path(doc: &mut String, cell: &ColoredCell, options: &EmitOptions) {
    let _ = writeln!(
        doc,
        r#"    <path d="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        path_data(&cell.polygon),
        cell.color.to_hex(),
        options.line_color.to_hex(),
        format_number(options.line_width),
    );
}

/// Closed path data with two-decimal coordinates.
fn path_data(polygon: &[Vec2]) -> String {
    let mut data = String::with_capacity(polygon.len() * 16);
    for (i, point) in polygon.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(
            data,
            "{}{},{}",
            command,
            format_number(point.x),
            format_number(point.y)
        );
    }
    data.push('Z');
    data
}

/// Fixed two-decimal formatting; `-0.00` is normalized to `0.00`.
fn format_number(value: f32) -> String {
    let rounded = (value as f64 * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.2}", rounded)
}
