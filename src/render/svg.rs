//! Render tree to SVG document.
//!
//! Gradients use bounding-box units, so a paint looks the same on any shape size. Image nodes are
//! drawn as tinted placeholders carrying their `href` in a `data-href` attribute: the preview
//! path never loads external resources.

use std::fmt::Write as _;

use crate::foundation::core::Transform2D;
use crate::scene::node::{GradientStop, Node, NodeKind, Paint, RenderTree, Shadow, Stroke, TextAnchor, TextSpec};

const FONT_FAMILY: &str = "sans-serif";
const IMAGE_PLACEHOLDER: &str = "#808080";

/// Serialize `tree` as a standalone SVG document sized to its canvas.
pub fn to_svg(tree: &RenderTree) -> String {
    let w = tree.canvas.width;
    let h = tree.canvas.height;
    let mut out = SvgWriter::default();

    let bg = out.paint(&tree.background);
    let _ = write!(out.body, r#"<rect width="{w}" height="{h}" fill="{bg}"/>"#);
    for node in &tree.nodes {
        out.node(node);
    }

    let mut doc = String::with_capacity(out.defs.len() + out.body.len() + 256);
    let _ = write!(
        doc,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    if !out.defs.is_empty() {
        doc.push_str("<defs>");
        doc.push_str(&out.defs);
        doc.push_str("</defs>");
    }
    doc.push_str(&out.body);
    doc.push_str("</svg>");
    doc
}

#[derive(Default)]
struct SvgWriter {
    defs: String,
    body: String,
    next_id: usize,
}

impl SvgWriter {
    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn node(&mut self, node: &Node) {
        let _ = write!(self.body, r#"<g id="{}""#, escape(&node.id));
        if !node.transform.is_identity() {
            let _ = write!(self.body, r#" transform="{}""#, matrix(&node.transform));
        }
        if node.opacity < 1.0 {
            let _ = write!(self.body, r#" opacity="{}""#, num(node.opacity));
        }
        self.body.push('>');

        match &node.kind {
            NodeKind::Group { children } => {
                for child in children {
                    self.node(child);
                }
            }
            NodeKind::Rect {
                rect,
                radius,
                fill,
                shadow,
            } => {
                let fill = self.paint(fill);
                let filter = shadow.as_ref().map(|s| self.drop_shadow(s));
                let r = rect.abs();
                let _ = write!(
                    self.body,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{fill}""#,
                    num(r.x0),
                    num(r.y0),
                    num(r.width()),
                    num(r.height()),
                    num(radius.min(r.width() / 2.0).min(r.height() / 2.0).max(0.0)),
                );
                if let Some(id) = filter {
                    let _ = write!(self.body, r#" filter="url(#{id})""#);
                }
                self.body.push_str("/>");
            }
            NodeKind::Ellipse {
                center,
                radii,
                fill,
                stroke,
            } => {
                let fill = fill.as_ref().map_or_else(|| "none".to_string(), |p| self.paint(p));
                let _ = write!(
                    self.body,
                    r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{fill}""#,
                    num(center.x),
                    num(center.y),
                    num(radii.x.abs()),
                    num(radii.y.abs()),
                );
                write_stroke(&mut self.body, stroke.as_ref());
                self.body.push_str("/>");
            }
            NodeKind::Path { d, fill, stroke } => {
                if !d.is_empty() {
                    let fill = fill.as_ref().map_or_else(|| "none".to_string(), |p| self.paint(p));
                    let _ = write!(self.body, r#"<path d="{}" fill="{fill}""#, escape(d));
                    write_stroke(&mut self.body, stroke.as_ref());
                    self.body.push_str("/>");
                }
            }
            NodeKind::Text(spec) => self.text(spec),
            NodeKind::Image { href, rect, radius } => {
                let r = rect.abs();
                let _ = write!(
                    self.body,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{IMAGE_PLACEHOLDER}" fill-opacity="0.35" data-href="{}"/>"#,
                    num(r.x0),
                    num(r.y0),
                    num(r.width()),
                    num(r.height()),
                    num(radius.max(0.0)),
                    escape(href),
                );
            }
        }

        self.body.push_str("</g>");
    }

    fn text(&mut self, spec: &TextSpec) {
        if spec.content.is_empty() {
            return;
        }
        match &spec.shadow {
            Some(s) if s.blur <= 0.0 => {
                self.text_run(spec, &s.color, s.offset.x, s.offset.y, None);
                self.text_run(spec, &spec.color, 0.0, 0.0, None);
            }
            Some(s) => {
                let filter = self.drop_shadow(s);
                self.text_run(spec, &spec.color, 0.0, 0.0, Some(&filter));
            }
            None => self.text_run(spec, &spec.color, 0.0, 0.0, None),
        }
    }

    fn text_run(&mut self, spec: &TextSpec, color: &str, dx: f64, dy: f64, filter: Option<&str>) {
        let anchor = match spec.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" text-anchor="{anchor}" fill="{}""#,
            num(spec.position.x + dx),
            num(spec.position.y + dy),
            num(spec.font_size),
            escape(color),
        );
        if spec.bold {
            self.body.push_str(r#" font-weight="bold""#);
        }
        if let Some(id) = filter {
            let _ = write!(self.body, r#" filter="url(#{id})""#);
        }
        let _ = write!(self.body, ">{}</text>", escape(&spec.content));
    }

    /// Returns the value for a `fill` attribute, adding a gradient to `<defs>` when needed.
    fn paint(&mut self, paint: &Paint) -> String {
        match paint {
            Paint::Solid { color } => escape(color),
            Paint::Linear { angle_deg, stops } => {
                let id = self.fresh_id("lg");
                let (x1, y1, x2, y2) = css_angle_endpoints(*angle_deg);
                let _ = write!(
                    self.defs,
                    r#"<linearGradient id="{id}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    num(x1),
                    num(y1),
                    num(x2),
                    num(y2),
                );
                write_stops(&mut self.defs, stops);
                self.defs.push_str("</linearGradient>");
                format!("url(#{id})")
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let id = self.fresh_id("rg");
                let _ = write!(
                    self.defs,
                    r#"<radialGradient id="{id}" cx="{}" cy="{}" r="{}">"#,
                    num(center.x),
                    num(center.y),
                    num(*radius),
                );
                write_stops(&mut self.defs, stops);
                self.defs.push_str("</radialGradient>");
                format!("url(#{id})")
            }
        }
    }

    fn drop_shadow(&mut self, s: &Shadow) -> String {
        let id = self.fresh_id("sh");
        let _ = write!(
            self.defs,
            r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="{}"/></filter>"#,
            num(s.offset.x),
            num(s.offset.y),
            num(s.blur / 2.0),
            escape(&s.color),
        );
        id
    }
}

fn write_stops(out: &mut String, stops: &[GradientStop]) {
    for s in stops {
        let _ = write!(
            out,
            r#"<stop offset="{}" stop-color="{}"/>"#,
            num(s.offset.clamp(0.0, 1.0)),
            escape(&s.color),
        );
    }
}

fn write_stroke(out: &mut String, stroke: Option<&Stroke>) {
    if let Some(s) = stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            escape(&s.color),
            num(s.width),
        );
    }
}

/// CSS gradient angle (0 = up, clockwise) to bounding-box endpoints that touch the box edges.
pub(crate) fn css_angle_endpoints(angle_deg: f64) -> (f64, f64, f64, f64) {
    let a = angle_deg.to_radians();
    let (dx, dy) = (a.sin(), -a.cos());
    let m = dx.abs().max(dy.abs());
    let (hx, hy) = (dx / m / 2.0, dy / m / 2.0);
    (0.5 - hx, 0.5 - hy, 0.5 + hx, 0.5 + hy)
}

fn matrix(t: &Transform2D) -> String {
    let [a, b, c, d, e, f] = t.to_affine().as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        num(a),
        num(b),
        num(c),
        num(d),
        num(e),
        num(f)
    )
}

/// Fixed-precision number without trailing zeros; non-finite values become 0.
pub(crate) fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
