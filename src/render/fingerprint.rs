use xxhash_rust::xxh3::Xxh3;

use crate::foundation::core::Transform2D;
use crate::scene::node::{GradientStop, Node, NodeKind, Paint, RenderTree, Shadow, Stroke, TextAnchor};

const XXH3_SEED: u64 = 0x5f1d_3a7c_e2b4_9d60;

/// 128-bit digest of an evaluated frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl FrameFingerprint {
    /// 32 lowercase hex digits.
    pub fn to_hex(self) -> String {
        format!("{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint everything that affects pixels; the frame index is left out so that
/// identical frames at different times collide.
pub fn fingerprint_tree(tree: &RenderTree) -> FrameFingerprint {
    let mut h = StableHasher::new();
    h.write_str(&tree.template_id);
    h.write_u32(tree.canvas.width);
    h.write_u32(tree.canvas.height);
    write_paint(&mut h, &tree.background);
    write_nodes(&mut h, &tree.nodes);
    h.finish()
}

/// Fold per-frame fingerprints, in order, into one digest.
pub fn fingerprint_sequence<'a>(frames: impl IntoIterator<Item = &'a FrameFingerprint>) -> FrameFingerprint {
    let mut h = StableHasher::new();
    let mut n = 0u64;
    for fp in frames {
        h.write_u64(fp.hi);
        h.write_u64(fp.lo);
        n += 1;
    }
    h.write_u64(n);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_nodes(h: &mut StableHasher, nodes: &[Node]) {
    h.write_u32(nodes.len() as u32);
    for n in nodes {
        write_node(h, n);
    }
}

fn write_node(h: &mut StableHasher, node: &Node) {
    h.write_str(&node.id);
    write_transform(h, &node.transform);
    h.write_f64(node.opacity);
    match &node.kind {
        NodeKind::Group { children } => {
            h.write_u8(0);
            write_nodes(h, children);
        }
        NodeKind::Rect {
            rect,
            radius,
            fill,
            shadow,
        } => {
            h.write_u8(1);
            for v in [rect.x0, rect.y0, rect.x1, rect.y1, *radius] {
                h.write_f64(v);
            }
            write_paint(h, fill);
            write_opt(h, shadow.as_ref(), write_shadow);
        }
        NodeKind::Ellipse {
            center,
            radii,
            fill,
            stroke,
        } => {
            h.write_u8(2);
            for v in [center.x, center.y, radii.x, radii.y] {
                h.write_f64(v);
            }
            write_opt(h, fill.as_ref(), write_paint);
            write_opt(h, stroke.as_ref(), write_stroke);
        }
        NodeKind::Path { d, fill, stroke } => {
            h.write_u8(3);
            h.write_str(d);
            write_opt(h, fill.as_ref(), write_paint);
            write_opt(h, stroke.as_ref(), write_stroke);
        }
        NodeKind::Text(t) => {
            h.write_u8(4);
            h.write_str(&t.content);
            h.write_f64(t.position.x);
            h.write_f64(t.position.y);
            h.write_f64(t.font_size);
            h.write_bool(t.bold);
            h.write_str(&t.color);
            h.write_u8(match t.anchor {
                TextAnchor::Start => 0,
                TextAnchor::Middle => 1,
                TextAnchor::End => 2,
            });
            write_opt(h, t.shadow.as_ref(), write_shadow);
        }
        NodeKind::Image { href, rect, radius } => {
            h.write_u8(5);
            h.write_str(href);
            for v in [rect.x0, rect.y0, rect.x1, rect.y1, *radius] {
                h.write_f64(v);
            }
        }
    }
}

fn write_transform(h: &mut StableHasher, t: &Transform2D) {
    for v in [
        t.translate.x,
        t.translate.y,
        t.rotation_rad,
        t.scale.x,
        t.scale.y,
        t.anchor.x,
        t.anchor.y,
    ] {
        h.write_f64(v);
    }
}

fn write_paint(h: &mut StableHasher, p: &Paint) {
    match p {
        Paint::Solid { color } => {
            h.write_u8(0);
            h.write_str(color);
        }
        Paint::Linear { angle_deg, stops } => {
            h.write_u8(1);
            h.write_f64(*angle_deg);
            write_stops(h, stops);
        }
        Paint::Radial {
            center,
            radius,
            stops,
        } => {
            h.write_u8(2);
            h.write_f64(center.x);
            h.write_f64(center.y);
            h.write_f64(*radius);
            write_stops(h, stops);
        }
    }
}

fn write_stops(h: &mut StableHasher, stops: &[GradientStop]) {
    h.write_u32(stops.len() as u32);
    for s in stops {
        h.write_f64(s.offset);
        h.write_str(&s.color);
    }
}

fn write_stroke(h: &mut StableHasher, s: &Stroke) {
    h.write_str(&s.color);
    h.write_f64(s.width);
}

fn write_shadow(h: &mut StableHasher, s: &Shadow) {
    h.write_f64(s.offset.x);
    h.write_f64(s.offset.y);
    h.write_f64(s.blur);
    h.write_str(&s.color);
}

fn write_opt<T>(h: &mut StableHasher, v: Option<&T>, write: fn(&mut StableHasher, &T)) {
    match v {
        Some(v) => {
            h.write_u8(1);
            write(h, v);
        }
        None => h.write_u8(0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fingerprint.rs"]
mod tests;
