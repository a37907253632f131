use crate::foundation::core::{Canvas, FrameIndex, Point, Rect, Transform2D, Vec2};

/// Everything needed to draw one frame of one template.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderTree {
    /// Template that produced the tree.
    pub template_id: String,
    /// Evaluated frame.
    pub frame: FrameIndex,
    /// Output size.
    pub canvas: Canvas,
    /// Full-canvas background.
    pub background: Paint,
    /// Top-level nodes in painter's order.
    pub nodes: Vec<Node>,
}

impl RenderTree {
    /// Depth-first search for a node by id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find_map(|n| n.find(id))
    }

    /// Total number of nodes, groups included.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(Node::count).sum()
    }
}

/// Drawable element with its own transform and opacity.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Node {
    /// Stable identifier, unique within a tree.
    pub id: String,
    /// Local transform relative to the parent.
    pub transform: Transform2D,
    /// Opacity in `[0, 1]`, multiplied down the tree.
    pub opacity: f64,
    /// What is drawn.
    pub kind: NodeKind,
}

/// Primitive kinds.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Container.
    Group {
        /// Children in painter's order.
        children: Vec<Node>,
    },
    /// Rounded rectangle.
    Rect {
        /// Geometry in local space.
        rect: Rect,
        /// Corner radius.
        radius: f64,
        /// Fill.
        fill: Paint,
        /// Optional drop shadow.
        shadow: Option<Shadow>,
    },
    /// Axis-aligned ellipse.
    Ellipse {
        /// Center in local space.
        center: Point,
        /// Horizontal and vertical radii.
        radii: Vec2,
        /// Fill.
        fill: Option<Paint>,
        /// Outline.
        stroke: Option<Stroke>,
    },
    /// Arbitrary path in SVG path syntax.
    Path {
        /// Path data.
        d: String,
        /// Fill.
        fill: Option<Paint>,
        /// Outline.
        stroke: Option<Stroke>,
    },
    /// Single line of text.
    Text(TextSpec),
    /// External image reference, never fetched by this crate.
    Image {
        /// Image URL as provided by the user.
        href: String,
        /// Destination box in local space.
        rect: Rect,
        /// Corner radius of the clip.
        radius: f64,
    },
}

/// Fill paint.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paint {
    /// Flat color, carried as given.
    Solid {
        /// Color string.
        color: String,
    },
    /// CSS-style linear gradient over the shape's bounding box.
    Linear {
        /// CSS angle: 0 points up, 90 points right.
        angle_deg: f64,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Radial gradient over the shape's bounding box.
    Radial {
        /// Center in bounding-box fractions.
        center: Point,
        /// Radius as a bounding-box fraction.
        radius: f64,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    /// Flat color.
    pub fn solid(color: impl Into<String>) -> Self {
        Self::Solid {
            color: color.into(),
        }
    }

    /// Two-stop linear gradient.
    pub fn linear(angle_deg: f64, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Linear {
            angle_deg,
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    /// Centered radial glow fading out at `fade_at`.
    pub fn glow(color: impl Into<String>, fade_at: f64) -> Self {
        Self::Radial {
            center: Point::new(0.5, 0.5),
            radius: 0.5,
            stops: vec![
                GradientStop::new(0.0, color),
                GradientStop::new(fade_at, "transparent"),
            ],
        }
    }
}

/// Gradient color stop.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GradientStop {
    /// Position in `[0, 1]`.
    pub offset: f64,
    /// Color string.
    pub color: String,
}

impl GradientStop {
    /// Build a stop.
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
        }
    }
}

/// Outline style.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Stroke {
    /// Color string.
    pub color: String,
    /// Line width in pixels.
    pub width: f64,
}

/// Offset shadow, optionally blurred.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Shadow {
    /// Offset in pixels.
    pub offset: Vec2,
    /// Gaussian blur standard deviation; 0 draws a hard copy.
    pub blur: f64,
    /// Color string.
    pub color: String,
}

/// Horizontal text alignment relative to `TextSpec::position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    /// Left edge.
    Start,
    /// Centered.
    Middle,
    /// Right edge.
    End,
}

/// Text run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextSpec {
    /// Text to draw.
    pub content: String,
    /// Baseline anchor point in local space.
    pub position: Point,
    /// Font size in pixels.
    pub font_size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Color string.
    pub color: String,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Optional shadow.
    pub shadow: Option<Shadow>,
}

impl TextSpec {
    /// Centered, regular-weight text.
    pub fn centered(
        content: impl Into<String>,
        position: Point,
        font_size: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            position,
            font_size,
            bold: false,
            color: color.into(),
            anchor: TextAnchor::Middle,
            shadow: None,
        }
    }

    /// Builder: bold weight.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: alignment.
    pub fn anchored(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Builder: shadow.
    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

impl Node {
    fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            transform: Transform2D::default(),
            opacity: 1.0,
            kind,
        }
    }

    /// Group of children.
    pub fn group(id: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(id, NodeKind::Group { children })
    }

    /// Filled rounded rectangle.
    pub fn rect(id: impl Into<String>, rect: Rect, radius: f64, fill: Paint) -> Self {
        Self::new(
            id,
            NodeKind::Rect {
                rect,
                radius,
                fill,
                shadow: None,
            },
        )
    }

    /// Filled circle.
    pub fn circle(id: impl Into<String>, center: Point, r: f64, fill: Paint) -> Self {
        Self::new(
            id,
            NodeKind::Ellipse {
                center,
                radii: Vec2::new(r, r),
                fill: Some(fill),
                stroke: None,
            },
        )
    }

    /// Filled ellipse.
    pub fn ellipse(id: impl Into<String>, center: Point, radii: Vec2, fill: Paint) -> Self {
        Self::new(
            id,
            NodeKind::Ellipse {
                center,
                radii,
                fill: Some(fill),
                stroke: None,
            },
        )
    }

    /// Outlined circle.
    pub fn ring(id: impl Into<String>, center: Point, r: f64, stroke: Stroke) -> Self {
        Self::new(
            id,
            NodeKind::Ellipse {
                center,
                radii: Vec2::new(r, r),
                fill: None,
                stroke: Some(stroke),
            },
        )
    }

    /// Path from SVG path data.
    pub fn path(
        id: impl Into<String>,
        d: impl Into<String>,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    ) -> Self {
        Self::new(
            id,
            NodeKind::Path {
                d: d.into(),
                fill,
                stroke,
            },
        )
    }

    /// Text run.
    pub fn text(id: impl Into<String>, spec: TextSpec) -> Self {
        Self::new(id, NodeKind::Text(spec))
    }

    /// Image reference.
    pub fn image(id: impl Into<String>, href: impl Into<String>, rect: Rect, radius: f64) -> Self {
        Self::new(
            id,
            NodeKind::Image {
                href: href.into(),
                rect,
                radius,
            },
        )
    }

    /// Builder: local transform.
    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: opacity, clamped to `[0, 1]` the way CSS clamps it.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Builder: drop shadow; ignored for kinds other than `Rect`.
    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        if let NodeKind::Rect { shadow: s, .. } = &mut self.kind {
            *s = Some(shadow);
        }
        self
    }

    /// Children when this is a group.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Group { children } => children,
            _ => &[],
        }
    }

    /// Text content when this is a text node.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(spec) => Some(&spec.content),
            _ => None,
        }
    }

    /// Depth-first search for a node by id, including `self`.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    fn count(&self) -> usize {
        1 + self.children().iter().map(Node::count).sum::<usize>()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
