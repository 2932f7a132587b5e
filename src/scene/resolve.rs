use crate::foundation::math::{Mat4, compose};
use crate::scene::descriptor::{Selector, parse_descriptor};
use crate::scene::model::{DisplayKind, ElementNode, SceneGraph, SceneNode};

/// A leaf element with its world transform and parsed addressing.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedElement {
    pub selector_key: String,
    pub selector: Selector,
    pub kind: DisplayKind,
    pub transform: Mat4,
    pub texture: Option<String>,
    pub descriptor: String,
}

/// Flatten a scene graph depth-first (pre-order, sibling order kept).
pub fn resolve(graph: &SceneGraph) -> Vec<ResolvedElement> {
    let mut out = Vec::with_capacity(graph.element_count());
    for root in &graph.roots {
        rec_resolve(&root.children, root.local, &mut out);
    }
    out
}

fn rec_resolve(nodes: &[SceneNode], parent: Mat4, out: &mut Vec<ResolvedElement>) {
    for node in nodes {
        match node {
            SceneNode::Element(el) => out.push(resolve_element(el, parent)),
            SceneNode::Group(g) => rec_resolve(&g.children, compose(parent, g.local), out),
        }
    }
}

fn resolve_element(el: &ElementNode, parent: Mat4) -> ResolvedElement {
    let parsed = parse_descriptor(&el.descriptor);
    ResolvedElement {
        selector_key: parsed.selector.key(),
        selector: parsed.selector,
        kind: el.kind,
        transform: compose(parent, el.local),
        texture: el.texture.clone(),
        descriptor: parsed.text,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/resolve.rs"]
mod tests;
