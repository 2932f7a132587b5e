use crate::foundation::error::{BdError, BdResult};
use crate::foundation::math::Mat4;
use serde::Deserialize;

/// Display entity flavour of a leaf element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayKind {
    Item,
    Block,
    Text,
}

impl DisplayKind {
    /// Entity type id used in selectors.
    pub fn entity_type(self) -> &'static str {
        match self {
            Self::Item => "item_display",
            Self::Block => "block_display",
            Self::Text => "text_display",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElementNode {
    pub kind: DisplayKind,
    pub local: Mat4,
    /// Raw placement descriptor (the exported `nbt` string).
    pub descriptor: String,
    pub texture: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct GroupNode {
    pub local: Mat4,
    pub children: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Element(ElementNode),
    Group(GroupNode),
}

/// Decoded scene graph of one frame. Each root behaves as a group.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SceneGraph {
    pub roots: Vec<GroupNode>,
}

impl SceneGraph {
    /// Parse a decoded document: either an array of root groups or a single root.
    pub fn from_json_slice(bytes: &[u8]) -> BdResult<Self> {
        let doc: DocumentDef = serde_json::from_slice(bytes)
            .map_err(|e| BdError::decode(format!("parse frame JSON: {e}")))?;
        let defs = match doc {
            DocumentDef::Many(v) => v,
            DocumentDef::One(n) => vec![*n],
        };
        let roots = defs
            .into_iter()
            .map(|d| d.into_root())
            .collect::<BdResult<Vec<_>>>()?;
        Ok(Self { roots })
    }

    /// Number of leaf elements across all roots.
    pub fn element_count(&self) -> usize {
        fn count(nodes: &[SceneNode]) -> usize {
            nodes
                .iter()
                .map(|n| match n {
                    SceneNode::Element(_) => 1,
                    SceneNode::Group(g) => count(&g.children),
                })
                .sum()
        }
        self.roots.iter().map(|r| count(&r.children)).sum()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentDef {
    Many(Vec<NodeDef>),
    One(Box<NodeDef>),
}

#[derive(Debug, Default, Deserialize)]
struct TagHeadDef {
    #[serde(rename = "Value", default)]
    value: Option<String>,
}

/// Editor export node. Unknown fields (names, ids, block states, ...) are ignored.
#[derive(Debug, Default, Deserialize)]
struct NodeDef {
    #[serde(rename = "isCollection", default)]
    is_collection: bool,
    #[serde(rename = "isItemDisplay", default)]
    is_item_display: bool,
    #[serde(rename = "isBlockDisplay", default)]
    is_block_display: bool,
    #[serde(rename = "isTextDisplay", default)]
    is_text_display: bool,
    #[serde(default)]
    transforms: Option<Vec<f64>>,
    #[serde(default)]
    nbt: Option<String>,
    #[serde(rename = "tagHead", default)]
    tag_head: Option<TagHeadDef>,
    #[serde(rename = "customTexture", default)]
    custom_texture: Option<String>,
    #[serde(default)]
    children: Vec<NodeDef>,
}

impl NodeDef {
    fn kind(&self) -> Option<DisplayKind> {
        if self.is_item_display {
            Some(DisplayKind::Item)
        } else if self.is_block_display {
            Some(DisplayKind::Block)
        } else if self.is_text_display {
            Some(DisplayKind::Text)
        } else {
            None
        }
    }

    fn local(&self) -> BdResult<Mat4> {
        match &self.transforms {
            None => Ok(Mat4::IDENTITY),
            Some(v) => Mat4::from_slice(v).ok_or_else(|| {
                BdError::decode(format!("transforms must hold 16 values, got {}", v.len()))
            }),
        }
    }

    // `tagHead.Value` wins over `customTexture`; empty strings count as absent.
    fn texture(&self) -> Option<String> {
        let head = self.tag_head.as_ref().and_then(|h| h.value.as_deref());
        head.or(self.custom_texture.as_deref())
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
    }

    fn into_root(self) -> BdResult<GroupNode> {
        let local = self.local()?;
        let children = convert_children(self.children)?;
        Ok(GroupNode { local, children })
    }

    fn into_node(self) -> BdResult<Option<SceneNode>> {
        if let Some(kind) = self.kind() {
            let local = self.local()?;
            let texture = self.texture();
            return Ok(Some(SceneNode::Element(ElementNode {
                kind,
                local,
                descriptor: self.nbt.unwrap_or_default(),
                texture,
            })));
        }
        if self.is_collection {
            return Ok(Some(SceneNode::Group(self.into_root()?)));
        }
        Ok(None)
    }
}

fn convert_children(defs: Vec<NodeDef>) -> BdResult<Vec<SceneNode>> {
    let mut out = Vec::with_capacity(defs.len());
    for def in defs {
        if let Some(node) = def.into_node()? {
            out.push(node);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
