//! Command line generation.
//!
//! Lines are kept as a structured [`CommandLine`] (addressing + action) until they are written,
//! so deduplication can strip or rewrite payloads without touching rendered text.

use crate::foundation::math::transformation_text;
use crate::scene::descriptor::Selector;
use crate::scene::model::DisplayKind;
use crate::scene::resolve::ResolvedElement;
use std::fmt;

/// Execution strategy for generated lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// `0`: lines run as the animated entity and guard on `@s`.
    #[default]
    Context,
    /// `1`: lines address their entity directly with a single-result selector.
    Direct,
}

impl TryFrom<u8> for Mode {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Context),
            1 => Ok(Self::Direct),
            other => Err(format!("mode must be 0 or 1, got {other}")),
        }
    }
}

/// Per-frame generation context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitContext {
    pub mode: Mode,
    pub interpolation: Option<u32>,
}

/// Entity addressing of a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// `execute if entity @s[tag=..,type=..] run ... @s`
    TaggedSelf {
        tags: Vec<String>,
        kind: DisplayKind,
    },
    /// `@e[limit=1,tag=..,type=..]`
    Tagged {
        tags: Vec<String>,
        kind: DisplayKind,
    },
    /// Canonical hyphenated entity identity, used as the entity argument as-is.
    Identity(String),
    /// `execute as <target> run ... @s`
    ContextAs(String),
    /// Single-result selector (or verbatim descriptor) as the entity argument.
    Direct(String),
}

impl Target {
    /// Optional `execute ... run ` guard and the entity argument of the command.
    fn parts(&self) -> (Option<String>, String) {
        match self {
            Self::TaggedSelf { tags, kind } => (
                Some(format!(
                    "execute if entity @s[{},type={}] run ",
                    tag_filters(tags),
                    kind.entity_type()
                )),
                "@s".to_owned(),
            ),
            Self::Tagged { tags, kind } => (
                None,
                format!(
                    "@e[limit=1,{},type={}]",
                    tag_filters(tags),
                    kind.entity_type()
                ),
            ),
            Self::Identity(id) => (None, id.clone()),
            Self::ContextAs(target) => (Some(format!("execute as {target} run ")), "@s".to_owned()),
            Self::Direct(target) => (None, target.clone()),
        }
    }
}

fn tag_filters(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("tag={t}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Transform part of a merge payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformPayload {
    /// `transformation:[...]`, compared verbatim across frames.
    pub text: String,
    pub interpolation: Option<u32>,
}

/// What a line does to its target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// `data merge entity <e> {...}`
    Merge {
        transform: Option<TransformPayload>,
        texture: Option<String>,
    },
    /// `item replace entity <e> container.0 with player_head[...]`
    ReplaceHead { texture: String },
}

/// One generated command, rendered by its `Display` impl.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    /// Selector key the deduplicator tracks this line under.
    pub key: String,
    pub target: Target,
    pub action: Action,
}

impl CommandLine {
    pub fn transform_text(&self) -> Option<&str> {
        match &self.action {
            Action::Merge { transform, .. } => transform.as_ref().map(|t| t.text.as_str()),
            Action::ReplaceHead { .. } => None,
        }
    }

    pub fn texture(&self) -> Option<&str> {
        match &self.action {
            Action::Merge { texture, .. } => texture.as_deref(),
            Action::ReplaceHead { texture } => Some(texture),
        }
    }

    /// A merge with nothing left to merge.
    pub fn is_empty(&self) -> bool {
        matches!(
            self.action,
            Action::Merge {
                transform: None,
                texture: None
            }
        )
    }

    pub fn without_texture(mut self) -> Self {
        if let Action::Merge { texture, .. } = &mut self.action {
            *texture = None;
        }
        self
    }

    /// Swap a merge for a head-slot replacement of its texture. Interpolation and transform
    /// payloads are dropped. `None` when the line carries no texture.
    pub fn into_head_replacement(self) -> Option<Self> {
        let texture = self.texture()?.to_owned();
        Some(Self {
            key: self.key,
            target: self.target,
            action: Action::ReplaceHead { texture },
        })
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (guard, entity) = self.target.parts();
        if let Some(guard) = guard {
            f.write_str(&guard)?;
        }
        match &self.action {
            Action::Merge { transform, texture } => {
                let mut fields = Vec::with_capacity(3);
                if let Some(t) = transform {
                    if let Some(n) = t.interpolation {
                        fields.push(format!("start_interpolation: 0, interpolation_duration: {n}"));
                    }
                    fields.push(t.text.clone());
                }
                if let Some(tex) = texture {
                    fields.push(format!(
                        r#"item:{{id:player_head,components:{{"profile":{{properties:[{{name:textures,value:"{tex}"}}]}}}}}}"#
                    ));
                }
                write!(f, "data merge entity {entity} {{{}}}", fields.join(", "))
            }
            Action::ReplaceHead { texture } => write!(
                f,
                r#"item replace entity {entity} container.0 with player_head[profile={{properties:[{{name:"textures",value:"{texture}"}}]}}]"#
            ),
        }
    }
}

/// Build the candidate line for one resolved element.
pub fn emit(el: &ResolvedElement, ctx: &EmitContext) -> CommandLine {
    let target = match (&el.selector, ctx.mode) {
        (Selector::Tags(tags), Mode::Context) => Target::TaggedSelf {
            tags: tags.clone(),
            kind: el.kind,
        },
        (Selector::Tags(tags), Mode::Direct) => Target::Tagged {
            tags: tags.clone(),
            kind: el.kind,
        },
        (Selector::Identity(id), _) => Target::Identity(id.clone()),
        (Selector::Raw(_), Mode::Context) => Target::ContextAs(generic_target(el)),
        (Selector::Raw(_), Mode::Direct) => Target::Direct(generic_target(el)),
    };
    CommandLine {
        key: el.selector_key.clone(),
        target,
        action: Action::Merge {
            transform: Some(TransformPayload {
                text: transformation_text(&el.transform),
                interpolation: ctx.interpolation,
            }),
            texture: el.texture.clone(),
        },
    }
}

fn generic_target(el: &ResolvedElement) -> String {
    let ty = el.kind.entity_type();
    let d = el.descriptor.trim();
    if d.is_empty() {
        format!("@e[type={ty},limit=1]")
    } else if d.starts_with('{') {
        format!("@e[type={ty},limit=1,nbt={d}]")
    } else {
        d.to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/command.rs"]
mod tests;
