use super::*;
use crate::foundation::math::Mat4;
use crate::scene::descriptor::parse_descriptor;

fn element(descriptor: &str, kind: DisplayKind, texture: Option<&str>) -> ResolvedElement {
    let parsed = parse_descriptor(descriptor);
    ResolvedElement {
        selector_key: parsed.selector.key(),
        selector: parsed.selector,
        kind,
        transform: Mat4::translation(1.0, 0.0, 0.0),
        texture: texture.map(str::to_owned),
        descriptor: parsed.text,
    }
}

const T: &str = "transformation:[1f,0f,0f,1f,0f,1f,0f,0f,0f,0f,1f,0f,0f,0f,0f,1f]";

#[test]
fn generic_mode_zero_addresses_acting_entity() {
    let line = emit(&element("", DisplayKind::Item, None), &EmitContext::default());
    assert_eq!(
        line.to_string(),
        format!("execute as @e[type=item_display,limit=1] run data merge entity @s {{{T}}}")
    );
}

#[test]
fn generic_mode_one_addresses_descriptor_directly() {
    let ctx = EmitContext {
        mode: Mode::Direct,
        interpolation: None,
    };
    let line = emit(&element("@e[name=dragon,limit=1]", DisplayKind::Block, None), &ctx);
    assert_eq!(
        line.to_string(),
        format!("data merge entity @e[name=dragon,limit=1] {{{T}}}")
    );
    let line = emit(&element("{CustomName:'x'}", DisplayKind::Block, None), &ctx);
    assert!(line
        .to_string()
        .starts_with("data merge entity @e[type=block_display,limit=1,nbt={CustomName:'x'}] "));
}

#[test]
fn tags_mode_zero_guards_on_self() {
    let line = emit(
        &element("{Tags:[body,arm]}", DisplayKind::Text, None),
        &EmitContext::default(),
    );
    assert_eq!(
        line.to_string(),
        format!(
            "execute if entity @s[tag=body,tag=arm,type=text_display] run data merge entity @s {{{T}}}"
        )
    );
    assert_eq!(line.key, "body,arm");
}

#[test]
fn tags_mode_one_caps_result_size() {
    let ctx = EmitContext {
        mode: Mode::Direct,
        interpolation: Some(4),
    };
    let line = emit(&element("{Tags:[body]}", DisplayKind::Item, None), &ctx);
    assert_eq!(
        line.to_string(),
        format!(
            "data merge entity @e[limit=1,tag=body,type=item_display] {{start_interpolation: 0, interpolation_duration: 4, {T}}}"
        )
    );
}

#[test]
fn identity_ignores_mode() {
    for mode in [Mode::Context, Mode::Direct] {
        let ctx = EmitContext {
            mode,
            interpolation: None,
        };
        let line = emit(&element("{UUID:[I;1,2,3,4]}", DisplayKind::Item, None), &ctx);
        assert_eq!(line.to_string(), format!("data merge entity 1-0-2-3-4 {{{T}}}"));
    }
}

#[test]
fn texture_is_appended_inside_payload() {
    let line = emit(
        &element("{Tags:[head]}", DisplayKind::Item, Some("abc=")),
        &EmitContext::default(),
    );
    assert!(line.to_string().ends_with(&format!(
        r#"{{{T}, item:{{id:player_head,components:{{"profile":{{properties:[{{name:textures,value:"abc="}}]}}}}}}}}"#
    )));
    assert_eq!(line.texture(), Some("abc="));
    assert_eq!(line.transform_text(), Some(T));
}

#[test]
fn head_replacement_keeps_guard_and_drops_transform() {
    let line = emit(
        &element("{Tags:[head]}", DisplayKind::Item, Some("abc=")),
        &EmitContext {
            mode: Mode::Context,
            interpolation: Some(2),
        },
    )
    .into_head_replacement()
    .unwrap();
    assert_eq!(
        line.to_string(),
        r#"execute if entity @s[tag=head,type=item_display] run item replace entity @s container.0 with player_head[profile={properties:[{name:"textures",value:"abc="}]}]"#
    );
    assert_eq!(line.transform_text(), None);
}

#[test]
fn head_replacement_for_direct_and_identity_targets() {
    let ctx = EmitContext {
        mode: Mode::Direct,
        interpolation: None,
    };
    let tagged = emit(&element("{Tags:[h]}", DisplayKind::Item, Some("t")), &ctx)
        .into_head_replacement()
        .unwrap();
    assert!(tagged
        .to_string()
        .starts_with("item replace entity @e[limit=1,tag=h,type=item_display] container.0 with "));
    let ident = emit(&element("{UUID:[I;1,2,3,4]}", DisplayKind::Item, Some("t")), &ctx)
        .into_head_replacement()
        .unwrap();
    assert!(ident
        .to_string()
        .starts_with("item replace entity 1-0-2-3-4 container.0 with "));
}

#[test]
fn head_replacement_requires_texture() {
    let line = emit(&element("", DisplayKind::Item, None), &EmitContext::default());
    assert!(line.into_head_replacement().is_none());
}

#[test]
fn stripping_texture_keeps_transform() {
    let line = emit(
        &element("{Tags:[head]}", DisplayKind::Item, Some("abc=")),
        &EmitContext::default(),
    )
    .without_texture();
    assert_eq!(line.texture(), None);
    assert!(!line.is_empty());
    assert!(!line.to_string().contains("player_head"));
}

#[test]
fn mode_from_integer() {
    assert_eq!(Mode::try_from(0).unwrap(), Mode::Context);
    assert_eq!(Mode::try_from(1).unwrap(), Mode::Direct);
    assert!(Mode::try_from(7).is_err());
}
