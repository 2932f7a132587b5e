use super::*;
use crate::scene::model::GroupNode;

fn element(descriptor: &str, local: Mat4) -> SceneNode {
    SceneNode::Element(ElementNode {
        kind: DisplayKind::Item,
        local,
        descriptor: descriptor.to_owned(),
        texture: None,
    })
}

#[test]
fn single_child_under_identity_root() {
    let graph = SceneGraph {
        roots: vec![GroupNode {
            local: Mat4::IDENTITY,
            children: vec![element("", Mat4::translation(1.0, 0.0, 0.0))],
        }],
    };
    let out = resolve(&graph);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].transform, Mat4::translation(1.0, 0.0, 0.0));
    assert_eq!(out[0].selector, Selector::Raw(String::new()));
}

#[test]
fn nested_groups_compose_parent_first() {
    let graph = SceneGraph {
        roots: vec![GroupNode {
            local: Mat4::scale(2.0, 2.0, 2.0),
            children: vec![SceneNode::Group(GroupNode {
                local: Mat4::translation(1.0, 0.0, 0.0),
                children: vec![element("{Tags:[leaf]}", Mat4::translation(0.0, 1.0, 0.0))],
            })],
        }],
    };
    let out = resolve(&graph);
    let expected = Mat4::scale(2.0, 2.0, 2.0)
        .then(Mat4::translation(1.0, 0.0, 0.0))
        .then(Mat4::translation(0.0, 1.0, 0.0));
    assert_eq!(out[0].transform, expected);
    assert_eq!(out[0].transform.at(0, 3), 2.0);
    assert_eq!(out[0].transform.at(1, 3), 2.0);
    assert_eq!(out[0].selector_key, "leaf");
}

#[test]
fn traversal_is_pre_order_and_keeps_sibling_order() {
    let graph = SceneGraph {
        roots: vec![
            GroupNode {
                local: Mat4::IDENTITY,
                children: vec![
                    element("{Tags:[a]}", Mat4::IDENTITY),
                    SceneNode::Group(GroupNode {
                        local: Mat4::IDENTITY,
                        children: vec![element("{Tags:[b]}", Mat4::IDENTITY)],
                    }),
                    element("{Tags:[c]}", Mat4::IDENTITY),
                ],
            },
            GroupNode {
                local: Mat4::IDENTITY,
                children: vec![element("{Tags:[d]}", Mat4::IDENTITY)],
            },
        ],
    };
    let keys: Vec<_> = resolve(&graph)
        .into_iter()
        .map(|e| e.selector_key)
        .collect();
    assert_eq!(keys, vec!["a", "b", "c", "d"]);
}

#[test]
fn uuid_descriptor_resolves_to_identity_key() {
    let graph = SceneGraph {
        roots: vec![GroupNode {
            local: Mat4::IDENTITY,
            children: vec![element("{UUID:[I;1,2,3,4],Tags:[x]}", Mat4::IDENTITY)],
        }],
    };
    let out = resolve(&graph);
    assert_eq!(out[0].selector_key, "1-0-2-3-4");
}
