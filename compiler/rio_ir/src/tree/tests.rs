use super::*;
use pretty_assertions::assert_eq;

fn int(tree: &mut Tree, n: i32) -> NodeId {
    let info = tree.next_info(Span::DUMMY);
    let node = tree.add(ValueNode {
        info,
        value: Literal::Int(n),
    });
    tree.push_node(node)
}

#[test]
fn test_sentinels() {
    let tree = Tree::new();
    assert_eq!(tree.kind(NodeId::NONE), NodeKind::None);
    assert!(tree.get::<Fun>(NodeId::NONE).is_none());
    assert_eq!(tree.id_info(NodeId::NONE), NodeInfo::default());
}

#[test]
fn test_typed_access_checks_kind() {
    let mut tree = Tree::new();
    let id = int(&mut tree, 7);
    assert_eq!(
        tree.get::<ValueNode>(id).map(|v| v.value.clone()),
        Some(Literal::Int(7))
    );
    assert!(tree.get::<Var>(id).is_none());
}

#[test]
fn test_creation_index_counts_up() {
    let mut tree = Tree::new();
    let a = int(&mut tree, 1);
    let b = int(&mut tree, 2);
    assert_eq!(tree.id_info(a).index, 1);
    assert_eq!(tree.id_info(b).index, 2);
}

#[test]
fn test_append_range() {
    let mut tree = Tree::new();
    let info = tree.next_info(Span::DUMMY);
    let a = tree.add(ValueNode {
        info,
        value: Literal::Bool(true),
    });
    let info = tree.next_info(Span::DUMMY);
    let b = tree.add(ValueNode {
        info,
        value: Literal::Bool(false),
    });
    let range = tree.append([a, b]);
    assert_eq!(range.len(), 2);
    let ids: Vec<NodeId> = range.ids().collect();
    assert_eq!(ids, vec![NodeId::new(1), NodeId::new(2)]);
    assert_eq!(range.get(5), NodeId::NONE);
}

#[test]
fn test_replace_rewrites_in_place() {
    let mut tree = Tree::new();
    let id = int(&mut tree, 3);
    let info = tree.id_info(id);
    tree.replace(
        id,
        Ref {
            info,
            target: NodeId::new(9),
        },
    );
    assert_eq!(tree.kind(id), NodeKind::Ref);
    assert_eq!(tree.get::<Ref>(id).map(|r| r.target), Some(NodeId::new(9)));
}

#[test]
fn test_flags_through_info_mut() {
    let mut tree = Tree::new();
    let id = int(&mut tree, 0);
    let node = tree.node(id);
    if let Some(info) = tree.info_mut(node) {
        info.flags |= NodeFlags::PUB;
    }
    assert!(tree.id_info(id).flags.contains(NodeFlags::PUB));
}

#[test]
fn test_clear() {
    let mut tree = Tree::new();
    int(&mut tree, 1);
    tree.clear();
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.next_info(Span::DUMMY).index, 1);
}
