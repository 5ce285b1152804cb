use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_primitives_at_fixed_indices() {
    let mut pool = Pool::new();
    assert_eq!(pool.intern(TypeData::Int), Idx::INT);
    assert_eq!(pool.intern(TypeData::Never), Idx::NEVER);
    assert_eq!(pool.len(), Idx::PRIMITIVE_COUNT);
}

#[test]
fn test_structural_interning() {
    let mut pool = Pool::new();
    let a = pool.fun(&[Idx::INT, Idx::INT], Idx::BOOL);
    let b = pool.fun(&[Idx::INT, Idx::INT], Idx::BOOL);
    let c = pool.fun(&[Idx::INT], Idx::BOOL);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(pool.fun_parts(a), Some((&[Idx::INT, Idx::INT][..], Idx::BOOL)));
}

#[test]
fn test_type_of_type() {
    let mut pool = Pool::new();
    let t = pool.type_of_type(Idx::STRING);
    assert_eq!(pool.denoted(t), Some(Idx::STRING));
    assert_eq!(pool.denoted(Idx::STRING), None);
}

#[test]
fn test_methods() {
    let mut interner = crate::StringInterner::new();
    let add = interner.intern("add");
    let sub = interner.intern("sub");
    let mut pool = Pool::new();
    pool.set_methods(Idx::INT, [(add, NodeId::new(4))].into_iter().collect());
    let record = pool.methods(Idx::INT);
    assert_eq!(record.and_then(|r| r.member(add)), Some(NodeId::new(4)));
    assert_eq!(record.and_then(|r| r.member(sub)), None);
    assert!(pool.methods(Idx::STRING).is_none());
}

#[test]
fn test_record_first_member_wins() {
    let mut interner = crate::StringInterner::new();
    let add = interner.intern("add");
    let sub = interner.intern("sub");
    let mut record = Record::new();
    assert!(record.insert(sub, NodeId::new(2)));
    assert!(record.insert(add, NodeId::new(3)));
    assert!(!record.insert(sub, NodeId::new(9)));
    assert_eq!(record.member(sub), Some(NodeId::new(2)));
    assert_eq!(record.members(), &[(sub, NodeId::new(2)), (add, NodeId::new(3))]);

    let same: Record = [(sub, NodeId::new(2)), (add, NodeId::new(3))].into_iter().collect();
    let mut pool = Pool::new();
    assert_eq!(
        pool.intern(TypeData::Record(record)),
        pool.intern(TypeData::Record(same))
    );
}

#[test]
fn test_display() {
    let mut pool = Pool::new();
    let fun = pool.fun(&[Idx::INT, Idx::STRING], Idx::VOID);
    let ty = pool.type_of_type(Idx::INT);
    let list = pool.list(ty);
    assert_eq!(pool.display(fun).to_string(), "Fun(Int, String) Void");
    assert_eq!(pool.display(list).to_string(), "List(Type(Int))");
    assert_eq!(pool.display(Idx::NONE).to_string(), "None");
}

#[test]
fn test_clear_keeps_primitives() {
    let mut pool = Pool::new();
    pool.list(Idx::INT);
    pool.set_methods(Idx::INT, Record::default());
    pool.clear();
    assert_eq!(pool.len(), Idx::PRIMITIVE_COUNT);
    assert!(pool.methods(Idx::INT).is_none());
}
