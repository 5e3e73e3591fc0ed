use super::*;
use crate::diagnostics::{RelationError, RelationKind};
use crate::hierarchy::ClassHierarchy;
use crate::types::{ContainerKind, TypeDesc, TypeId};
use crate::value::Object;

fn tree_node(value: Value, children: Vec<Value>) -> impl Fn(TypeId) -> Value {
    move |class| {
        Value::object(
            Object::new(class)
                .with_field("value", value.clone())
                .with_field("children", Value::List(children.clone())),
        )
    }
}

/// `TreeNode[T]`: the payload conforms to `T` and so does every child.
fn register_tree_node(rules: &RuleRegistry, node: TypeId) {
    rules.register_instance_rule(Origin::Extension(node), move |checker, value, args| {
        let payload = checker.sole_argument(Origin::Extension(node), args)?;
        if !checker.host().is_instance(value, node) {
            return Ok(false);
        }
        let Some(inner) = value.field("value") else {
            return Ok(false);
        };
        if !checker.conforms_arg(inner, payload)? {
            return Ok(false);
        }
        let this = TypeDesc::parameterized(Origin::Extension(node), args.iter().cloned());
        for child in value.field("children").and_then(Value::items).unwrap_or_default() {
            if !checker.conforms(child, &this)? {
                return Ok(false);
            }
        }
        Ok(true)
    });
    rules.register_subtype_rule(Origin::Extension(node), move |checker, source, target| {
        let source_arg = checker.sole_argument(source.origin, &source.args)?;
        let target_arg = checker.sole_argument(target.origin, &target.args)?;
        if !checker
            .host()
            .is_subclass(checker.origin_type(source)?, checker.origin_type(target)?)
        {
            return Ok(false);
        }
        checker.is_subtype_arg(source_arg, target_arg)
    });
}

#[test]
fn test_builtin_tables() {
    let rules = RuleRegistry::with_builtins();

    for origin in [Origin::Union, Origin::Literal, Origin::Tuple] {
        assert!(rules.has_instance_rule(origin), "{origin:?}");
    }
    for kind in ContainerKind::ALL {
        assert!(rules.has_instance_rule(Origin::Container(kind)));
        assert!(rules.has_subtype_rule(Origin::Container(kind)));
    }
    for mapping in [TypeId::DICT, TypeId::MAPPING] {
        assert!(rules.has_instance_rule(Origin::Extension(mapping)));
        assert!(rules.has_subtype_rule(Origin::Extension(mapping)));
    }
    assert!(rules.has_subtype_rule(Origin::Tuple));
    // Resolved structurally before any lookup.
    assert!(!rules.has_subtype_rule(Origin::Union));
    assert!(!rules.has_subtype_rule(Origin::Literal));
}

#[test]
fn test_empty_registry_misses() {
    let hierarchy = ClassHierarchy::new();
    let rules = RuleRegistry::empty();
    let checker = RelationChecker::new(&hierarchy, &rules);

    assert!(!rules.has_instance_rule(Origin::Tuple));
    assert_eq!(
        checker.conforms(&Value::List(vec![]), &TypeDesc::list(TypeDesc::INT)),
        Err(RelationError::UnknownOrigin {
            origin: "list".to_owned(),
            relation: RelationKind::Instance,
        })
    );
    // Plain checks need no rules at all.
    assert_eq!(checker.conforms(&Value::Int(1), &TypeDesc::INT), Ok(true));
}

#[test]
fn test_registration_is_last_write_wins() {
    let hierarchy = ClassHierarchy::new();
    let rules = RuleRegistry::with_builtins();
    let flag = hierarchy.define_class("Flag", &[]).unwrap();
    let origin = Origin::Extension(flag);
    let flag_int = TypeDesc::generic(flag, [TypeDesc::INT]);
    let value = Value::object(Object::new(flag));

    assert!(rules.register_instance_rule(origin, |_, _, _| Ok(false)).is_none());
    assert!(rules.register_instance_rule(origin, |_, _, _| Ok(true)).is_some());

    let checker = RelationChecker::new(&hierarchy, &rules);
    assert_eq!(checker.conforms(&value, &flag_int), Ok(true));
}

#[test]
fn test_replaced_rule_can_be_restored() {
    let hierarchy = ClassHierarchy::new();
    let rules = RuleRegistry::with_builtins();
    let origin = Origin::Container(ContainerKind::List);
    let list_int = TypeDesc::list(TypeDesc::INT);
    let strings = Value::List(vec![Value::str("a")]);

    let builtin = rules
        .register_instance_rule(origin, |_, _, _| Ok(true))
        .expect("list has a built-in rule");
    assert_eq!(
        RelationChecker::new(&hierarchy, &rules).conforms(&strings, &list_int),
        Ok(true)
    );

    rules.register_instance_rule(origin, move |checker, value, args| builtin(checker, value, args));
    assert_eq!(
        RelationChecker::new(&hierarchy, &rules).conforms(&strings, &list_int),
        Ok(false)
    );
}

// =============================================================================
// Extension round trip
// =============================================================================

#[test]
fn test_tree_node_instance() {
    let hierarchy = ClassHierarchy::new();
    let rules = RuleRegistry::with_builtins();
    let node = hierarchy.define_class("TreeNode", &[]).unwrap();
    register_tree_node(&rules, node);
    let checker = RelationChecker::new(&hierarchy, &rules);

    let leaf = |n: i64| tree_node(Value::Int(n), vec![])(node);
    let tree = tree_node(Value::Int(1), vec![leaf(2), leaf(3)])(node);
    let mixed = tree_node(
        Value::Int(1),
        vec![leaf(2), tree_node(Value::str("x"), vec![])(node)],
    )(node);

    let node_int = TypeDesc::generic(node, [TypeDesc::INT]);
    let node_str = TypeDesc::generic(node, [TypeDesc::STR]);

    assert_eq!(checker.conforms(&tree, &node_int), Ok(true));
    assert_eq!(checker.conforms(&tree, &node_str), Ok(false));
    assert_eq!(checker.conforms(&mixed, &node_int), Ok(false));
    assert_eq!(checker.conforms(&Value::Int(1), &node_int), Ok(false));
    assert_eq!(
        checker.conforms(&Value::List(vec![tree]), &TypeDesc::list(node_int)),
        Ok(true)
    );
}

#[test]
fn test_tree_node_subtype() {
    let hierarchy = ClassHierarchy::new();
    let rules = RuleRegistry::with_builtins();
    let node = hierarchy.define_class("TreeNode", &[]).unwrap();
    register_tree_node(&rules, node);
    let checker = RelationChecker::new(&hierarchy, &rules);

    let node_int = TypeDesc::generic(node, [TypeDesc::INT]);
    let node_bool = TypeDesc::generic(node, [TypeDesc::BOOL]);
    let node_str = TypeDesc::generic(node, [TypeDesc::STR]);

    assert_eq!(checker.is_subtype(&node_int, &node_int), Ok(true));
    assert_eq!(checker.is_subtype(&node_int, &node_str), Ok(false));
    assert_eq!(checker.is_subtype(&node_bool, &node_int), Ok(true));
    assert_eq!(
        checker.is_subtype(&node_int, &TypeDesc::union([node_str, node_int.clone()])),
        Ok(true)
    );
}

#[test]
fn test_unregistered_origin_fails_loudly() {
    let hierarchy = ClassHierarchy::new();
    let rules = RuleRegistry::with_builtins();
    let node = hierarchy.define_class("TreeNode", &[]).unwrap();
    let checker = RelationChecker::new(&hierarchy, &rules);
    let value = tree_node(Value::Int(1), vec![])(node);

    assert_eq!(
        checker.conforms(&value, &TypeDesc::generic(node, [TypeDesc::INT])),
        Err(RelationError::UnknownOrigin {
            origin: "TreeNode".to_owned(),
            relation: RelationKind::Instance,
        })
    );
}

#[test]
fn test_rule_reentering_itself_is_a_cycle() {
    let hierarchy = ClassHierarchy::new();
    let rules = RuleRegistry::with_builtins();
    let knot = hierarchy.define_class("Knot", &[]).unwrap();
    let knot_int = Arc::new(TypeDesc::generic(knot, [TypeDesc::INT]));
    let inner = Arc::clone(&knot_int);
    rules.register_instance_rule(Origin::Extension(knot), move |checker, value, _| {
        checker.conforms(value, &inner)
    });

    let checker = RelationChecker::new(&hierarchy, &rules);
    assert_eq!(
        checker.conforms(&Value::Int(1), &knot_int),
        Err(RelationError::Cycle {
            descriptor: "Knot[int]".to_owned()
        })
    );
}
