//! Tests for descriptor and value parsing.

use gentype_solver::ContainerKind;

use super::*;

fn ty(source: &str) -> TypeDesc {
    parse_type(source, &ClassHierarchy::new()).unwrap()
}

fn value(source: &str) -> Value {
    parse_value(source, &ClassHierarchy::new()).unwrap()
}

// =============================================================================
// Types
// =============================================================================

#[test]
fn test_parse_plain_types() {
    assert_eq!(ty("int"), TypeDesc::INT);
    assert_eq!(ty("None"), TypeDesc::NONE);
    assert_eq!(ty("builtins.str"), TypeDesc::STR);
    assert_eq!(ty("list"), TypeDesc::plain(TypeId::LIST));
}

#[test]
fn test_parse_containers_and_aliases() {
    assert_eq!(ty("list[int]"), TypeDesc::list(TypeDesc::INT));
    assert_eq!(ty("typing.List[int]"), TypeDesc::list(TypeDesc::INT));
    assert_eq!(
        ty("collections.abc.Iterable[str]"),
        TypeDesc::iterable(TypeDesc::STR)
    );
    assert_eq!(
        ty("Dict[str, List[int]]"),
        TypeDesc::dict(TypeDesc::STR, TypeDesc::list(TypeDesc::INT))
    );
    assert_eq!(
        ty("Sequence[Collection[float]]"),
        TypeDesc::sequence(TypeDesc::container(ContainerKind::Collection, TypeDesc::FLOAT))
    );
}

#[test]
fn test_parse_tuples() {
    assert_eq!(
        ty("tuple[int, str]"),
        TypeDesc::tuple([TypeDesc::INT, TypeDesc::STR])
    );
    assert_eq!(ty("Tuple[int, ...]"), TypeDesc::variadic_tuple(TypeDesc::INT));
    // Shape is validated by the relations, not the parser.
    assert_eq!(
        ty("tuple[..., int]"),
        TypeDesc::parameterized(Origin::Tuple, [TypeArg::Ellipsis, TypeArg::Type(TypeDesc::INT)])
    );
}

#[test]
fn test_parse_unions() {
    let int_or_str = TypeDesc::union([TypeDesc::INT, TypeDesc::STR]);
    assert_eq!(ty("Union[int, str]"), int_or_str);
    assert_eq!(ty("int | str"), int_or_str);
    assert_eq!(ty("Optional[int]"), TypeDesc::optional(TypeDesc::INT));
    assert_eq!(ty("int | None"), TypeDesc::optional(TypeDesc::INT));
    assert_eq!(
        ty("list[int | str]"),
        TypeDesc::list(TypeDesc::union([TypeDesc::INT, TypeDesc::STR]))
    );
}

#[test]
fn test_parse_literals() {
    assert_eq!(
        ty("Literal['a', 1, -2, True, None]"),
        TypeDesc::literal([
            Value::str("a"),
            Value::Int(1),
            Value::Int(-2),
            Value::Bool(true),
            Value::None,
        ])
    );
}

#[test]
fn test_parse_bare_special_forms() {
    assert_eq!(ty("Union"), TypeDesc::parameterized(Origin::Union, []));
    assert_eq!(
        parse_type("Optional", &ClassHierarchy::new()),
        Err(ParseError::ArgumentCount {
            name: "Optional".to_owned(),
            expected: 1,
            found: 0,
            offset: 0,
        })
    );
    assert!(matches!(
        parse_type("Optional[int, str]", &ClassHierarchy::new()),
        Err(ParseError::ArgumentCount { found: 2, .. })
    ));
}

#[test]
fn test_parse_user_classes() {
    let hierarchy = ClassHierarchy::new();
    let node = hierarchy.define_class("TreeNode", &[]).unwrap();

    assert_eq!(
        parse_type("TreeNode[int]", &hierarchy),
        Ok(TypeDesc::generic(node, [TypeDesc::INT]))
    );
    assert_eq!(
        parse_type("list[Leaf]", &hierarchy),
        Err(ParseError::UnknownName {
            name: "Leaf".to_owned(),
            offset: 5,
        })
    );
}

#[test]
fn test_parse_type_errors() {
    let hierarchy = ClassHierarchy::new();
    assert_eq!(
        parse_type("list[int", &hierarchy),
        Err(ParseError::Expected {
            expected: "`]`",
            found: SyntaxKind::EndOfFileToken,
            offset: 8,
        })
    );
    assert!(matches!(
        parse_type("int str", &hierarchy),
        Err(ParseError::Expected {
            expected: "end of input",
            ..
        })
    ));
    assert!(matches!(
        parse_type("[int]", &hierarchy),
        Err(ParseError::Expected { expected: "a type", offset: 0, .. })
    ));
}

#[test]
fn test_formatted_descriptor_parses_back() {
    let hierarchy = ClassHierarchy::new();
    let formatter = gentype_solver::TypeFormatter::new(&hierarchy);
    let original = TypeDesc::mapping(
        TypeDesc::STR,
        TypeDesc::union([
            TypeDesc::variadic_tuple(TypeDesc::INT),
            TypeDesc::literal([Value::str("x\n")]),
            TypeDesc::NONE,
        ]),
    );

    let text = formatter.format(&original);
    assert_eq!(parse_type(&text, &hierarchy), Ok(original));
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn test_parse_scalars() {
    assert_eq!(value("None"), Value::None);
    assert_eq!(value("True"), Value::Bool(true));
    assert_eq!(value("-7"), Value::Int(-7));
    assert_eq!(value("2.5"), Value::Float(2.5));
    assert_eq!(value("-0.5"), Value::Float(-0.5));
    assert_eq!(value("\"hi\""), Value::str("hi"));
    assert_eq!(value("-9223372036854775808"), Value::Int(i64::MIN));
}

#[test]
fn test_parse_collections() {
    assert_eq!(
        value("[1, [2, 3]]"),
        Value::List(vec![
            Value::Int(1),
            Value::List(vec![Value::Int(2), Value::Int(3)])
        ])
    );
    assert_eq!(value("()"), Value::Tuple(vec![]));
    assert_eq!(value("(1,)"), Value::Tuple(vec![Value::Int(1)]));
    assert_eq!(value("(1)"), Value::Int(1));
    assert_eq!(
        value("(1, 'a')"),
        Value::Tuple(vec![Value::Int(1), Value::str("a")])
    );
    assert_eq!(
        value("{'a': 1, 'b': None}"),
        Value::Dict(vec![
            (Value::str("a"), Value::Int(1)),
            (Value::str("b"), Value::None),
        ])
    );
}

#[test]
fn test_parse_objects() {
    let hierarchy = ClassHierarchy::new();
    let point = hierarchy.define_class("Point", &[]).unwrap();
    let my_list = hierarchy.define_class("MyList", &[TypeId::LIST]).unwrap();

    assert_eq!(
        parse_value("Point(x=1, y=2)", &hierarchy),
        Ok(Value::object(
            Object::new(point)
                .with_field("x", Value::Int(1))
                .with_field("y", Value::Int(2))
        ))
    );
    assert_eq!(
        parse_value("MyList([1, 2])", &hierarchy),
        Ok(Value::object(
            Object::new(my_list).with_items(vec![Value::Int(1), Value::Int(2)])
        ))
    );
    assert!(matches!(
        parse_value("Ghost()", &hierarchy),
        Err(ParseError::UnknownName { .. })
    ));
}

#[test]
fn test_parse_value_errors() {
    let hierarchy = ClassHierarchy::new();
    assert!(matches!(
        parse_value("99999999999999999999", &hierarchy),
        Err(ParseError::InvalidNumber { offset: 0, .. })
    ));
    assert!(matches!(
        parse_value("{'a' 1}", &hierarchy),
        Err(ParseError::Expected { expected: "`:`", .. })
    ));
    assert!(matches!(
        parse_value("-'a'", &hierarchy),
        Err(ParseError::Expected { expected: "a number", .. })
    ));
}
