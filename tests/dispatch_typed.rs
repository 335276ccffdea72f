use std::collections::HashMap;

use kasane::{Args, ClassDef, FnSpec, Overloader, ParamSpec, Value};

#[test]
fn specific_over_generic() {
    let mut ov = Overloader::new();
    ov.register(FnSpec::new("foo", [ParamSpec::typed("a", "Str")], |args| {
        Ok(Value::str(format!("str:{}", args[0])))
    }))
    .unwrap();
    ov.register(FnSpec::new("foo", [ParamSpec::typed("a", "Num")], |args| {
        Ok(Value::str(format!("float:{}", args[0])))
    }))
    .unwrap();
    ov.register(FnSpec::new("foo", [ParamSpec::pos("a")], |args| {
        Ok(Value::str(format!("generic:{}", args[0])))
    }))
    .unwrap();

    assert_eq!(
        ov.call("foo", Args::positional([Value::str("ing")])).unwrap(),
        Value::str("str:ing")
    );
    assert_eq!(
        ov.call("foo", Args::positional([Value::Num(3.14)])).unwrap(),
        Value::str("float:3.14")
    );
    // Anything neither Str nor Num falls through to the untyped catch-all.
    assert_eq!(
        ov.call("foo", Args::positional([Value::Bool(true)])).unwrap(),
        Value::str("generic:True")
    );
}

#[test]
fn partial_constraints_rank_between_full_and_none() {
    let mut ov = Overloader::new();
    ov.register(FnSpec::new(
        "foo",
        [ParamSpec::pos("a"), ParamSpec::pos("b"), ParamSpec::pos("c")],
        |_| Ok(Value::str("||")),
    ))
    .unwrap();
    ov.register(FnSpec::new(
        "foo",
        [
            ParamSpec::typed("a", "Str"),
            ParamSpec::typed("b", "Int"),
            ParamSpec::typed("c", "Array"),
        ],
        |_| Ok(Value::str("str|int|array")),
    ))
    .unwrap();
    ov.register(FnSpec::new(
        "foo",
        [ParamSpec::typed("a", "Str"), ParamSpec::pos("b"), ParamSpec::typed("c", "Array")],
        |_| Ok(Value::str("str||array")),
    ))
    .unwrap();

    let arr = || Value::array(vec![Value::Int(3), Value::Int(4)]);
    assert_eq!(
        ov.call("foo", Args::positional([Value::str(""), Value::Int(0), arr()])).unwrap(),
        Value::str("str|int|array")
    );
    assert_eq!(
        ov.call("foo", Args::positional([Value::str(""), Value::Bool(false), arr()])).unwrap(),
        Value::str("str||array")
    );
    assert_eq!(
        ov.call("foo", Args::positional([Value::Int(0), Value::Int(-1), Value::Int(0)])).unwrap(),
        Value::str("||")
    );
}

#[test]
fn int_widens_to_num() {
    let mut ov = Overloader::new();
    ov.register(FnSpec::new(
        "add",
        [ParamSpec::typed("a", "Num"), ParamSpec::typed("b", "Num")],
        |args| {
            let as_num = |v: &Value| match v {
                Value::Int(n) => *n as f64,
                Value::Num(n) => *n,
                other => panic!("expected numeric, got {:?}", other),
            };
            Ok(Value::Num(as_num(&args[0]) + as_num(&args[1])))
        },
    ))
    .unwrap();

    assert_eq!(
        ov.call("add", Args::positional([Value::Int(2), Value::Num(0.5)])).unwrap(),
        Value::Num(2.5)
    );
}

#[test]
fn element_checked_parameterized_constraints() {
    let mut ov = Overloader::new();
    ov.register(FnSpec::new("first", [ParamSpec::typed("arr", "Array[Int]")], |args| {
        match &args[0] {
            Value::Array(items) => Ok(items.first().cloned().unwrap_or(Value::Nil)),
            other => panic!("expected Array, got {:?}", other),
        }
    }))
    .unwrap();

    let ints = Value::array(vec![Value::Int(7), Value::Int(8)]);
    assert_eq!(ov.call("first", Args::positional([ints])).unwrap(), Value::Int(7));

    let strs = Value::array(vec![Value::str("x")]);
    assert!(ov.call("first", Args::positional([strs])).unwrap_err().is_no_match());
}

#[test]
fn unchecked_parameterized_constraints_are_permissive() {
    let mut ov = Overloader::new();
    ov.register(FnSpec::new("peek", [ParamSpec::typed("s", "Seq[Int]")], |args| {
        Ok(args[0].clone())
    }))
    .unwrap();

    // No structural check exists for Seq[...]; the constraint is treated
    // as satisfied rather than rejected.
    assert_eq!(
        ov.call("peek", Args::positional([Value::str("anything")])).unwrap(),
        Value::str("anything")
    );
}

#[test]
fn class_hierarchy_feeds_constraints() {
    let mut ov = Overloader::new();
    ov.register_class(ClassDef::new("Animal")).unwrap();
    ov.register_class(ClassDef::extending("Dog", ["Animal"])).unwrap();

    ov.register(FnSpec::new("describe", [ParamSpec::typed("x", "Animal")], |_| {
        Ok(Value::str("animal"))
    }))
    .unwrap();
    ov.register(FnSpec::new("describe", [ParamSpec::pos("x")], |_| Ok(Value::str("other"))))
        .unwrap();

    let dog = Value::make_instance("Dog", HashMap::new());
    assert_eq!(
        ov.call("describe", Args::positional([dog])).unwrap(),
        Value::str("animal")
    );
    assert_eq!(
        ov.call("describe", Args::positional([Value::Int(1)])).unwrap(),
        Value::str("other")
    );
}

#[test]
fn declared_return_type_accepts_conforming_results() {
    let mut ov = Overloader::new();
    ov.register(
        FnSpec::new("greet", [ParamSpec::typed("name", "Str")], |args| {
            Ok(Value::str(format!("hello {}", args[0])))
        })
        .returning("Str"),
    )
    .unwrap();

    assert_eq!(
        ov.call("greet", Args::positional([Value::str("world")])).unwrap(),
        Value::str("hello world")
    );
}
