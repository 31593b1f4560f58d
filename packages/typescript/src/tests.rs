use std::rc::Rc;

use specgen_common::Generator;
use specgen_printer::{
    Accessor, IndentMiddleware, Indent, IndentStyle, PrinterConfig, PrinterMiddleware, SourceFile,
    Type,
};
use specgen_spec::Spec;

use crate::*;

fn render(statements: Vec<Statement>) -> String {
    render_with(statements, PrinterConfig::default())
}

fn render_with(statements: Vec<Statement>, config: PrinterConfig) -> String {
    let middleware: Rc<dyn PrinterMiddleware> = Rc::new(IndentMiddleware);
    SourceFile::new(statements)
        .print(config, vec![middleware])
        .expect("Failed to print")
}

fn render_expression(expression: Expression) -> String {
    render(vec![Statement::Expression(expression)])
}

const SPEC: &str = r#"
{
    "outDir": "out",
    "lang": { "ts": { "clazz": "User" } },
    "fields": [
        { "name": "id", "type": "integer", "comment": "identifier", "groups": [{ "name": "summary", "member": "user_id" }] },
        { "name": "name", "type": "string" }
    ]
}
"#;

#[test]
fn test_comments() {
    let result = render(vec![
        Statement::Comment("note".to_string()),
        Statement::BlockComment("eslint-disable".to_string()),
        Statement::DocComment(DocComment::new(
            Some("Thing".to_string()),
            vec![Annotation::param("a", Some("first")), Annotation::param("b", None)],
        )),
    ]);

    assert_eq!(
        result,
        "// note\n/* eslint-disable */\n/**\n * Thing\n *\n * @param a first\n * @param b\n */"
    );
}

#[test]
fn test_exported_class_with_members() {
    let result = render(vec![Statement::exported_class(
        "Foo",
        vec![
            Statement::member(vec![Modifier::Public, Modifier::Static], "x", Type::string()),
            Statement::member(vec![Modifier::Private, Modifier::Readonly], "y", Type::instance("Date")),
        ],
    )]);

    assert_eq!(
        result,
        "export class Foo {\n    public static x: string;\n    private readonly y: Date;\n}"
    );
}

#[test]
fn test_plain_class() {
    let result = render(vec![Statement::class(
        "Bar",
        vec![Statement::member(Vec::new(), "z", Type::any())],
    )]);
    assert_eq!(result, "class Bar {\n    z: any;\n}");
}

#[test]
fn test_method_with_and_without_return_type() {
    let result = render(vec![Statement::exported_class(
        "Foo",
        vec![
            Statement::method(
                vec![Modifier::Public],
                "constructor",
                None,
                vec![Argument::new("a", Type::string())],
                vec![Statement::assign(
                    LeftValue::Access(this_access("Foo", vec![Accessor::new("a", Type::string())])),
                    Expression::variable("a"),
                )],
            ),
            Statement::method(
                vec![Modifier::Public],
                "size",
                Some(Type::number()),
                Vec::new(),
                vec![Statement::Return(Expression::raw("1", Type::number()))],
            ),
        ],
    )]);

    println!("Generated code:\n{}", result);

    assert!(result.contains(
        "    public constructor(a: string) {\n        this.a = a;\n    }"
    ));
    assert!(result.contains("    public size(): number {\n        return 1;\n    }"));
}

#[test]
fn test_tab_indentation() {
    let config = PrinterConfig::new(Indent::new(1, IndentStyle::tab(1)));
    let result = render_with(
        vec![Statement::class(
            "Foo",
            vec![Statement::method(
                Vec::new(),
                "run",
                None,
                Vec::new(),
                vec![Statement::Expression(Expression::call("go", Type::any(), Vec::new()))],
            )],
        )],
        config,
    );

    assert_eq!(result, "class Foo {\n\trun() {\n\t\tgo();\n\t}\n}");
}

#[test]
fn test_access_uses_dot() {
    let path = this_access(
        "Foo",
        vec![
            Accessor::new("foo", Type::instance("Foo")),
            Accessor::new("bar", Type::instance("Bar")),
            Accessor::new("val", Type::string()),
        ],
    );
    assert_eq!(path.ty(), &Type::string());

    let result = render(vec![Statement::assign(
        LeftValue::Access(path),
        Expression::raw("123", Type::number()),
    )]);
    assert_eq!(result, "this.foo.bar.val = 123;");
}

#[test]
fn test_constructor_and_invocation() {
    let result = render_expression(Expression::construct(
        "Date",
        vec![Expression::call(
            "parseInt",
            Type::number(),
            vec![Expression::variable("s")],
        )],
    ));
    assert_eq!(result, "new Date(parseInt(s));");
}

#[test]
fn test_conditional_with_comparison() {
    let result = render_expression(Expression::conditional(
        Expression::unary(
            UnaryOperator::NotTripleEqual,
            Expression::variable("a"),
            Expression::raw("undefined", Type::undefined()),
        ),
        Expression::variable("a"),
        Expression::null(),
    ));
    assert_eq!(result, "a !== undefined ? a : null;");
}

#[test]
fn test_literals() {
    let list = render_expression(Expression::list(vec![
        Expression::raw("1", Type::number()),
        Expression::raw("2", Type::number()),
    ]));
    assert_eq!(list, "[1, 2];");

    let object = render_expression(Expression::object(vec![
        ("a".to_string(), Expression::raw("1", Type::number())),
        ("b".to_string(), Expression::null()),
    ]));
    assert_eq!(object, "{\"a\": 1, \"b\": null};");
}

#[test]
fn test_long_object_wraps() {
    let value = "v".repeat(45);
    let result = render(vec![Statement::Return(Expression::object(vec![
        ("a".to_string(), Expression::raw(value.as_str(), Type::any())),
        ("b".to_string(), Expression::raw(value.as_str(), Type::any())),
    ]))]);

    assert_eq!(
        result,
        format!("return {{\n    \"a\": {0},\n    \"b\": {0}\n}};", value)
    );
}

#[test]
fn test_expression_types() {
    assert_eq!(Expression::list(Vec::new()).ty(), Type::instance("any[]"));
    assert_eq!(Expression::object(Vec::new()).ty(), Type::any());
    assert_eq!(Expression::construct("User", Vec::new()).ty(), Type::instance("User"));
    assert!(NodeKind::ArgumentList.is_logical());
    assert!(!NodeKind::BlockComment.is_logical());
}

#[test]
fn test_ts_types() {
    assert_eq!(ts_type("integer"), "number");
    assert_eq!(ts_type("double"), "number");
    assert_eq!(ts_type("datetime"), "Date");
    assert_eq!(ts_type("Money"), "Money");
}

#[test]
fn test_generate_class() {
    let spec = Spec::from_json_str(SPEC).expect("Failed to parse spec");
    let result = TypeScriptGenerator::new()
        .generate(&spec, &PrinterConfig::default())
        .expect("Failed to generate");

    println!("Generated code:\n{}", result);

    assert!(result.starts_with(
        "// THIS FILE IS AUTO GENERATED\n\n/* eslint-disable */\n\nexport class User {\n"
    ));
    assert!(result.ends_with("    }\n}\n"));
    assert!(result.contains("    /**\n     * identifier\n     */\n    public id: number;\n    \n    public name: string;"));
    assert!(result.contains("     * @param id identifier\n     * @param name\n     */"));
    assert!(result.contains(
        "    public constructor(id: number, name: string) {\n        this.id = id;\n        this.name = name;\n    }"
    ));
    assert!(result.contains(
        "    public static fromObject(json: any): User {\n        return new User(json.hasOwnProperty('id') ? parseInt(json[\"id\"]) : null, json.hasOwnProperty('name') ? (json[\"name\"]).toString() : null);\n    }"
    ));
    assert!(result.contains(
        "        return new User(json.hasOwnProperty('user_id') ? parseInt(json[\"user_id\"]) : null, null);"
    ));
    assert!(result.contains(
        "    public toObject(): any {\n        return {\n            \"id\": this.id === null ? null : this.id,\n            \"name\": this.name === null ? null : this.name\n        };\n    }"
    ));
    assert!(result.contains(
        "    public toSummary(): any {\n        return {\"user_id\": this.id === null ? null : this.id};\n    }"
    ));
}

#[test]
fn test_generated_method_order() {
    let spec = Spec::from_json_str(SPEC).expect("Failed to parse spec");
    let result = TypeScriptGenerator::new()
        .generate(&spec, &PrinterConfig::default())
        .expect("Failed to generate");

    let order = [
        "public id:",
        "public name:",
        "public constructor(",
        "fromObject(",
        "fromSummary(",
        "toObject(",
        "toSummary(",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| result.find(needle).expect("Missing generated member"))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_generate_conversions() {
    let spec = Spec::from_json_str(
        r#"{ "outDir": ".", "lang": { "ts": { "clazz": "Event" } },
             "fields": [
                { "name": "at", "type": "datetime" },
                { "name": "ok", "type": "boolean" },
                { "name": "ratio", "type": "float" },
                { "name": "extra", "type": "Payload" }
             ] }"#,
    )
    .expect("Failed to parse spec");
    let result = TypeScriptGenerator::new()
        .generate(&spec, &PrinterConfig::default())
        .expect("Failed to generate");

    assert!(result.contains("public at: Date;"));
    assert!(result.contains("public extra: Payload;"));
    assert!(result.contains("json.hasOwnProperty('at') ? new Date(parseInt(json[\"at\"]) * 1000) : null"));
    assert!(result.contains("json.hasOwnProperty('ok') ? !!(json[\"ok\"]) : null"));
    assert!(result.contains("json.hasOwnProperty('ratio') ? parseFloat(json[\"ratio\"]) : null"));
    assert!(result.contains("json.hasOwnProperty('extra') ? json[\"extra\"] : null"));
    assert!(result.contains("\"at\": this.at === null ? null : this.at.getSeconds()"));
}

#[test]
fn test_generator_metadata() {
    let spec = Spec::from_json_str(SPEC).expect("Failed to parse spec");
    let generator = TypeScriptGenerator::new();

    assert_eq!(generator.language(), "ts");
    assert_eq!(generator.file_name(&spec).expect("file name"), "User.ts");
}

#[test]
fn test_generate_without_ts_section_fails() {
    let spec = Spec::from_json_str(
        r#"{ "outDir": ".", "lang": { "php": { "namespace": "N", "clazz": "A" } }, "fields": [] }"#,
    )
    .expect("Failed to parse spec");

    let error = TypeScriptGenerator::new()
        .generate(&spec, &PrinterConfig::default())
        .unwrap_err();
    assert!(error.is_spec_error());
    assert!(error.to_string().contains("ts"));
}
