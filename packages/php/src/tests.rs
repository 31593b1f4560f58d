use std::rc::Rc;

use specgen_common::Generator;
use specgen_printer::{
    Accessor, AccessPath, IndentMiddleware, Node, PrintError, PrinterConfig, PrinterMiddleware,
    SourceFile, Type,
};
use specgen_spec::Spec;

use crate::*;

fn render(statements: Vec<Statement>) -> String {
    let middleware: Rc<dyn PrinterMiddleware> = Rc::new(IndentMiddleware);
    SourceFile::new(statements)
        .print(PrinterConfig::default(), vec![middleware])
        .expect("Failed to print")
}

fn render_expression(expression: Expression) -> String {
    render(vec![Statement::Expression(expression)])
}

fn path(names: &[&str]) -> AccessPath {
    AccessPath::series(names.iter().map(|name| Accessor::new(*name, Type::any())).collect())
        .expect("Failed to build access path")
}

const SPEC: &str = r#"
{
    "outDir": "out",
    "lang": { "php": { "namespace": "App\\Model", "clazz": "User" } },
    "fields": [
        { "name": "id", "type": "integer", "comment": "identifier", "groups": [{ "name": "summary", "member": "user_id" }] },
        { "name": "name", "type": "string" }
    ]
}
"#;

#[test]
fn test_header_statements() {
    let result = render(vec![
        Statement::OpenTag,
        Statement::Namespace("App\\Model".to_string()),
        Statement::Use("App\\Base".to_string()),
        Statement::Comment("hello".to_string()),
    ]);

    assert_eq!(result, "<?php\nnamespace App\\Model;\nuse App\\Base;\n// hello");
}

#[test]
fn test_class_members_are_indented_once() {
    let result = render(vec![Statement::class(
        "Foo",
        vec![
            Statement::member(vec![Modifier::Public, Modifier::Static], "x", Type::string()),
            Statement::member(vec![Modifier::Private], "y", Type::number()),
        ],
    )]);

    assert_eq!(result, "class Foo {\n    public static $x;\n    private $y;\n}");
}

#[test]
fn test_method_body_is_indented_twice() {
    let result = render(vec![Statement::class(
        "Foo",
        vec![Statement::method(
            vec![Modifier::Public],
            "bar",
            Type::null(),
            vec![Argument::new("a", Type::string()), Argument::new("b", Type::boolean())],
            vec![
                Statement::assign(
                    LeftValue::Access(this_access("Foo", vec![Accessor::new("a", Type::string())])),
                    Expression::variable("a"),
                ),
                Statement::Return(Expression::variable("b")),
            ],
        )],
    )]);

    println!("Generated code:\n{}", result);

    assert_eq!(
        result,
        "class Foo {\n    public function bar($a, $b) {\n        $this->a = $a;\n        return $b;\n    }\n}"
    );
}

#[test]
fn test_top_level_method_still_indents_body() {
    let result = render(vec![Statement::method(
        Vec::new(),
        "run",
        Type::null(),
        Vec::new(),
        vec![Statement::Expression(Expression::call("go", Type::any(), Vec::new()))],
    )]);

    assert_eq!(result, "function run() {\n    go();\n}");
}

#[test]
fn test_empty_method_body() {
    let result = render(vec![Statement::method(
        vec![Modifier::Public],
        "noop",
        Type::null(),
        Vec::new(),
        Vec::new(),
    )]);

    assert_eq!(result, "public function noop() {\n}");
}

#[test]
fn test_access_chain_uses_arrow() {
    let result = render_expression(Expression::Access(path(&["$this", "foo", "bar", "baz"])));
    assert_eq!(result, "$this->foo->bar->baz;");
}

#[test]
fn test_invocation() {
    let result = render_expression(Expression::call(
        "call",
        Type::instance("Foo"),
        vec![
            Expression::raw("1", Type::number()),
            Expression::raw("\"123\"", Type::string()),
            Expression::call("foo", Type::any(), Vec::new()),
        ],
    ));

    assert_eq!(result, "call(1, \"123\", foo());");
    assert_eq!(result.matches(", ").count(), 2);
}

#[test]
fn test_constructor_call() {
    let result = render_expression(Expression::construct("User", vec![Expression::null()]));
    assert_eq!(result, "new User(null);");
}

#[test]
fn test_unary_and_conditional() {
    let comparison = Expression::unary(
        UnaryOperator::TripleEqual,
        Expression::variable("a"),
        Expression::null(),
    );
    assert_eq!(comparison.ty(), Type::boolean());

    let result = render_expression(Expression::conditional(
        comparison,
        Expression::raw("0", Type::number()),
        Expression::variable("a"),
    ));

    assert_eq!(result, "$a === null ? 0 : $a;");
}

#[test]
fn test_short_array_stays_on_one_line() {
    let result = render_expression(Expression::list(vec![
        Expression::raw("1", Type::number()),
        Expression::raw("2", Type::number()),
    ]));
    assert_eq!(result, "array(1, 2);");

    let exactly_limit = "x".repeat(40);
    let result = render_expression(Expression::list(vec![
        Expression::raw(exactly_limit.as_str(), Type::any()),
        Expression::raw(exactly_limit.as_str(), Type::any()),
    ]));
    assert!(!result.contains('\n'));
}

#[test]
fn test_long_array_wraps() {
    let element = "y".repeat(30);
    let result = render(vec![Statement::Return(Expression::list(vec![
        Expression::raw(element.as_str(), Type::any()),
        Expression::raw(element.as_str(), Type::any()),
        Expression::raw(element.as_str(), Type::any()),
    ]))]);

    let expected = format!(
        "return array(\n    {0},\n    {0},\n    {0}\n);",
        element
    );
    assert_eq!(result, expected);
}

#[test]
fn test_dictionary_array() {
    let result = render_expression(Expression::dictionary(vec![
        ("a".to_string(), Expression::raw("1", Type::number())),
        ("b".to_string(), Expression::null()),
    ]));
    assert_eq!(result, "array(\"a\" => 1, \"b\" => null);");
}

#[test]
fn test_doc_comment() {
    let result = render(vec![Statement::DocComment(DocComment::new(
        Some("A user".to_string()),
        vec![
            Annotation::var("int", None),
            Annotation::param("string", "name", Some("display name")),
            Annotation::returns("User"),
        ],
    ))]);

    assert_eq!(
        result,
        "/**\n * A user\n *\n * @var int\n * @param string $name display name\n * @return User\n */"
    );
}

#[test]
fn test_blank_line_inside_class_is_indented() {
    let result = render(vec![Statement::class(
        "Foo",
        vec![
            Statement::member(vec![Modifier::Public], "a", Type::any()),
            Statement::BlankLine,
            Statement::member(vec![Modifier::Public], "b", Type::any()),
        ],
    )]);

    assert_eq!(result, "class Foo {\n    public $a;\n    \n    public $b;\n}");
}

#[test]
fn test_rendering_is_deterministic() {
    let file = PhpGenerator::new()
        .build(&Spec::from_json_str(SPEC).expect("Failed to parse spec"))
        .expect("Failed to build");
    let middleware: Rc<dyn PrinterMiddleware> = Rc::new(IndentMiddleware);

    let first = file
        .print(PrinterConfig::default(), vec![middleware.clone()])
        .expect("Failed to print");
    let second = file
        .print(PrinterConfig::default(), vec![middleware])
        .expect("Failed to print");
    assert_eq!(first, second);
}

#[test]
fn test_node_kinds() {
    let statement = Statement::method(vec![Modifier::Public], "f", Type::any(), Vec::new(), Vec::new());
    assert_eq!(Node::kind(&statement), "Method");
    assert!(!Node::is_logical(&statement));
    assert!(NodeKind::MethodBody.is_logical());
    assert!(NodeKind::ParameterList.is_logical());
    assert!(!NodeKind::Invocation.is_logical());
}

#[test]
fn test_php_types() {
    assert_eq!(php_type("integer"), "int");
    assert_eq!(php_type("boolean"), "bool");
    assert_eq!(php_type("datetime"), "\\DateTimeImmutable");
    assert_eq!(php_type("any"), "mixed");
    assert_eq!(php_type("Money"), "Money");
}

#[test]
fn test_generate_class() {
    let spec = Spec::from_json_str(SPEC).expect("Failed to parse spec");
    let generator = PhpGenerator::new();
    let result = generator
        .generate(&spec, &PrinterConfig::default())
        .expect("Failed to generate");

    println!("Generated code:\n{}", result);

    assert!(result.starts_with("<?php\n\n// THIS FILE IS AUTO GENERATED\n\nnamespace App\\Model;\n\nclass User {\n"));
    assert!(result.ends_with("}\n}\n"));
    assert!(result.contains("    /**\n     * identifier\n     *\n     * @var int\n     */\n    public $id;"));
    assert!(result.contains("    public $name;"));
    assert!(result.contains("     * @param int $id identifier\n     * @param string $name\n     */"));
    assert!(result.contains("    public function __construct($id, $name) {\n        $this->id = $id;\n        $this->name = $name;\n    }"));
    assert!(result.contains(
        "        return new User(isset($json[\"id\"]) ? intval($json[\"id\"]) : null, isset($json[\"name\"]) ? strval($json[\"name\"]) : null);"
    ));
    assert!(result.contains("    public static function fromSummary($json) {"));
    assert!(result.contains("        return new User(isset($json[\"user_id\"]) ? intval($json[\"user_id\"]) : null, null);"));
    assert!(result.contains(
        "        return array(\n            \"id\" => is_null($this->id) ? null : $this->id,\n            \"name\" => is_null($this->name) ? null : $this->name\n        );"
    ));
    assert!(result.contains("        return array(\"user_id\" => is_null($this->id) ? null : $this->id);"));
}

#[test]
fn test_generated_method_order() {
    let spec = Spec::from_json_str(SPEC).expect("Failed to parse spec");
    let result = PhpGenerator::new()
        .generate(&spec, &PrinterConfig::default())
        .expect("Failed to generate");

    let position = |needle: &str| result.find(needle).unwrap_or_else(|| panic!("missing {}", needle));
    let order = [
        "public $id;",
        "public $name;",
        "function __construct(",
        "function fromArray(",
        "function fromSummary(",
        "function toArray(",
        "function toSummary(",
    ];
    for pair in order.windows(2) {
        assert!(position(pair[0]) < position(pair[1]), "{} before {}", pair[0], pair[1]);
    }
}

#[test]
fn test_generate_datetime_conversions() {
    let spec = Spec::from_json_str(
        r#"{ "outDir": ".", "lang": { "php": { "namespace": "N", "clazz": "Event" } },
             "fields": [{ "name": "at", "type": "datetime" }] }"#,
    )
    .expect("Failed to parse spec");
    let result = PhpGenerator::new()
        .generate(&spec, &PrinterConfig::default())
        .expect("Failed to generate");

    assert!(result.contains("@var \\DateTimeImmutable"));
    assert!(result.contains(
        "\\date_create_immutable(date(\"Y-m-d H:i:s\", (is_numeric($json[\"at\"]) ? $json[\"at\"] : strtotime($json[\"at\"]))))"
    ));
    assert!(result.contains("\"at\" => is_null($this->at) ? null : $this->at->getTimestamp()"));
}

#[test]
fn test_generator_metadata() {
    let spec = Spec::from_json_str(SPEC).expect("Failed to parse spec");
    let generator = PhpGenerator::new();

    assert_eq!(generator.language(), "php");
    assert_eq!(generator.class_name(&spec).expect("class name"), "User");
    assert_eq!(generator.file_name(&spec).expect("file name"), "User.php");
}

#[test]
fn test_generate_without_php_section_fails() {
    let spec = Spec::from_json_str(r#"{ "outDir": ".", "lang": { "ts": { "clazz": "A" } }, "fields": [] }"#)
        .expect("Failed to parse spec");
    let error = PhpGenerator::new()
        .generate(&spec, &PrinterConfig::default())
        .unwrap_err();
    assert!(error.is_spec_error());
}

#[test]
fn test_empty_access_path_is_rejected() {
    assert_eq!(AccessPath::series(Vec::new()), Err(PrintError::EmptyAccessPath));
}
