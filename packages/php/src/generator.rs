use std::rc::Rc;

use specgen_common::{CommonResult, Generator};
use specgen_printer::{
    Accessor, IndentMiddleware, PrinterConfig, PrinterMiddleware, SourceFile, TracingMiddleware, Type,
};
use specgen_spec::{deserialize_views, serialize_views, DeserializeView, Field, SerializeView, Spec};
use tracing::{debug, instrument};

use crate::ast::{this_access, Annotation, Argument, DocComment, Expression, LeftValue, Modifier, Statement};

pub const GENERATED_NOTICE: &str = "THIS FILE IS AUTO GENERATED";

/// PHP type for a spec type; unknown types are used verbatim.
pub fn php_type(ty: &str) -> &str {
    match ty {
        "string" => "string",
        "integer" => "int",
        "float" => "float",
        "double" => "double",
        "boolean" => "bool",
        "datetime" => "\\DateTimeImmutable",
        "any" => "mixed",
        other => other,
    }
}

fn node_type(ty: &str) -> Type {
    match ty {
        "string" => Type::string(),
        "integer" | "float" | "double" => Type::number(),
        "boolean" => Type::boolean(),
        "any" => Type::any(),
        other => Type::instance(php_type(other)),
    }
}

/// Expression converting the raw JSON value `source` into a field value.
fn deserialize_value(ty: &str, source: &str) -> Expression {
    let raw = || Expression::raw(source, Type::any());
    match ty {
        "string" => Expression::call("strval", Type::string(), vec![raw()]),
        "integer" => Expression::call("intval", Type::number(), vec![raw()]),
        "float" => Expression::call("floatval", Type::number(), vec![raw()]),
        "double" => Expression::call("doubleval", Type::number(), vec![raw()]),
        "boolean" => Expression::call("boolval", Type::boolean(), vec![raw()]),
        "datetime" => Expression::raw(
            format!(
                "\\date_create_immutable(date(\"Y-m-d H:i:s\", (is_numeric({0}) ? {0} : strtotime({0}))))",
                source
            ),
            node_type(ty),
        ),
        _ => raw(),
    }
}

/// Expression reading field `field` for serialization.
fn serialize_value(class: &str, field: &Field) -> Expression {
    let mut segments = vec![Accessor::new(field.name.as_str(), node_type(&field.ty))];
    if field.ty == "datetime" {
        segments.push(Accessor::new("getTimestamp()", Type::number()));
    }
    Expression::Access(this_access(class, segments))
}

fn this_field(class: &str, field: &Field) -> Expression {
    Expression::Access(this_access(
        class,
        vec![Accessor::new(field.name.as_str(), node_type(&field.ty))],
    ))
}

fn json_entry(key: &str) -> String {
    format!("$json[\"{}\"]", key)
}

fn documented(comment: DocComment, statement: Statement) -> Vec<Statement> {
    if comment.is_empty() {
        vec![statement]
    } else {
        vec![Statement::DocComment(comment), statement]
    }
}

fn member(field: &Field) -> Vec<Statement> {
    documented(
        DocComment::new(
            field.comment.clone(),
            vec![Annotation::var(php_type(&field.ty), None)],
        ),
        Statement::member(vec![Modifier::Public], field.name.as_str(), node_type(&field.ty)),
    )
}

fn constructor(class: &str, fields: &[Field]) -> Vec<Statement> {
    let annotations = fields
        .iter()
        .map(|field| Annotation::param(php_type(&field.ty), &field.name, field.comment.as_deref()))
        .collect();
    let arguments = fields
        .iter()
        .map(|field| Argument::new(field.name.as_str(), node_type(&field.ty)))
        .collect();
    let body = fields
        .iter()
        .map(|field| {
            let target = this_access(
                class,
                vec![Accessor::new(field.name.as_str(), node_type(&field.ty))],
            );
            Statement::assign(LeftValue::Access(target), Expression::variable(field.name.as_str()))
        })
        .collect();

    documented(
        DocComment::new(None, annotations),
        Statement::method(
            vec![Modifier::Public],
            "__construct",
            Type::instance(class),
            arguments,
            body,
        ),
    )
}

fn deserializer(class: &str, view: &DeserializeView<'_>) -> Vec<Statement> {
    let parameters = view
        .slots
        .iter()
        .map(|slot| match slot {
            Some(entry) => {
                let source = json_entry(entry.key);
                Expression::conditional(
                    Expression::call(
                        "isset",
                        Type::boolean(),
                        vec![Expression::raw(source.as_str(), Type::any())],
                    ),
                    deserialize_value(&entry.field.ty, &source),
                    Expression::null(),
                )
            }
            None => Expression::null(),
        })
        .collect();

    documented(
        DocComment::new(
            None,
            vec![Annotation::param("array", "json", None), Annotation::returns(class)],
        ),
        Statement::method(
            vec![Modifier::Public, Modifier::Static],
            view.method_name("fromArray", "from"),
            Type::instance(class),
            vec![Argument::new("json", Type::instance("array"))],
            vec![Statement::Return(Expression::construct(class, parameters))],
        ),
    )
}

fn serializer(class: &str, view: &SerializeView<'_>) -> Vec<Statement> {
    let entries = view
        .entries
        .iter()
        .map(|entry| {
            let value = Expression::conditional(
                Expression::call("is_null", Type::boolean(), vec![this_field(class, entry.field)]),
                Expression::null(),
                serialize_value(class, entry.field),
            );
            (entry.key.to_string(), value)
        })
        .collect();

    documented(
        DocComment::new(None, vec![Annotation::returns("array")]),
        Statement::method(
            vec![Modifier::Public],
            view.method_name("toArray", "to"),
            Type::instance("array"),
            Vec::new(),
            vec![Statement::Return(Expression::dictionary(entries))],
        ),
    )
}

/// Join blocks of statements with one blank line between blocks.
fn separated(blocks: Vec<Vec<Statement>>) -> Vec<Statement> {
    let mut statements = Vec::new();
    for (i, block) in blocks.into_iter().enumerate() {
        if i > 0 {
            statements.push(Statement::BlankLine);
        }
        statements.extend(block);
    }
    statements
}

/// Generates a PHP value class with array (de)serializers
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpGenerator;

impl PhpGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the file AST for `spec` without rendering it.
    pub fn build(&self, spec: &Spec) -> CommonResult<SourceFile<Statement>> {
        let lang = spec.php()?;
        let class = lang.clazz.as_str();

        let mut blocks: Vec<Vec<Statement>> = spec.fields.iter().map(member).collect();
        blocks.push(constructor(class, &spec.fields));
        blocks.extend(
            deserialize_views(&spec.fields)
                .iter()
                .map(|view| deserializer(class, view)),
        );
        blocks.extend(
            serialize_views(&spec.fields)
                .iter()
                .map(|view| serializer(class, view)),
        );
        debug!(class, methods = blocks.len() - spec.fields.len(), "built class body");

        Ok(SourceFile::new(vec![
            Statement::OpenTag,
            Statement::BlankLine,
            Statement::Comment(GENERATED_NOTICE.to_string()),
            Statement::BlankLine,
            Statement::Namespace(lang.namespace.clone()),
            Statement::BlankLine,
            Statement::class(class, separated(blocks)),
        ]))
    }

    fn middlewares() -> Vec<Rc<dyn PrinterMiddleware>> {
        let indent: Rc<dyn PrinterMiddleware> = Rc::new(IndentMiddleware);
        vec![indent, Rc::new(TracingMiddleware)]
    }
}

impl Generator for PhpGenerator {
    fn language(&self) -> &'static str {
        "php"
    }

    fn extension(&self) -> &'static str {
        ".php"
    }

    fn class_name<'s>(&self, spec: &'s Spec) -> CommonResult<&'s str> {
        Ok(spec.php()?.clazz.as_str())
    }

    #[instrument(skip(self, spec, config), fields(fields = spec.fields.len()))]
    fn generate(&self, spec: &Spec, config: &PrinterConfig) -> CommonResult<String> {
        let file = self.build(spec)?;
        let mut text = file.print(config.clone(), Self::middlewares())?;
        text.push('\n');
        Ok(text)
    }
}
