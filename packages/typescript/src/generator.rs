use std::rc::Rc;

use specgen_common::{CommonResult, Generator};
use specgen_printer::{
    Accessor, IndentMiddleware, PrinterConfig, PrinterMiddleware, SourceFile, TracingMiddleware, Type,
};
use specgen_spec::{deserialize_views, serialize_views, DeserializeView, Field, SerializeView, Spec};
use tracing::{debug, instrument};

use crate::ast::{
    this_access, Annotation, Argument, DocComment, Expression, LeftValue, Modifier, Statement,
    UnaryOperator,
};

pub const GENERATED_NOTICE: &str = "THIS FILE IS AUTO GENERATED";

const LINT_DIRECTIVE: &str = "eslint-disable";

/// TypeScript type for a spec type; unknown types are used verbatim.
pub fn ts_type(ty: &str) -> &str {
    match ty {
        "string" => "string",
        "integer" | "float" | "double" => "number",
        "boolean" => "boolean",
        "datetime" => "Date",
        "any" => "any",
        other => other,
    }
}

fn field_type(field: &Field) -> Type {
    Type::instance(ts_type(&field.ty))
}

fn deserialize_value(ty: &str, source: &str) -> Expression {
    match ty {
        "string" => Expression::raw(format!("({}).toString()", source), Type::string()),
        "integer" => Expression::call("parseInt", Type::number(), vec![Expression::raw(source, Type::any())]),
        "float" | "double" => {
            Expression::call("parseFloat", Type::number(), vec![Expression::raw(source, Type::any())])
        }
        "boolean" => Expression::raw(format!("!!({})", source), Type::boolean()),
        "datetime" => Expression::raw(
            format!("new Date(parseInt({}) * 1000)", source),
            Type::instance("Date"),
        ),
        _ => Expression::raw(source, Type::any()),
    }
}

fn this_field(class: &str, field: &Field) -> Expression {
    Expression::Access(this_access(
        class,
        vec![Accessor::new(field.name.as_str(), field_type(field))],
    ))
}

fn serialize_value(class: &str, field: &Field) -> Expression {
    let mut segments = vec![Accessor::new(field.name.as_str(), field_type(field))];
    if field.ty == "datetime" {
        segments.push(Accessor::new("getSeconds()", Type::number()));
    }
    Expression::Access(this_access(class, segments))
}

fn with_doc(comment: DocComment, statement: Statement) -> Vec<Statement> {
    let mut statements = Vec::with_capacity(2);
    if !comment.is_empty() {
        statements.push(Statement::DocComment(comment));
    }
    statements.push(statement);
    statements
}

fn member(field: &Field) -> Vec<Statement> {
    with_doc(
        DocComment::new(field.comment.clone(), Vec::new()),
        Statement::member(vec![Modifier::Public], field.name.as_str(), field_type(field)),
    )
}

fn constructor(class: &str, fields: &[Field]) -> Vec<Statement> {
    let annotations = fields
        .iter()
        .map(|field| Annotation::param(&field.name, field.comment.as_deref()))
        .collect();
    let arguments = fields
        .iter()
        .map(|field| Argument::new(field.name.as_str(), field_type(field)))
        .collect();
    let assignments = fields
        .iter()
        .map(|field| {
            let target = this_access(class, vec![Accessor::new(field.name.as_str(), field_type(field))]);
            Statement::assign(LeftValue::Access(target), Expression::variable(field.name.as_str()))
        })
        .collect();

    with_doc(
        DocComment::new(None, annotations),
        Statement::method(vec![Modifier::Public], "constructor", None, arguments, assignments),
    )
}

fn deserializer(class: &str, view: &DeserializeView<'_>) -> Vec<Statement> {
    let parameters = view
        .slots
        .iter()
        .map(|slot| {
            let Some(entry) = slot else {
                return Expression::null();
            };
            let source = format!("json[\"{}\"]", entry.key);
            Expression::conditional(
                Expression::call(
                    "json.hasOwnProperty",
                    Type::boolean(),
                    vec![Expression::raw(format!("'{}'", entry.key), Type::string())],
                ),
                deserialize_value(&entry.field.ty, &source),
                Expression::null(),
            )
        })
        .collect();

    vec![Statement::method(
        vec![Modifier::Public, Modifier::Static],
        view.method_name("fromObject", "from"),
        Some(Type::instance(class)),
        vec![Argument::new("json", Type::any())],
        vec![Statement::Return(Expression::construct(class, parameters))],
    )]
}

fn serializer(class: &str, view: &SerializeView<'_>) -> Vec<Statement> {
    let entries = view
        .entries
        .iter()
        .map(|entry| {
            let guarded = Expression::conditional(
                Expression::unary(
                    UnaryOperator::TripleEqual,
                    this_field(class, entry.field),
                    Expression::null(),
                ),
                Expression::null(),
                serialize_value(class, entry.field),
            );
            (entry.key.to_string(), guarded)
        })
        .collect();

    vec![Statement::method(
        vec![Modifier::Public],
        view.method_name("toObject", "to"),
        Some(Type::any()),
        Vec::new(),
        vec![Statement::Return(Expression::object(entries))],
    )]
}

/// Generates an exported TypeScript class with object (de)serializers
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptGenerator;

impl TypeScriptGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, spec: &Spec) -> CommonResult<SourceFile<Statement>> {
        let class = spec.ts()?.clazz.as_str();

        let mut blocks: Vec<Vec<Statement>> = spec.fields.iter().map(member).collect();
        blocks.push(constructor(class, &spec.fields));
        for view in deserialize_views(&spec.fields) {
            blocks.push(deserializer(class, &view));
        }
        for view in serialize_views(&spec.fields) {
            blocks.push(serializer(class, &view));
        }
        debug!(class, blocks = blocks.len(), "built class body");

        let mut body = Vec::new();
        for block in blocks {
            if !body.is_empty() {
                body.push(Statement::BlankLine);
            }
            body.extend(block);
        }

        Ok(SourceFile::new(vec![
            Statement::Comment(GENERATED_NOTICE.to_string()),
            Statement::BlankLine,
            Statement::BlockComment(LINT_DIRECTIVE.to_string()),
            Statement::BlankLine,
            Statement::exported_class(class, body),
        ]))
    }
}

impl Generator for TypeScriptGenerator {
    fn language(&self) -> &'static str {
        "ts"
    }

    fn extension(&self) -> &'static str {
        ".ts"
    }

    fn class_name<'s>(&self, spec: &'s Spec) -> CommonResult<&'s str> {
        Ok(spec.ts()?.clazz.as_str())
    }

    #[instrument(skip(self, spec, config), fields(fields = spec.fields.len()))]
    fn generate(&self, spec: &Spec, config: &PrinterConfig) -> CommonResult<String> {
        let file = self.build(spec)?;
        let indent: Rc<dyn PrinterMiddleware> = Rc::new(IndentMiddleware);
        let rendered = file.print(config.clone(), vec![indent, Rc::new(TracingMiddleware)])?;
        Ok(format!("{}\n", rendered))
    }
}
