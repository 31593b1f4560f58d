use specgen_printer::{
    attach_sequence, JoinPrinter, PassThroughPrinter, PrintContext, PrintResult, PrintScope,
    PrintStateTransitionRule, Printer, PrinterFactory, PrinterId, PrinterKind, PrinterTreeBuilder,
    TextPrinter,
};

use crate::ast::{
    Argument, ArrayDeclaration, ArrayElement, Callable, ClassDeclaration, DocComment, Expression,
    Invocation, LeftValue, MemberDeclaration, MethodBody, MethodDeclaration, Modifier, NodeKind,
    Statement,
};

/// Arrays whose elements add up to more than this many characters are
/// printed one element per line.
pub const ARRAY_WRAP_WIDTH: usize = 80;

const MEMBER_ACCESS: &str = "->";

fn text(kind: NodeKind, text: impl Into<String>) -> TextPrinter {
    TextPrinter::new(kind.name(), text)
}

fn attach_modifiers<'a>(
    builder: &mut PrinterTreeBuilder<'a>,
    parent: PrinterId,
    modifiers: &'a [Modifier],
) -> PrinterId {
    let id = builder.push(Some(parent), JoinPrinter::separated(" "));
    for modifier in modifiers {
        builder.push(Some(id), text(NodeKind::Modifier, modifier.represent()));
    }
    id
}

fn attach_joined<'a, F: PrinterFactory>(
    builder: &mut PrinterTreeBuilder<'a>,
    parent: PrinterId,
    separator: &str,
    items: &'a [F],
) -> PrinterId {
    let id = builder.push(Some(parent), JoinPrinter::separated(separator));
    builder.attach_all(id, items);
    id
}

/// Class members are always rendered one level deep.
fn class_body_depth(context: &mut PrintContext<'_>) {
    context.state_mut().set_indent_size(1);
}

fn with_modifiers(modifiers: String, rest: String) -> String {
    if modifiers.is_empty() {
        rest
    } else {
        format!("{} {}", modifiers, rest)
    }
}

impl PrinterFactory for Statement {
    fn create_printer<'a>(
        &'a self,
        builder: &mut PrinterTreeBuilder<'a>,
        parent: Option<PrinterId>,
    ) -> PrinterId {
        match self {
            Statement::OpenTag => builder.push(parent, text(NodeKind::OpenTag, "<?php")),
            Statement::Namespace(name) => {
                builder.push(parent, text(NodeKind::Namespace, format!("namespace {};", name)))
            }
            Statement::Use(name) => builder.push(parent, text(NodeKind::Use, format!("use {};", name))),
            Statement::Comment(content) => {
                builder.push(parent, text(NodeKind::Comment, format!("// {}", content)))
            }
            Statement::DocComment(comment) => builder.push(parent, DocCommentPrinter { comment }),
            Statement::Class(class) => {
                let id = builder.push(parent, ClassPrinter { class });
                attach_sequence(builder, Some(id), &class.members);
                id
            }
            Statement::Member(member) => {
                let id = builder.push(parent, MemberPrinter { member });
                attach_modifiers(builder, id, &member.modifiers);
                id
            }
            Statement::Method(method) => {
                let id = builder.push(parent, MethodPrinter { method });
                attach_modifiers(builder, id, &method.modifiers);
                attach_joined(builder, id, ", ", &method.arguments);
                builder.attach(id, &method.body);
                id
            }
            Statement::Assignment { left, right } => {
                let id = builder.push(parent, AssignmentPrinter);
                builder.attach(id, left);
                builder.attach(id, right);
                id
            }
            Statement::Return(expression) => {
                let id = builder.push(parent, AffixPrinter::new(NodeKind::Return, "return ", ";"));
                builder.attach(id, expression);
                id
            }
            Statement::Expression(expression) => {
                let id = builder.push(parent, AffixPrinter::new(NodeKind::ExpressionStatement, "", ";"));
                builder.attach(id, expression);
                id
            }
            Statement::BlankLine => builder.push(parent, text(NodeKind::BlankLine, "")),
        }
    }
}

impl PrinterFactory for MethodBody {
    fn create_printer<'a>(
        &'a self,
        builder: &mut PrinterTreeBuilder<'a>,
        parent: Option<PrinterId>,
    ) -> PrinterId {
        let id = builder.push(parent, PassThroughPrinter);
        attach_sequence(builder, Some(id), &self.statements);
        id
    }
}

impl PrinterFactory for Argument {
    fn create_printer<'a>(
        &'a self,
        builder: &mut PrinterTreeBuilder<'a>,
        parent: Option<PrinterId>,
    ) -> PrinterId {
        builder.push(parent, text(NodeKind::Argument, format!("${}", self.name)))
    }
}

impl PrinterFactory for LeftValue {
    fn create_printer<'a>(
        &'a self,
        builder: &mut PrinterTreeBuilder<'a>,
        parent: Option<PrinterId>,
    ) -> PrinterId {
        match self {
            LeftValue::Variable(name) => builder.push(parent, text(NodeKind::Variable, format!("${}", name))),
            LeftValue::Access(path) => builder.push(parent, text(NodeKind::Access, path.render(MEMBER_ACCESS))),
        }
    }
}

impl PrinterFactory for Callable {
    fn create_printer<'a>(
        &'a self,
        builder: &mut PrinterTreeBuilder<'a>,
        parent: Option<PrinterId>,
    ) -> PrinterId {
        match self {
            Callable::Named(name) => builder.push(parent, text(NodeKind::NamedCallable, name.as_str())),
            Callable::Constructor(class) => {
                builder.push(parent, text(NodeKind::Constructor, format!("new {}", class)))
            }
        }
    }
}

impl PrinterFactory for Expression {
    fn create_printer<'a>(
        &'a self,
        builder: &mut PrinterTreeBuilder<'a>,
        parent: Option<PrinterId>,
    ) -> PrinterId {
        match self {
            Expression::Raw { expression, .. } => builder.push(parent, text(NodeKind::Raw, expression.as_str())),
            Expression::Access(path) => builder.push(parent, text(NodeKind::Access, path.render(MEMBER_ACCESS))),
            Expression::Variable(name) => builder.push(parent, text(NodeKind::Variable, format!("${}", name))),
            Expression::Invocation(invocation) => attach_invocation(builder, parent, invocation),
            Expression::Unary { operator, left, right } => {
                let id = builder.push(parent, UnaryPrinter);
                builder.attach(id, left.as_ref());
                builder.push(Some(id), text(NodeKind::Operator, operator.represent()));
                builder.attach(id, right.as_ref());
                id
            }
            Expression::Conditional {
                condition,
                then,
                otherwise,
            } => {
                let id = builder.push(parent, ConditionalPrinter);
                builder.attach(id, condition.as_ref());
                builder.attach(id, then.as_ref());
                builder.attach(id, otherwise.as_ref());
                id
            }
            Expression::Array(array) => attach_array(builder, parent, array),
        }
    }
}

fn attach_invocation<'a>(
    builder: &mut PrinterTreeBuilder<'a>,
    parent: Option<PrinterId>,
    invocation: &'a Invocation,
) -> PrinterId {
    let id = builder.push(parent, InvocationPrinter);
    builder.attach(id, &invocation.callable);
    attach_joined(builder, id, ", ", &invocation.parameters);
    id
}

fn attach_array<'a>(
    builder: &mut PrinterTreeBuilder<'a>,
    parent: Option<PrinterId>,
    array: &'a ArrayDeclaration,
) -> PrinterId {
    let id = builder.push(parent, ArrayPrinter);
    for element in &array.elements {
        attach_array_element(builder, id, element, array.dictionary);
    }
    id
}

fn attach_array_element<'a>(
    builder: &mut PrinterTreeBuilder<'a>,
    parent: PrinterId,
    element: &'a ArrayElement,
    dictionary: bool,
) -> PrinterId {
    let key = if dictionary { element.key.as_deref() } else { None };
    let id = builder.push(Some(parent), ArrayElementPrinter { key });
    builder.attach(id, &element.value);
    id
}

struct DocCommentPrinter<'a> {
    comment: &'a DocComment,
}

impl Printer for DocCommentPrinter<'_> {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::DocComment.name())
    }

    fn do_print<'t>(&self, _scope: PrintScope<'t>, _context: &PrintContext<'t>) -> PrintResult<String> {
        let mut out = String::from("/**\n");
        for line in self.comment.lines() {
            if line.is_empty() {
                out.push_str(" *\n");
            } else {
                out.push_str(&format!(" * {}\n", line));
            }
        }
        out.push_str(" */");
        Ok(out)
    }
}

struct ClassPrinter<'a> {
    class: &'a ClassDeclaration,
}

impl Printer for ClassPrinter<'_> {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::Class.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(1)?;
        let body = scope.print_child_with(0, context, Some(&class_body_depth), PrintStateTransitionRule::Keep)?;
        Ok(format!("class {} {{\n{}\n}}", self.class.name, body))
    }
}

struct MemberPrinter<'a> {
    member: &'a MemberDeclaration,
}

impl Printer for MemberPrinter<'_> {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::Member.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(1)?;
        let modifiers = scope.print_child(0, context)?;
        Ok(with_modifiers(modifiers, format!("${};", self.member.name)))
    }
}

struct MethodPrinter<'a> {
    method: &'a MethodDeclaration,
}

impl Printer for MethodPrinter<'_> {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::Method.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(3)?;
        let modifiers = scope.print_child(0, context)?;
        let arguments = scope.print_child(1, context)?;
        let body = scope.print_child_with(2, context, None, PrintStateTransitionRule::IndentTo(1))?;

        let signature = with_modifiers(
            modifiers,
            format!("function {}({})", self.method.name, arguments),
        );
        if body.is_empty() {
            Ok(format!("{} {{\n}}", signature))
        } else {
            Ok(format!("{} {{\n{}\n}}", signature, body))
        }
    }
}

struct AssignmentPrinter;

impl Printer for AssignmentPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::Assignment.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(2)?;
        Ok(format!(
            "{} = {};",
            scope.print_child(0, context)?,
            scope.print_child(1, context)?
        ))
    }
}

/// Single-child statement printed between a fixed prefix and suffix.
struct AffixPrinter {
    kind: NodeKind,
    prefix: &'static str,
    suffix: &'static str,
}

impl AffixPrinter {
    fn new(kind: NodeKind, prefix: &'static str, suffix: &'static str) -> Self {
        Self { kind, prefix, suffix }
    }
}

impl Printer for AffixPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(self.kind.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(1)?;
        Ok(format!("{}{}{}", self.prefix, scope.print_child(0, context)?, self.suffix))
    }
}

struct InvocationPrinter;

impl Printer for InvocationPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::Invocation.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(2)?;
        Ok(format!(
            "{}({})",
            scope.print_child(0, context)?,
            scope.print_child(1, context)?
        ))
    }
}

struct UnaryPrinter;

impl Printer for UnaryPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::Unary.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(3)?;
        Ok(scope.print_children(context)?.join(" "))
    }
}

struct ConditionalPrinter;

impl Printer for ConditionalPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::Conditional.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(3)?;
        Ok(format!(
            "{} ? {} : {}",
            scope.print_child(0, context)?,
            scope.print_child(1, context)?,
            scope.print_child(2, context)?
        ))
    }
}

struct ArrayPrinter;

impl Printer for ArrayPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::Array.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        let elements = scope.print_children(context)?;
        let width: usize = elements.iter().map(|element| element.chars().count()).sum();

        if width > ARRAY_WRAP_WIDTH {
            let indent = context.config().indent().process(1);
            let separator = format!(",\n{}", indent);
            Ok(format!("array(\n{}{}\n)", indent, elements.join(&separator)))
        } else {
            Ok(format!("array({})", elements.join(", ")))
        }
    }
}

struct ArrayElementPrinter<'a> {
    key: Option<&'a str>,
}

impl Printer for ArrayElementPrinter<'_> {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::ArrayElement.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(1)?;
        let value = scope.print_child(0, context)?;
        match self.key {
            Some(key) => Ok(format!("\"{}\" => {}", key, value)),
            None => Ok(value),
        }
    }
}
