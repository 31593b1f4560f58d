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

/// Literals whose elements add up to more than this many characters are
/// printed one element per line.
pub const LITERAL_WRAP_WIDTH: usize = 80;

const MEMBER_ACCESS: &str = ".";

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

fn attach_list<'a, F: PrinterFactory>(
    builder: &mut PrinterTreeBuilder<'a>,
    parent: PrinterId,
    items: &'a [F],
) -> PrinterId {
    let id = builder.push(Some(parent), JoinPrinter::separated(", "));
    builder.attach_all(id, items);
    id
}

fn class_body_depth(context: &mut PrintContext<'_>) {
    context.state_mut().set_indent_size(1);
}

fn prefixed(modifiers: String, rest: String) -> String {
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
            Statement::Comment(content) => {
                builder.push(parent, text(NodeKind::Comment, format!("// {}", content)))
            }
            Statement::BlockComment(content) => {
                builder.push(parent, text(NodeKind::BlockComment, format!("/* {} */", content)))
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
                attach_list(builder, id, &method.arguments);
                builder.attach(id, &method.body);
                id
            }
            Statement::Assignment { left, right } => {
                let id = builder.push(parent, StatementPrinter::new(NodeKind::Assignment, 2));
                builder.attach(id, left);
                builder.attach(id, right);
                id
            }
            Statement::Return(expression) => {
                let id = builder.push(parent, StatementPrinter::new(NodeKind::Return, 1));
                builder.attach(id, expression);
                id
            }
            Statement::Expression(expression) => {
                let id = builder.push(parent, StatementPrinter::new(NodeKind::ExpressionStatement, 1));
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
        builder.push(parent, text(NodeKind::Argument, format!("{}: {}", self.name, self.ty)))
    }
}

impl PrinterFactory for LeftValue {
    fn create_printer<'a>(
        &'a self,
        builder: &mut PrinterTreeBuilder<'a>,
        parent: Option<PrinterId>,
    ) -> PrinterId {
        match self {
            LeftValue::Variable(name) => builder.push(parent, text(NodeKind::Variable, name.represent())),
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
            Expression::Variable(name) => builder.push(parent, text(NodeKind::Variable, name.represent())),
            Expression::Invocation(invocation) => attach_invocation(builder, parent, invocation),
            Expression::Unary { operator, left, right } => {
                let id = builder.push(parent, JoinPrinter::separated(" "));
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
            Expression::Array(array) => attach_literal(builder, parent, array),
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
    attach_list(builder, id, &invocation.parameters);
    id
}

fn attach_literal<'a>(
    builder: &mut PrinterTreeBuilder<'a>,
    parent: Option<PrinterId>,
    array: &'a ArrayDeclaration,
) -> PrinterId {
    let (open, close) = if array.dictionary { ("{", "}") } else { ("[", "]") };
    let id = builder.push(parent, LiteralPrinter { open, close });
    for element in &array.elements {
        attach_element(builder, id, element, array.dictionary);
    }
    id
}

fn attach_element<'a>(
    builder: &mut PrinterTreeBuilder<'a>,
    parent: PrinterId,
    element: &'a ArrayElement,
    dictionary: bool,
) -> PrinterId {
    let key = if dictionary { element.key.as_deref() } else { None };
    let id = builder.push(Some(parent), ElementPrinter { key });
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
        let body: Vec<String> = self
            .comment
            .lines()
            .into_iter()
            .map(|line| if line.is_empty() { " *".to_string() } else { format!(" * {}", line) })
            .collect();
        Ok(format!("/**\n{}\n */", body.join("\n")))
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
        let export = if self.class.exported { "export " } else { "" };
        Ok(format!("{}class {} {{\n{}\n}}", export, self.class.name, body))
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
        Ok(prefixed(
            modifiers,
            format!("{}: {};", self.member.name, self.member.ty),
        ))
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

        let mut signature = format!("{}({})", self.method.name, arguments);
        if let Some(return_type) = &self.method.return_type {
            signature.push_str(&format!(": {}", return_type));
        }
        let signature = prefixed(modifiers, signature);

        if body.is_empty() {
            Ok(format!("{} {{\n}}", signature))
        } else {
            Ok(format!("{} {{\n{}\n}}", signature, body))
        }
    }
}

/// Statement ending in `;`; an assignment joins its two children with ` = `.
struct StatementPrinter {
    kind: NodeKind,
    arity: usize,
}

impl StatementPrinter {
    fn new(kind: NodeKind, arity: usize) -> Self {
        Self { kind, arity }
    }
}

impl Printer for StatementPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(self.kind.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(self.arity)?;
        let parts = scope.print_children(context)?;
        let line = match self.kind {
            NodeKind::Return => format!("return {}", parts.join("")),
            _ => parts.join(" = "),
        };
        Ok(format!("{};", line))
    }
}

struct InvocationPrinter;

impl Printer for InvocationPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::Invocation.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(2)?;
        let callable = scope.print_child(0, context)?;
        let parameters = scope.print_child(1, context)?;
        Ok(format!("{}({})", callable, parameters))
    }
}

struct ConditionalPrinter;

impl Printer for ConditionalPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::Conditional.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(3)?;
        let parts = scope.print_children(context)?;
        Ok(format!("{} ? {} : {}", parts[0], parts[1], parts[2]))
    }
}

struct LiteralPrinter {
    open: &'static str,
    close: &'static str,
}

impl Printer for LiteralPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::Array.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        let elements = scope.print_children(context)?;
        let width: usize = elements.iter().map(|element| element.chars().count()).sum();

        if width <= LITERAL_WRAP_WIDTH {
            return Ok(format!("{}{}{}", self.open, elements.join(", "), self.close));
        }

        let indent = context.config().indent().process(1);
        let lines: Vec<String> = elements
            .iter()
            .map(|element| format!("{}{}", indent, element))
            .collect();
        Ok(format!("{}\n{}\n{}", self.open, lines.join(",\n"), self.close))
    }
}

struct ElementPrinter<'a> {
    key: Option<&'a str>,
}

impl Printer for ElementPrinter<'_> {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(NodeKind::ArrayElement.name())
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(1)?;
        let value = scope.print_child(0, context)?;
        Ok(match self.key {
            Some(key) => format!("\"{}\": {}", key, value),
            None => value,
        })
    }
}
