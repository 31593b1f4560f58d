use std::rc::Rc;

use crate::context::PrintContext;
use crate::error::PrintResult;
use crate::indent::PrinterConfig;
use crate::middleware::PrinterMiddleware;
use crate::printer::{PrintScope, Printer, PrinterFactory, PrinterId, PrinterKind, PrinterTree, PrinterTreeBuilder};

/// Renders its single child without adding text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughPrinter;

impl Printer for PassThroughPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::PassThrough
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        scope.expect_children(1)?;
        scope.print_child(0, context)
    }
}

type Combinator = Box<dyn Fn(Vec<String>) -> String>;

/// Renders every child and combines the results.
pub struct JoinPrinter {
    combine: Combinator,
}

impl JoinPrinter {
    pub fn new(combine: impl Fn(Vec<String>) -> String + 'static) -> Self {
        Self {
            combine: Box::new(combine),
        }
    }

    pub fn separated(separator: impl Into<String>) -> Self {
        let separator = separator.into();
        Self::new(move |parts| parts.join(&separator))
    }
}

impl Printer for JoinPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Join
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        Ok((self.combine)(scope.print_children(context)?))
    }
}

/// Sequence of sibling statements, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementSequencePrinter;

impl Printer for StatementSequencePrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::StatementSequence
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        Ok(scope.print_children(context)?.join("\n"))
    }
}

type PrintFn<'a> = Box<dyn for<'t> Fn(PrintScope<'t>, &PrintContext<'t>) -> PrintResult<String> + 'a>;

/// Printer backed by an arbitrary function.
pub struct HighOrderPrinter<'a> {
    print_fn: PrintFn<'a>,
}

impl<'a> HighOrderPrinter<'a> {
    pub fn new<F>(print_fn: F) -> Self
    where
        F: for<'t> Fn(PrintScope<'t>, &PrintContext<'t>) -> PrintResult<String> + 'a,
    {
        Self {
            print_fn: Box::new(print_fn),
        }
    }
}

impl Printer for HighOrderPrinter<'_> {
    fn kind(&self) -> PrinterKind {
        PrinterKind::HighOrder
    }

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String> {
        (self.print_fn)(scope, context)
    }
}

/// Leaf printer emitting fixed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrinter {
    kind: &'static str,
    text: String,
}

impl TextPrinter {
    pub fn new(kind: &'static str, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl Printer for TextPrinter {
    fn kind(&self) -> PrinterKind {
        PrinterKind::Node(self.kind)
    }

    fn do_print<'t>(&self, _scope: PrintScope<'t>, _context: &PrintContext<'t>) -> PrintResult<String> {
        Ok(self.text.clone())
    }
}

/// Register a statement sequence under `parent` holding one printer per
/// statement.
pub fn attach_sequence<'a, F>(
    builder: &mut PrinterTreeBuilder<'a>,
    parent: Option<PrinterId>,
    statements: &'a [F],
) -> PrinterId
where
    F: PrinterFactory,
{
    let id = builder.push(parent, StatementSequencePrinter);
    builder.attach_all(id, statements);
    id
}

/// Top-level statements of one generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile<S> {
    statements: Vec<S>,
}

impl<S: PrinterFactory> SourceFile<S> {
    pub fn new(statements: Vec<S>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[S] {
        &self.statements
    }

    /// Render the file against a root frame built from `config` and
    /// `middlewares`.
    pub fn print(
        &self,
        config: PrinterConfig,
        middlewares: Vec<Rc<dyn PrinterMiddleware>>,
    ) -> PrintResult<String> {
        self.print_with(PrintContext::initial(config, middlewares))
    }

    pub fn print_with(&self, context: PrintContext<'_>) -> PrintResult<String> {
        PrinterTree::build(self).print(context)
    }
}

impl<S: PrinterFactory> PrinterFactory for SourceFile<S> {
    fn create_printer<'a>(
        &'a self,
        builder: &mut PrinterTreeBuilder<'a>,
        parent: Option<PrinterId>,
    ) -> PrinterId {
        let id = builder.push(
            parent,
            HighOrderPrinter::new(|scope, context| Ok(scope.print_children(context)?.join("\n"))),
        );
        attach_sequence(builder, Some(id), &self.statements);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::IndentMiddleware;

    struct Statement(&'static str);

    impl PrinterFactory for Statement {
        fn create_printer<'a>(
            &'a self,
            builder: &mut PrinterTreeBuilder<'a>,
            parent: Option<PrinterId>,
        ) -> PrinterId {
            builder.push(parent, TextPrinter::new("Statement", self.0))
        }
    }

    struct Block(Vec<Statement>);

    impl PrinterFactory for Block {
        fn create_printer<'a>(
            &'a self,
            builder: &mut PrinterTreeBuilder<'a>,
            parent: Option<PrinterId>,
        ) -> PrinterId {
            let id = builder.push(
                parent,
                HighOrderPrinter::new(|scope, context| {
                    let body = scope.print_child_with(
                        0,
                        context,
                        None,
                        crate::state::PrintStateTransitionRule::Indent,
                    )?;
                    Ok(format!("{{\n{}\n}}", body))
                }),
            );
            attach_sequence(builder, Some(id), &self.0);
            id
        }
    }

    fn args(n: usize) -> PrinterTree<'static> {
        let mut builder = PrinterTreeBuilder::new();
        let root = builder.push(None, JoinPrinter::separated(", "));
        for i in 0..n {
            builder.push(Some(root), TextPrinter::new("Argument", format!("a{}", i)));
        }
        builder.finish(root)
    }

    #[test]
    fn test_join_has_no_trailing_separator() {
        let context = || PrintContext::initial(PrinterConfig::default(), Vec::new());

        for n in 0..5 {
            let text = args(n).print(context()).expect("Failed to print");
            assert_eq!(text.matches(", ").count(), n.saturating_sub(1));
            assert!(!text.ends_with(", "));
        }
    }

    #[test]
    fn test_source_file_joins_statements() {
        let file = SourceFile::new(vec![Statement("one"), Statement("two")]);
        let text = file
            .print(PrinterConfig::default(), vec![Rc::new(IndentMiddleware) as Rc<dyn PrinterMiddleware>])
            .expect("Failed to print");

        assert_eq!(text, "one\ntwo");
    }

    #[test]
    fn test_nested_block_is_indented() {
        let file = SourceFile::new(vec![Block(vec![Statement("x;"), Statement("y;")])]);
        let text = file
            .print(PrinterConfig::default(), vec![Rc::new(IndentMiddleware) as Rc<dyn PrinterMiddleware>])
            .expect("Failed to print");

        assert_eq!(text, "{\n    x;\n    y;\n}");
    }

    #[test]
    fn test_high_order_sees_its_children() {
        let mut builder = PrinterTreeBuilder::new();
        let root = builder.push(
            None,
            HighOrderPrinter::new(|scope, _context| Ok(format!("{} children", scope.child_count()))),
        );
        builder.push(Some(root), TextPrinter::new("Leaf", "a"));
        let tree = builder.finish(root);

        let context = PrintContext::initial(PrinterConfig::default(), Vec::new());
        assert_eq!(tree.print(context).expect("Failed to print"), "1 children");
    }
}
