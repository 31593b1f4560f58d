use std::fmt;

use tracing::debug;

use crate::context::PrintContext;
use crate::error::{PrintError, PrintResult};
use crate::state::PrintStateTransitionRule;

/// Index of a printer inside a [`PrinterTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrinterId(usize);

impl PrinterId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Closed set of printer shapes visible to middleware through
/// [`PrintContext::stack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrinterKind {
    /// A grammar node printer, tagged with the node kind it renders.
    Node(&'static str),
    PassThrough,
    Join,
    StatementSequence,
    HighOrder,
}

impl fmt::Display for PrinterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrinterKind::Node(kind) => write!(f, "{}", kind),
            PrinterKind::PassThrough => write!(f, "PassThrough"),
            PrinterKind::Join => write!(f, "Join"),
            PrinterKind::StatementSequence => write!(f, "StatementSequence"),
            PrinterKind::HighOrder => write!(f, "HighOrder"),
        }
    }
}

/// Rendering counterpart of an AST node.
///
/// Implementations only produce their own text; the surrounding protocol
/// (registering the frame, running middleware hooks) is driven by the tree.
pub trait Printer {
    fn kind(&self) -> PrinterKind;

    fn do_print<'t>(&self, scope: PrintScope<'t>, context: &PrintContext<'t>) -> PrintResult<String>;
}

/// Anything that can register exactly one printer (plus the printers of its
/// children) in a tree under construction.
pub trait PrinterFactory {
    fn create_printer<'a>(
        &'a self,
        builder: &mut PrinterTreeBuilder<'a>,
        parent: Option<PrinterId>,
    ) -> PrinterId;
}

impl<T: PrinterFactory + ?Sized> PrinterFactory for Box<T> {
    fn create_printer<'a>(
        &'a self,
        builder: &mut PrinterTreeBuilder<'a>,
        parent: Option<PrinterId>,
    ) -> PrinterId {
        (**self).create_printer(builder, parent)
    }
}

struct Slot<'a> {
    printer: Box<dyn Printer + 'a>,
    parent: Option<PrinterId>,
    children: Vec<PrinterId>,
}

/// Collects printers in depth-first order while a node tree is walked.
pub struct PrinterTreeBuilder<'a> {
    slots: Vec<Slot<'a>>,
}

impl<'a> PrinterTreeBuilder<'a> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Register `printer` as the next child of `parent`.
    pub fn push(&mut self, parent: Option<PrinterId>, printer: impl Printer + 'a) -> PrinterId {
        let id = PrinterId(self.slots.len());
        self.slots.push(Slot {
            printer: Box::new(printer),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.slots[parent.0].children.push(id);
        }
        id
    }

    /// Let `factory` register its printer under `parent`.
    pub fn attach<F>(&mut self, parent: PrinterId, factory: &'a F) -> PrinterId
    where
        F: PrinterFactory + ?Sized,
    {
        factory.create_printer(self, Some(parent))
    }

    pub fn attach_all<F, I>(&mut self, parent: PrinterId, factories: I)
    where
        F: PrinterFactory + 'a,
        I: IntoIterator<Item = &'a F>,
    {
        for factory in factories {
            self.attach(parent, factory);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn finish(self, root: PrinterId) -> PrinterTree<'a> {
        PrinterTree {
            slots: self.slots,
            root,
        }
    }
}

impl Default for PrinterTreeBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena holding a fully built printer tree.
pub struct PrinterTree<'a> {
    slots: Vec<Slot<'a>>,
    root: PrinterId,
}

impl<'a> PrinterTree<'a> {
    /// Build the printer tree of `factory` in one pass.
    pub fn build<F: PrinterFactory + ?Sized>(factory: &'a F) -> Self {
        let mut builder = PrinterTreeBuilder::new();
        let root = factory.create_printer(&mut builder, None);
        let tree = builder.finish(root);
        debug!(printers = tree.len(), root = %tree.kind(root), "built printer tree");
        tree
    }

    pub fn root(&self) -> PrinterId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn kind(&self, id: PrinterId) -> PrinterKind {
        self.slots[id.0].printer.kind()
    }

    pub fn parent(&self, id: PrinterId) -> Option<PrinterId> {
        self.slots[id.0].parent
    }

    pub fn children(&self, id: PrinterId) -> &[PrinterId] {
        &self.slots[id.0].children
    }

    fn printer(&self, id: PrinterId) -> &(dyn Printer + 'a) {
        self.slots[id.0].printer.as_ref()
    }

    /// Render the whole tree from its root against `context`.
    pub fn print(&self, context: PrintContext<'_>) -> PrintResult<String> {
        let mut context = context;
        render(self, self.root, &mut context)
    }
}

/// Render printer `id` using the shared protocol: register the printer on
/// the frame, run every `configure_context` hook, print, then fold the text
/// through every `transform` hook in list order.
fn render<'t>(
    tree: &'t PrinterTree<'t>,
    id: PrinterId,
    context: &mut PrintContext<'t>,
) -> PrintResult<String> {
    let printer = tree.printer(id);
    context.set_printer(printer);

    for middleware in context.middlewares().iter() {
        middleware.configure_context(context);
    }

    let text = printer.do_print(PrintScope { tree, id }, context)?;

    // hooks may have added middleware to this frame
    Ok(context
        .middlewares()
        .iter()
        .fold(text, |text, middleware| middleware.transform(context, text)))
}

/// View of one printer's position in the tree, handed to
/// [`Printer::do_print`] so it can render its children.
#[derive(Clone, Copy)]
pub struct PrintScope<'t> {
    tree: &'t PrinterTree<'t>,
    id: PrinterId,
}

impl<'t> PrintScope<'t> {
    pub fn id(&self) -> PrinterId {
        self.id
    }

    pub fn kind(&self) -> PrinterKind {
        self.tree.kind(self.id)
    }

    pub fn parent_kind(&self) -> Option<PrinterKind> {
        self.tree.parent(self.id).map(|parent| self.tree.kind(parent))
    }

    pub fn children(&self) -> &'t [PrinterId] {
        self.tree.children(self.id)
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Fail with `InvalidChildCount` unless exactly `expected` children exist.
    pub fn expect_children(&self, expected: usize) -> PrintResult<()> {
        let found = self.child_count();
        if found != expected {
            return Err(PrintError::invalid_child_count(
                self.kind().to_string(),
                expected,
                found,
            ));
        }
        Ok(())
    }

    fn child(&self, index: usize) -> PrintResult<PrinterId> {
        self.children().get(index).copied().ok_or_else(|| {
            PrintError::invalid_child_count(self.kind().to_string(), index + 1, self.child_count())
        })
    }

    /// Render child `index` against a fresh child frame of `context`.
    pub fn print_child(&self, index: usize, context: &PrintContext<'t>) -> PrintResult<String> {
        self.print_child_with(index, context, None, PrintStateTransitionRule::Keep)
    }

    pub fn print_child_with(
        &self,
        index: usize,
        context: &PrintContext<'t>,
        configure: Option<&dyn Fn(&mut PrintContext<'_>)>,
        rule: PrintStateTransitionRule,
    ) -> PrintResult<String> {
        let id = self.child(index)?;
        let mut child = context.create_child(configure, rule);
        render(self.tree, id, &mut child)
    }

    /// Render every child, each against its own fresh child frame.
    pub fn print_children(&self, context: &PrintContext<'t>) -> PrintResult<Vec<String>> {
        self.print_children_with(context, None)
    }

    pub fn print_children_with(
        &self,
        context: &PrintContext<'t>,
        configure: Option<&dyn Fn(&mut PrintContext<'_>)>,
    ) -> PrintResult<Vec<String>> {
        (0..self.child_count())
            .map(|index| self.print_child_with(index, context, configure, PrintStateTransitionRule::Keep))
            .collect()
    }
}
