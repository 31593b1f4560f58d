//! Grammar-agnostic tree printing.
//!
//! A grammar registers one [`Printer`] per AST node through
//! [`PrinterFactory`], the resulting [`PrinterTree`] is rendered against a
//! chain of [`PrintContext`] frames, and [`PrinterMiddleware`] hooks observe
//! every node on the way.

mod compose;
mod context;
mod error;
mod indent;
mod middleware;
mod node;
mod printer;
mod state;

pub use compose::{
    attach_sequence, HighOrderPrinter, JoinPrinter, PassThroughPrinter, SourceFile,
    StatementSequencePrinter, TextPrinter,
};
pub use context::{MiddlewareList, PrintContext, PrintContextBuilder, RenderEnv};
pub use error::{PrintError, PrintResult};
pub use indent::{Indent, IndentStyle, PrinterConfig};
pub use middleware::{IndentMiddleware, PrinterMiddleware, TracingMiddleware};
pub use node::{count_nodes, AccessPath, Accessor, Identifier, Node, Type};
pub use printer::{PrintScope, Printer, PrinterFactory, PrinterId, PrinterKind, PrinterTree, PrinterTreeBuilder};
pub use state::{DefaultStateGenerator, PrintState, PrintStateGenerator, PrintStateTransitionRule};

/// Build the printer tree of `root` and render it against `context`.
pub fn render<F: PrinterFactory + ?Sized>(root: &F, context: PrintContext<'_>) -> PrintResult<String> {
    PrinterTree::build(root).print(context)
}
