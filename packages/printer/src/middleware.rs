use tracing::trace;

use crate::context::PrintContext;
use crate::printer::PrinterKind;
use crate::state::PrintStateTransitionRule;

/// Cross-cutting hook into every node's render cycle.
///
/// A single instance is shared by every frame of a render, so it observes
/// the whole tree.
pub trait PrinterMiddleware {
    /// Runs before `do_print` on the frame the printer renders against.
    fn configure_context(&self, _context: &mut PrintContext<'_>) {}

    /// Runs once for every frame created by `create_child`.
    fn configure_child_context(&self, _context: &mut PrintContext<'_>, _rule: &PrintStateTransitionRule) {}

    /// Rewrites the text a printer produced.
    fn transform(&self, _context: &PrintContext<'_>, text: String) -> String {
        text
    }
}

/// Prefixes every line of a statement sequence with the indentation of the
/// frame's depth. Other printers pass through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentMiddleware;

impl IndentMiddleware {
    fn applies(context: &PrintContext<'_>) -> bool {
        context
            .stack()
            .first()
            .map(|printer| printer.kind() == PrinterKind::StatementSequence)
            .unwrap_or(false)
    }
}

impl PrinterMiddleware for IndentMiddleware {
    fn transform(&self, context: &PrintContext<'_>, text: String) -> String {
        if !Self::applies(context) {
            return text;
        }

        let prefix = context.config().indent().process(context.state().indent_size());
        // an empty sequence has no lines
        if prefix.is_empty() || text.is_empty() {
            return text;
        }

        text.split('\n')
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Emits a `trace` event for every rendered printer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

impl PrinterMiddleware for TracingMiddleware {
    fn transform(&self, context: &PrintContext<'_>, text: String) -> String {
        let kind = context.printer().map(|printer| printer.kind().to_string());
        trace!(
            printer = kind.as_deref().unwrap_or("<none>"),
            depth = context.depth(),
            indent = context.state().indent_size(),
            level = context.state().level(),
            len = text.len(),
            "rendered node"
        );
        text
    }
}
