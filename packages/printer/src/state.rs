use std::rc::Rc;

/// Per-frame indentation state.
///
/// States form a chain through their parents: a child frame never mutates
/// the state it was derived from, it receives a fresh link instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintState {
    parent: Option<Rc<PrintState>>,
    indent_size: usize,
}

impl PrintState {
    pub fn initial() -> Self {
        Self {
            parent: None,
            indent_size: 0,
        }
    }

    pub fn parent(&self) -> Option<&PrintState> {
        self.parent.as_deref()
    }

    pub fn indent_size(&self) -> usize {
        self.indent_size
    }

    pub fn set_indent_size(&mut self, indent_size: usize) {
        self.indent_size = indent_size;
    }

    /// Number of ancestors in the chain.
    pub fn level(&self) -> usize {
        let mut level = 0;
        let mut current = self.parent();
        while let Some(state) = current {
            level += 1;
            current = state.parent();
        }
        level
    }

    /// A new link whose parent is `self`, carrying the same indent size.
    pub fn derive(&self) -> Self {
        Self {
            parent: Some(Rc::new(self.clone())),
            indent_size: self.indent_size,
        }
    }
}

impl Default for PrintState {
    fn default() -> Self {
        Self::initial()
    }
}

/// How a child frame's state differs from its parent's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrintStateTransitionRule {
    #[default]
    Keep,
    Indent,
    Dedent,
    IndentTo(usize),
}

impl PrintStateTransitionRule {
    pub fn keep() -> Self {
        Self::Keep
    }

    pub fn apply(&self, state: &mut PrintState) {
        match self {
            Self::Keep => {}
            Self::Indent => state.set_indent_size(state.indent_size() + 1),
            Self::Dedent => state.set_indent_size(state.indent_size().saturating_sub(1)),
            Self::IndentTo(size) => state.set_indent_size(*size),
        }
    }
}

/// Produces the state of a child frame.
pub trait PrintStateGenerator {
    fn generate(&self, previous: &PrintState, rule: &PrintStateTransitionRule) -> PrintState;
}

/// Derives a new link from the previous state and applies the rule to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStateGenerator;

impl PrintStateGenerator for DefaultStateGenerator {
    fn generate(&self, previous: &PrintState, rule: &PrintStateTransitionRule) -> PrintState {
        let mut next = previous.derive();
        rule.apply(&mut next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_preserves_indent() {
        let mut root = PrintState::initial();
        root.set_indent_size(2);

        let child = DefaultStateGenerator.generate(&root, &PrintStateTransitionRule::Keep);
        assert_eq!(child.indent_size(), 2);
        assert_eq!(child.parent(), Some(&root));
    }

    #[test]
    fn test_rules_do_not_touch_previous_state() {
        let root = PrintState::initial();

        let indented = DefaultStateGenerator.generate(&root, &PrintStateTransitionRule::Indent);
        assert_eq!(indented.indent_size(), 1);
        assert_eq!(root.indent_size(), 0);

        let forced = DefaultStateGenerator.generate(&indented, &PrintStateTransitionRule::IndentTo(5));
        assert_eq!(forced.indent_size(), 5);
        assert_eq!(indented.indent_size(), 1);
    }

    #[test]
    fn test_dedent_saturates() {
        let root = PrintState::initial();
        let child = DefaultStateGenerator.generate(&root, &PrintStateTransitionRule::Dedent);
        assert_eq!(child.indent_size(), 0);
    }

    #[test]
    fn test_level_counts_ancestors() {
        let root = PrintState::initial();
        let child = root.derive();
        let grandchild = child.derive();

        assert_eq!(root.level(), 0);
        assert_eq!(child.level(), 1);
        assert_eq!(grandchild.level(), 2);
    }
}
