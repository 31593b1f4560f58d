use std::fmt;
use std::rc::Rc;

use crate::error::{PrintError, PrintResult};
use crate::indent::PrinterConfig;
use crate::middleware::PrinterMiddleware;
use crate::printer::{Printer, PrinterKind};
use crate::state::{DefaultStateGenerator, PrintState, PrintStateGenerator, PrintStateTransitionRule};

pub type MiddlewareList = Rc<Vec<Rc<dyn PrinterMiddleware>>>;

/// Settings shared by a frame and, unless overridden, all of its
/// descendants. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct RenderEnv {
    config: Rc<PrinterConfig>,
    middlewares: MiddlewareList,
    state_generator: Rc<dyn PrintStateGenerator>,
}

impl RenderEnv {
    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn middlewares(&self) -> &MiddlewareList {
        &self.middlewares
    }

    pub fn state_generator(&self) -> &Rc<dyn PrintStateGenerator> {
        &self.state_generator
    }
}

/// One frame of the context chain.
///
/// The chain mirrors the printer tree: every printer renders against its own
/// frame, created by its parent through [`PrintContext::create_child`].
pub struct PrintContext<'p> {
    parent: Option<&'p PrintContext<'p>>,
    env: RenderEnv,
    state: PrintState,
    printer: Option<&'p (dyn Printer + 'p)>,
}

impl PrintContext<'static> {
    /// Root frame with the default state generator and an initial state.
    pub fn initial(config: PrinterConfig, middlewares: Vec<Rc<dyn PrinterMiddleware>>) -> Self {
        Self {
            parent: None,
            env: RenderEnv {
                config: Rc::new(config),
                middlewares: Rc::new(middlewares),
                state_generator: Rc::new(DefaultStateGenerator),
            },
            state: PrintState::initial(),
            printer: None,
        }
    }

    pub fn builder() -> PrintContextBuilder {
        PrintContextBuilder::default()
    }
}

impl<'p> PrintContext<'p> {
    pub fn parent(&self) -> Option<&'p PrintContext<'p>> {
        self.parent
    }

    pub fn env(&self) -> &RenderEnv {
        &self.env
    }

    pub fn config(&self) -> &PrinterConfig {
        self.env.config()
    }

    pub fn set_config(&mut self, config: PrinterConfig) {
        self.env.config = Rc::new(config);
    }

    /// Shared handle to the middleware list of this frame.
    pub fn middlewares(&self) -> MiddlewareList {
        Rc::clone(&self.env.middlewares)
    }

    /// Append a middleware for this frame and the frames created below it.
    /// Ancestors keep their own list.
    pub fn add_middleware(&mut self, middleware: Rc<dyn PrinterMiddleware>) {
        Rc::make_mut(&mut self.env.middlewares).push(middleware);
    }

    pub fn state_generator(&self) -> Rc<dyn PrintStateGenerator> {
        Rc::clone(&self.env.state_generator)
    }

    pub fn set_state_generator(&mut self, state_generator: Rc<dyn PrintStateGenerator>) {
        self.env.state_generator = state_generator;
    }

    pub fn state(&self) -> &PrintState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PrintState {
        &mut self.state
    }

    pub fn set_state(&mut self, state: PrintState) {
        self.state = state;
    }

    pub fn printer(&self) -> Option<&'p (dyn Printer + 'p)> {
        self.printer
    }

    pub(crate) fn set_printer(&mut self, printer: &'p (dyn Printer + 'p)) {
        self.printer = Some(printer);
    }

    /// Number of frames above this one.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent;
        while let Some(frame) = current {
            depth += 1;
            current = frame.parent;
        }
        depth
    }

    /// Printers from this frame up to the root; the first entry is the
    /// printer rendering against this frame.
    pub fn stack(&self) -> Vec<&'p (dyn Printer + 'p)> {
        let mut stack: Vec<&'p (dyn Printer + 'p)> = self.printer.into_iter().collect();
        let mut current = self.parent;
        while let Some(frame) = current {
            stack.extend(frame.printer);
            current = frame.parent;
        }
        stack
    }

    pub fn stack_kinds(&self) -> Vec<PrinterKind> {
        self.stack().iter().map(|printer| printer.kind()).collect()
    }

    /// Derive a child frame.
    ///
    /// The child's state comes from this frame's state generator applied to
    /// `rule`. Every middleware then sees the child through
    /// `configure_child_context`, and `configure` runs last.
    pub fn create_child(
        &self,
        configure: Option<&dyn Fn(&mut PrintContext<'_>)>,
        rule: PrintStateTransitionRule,
    ) -> PrintContext<'_> {
        let state = self.env.state_generator.generate(&self.state, &rule);
        let mut child = PrintContext {
            parent: Some(self),
            env: self.env.clone(),
            state,
            printer: None,
        };

        let middlewares = self.middlewares();
        for middleware in middlewares.iter() {
            middleware.configure_child_context(&mut child, &rule);
        }

        if let Some(configure) = configure {
            configure(&mut child);
        }

        child
    }

    /// Child frame with no overrides and the `Keep` rule.
    pub fn child(&self) -> PrintContext<'_> {
        self.create_child(None, PrintStateTransitionRule::Keep)
    }
}

impl fmt::Debug for PrintContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrintContext")
            .field("depth", &self.depth())
            .field("config", self.config())
            .field("middlewares", &self.env.middlewares.len())
            .field("state", &self.state)
            .field("printer", &self.printer.map(|printer| printer.kind()))
            .finish()
    }
}

/// Builder for a root frame. `config` and `middlewares` are mandatory.
#[derive(Default)]
pub struct PrintContextBuilder {
    config: Option<PrinterConfig>,
    middlewares: Option<Vec<Rc<dyn PrinterMiddleware>>>,
    state_generator: Option<Rc<dyn PrintStateGenerator>>,
    state: Option<PrintState>,
}

impl PrintContextBuilder {
    pub fn config(mut self, config: PrinterConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn middlewares(mut self, middlewares: Vec<Rc<dyn PrinterMiddleware>>) -> Self {
        self.middlewares = Some(middlewares);
        self
    }

    pub fn middleware(mut self, middleware: Rc<dyn PrinterMiddleware>) -> Self {
        self.middlewares.get_or_insert_with(Vec::new).push(middleware);
        self
    }

    pub fn state_generator(mut self, state_generator: Rc<dyn PrintStateGenerator>) -> Self {
        self.state_generator = Some(state_generator);
        self
    }

    pub fn state(mut self, state: PrintState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn build(self) -> PrintResult<PrintContext<'static>> {
        let config = self
            .config
            .ok_or_else(|| PrintError::missing_root_configuration("config"))?;
        let middlewares = self
            .middlewares
            .ok_or_else(|| PrintError::missing_root_configuration("middlewares"))?;

        let mut context = PrintContext::initial(config, middlewares);
        if let Some(state_generator) = self.state_generator {
            context.set_state_generator(state_generator);
        }
        if let Some(state) = self.state {
            context.set_state(state);
        }
        Ok(context)
    }
}
