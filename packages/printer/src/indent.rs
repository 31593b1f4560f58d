/// Filler text repeated once per `span` columns of indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentStyle {
    filler: String,
    span: usize,
}

impl IndentStyle {
    /// A span of 0 is treated as 1.
    pub fn new(filler: impl Into<String>, span: usize) -> Self {
        Self {
            filler: filler.into(),
            span: span.max(1),
        }
    }

    /// One tab for every `span` columns.
    pub fn tab(span: usize) -> Self {
        Self::new("\t", span)
    }

    pub fn space() -> Self {
        Self::new(" ", 1)
    }

    pub fn none() -> Self {
        Self::new("", 1)
    }

    pub fn filler(&self) -> &str {
        &self.filler
    }

    pub fn span(&self) -> usize {
        self.span
    }

    /// Convert a column count into indentation text.
    pub fn process(&self, size: usize) -> String {
        self.filler.repeat(size / self.span)
    }
}

/// Columns per indent level plus the style used to fill them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indent {
    size: usize,
    style: IndentStyle,
}

impl Indent {
    pub fn new(size: usize, style: IndentStyle) -> Self {
        Self { size, style }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn style(&self) -> &IndentStyle {
        &self.style
    }

    /// Indentation text for `depth` levels.
    pub fn process(&self, depth: usize) -> String {
        self.style.process(self.size * depth)
    }
}

/// Rendering configuration shared by every frame of a print context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterConfig {
    indent: Indent,
}

impl PrinterConfig {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }

    pub fn indent(&self) -> &Indent {
        &self.indent
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::new(Indent::new(4, IndentStyle::space()))
    }
}
