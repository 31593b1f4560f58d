use std::fmt;

use crate::error::{PrintError, PrintResult};

/// Common view over AST nodes of every grammar.
pub trait Node {
    fn kind(&self) -> &'static str;

    /// Whether the node only groups its children and has no syntax of its own.
    fn is_logical(&self) -> bool;

    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }
}

/// Count `node` and all of its descendants.
pub fn count_nodes(node: &dyn Node) -> usize {
    1 + node.children().into_iter().map(count_nodes).sum::<usize>()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    represent: String,
}

impl Identifier {
    pub fn new(represent: impl Into<String>) -> Self {
        Self {
            represent: represent.into(),
        }
    }

    pub fn represent(&self) -> &str {
        &self.represent
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.represent)
    }
}

impl Node for Identifier {
    fn kind(&self) -> &'static str {
        "Identifier"
    }

    fn is_logical(&self) -> bool {
        false
    }
}

/// Descriptive type tag. Never checked, only rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    represent: String,
}

impl Type {
    pub fn new(represent: impl Into<String>) -> Self {
        Self {
            represent: represent.into(),
        }
    }

    pub fn string() -> Self {
        Self::new("string")
    }

    pub fn number() -> Self {
        Self::new("number")
    }

    pub fn boolean() -> Self {
        Self::new("boolean")
    }

    pub fn null() -> Self {
        Self::new("null")
    }

    pub fn undefined() -> Self {
        Self::new("undefined")
    }

    pub fn callable() -> Self {
        Self::new("callable")
    }

    pub fn any() -> Self {
        Self::new("any")
    }

    pub fn instance(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    pub fn represent(&self) -> &str {
        &self.represent
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.represent)
    }
}

impl Node for Type {
    fn kind(&self) -> &'static str {
        "Type"
    }

    fn is_logical(&self) -> bool {
        false
    }
}

/// One segment of a member access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    name: String,
    ty: Type,
}

impl Accessor {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

impl Node for Accessor {
    fn kind(&self) -> &'static str {
        "Accessor"
    }

    fn is_logical(&self) -> bool {
        false
    }
}

/// Immutable member-access chain such as `a.b.c`.
///
/// The path owns its accessors, so an accessor belongs to exactly one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPath {
    segments: Vec<Accessor>,
}

impl AccessPath {
    /// Link `accessors` into one path; the last accessor is the outermost
    /// segment and decides the path's type.
    pub fn series(accessors: Vec<Accessor>) -> PrintResult<Self> {
        if accessors.is_empty() {
            return Err(PrintError::EmptyAccessPath);
        }
        Ok(Self { segments: accessors })
    }

    /// Path starting at `root`, e.g. a `this` accessor.
    pub fn rooted(root: Accessor, segments: impl IntoIterator<Item = Accessor>) -> Self {
        let mut accessors = vec![root];
        accessors.extend(segments);
        Self { segments: accessors }
    }

    pub fn segments(&self) -> &[Accessor] {
        &self.segments
    }

    /// Outermost segment.
    pub fn head(&self) -> &Accessor {
        // series() rejects empty paths
        &self.segments[self.segments.len() - 1]
    }

    pub fn ty(&self) -> &Type {
        self.head().ty()
    }

    /// Segment names in declaration order joined with `separator`.
    pub fn render(&self, separator: &str) -> String {
        self.segments
            .iter()
            .map(Accessor::name)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl Node for AccessPath {
    fn kind(&self) -> &'static str {
        "AccessPath"
    }

    fn is_logical(&self) -> bool {
        false
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.segments.iter().map(|segment| segment as &dyn Node).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(names: &[&str]) -> AccessPath {
        AccessPath::series(
            names
                .iter()
                .map(|name| Accessor::new(*name, Type::instance(name.to_uppercase())))
                .collect(),
        )
        .expect("Failed to build access path")
    }

    #[test]
    fn test_series_renders_in_order() {
        let path = path(&["a", "b", "c"]);
        assert_eq!(path.render("."), "a.b.c");
        assert_eq!(path.render("->"), "a->b->c");
    }

    #[test]
    fn test_series_takes_type_from_last_accessor() {
        let path = path(&["this", "user", "name"]);
        assert_eq!(path.head().name(), "name");
        assert_eq!(path.ty(), &Type::instance("NAME"));
    }

    #[test]
    fn test_empty_series_fails() {
        assert_eq!(AccessPath::series(Vec::new()), Err(PrintError::EmptyAccessPath));
    }

    #[test]
    fn test_cloned_path_is_independent() {
        let original = path(&["a", "b"]);
        let copy = original.clone();
        let longer = AccessPath::series(
            copy.segments()
                .iter()
                .cloned()
                .chain(std::iter::once(Accessor::new("c", Type::any())))
                .collect(),
        )
        .expect("Failed to build access path");

        assert_eq!(original.render("."), "a.b");
        assert_eq!(longer.render("."), "a.b.c");
    }

    #[test]
    fn test_node_children() {
        let path = path(&["a", "b"]);
        assert!(!path.is_logical());
        assert_eq!(path.children().len(), 2);
        assert_eq!(count_nodes(&path), 3);
        assert_eq!(Type::string().represent(), "string");
        assert_eq!(Identifier::new("Foo").to_string(), "Foo");
    }
}
