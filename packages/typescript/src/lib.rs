//! TypeScript grammar for the specgen printer and the class generator
//! built on it.

mod ast;
mod generator;
mod printer;

pub use ast::{
    this_access, Annotation, Argument, ArrayDeclaration, ArrayElement, Callable, ClassDeclaration,
    DocComment, Expression, Invocation, LeftValue, MemberDeclaration, MethodBody, MethodDeclaration,
    Modifier, NodeKind, Statement, UnaryOperator,
};
pub use generator::{ts_type, TypeScriptGenerator, GENERATED_NOTICE};
pub use printer::LITERAL_WRAP_WIDTH;

#[cfg(test)]
mod tests;
