mod ast;
mod generator;
mod printer;

pub use ast::{
    this_access, Annotation, Argument, ArrayDeclaration, ArrayElement, Callable, ClassDeclaration,
    DocComment, Expression, Invocation, LeftValue, MemberDeclaration, MethodBody, MethodDeclaration,
    Modifier, NodeKind, Statement, UnaryOperator,
};
pub use generator::{php_type, PhpGenerator, GENERATED_NOTICE};
pub use printer::ARRAY_WRAP_WIDTH;

#[cfg(test)]
mod tests;
