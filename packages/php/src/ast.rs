use specgen_printer::{AccessPath, Accessor, Identifier, Node, Type};

/// Every node kind of the PHP grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    OpenTag,
    Namespace,
    Use,
    Comment,
    DocComment,
    Class,
    Member,
    Method,
    MethodBody,
    Modifiers,
    Modifier,
    Argument,
    ArgumentList,
    Assignment,
    Return,
    ExpressionStatement,
    BlankLine,
    Raw,
    Access,
    Variable,
    Invocation,
    ParameterList,
    Unary,
    Operator,
    Conditional,
    Array,
    ArrayElement,
    NamedCallable,
    Constructor,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::OpenTag => "OpenTag",
            NodeKind::Namespace => "Namespace",
            NodeKind::Use => "Use",
            NodeKind::Comment => "Comment",
            NodeKind::DocComment => "DocComment",
            NodeKind::Class => "Class",
            NodeKind::Member => "Member",
            NodeKind::Method => "Method",
            NodeKind::MethodBody => "MethodBody",
            NodeKind::Modifiers => "Modifiers",
            NodeKind::Modifier => "Modifier",
            NodeKind::Argument => "Argument",
            NodeKind::ArgumentList => "ArgumentList",
            NodeKind::Assignment => "Assignment",
            NodeKind::Return => "Return",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::BlankLine => "BlankLine",
            NodeKind::Raw => "Raw",
            NodeKind::Access => "Access",
            NodeKind::Variable => "Variable",
            NodeKind::Invocation => "Invocation",
            NodeKind::ParameterList => "ParameterList",
            NodeKind::Unary => "Unary",
            NodeKind::Operator => "Operator",
            NodeKind::Conditional => "Conditional",
            NodeKind::Array => "Array",
            NodeKind::ArrayElement => "ArrayElement",
            NodeKind::NamedCallable => "NamedCallable",
            NodeKind::Constructor => "Constructor",
        }
    }

    /// Grouping nodes carry no syntax of their own.
    pub fn is_logical(&self) -> bool {
        match self {
            NodeKind::MethodBody
            | NodeKind::Modifiers
            | NodeKind::ArgumentList
            | NodeKind::ParameterList => true,
            NodeKind::OpenTag
            | NodeKind::Namespace
            | NodeKind::Use
            | NodeKind::Comment
            | NodeKind::DocComment
            | NodeKind::Class
            | NodeKind::Member
            | NodeKind::Method
            | NodeKind::Modifier
            | NodeKind::Argument
            | NodeKind::Assignment
            | NodeKind::Return
            | NodeKind::ExpressionStatement
            | NodeKind::BlankLine
            | NodeKind::Raw
            | NodeKind::Access
            | NodeKind::Variable
            | NodeKind::Invocation
            | NodeKind::Unary
            | NodeKind::Operator
            | NodeKind::Conditional
            | NodeKind::Array
            | NodeKind::ArrayElement
            | NodeKind::NamedCallable
            | NodeKind::Constructor => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
}

impl Modifier {
    pub fn represent(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
        }
    }
}

/// Binary comparison operators; every one evaluates to a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    TripleEqual,
    DoubleEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    NotTripleEqual,
    NotDoubleEqual,
    InstanceOf,
}

impl UnaryOperator {
    pub fn represent(&self) -> &'static str {
        match self {
            UnaryOperator::TripleEqual => "===",
            UnaryOperator::DoubleEqual => "==",
            UnaryOperator::GreaterThan => ">",
            UnaryOperator::GreaterThanOrEqual => ">=",
            UnaryOperator::LessThan => "<",
            UnaryOperator::LessThanOrEqual => "<=",
            UnaryOperator::NotTripleEqual => "!==",
            UnaryOperator::NotDoubleEqual => "!=",
            UnaryOperator::InstanceOf => "instanceof",
        }
    }

    pub fn ty(&self) -> Type {
        Type::boolean()
    }
}

/// `@name value` line of a doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: String,
    pub value: String,
}

impl Annotation {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn var(ty: &str, description: Option<&str>) -> Self {
        Self::new("var", join_words(&[Some(ty), description]))
    }

    pub fn param(ty: &str, name: &str, description: Option<&str>) -> Self {
        let variable = format!("${}", name);
        Self::new("param", join_words(&[Some(ty), Some(&variable), description]))
    }

    pub fn returns(ty: &str) -> Self {
        Self::new("return", ty)
    }
}

fn join_words(words: &[Option<&str>]) -> String {
    words.iter().flatten().copied().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    pub description: Option<String>,
    pub annotations: Vec<Annotation>,
}

impl DocComment {
    pub fn new(description: Option<String>, annotations: Vec<Annotation>) -> Self {
        Self {
            description,
            annotations,
        }
    }

    /// Body lines; a blank line separates the description from annotations.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(description) = &self.description {
            lines.push(description.clone());
            if !self.annotations.is_empty() {
                lines.push(String::new());
            }
        }
        lines.extend(
            self.annotations
                .iter()
                .map(|annotation| format!("@{} {}", annotation.name, annotation.value)),
        );
        lines
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.annotations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub name: Identifier,
    pub members: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDeclaration {
    pub modifiers: Vec<Modifier>,
    pub name: Identifier,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Identifier,
    pub ty: Type,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: Identifier::new(name),
            ty,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodBody {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    pub modifiers: Vec<Modifier>,
    pub name: Identifier,
    pub return_type: Type,
    pub arguments: Vec<Argument>,
    pub body: MethodBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    OpenTag,
    Namespace(String),
    Use(String),
    Comment(String),
    DocComment(DocComment),
    Class(ClassDeclaration),
    Member(MemberDeclaration),
    Method(MethodDeclaration),
    Assignment { left: LeftValue, right: Expression },
    Return(Expression),
    Expression(Expression),
    BlankLine,
}

impl Statement {
    pub fn class(name: impl Into<String>, members: Vec<Statement>) -> Self {
        Statement::Class(ClassDeclaration {
            name: Identifier::new(name),
            members,
        })
    }

    pub fn member(modifiers: Vec<Modifier>, name: impl Into<String>, ty: Type) -> Self {
        Statement::Member(MemberDeclaration {
            modifiers,
            name: Identifier::new(name),
            ty,
        })
    }

    pub fn method(
        modifiers: Vec<Modifier>,
        name: impl Into<String>,
        return_type: Type,
        arguments: Vec<Argument>,
        statements: Vec<Statement>,
    ) -> Self {
        Statement::Method(MethodDeclaration {
            modifiers,
            name: Identifier::new(name),
            return_type,
            arguments,
            body: MethodBody { statements },
        })
    }

    pub fn assign(left: LeftValue, right: Expression) -> Self {
        Statement::Assignment { left, right }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::OpenTag => NodeKind::OpenTag,
            Statement::Namespace(_) => NodeKind::Namespace,
            Statement::Use(_) => NodeKind::Use,
            Statement::Comment(_) => NodeKind::Comment,
            Statement::DocComment(_) => NodeKind::DocComment,
            Statement::Class(_) => NodeKind::Class,
            Statement::Member(_) => NodeKind::Member,
            Statement::Method(_) => NodeKind::Method,
            Statement::Assignment { .. } => NodeKind::Assignment,
            Statement::Return(_) => NodeKind::Return,
            Statement::Expression(_) => NodeKind::ExpressionStatement,
            Statement::BlankLine => NodeKind::BlankLine,
        }
    }
}

/// Assignable expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum LeftValue {
    Variable(Identifier),
    Access(AccessPath),
}

impl LeftValue {
    pub fn ty(&self) -> Option<&Type> {
        match self {
            LeftValue::Variable(_) => None,
            LeftValue::Access(path) => Some(path.ty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Callable {
    Named(String),
    /// `new Class`
    Constructor(Identifier),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub callable: Callable,
    pub ty: Type,
    pub parameters: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayElement {
    pub key: Option<String>,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDeclaration {
    pub dictionary: bool,
    pub elements: Vec<ArrayElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Verbatim expression text.
    Raw { expression: String, ty: Type },
    Access(AccessPath),
    Variable(Identifier),
    Invocation(Invocation),
    Unary {
        operator: UnaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        then: Box<Expression>,
        otherwise: Box<Expression>,
    },
    Array(ArrayDeclaration),
}

impl Expression {
    pub fn raw(expression: impl Into<String>, ty: Type) -> Self {
        Expression::Raw {
            expression: expression.into(),
            ty,
        }
    }

    pub fn null() -> Self {
        Self::raw("null", Type::null())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(Identifier::new(name))
    }

    pub fn call(name: impl Into<String>, ty: Type, parameters: Vec<Expression>) -> Self {
        Expression::Invocation(Invocation {
            callable: Callable::Named(name.into()),
            ty,
            parameters,
        })
    }

    pub fn construct(class: impl Into<String>, parameters: Vec<Expression>) -> Self {
        let class = class.into();
        Expression::Invocation(Invocation {
            ty: Type::instance(class.clone()),
            callable: Callable::Constructor(Identifier::new(class)),
            parameters,
        })
    }

    pub fn unary(operator: UnaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Unary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn conditional(condition: Expression, then: Expression, otherwise: Expression) -> Self {
        Expression::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn list(values: Vec<Expression>) -> Self {
        Expression::Array(ArrayDeclaration {
            dictionary: false,
            elements: values
                .into_iter()
                .map(|value| ArrayElement { key: None, value })
                .collect(),
        })
    }

    pub fn dictionary(entries: Vec<(String, Expression)>) -> Self {
        Expression::Array(ArrayDeclaration {
            dictionary: true,
            elements: entries
                .into_iter()
                .map(|(key, value)| ArrayElement {
                    key: Some(key),
                    value,
                })
                .collect(),
        })
    }

    pub fn ty(&self) -> Type {
        match self {
            Expression::Raw { ty, .. } => ty.clone(),
            Expression::Access(path) => path.ty().clone(),
            Expression::Variable(_) => Type::any(),
            Expression::Invocation(invocation) => invocation.ty.clone(),
            Expression::Unary { operator, .. } => operator.ty(),
            Expression::Conditional { then, .. } => then.ty(),
            Expression::Array(_) => Type::instance("array"),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Raw { .. } => NodeKind::Raw,
            Expression::Access(_) => NodeKind::Access,
            Expression::Variable(_) => NodeKind::Variable,
            Expression::Invocation(_) => NodeKind::Invocation,
            Expression::Unary { .. } => NodeKind::Unary,
            Expression::Conditional { .. } => NodeKind::Conditional,
            Expression::Array(_) => NodeKind::Array,
        }
    }
}

/// `$this->a->b...` with the given segments after `$this`.
pub fn this_access(class: &str, segments: Vec<Accessor>) -> AccessPath {
    AccessPath::rooted(Accessor::new("$this", Type::instance(class)), segments)
}

impl Node for Statement {
    fn kind(&self) -> &'static str {
        Statement::kind(self).name()
    }

    fn is_logical(&self) -> bool {
        Statement::kind(self).is_logical()
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Statement::Class(class) => class.members.iter().map(|m| m as &dyn Node).collect(),
            Statement::Member(member) => vec![&member.name as &dyn Node, &member.ty],
            Statement::Method(method) => {
                let mut children = vec![&method.name as &dyn Node, &method.return_type];
                children.extend(method.arguments.iter().map(|a| a as &dyn Node));
                children.push(&method.body);
                children
            }
            Statement::Assignment { left, right } => vec![left as &dyn Node, right],
            Statement::Return(expression) | Statement::Expression(expression) => {
                vec![expression as &dyn Node]
            }
            _ => Vec::new(),
        }
    }
}

impl Node for Argument {
    fn kind(&self) -> &'static str {
        NodeKind::Argument.name()
    }

    fn is_logical(&self) -> bool {
        NodeKind::Argument.is_logical()
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.name as &dyn Node, &self.ty]
    }
}

impl Node for MethodBody {
    fn kind(&self) -> &'static str {
        NodeKind::MethodBody.name()
    }

    fn is_logical(&self) -> bool {
        NodeKind::MethodBody.is_logical()
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.statements.iter().map(|s| s as &dyn Node).collect()
    }
}

impl Node for LeftValue {
    fn kind(&self) -> &'static str {
        match self {
            LeftValue::Variable(_) => NodeKind::Variable.name(),
            LeftValue::Access(_) => NodeKind::Access.name(),
        }
    }

    fn is_logical(&self) -> bool {
        false
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            LeftValue::Variable(name) => vec![name as &dyn Node],
            LeftValue::Access(path) => vec![path as &dyn Node],
        }
    }
}

impl Node for Expression {
    fn kind(&self) -> &'static str {
        Expression::kind(self).name()
    }

    fn is_logical(&self) -> bool {
        Expression::kind(self).is_logical()
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Expression::Raw { ty, .. } => vec![ty as &dyn Node],
            Expression::Access(path) => vec![path as &dyn Node],
            Expression::Variable(name) => vec![name as &dyn Node],
            Expression::Invocation(invocation) => {
                invocation.parameters.iter().map(|p| p as &dyn Node).collect()
            }
            Expression::Unary { left, right, .. } => vec![left.as_ref() as &dyn Node, right.as_ref()],
            Expression::Conditional {
                condition,
                then,
                otherwise,
            } => vec![
                condition.as_ref() as &dyn Node,
                then.as_ref(),
                otherwise.as_ref(),
            ],
            Expression::Array(array) => array
                .elements
                .iter()
                .map(|element| &element.value as &dyn Node)
                .collect(),
        }
    }
}
