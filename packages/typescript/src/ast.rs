use specgen_printer::{AccessPath, Accessor, Identifier, Node, Type};

/// Every node kind of the TypeScript grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Comment,
    BlockComment,
    DocComment,
    Class,
    Member,
    Method,
    MethodBody,
    Modifiers,
    Modifier,
    Argument,
    ArgumentList,
    ReturnType,
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
            NodeKind::Comment => "Comment",
            NodeKind::BlockComment => "BlockComment",
            NodeKind::DocComment => "DocComment",
            NodeKind::Class => "Class",
            NodeKind::Member => "Member",
            NodeKind::Method => "Method",
            NodeKind::MethodBody => "MethodBody",
            NodeKind::Modifiers => "Modifiers",
            NodeKind::Modifier => "Modifier",
            NodeKind::Argument => "Argument",
            NodeKind::ArgumentList => "ArgumentList",
            NodeKind::ReturnType => "ReturnType",
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

    pub fn is_logical(&self) -> bool {
        match self {
            NodeKind::MethodBody
            | NodeKind::Modifiers
            | NodeKind::ArgumentList
            | NodeKind::ParameterList => true,
            NodeKind::Comment
            | NodeKind::BlockComment
            | NodeKind::DocComment
            | NodeKind::Class
            | NodeKind::Member
            | NodeKind::Method
            | NodeKind::Modifier
            | NodeKind::Argument
            | NodeKind::ReturnType
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
    Readonly,
}

impl Modifier {
    pub fn represent(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Readonly => "readonly",
        }
    }
}

/// Binary comparison operators, all typed `boolean`.
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

    /// `@param name description`
    pub fn param(name: &str, description: Option<&str>) -> Self {
        match description {
            Some(description) => Self::new("param", format!("{} {}", name, description)),
            None => Self::new("param", name),
        }
    }
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

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(description) = &self.description {
            lines.push(description.clone());
            if !self.annotations.is_empty() {
                lines.push(String::new());
            }
        }
        for annotation in &self.annotations {
            lines.push(format!("@{} {}", annotation.name, annotation.value));
        }
        lines
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.annotations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub exported: bool,
    pub name: Identifier,
    pub members: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDeclaration {
    pub modifiers: Vec<Modifier>,
    pub name: Identifier,
    pub ty: Type,
}

/// `name: type` in a parameter list.
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

/// A method; constructors carry no return type.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    pub modifiers: Vec<Modifier>,
    pub name: Identifier,
    pub return_type: Option<Type>,
    pub arguments: Vec<Argument>,
    pub body: MethodBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Comment(String),
    BlockComment(String),
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
            exported: false,
            name: Identifier::new(name),
            members,
        })
    }

    pub fn exported_class(name: impl Into<String>, members: Vec<Statement>) -> Self {
        Statement::Class(ClassDeclaration {
            exported: true,
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
        return_type: Option<Type>,
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
            Statement::Comment(_) => NodeKind::Comment,
            Statement::BlockComment(_) => NodeKind::BlockComment,
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

#[derive(Debug, Clone, PartialEq)]
pub enum LeftValue {
    Variable(Identifier),
    Access(AccessPath),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Callable {
    Named(String),
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

/// Array literal, or object literal when `dictionary` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDeclaration {
    pub dictionary: bool,
    pub elements: Vec<ArrayElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
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

    pub fn object(entries: Vec<(String, Expression)>) -> Self {
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
            Expression::Array(array) if array.dictionary => Type::any(),
            Expression::Array(_) => Type::instance("any[]"),
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

/// `this.a.b...`
pub fn this_access(class: &str, segments: Vec<Accessor>) -> AccessPath {
    AccessPath::rooted(Accessor::new("this", Type::instance(class)), segments)
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
            Statement::Class(class) => {
                let mut children = vec![&class.name as &dyn Node];
                children.extend(class.members.iter().map(|m| m as &dyn Node));
                children
            }
            Statement::Member(member) => vec![&member.name as &dyn Node, &member.ty],
            Statement::Method(method) => {
                let mut children = vec![&method.name as &dyn Node];
                if let Some(return_type) = &method.return_type {
                    children.push(return_type);
                }
                children.extend(method.arguments.iter().map(|a| a as &dyn Node));
                children.push(&method.body);
                children
            }
            Statement::Assignment { left, right } => vec![left as &dyn Node, right],
            Statement::Return(expression) | Statement::Expression(expression) => {
                vec![expression as &dyn Node]
            }
            Statement::Comment(_)
            | Statement::BlockComment(_)
            | Statement::DocComment(_)
            | Statement::BlankLine => Vec::new(),
        }
    }
}

impl Node for Argument {
    fn kind(&self) -> &'static str {
        NodeKind::Argument.name()
    }

    fn is_logical(&self) -> bool {
        false
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
        true
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
