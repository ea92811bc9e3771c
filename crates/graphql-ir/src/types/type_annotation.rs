use crate::ast;

/// Represents the annotated type of a [`Field`](crate::ir::Field),
/// [`Argument`](crate::ir::Argument) or [`Variable`](crate::ir::Variable).
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum TypeAnnotation {
    List(ListTypeAnnotation),
    Named(NamedTypeAnnotation),
}
impl TypeAnnotation {
    /// Unwrap the [`ListTypeAnnotation`] if this annotation is one.
    pub fn as_list_annotation(&self) -> Option<&ListTypeAnnotation> {
        if let Self::List(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    /// Unwrap the [`NamedTypeAnnotation`] if this annotation is one.
    pub fn as_named_annotation(&self) -> Option<&NamedTypeAnnotation> {
        if let Self::Named(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    pub fn from_ast_type(ast_type: &ast::operation::Type) -> Self {
        Self::from_ast_type_impl(ast_type, /* nullable = */ true)
    }

    fn from_ast_type_impl(ast_type: &ast::operation::Type, nullable: bool) -> Self {
        match ast_type {
            ast::operation::Type::ListType(inner) =>
                Self::List(ListTypeAnnotation {
                    inner_type: Box::new(Self::from_ast_type_impl(inner, true)),
                    nullable,
                }),

            ast::operation::Type::NamedType(name) =>
                Self::Named(NamedTypeAnnotation {
                    nullable,
                    type_name: name.to_owned(),
                }),

            ast::operation::Type::NonNullType(inner) =>
                Self::from_ast_type_impl(inner, false),
        }
    }

    /// Recursively unwrap this [`TypeAnnotation`] and return the name of the
    /// inner-most named type.
    pub fn innermost_type_name(&self) -> &str {
        match self {
            Self::List(ListTypeAnnotation { inner_type, .. })
                => inner_type.innermost_type_name(),
            Self::Named(NamedTypeAnnotation { type_name, .. })
                => type_name.as_str(),
        }
    }

    pub fn nullable(&self) -> bool {
        match self {
            Self::List(annot) => annot.nullable,
            Self::Named(annot) => annot.nullable,
        }
    }

    pub fn to_graphql_string(&self) -> String {
        let inner = match self {
            Self::List(annot) =>
                format!("[{}]", annot.inner_type.to_graphql_string()),
            Self::Named(annot) => annot.type_name.to_owned(),
        };
        if self.nullable() {
            inner
        } else {
            format!("{inner}!")
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTypeAnnotation {
    pub(crate) inner_type: Box<TypeAnnotation>,
    pub(crate) nullable: bool,
}
impl ListTypeAnnotation {
    pub fn inner_type(&self) -> &TypeAnnotation {
        &self.inner_type
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedTypeAnnotation {
    pub(crate) nullable: bool,
    pub(crate) type_name: String,
}
impl NamedTypeAnnotation {
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn type_name(&self) -> &str {
        self.type_name.as_str()
    }
}
