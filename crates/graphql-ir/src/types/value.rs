use crate::ast;
use indexmap::IndexMap;

/// An argument, directive-argument or default value as it appears in the IR.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Value {
    Boolean(bool),
    Enum(String),
    Float(f64),
    Int(i64),
    List(Vec<Value>),
    Null,
    Object(IndexMap<String, Value>),
    String(String),
    Variable(String),
}
impl Value {
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(str) = self {
            Some(str.as_str())
        } else {
            None
        }
    }

    /// Convert an AST value as-is, without consulting any schema type.
    pub fn from_ast(ast_value: &ast::operation::Value) -> Self {
        match ast_value {
            ast::operation::Value::Variable(var_name) =>
                Value::Variable(var_name.to_owned()),

            // graphql_parser stores every int literal as an i64.
            ast::operation::Value::Int(value) =>
                Value::Int(value.as_i64().unwrap_or_default()),

            ast::operation::Value::Float(value) =>
                Value::Float(*value),

            ast::operation::Value::String(value) =>
                Value::String(value.to_owned()),

            ast::operation::Value::Boolean(value) =>
                Value::Boolean(*value),

            ast::operation::Value::Null =>
                Value::Null,

            ast::operation::Value::Enum(value) =>
                Value::Enum(value.to_owned()),

            ast::operation::Value::List(values) =>
                Value::List(values.iter().map(Value::from_ast).collect()),

            ast::operation::Value::Object(entries) =>
                Value::Object(entries.iter().map(|(key, ast_value)|
                    (key.to_owned(), Value::from_ast(ast_value))
                ).collect()),
        }
    }
}
