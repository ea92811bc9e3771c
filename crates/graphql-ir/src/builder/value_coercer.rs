use crate::ast;
use crate::builder::build_pass::BuildPass;
use crate::builder::IrBuildError;
use crate::ir::Argument;
use crate::loc;
use crate::schema::Schema;
use crate::types::TypeAnnotation;
use crate::types::Value;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, IrBuildError>;

impl<'a> BuildPass<'a> {
    /// Coerce each argument of a field selection against the field's
    /// schema definition, in the order the arguments were written.
    pub(crate) fn coerce_arguments(
        &self,
        selection: &ast::operation::Field,
        field_def: &ast::schema::Field,
        location: &loc::SourceLocation,
    ) -> Result<Vec<Argument>> {
        let mut arguments = vec![];
        for (argument_name, ast_value) in &selection.arguments {
            let argument_def = field_def.arguments.iter()
                .find(|input_value| &input_value.name == argument_name)
                .ok_or_else(|| IrBuildError::ArgumentCoercion {
                    argument_name: argument_name.to_owned(),
                    location: location.to_owned(),
                    message: format!(
                        "`{}` does not accept an argument with this name",
                        field_def.name,
                    ),
                })?;

            let value = coerce_value(self.schema, ast_value, &argument_def.value_type)
                .map_err(|message| IrBuildError::ArgumentCoercion {
                    argument_name: argument_name.to_owned(),
                    location: location.to_owned(),
                    message,
                })?;

            arguments.push(Argument {
                name: argument_name.to_owned(),
                type_annotation: TypeAnnotation::from_ast_type(&argument_def.value_type),
                value,
            });
        }
        Ok(arguments)
    }
}

/// Coerce a literal input value to `value_type` following GraphQL's input
/// coercion rules.
///
/// Variables are accepted at any position (their types are checked by
/// validation, not here). A non-list value given for a list type is wrapped
/// in a single-item list.
pub(crate) fn coerce_value(
    schema: &Schema,
    ast_value: &ast::operation::Value,
    value_type: &ast::schema::Type,
) -> std::result::Result<Value, String> {
    if let ast::schema::Type::NonNullType(inner_type) = value_type {
        if let ast::operation::Value::Null = ast_value {
            return Err(format!("`null` is not a valid `{value_type}`"));
        }
        return coerce_value(schema, ast_value, inner_type);
    }

    match ast_value {
        ast::operation::Value::Variable(var_name) =>
            return Ok(Value::Variable(var_name.to_owned())),
        ast::operation::Value::Null =>
            return Ok(Value::Null),
        _ => (),
    }

    match value_type {
        ast::schema::Type::ListType(item_type) => match ast_value {
            ast::operation::Value::List(items) => Ok(Value::List(
                items.iter()
                    .map(|item| coerce_value(schema, item, item_type))
                    .collect::<std::result::Result<Vec<_>, _>>()?,
            )),
            single_value =>
                Ok(Value::List(vec![coerce_value(schema, single_value, item_type)?])),
        },

        ast::schema::Type::NamedType(type_name) =>
            coerce_named_value(schema, ast_value, type_name),

        ast::schema::Type::NonNullType(inner_type) =>
            coerce_value(schema, ast_value, inner_type),
    }
}

fn coerce_named_value(
    schema: &Schema,
    ast_value: &ast::operation::Value,
    type_name: &str,
) -> std::result::Result<Value, String> {
    let mismatch = || format!("`{ast_value}` is not a valid `{type_name}`");

    match (type_name, ast_value) {
        ("Int", ast::operation::Value::Int(number)) => number.as_i64()
            .filter(|int| i32::try_from(*int).is_ok())
            .map(Value::Int)
            .ok_or_else(|| format!(
                "`{ast_value}` cannot be represented as a 32-bit signed integer",
            )),
        ("Int", _) => Err(mismatch()),

        ("Float", ast::operation::Value::Float(float)) => Ok(Value::Float(*float)),
        ("Float", ast::operation::Value::Int(number)) => number.as_i64()
            .map(|int| Value::Float(int as f64))
            .ok_or_else(mismatch),
        ("Float", _) => Err(mismatch()),

        ("String", ast::operation::Value::String(str)) => Ok(Value::String(str.to_owned())),
        ("String", _) => Err(mismatch()),

        ("Boolean", ast::operation::Value::Boolean(bool)) => Ok(Value::Boolean(*bool)),
        ("Boolean", _) => Err(mismatch()),

        ("ID", ast::operation::Value::String(str)) => Ok(Value::String(str.to_owned())),
        ("ID", ast::operation::Value::Int(number)) => number.as_i64()
            .map(|int| Value::String(int.to_string()))
            .ok_or_else(mismatch),
        ("ID", _) => Err(mismatch()),

        _ => match schema.type_definition(type_name) {
            // Custom scalars accept any literal; their serialization is the
            // concern of the runtime.
            Some(ast::schema::TypeDefinition::Scalar(_)) => Ok(Value::from_ast(ast_value)),

            Some(ast::schema::TypeDefinition::Enum(enum_type)) => match ast_value {
                ast::operation::Value::Enum(variant) if enum_type.values.iter()
                    .any(|enum_value| &enum_value.name == variant)
                    => Ok(Value::Enum(variant.to_owned())),
                _ => Err(mismatch()),
            },

            Some(ast::schema::TypeDefinition::InputObject(input_type)) =>
                coerce_input_object(schema, ast_value, input_type),

            Some(_) => Err(format!("`{type_name}` is not an input type")),
            None => Err(format!("`{type_name}` is not defined in the schema")),
        },
    }
}

fn coerce_input_object(
    schema: &Schema,
    ast_value: &ast::operation::Value,
    input_type: &ast::schema::InputObjectType,
) -> std::result::Result<Value, String> {
    let ast::operation::Value::Object(entries) = ast_value else {
        return Err(format!("`{ast_value}` is not a valid `{}`", input_type.name));
    };

    if let Some(unknown_field) = entries.keys().find(|field_name| {
        !input_type.fields.iter().any(|field_def| &&field_def.name == field_name)
    }) {
        return Err(format!(
            "`{}` has no field named `{unknown_field}`",
            input_type.name,
        ));
    }

    let mut coerced = IndexMap::new();
    for field_def in &input_type.fields {
        match (entries.get(&field_def.name), &field_def.default_value) {
            (Some(field_value), _) => {
                let value = coerce_value(schema, field_value, &field_def.value_type)
                    .map_err(|message| format!("{}.{}: {message}", input_type.name, field_def.name))?;
                coerced.insert(field_def.name.to_owned(), value);
            },

            (None, Some(default_value)) => {
                coerced.insert(field_def.name.to_owned(), Value::from_ast(default_value));
            },

            (None, None) => {
                if let ast::schema::Type::NonNullType(_) = field_def.value_type {
                    return Err(format!(
                        "`{}.{}` is required but was not provided",
                        input_type.name,
                        field_def.name,
                    ));
                }
            },
        }
    }
    Ok(Value::Object(coerced))
}
