mod schema;
mod schema_builder;
#[cfg(test)]
mod tests;

pub use schema::Schema;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
