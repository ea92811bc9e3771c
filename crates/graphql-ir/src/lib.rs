//! Builds the model IR that typed-model code generators consume.
//!
//! Given a [`Schema`](schema::Schema) and a set of
//! [`ExecutableDocument`](document::ExecutableDocument)s, the
//! [`IrBuilder`](builder::IrBuilder) lowers every operation and every named
//! fragment into an immutable tree of [`ir`] nodes: response-name-merged
//! [`Field`](ir::Field)s, per-type-condition
//! [`FragmentInterface`](ir::FragmentInterface)s, disjoint
//! [`FragmentImplementation`](ir::FragmentImplementation)s and the
//! [`SelectionKey`](ir::SelectionKey)s that tie generated models to the
//! interfaces they must implement.
//!
//! ```
//! use graphql_ir::builder::IrBuilder;
//! use graphql_ir::builder::IrBuilderOptions;
//! use graphql_ir::document::ExecutableDocument;
//! use graphql_ir::document::FragmentRegistryBuilder;
//! use graphql_ir::schema::SchemaBuilder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaBuilder::from_str(
//!     None,
//!     "type Query { hero: Hero } type Hero { name: String! }",
//! )?.build()?;
//! let document = ExecutableDocument::from_str(
//!     "query HeroName { hero { name } }",
//!     None,
//! )?;
//! let registry = FragmentRegistryBuilder::from_documents(&[&document])?;
//! let builder = IrBuilder::new(&schema, &registry, IrBuilderOptions::default());
//! let operations = builder.build_document(&document)?.operations;
//! assert_eq!(operations[0].name(), "HeroNameQuery");
//! # Ok(())
//! # }
//! ```

pub mod ast;
pub mod builder;
pub mod document;
mod file_reader;
pub mod ir;
pub mod loc;
pub mod schema;
pub mod types;

pub use file_reader::ReadContentError;
