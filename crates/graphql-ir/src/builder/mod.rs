//! The IR-building pass.
//!
//! Data flows one way: raw field selections are merged by response name
//! (`field_merger`), inline fragments and fragment spreads are lowered into
//! generic fragment trees that inherit their parent's fields
//! (`generic_fragment`), and those trees are split
//! into per-type-condition interfaces and disjoint implementations
//! (`fragment_splitter`). [`IrBuilder`] drives this for whole operations
//! and fragment definitions.

mod build_pass;
mod directives;
mod field_merger;
mod fragment_splitter;
mod generic_fragment;
mod ir_build_error;
mod ir_builder;
mod naming;
mod selection_key_patcher;
#[cfg(test)]
mod tests;
mod value_coercer;

pub use ir_build_error::IrBuildError;
pub use ir_builder::DocumentIr;
pub use ir_builder::IrBuilder;
pub use ir_builder::IrBuilderOptions;
