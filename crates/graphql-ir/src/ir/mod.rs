//! The immutable IR tree handed to the code generator.
//!
//! Every node here is a plain value: the builder constructs trees bottom-up
//! and any later transformation produces a new tree rather than mutating an
//! existing one.

mod argument;
mod condition;
mod field;
mod fragment;
mod named_fragment;
mod operation;
mod operation_kind;
mod selection_key;
mod selection_set;
#[cfg(test)]
mod tests;
mod variable;

pub use argument::Argument;
pub use condition::Condition;
pub use field::Field;
pub use fragment::Fragment;
pub use fragment::FragmentImplementation;
pub use fragment::FragmentInterface;
pub use named_fragment::NamedFragment;
pub use operation::Operation;
pub use operation_kind::OperationKind;
pub use selection_key::SelectionKey;
pub use selection_key::SelectionKeyType;
pub use selection_set::SelectionSet;
pub use variable::Variable;
