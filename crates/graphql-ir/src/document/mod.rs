mod executable_document;
mod fragment_registry;
mod fragment_registry_builder;
mod source_text;
#[cfg(test)]
mod tests;

pub use executable_document::DocumentLoadError;
pub use executable_document::ExecutableDocument;
pub use fragment_registry::FragmentRegistry;
pub use fragment_registry::RegisteredFragment;
pub use fragment_registry_builder::FragmentRegistryBuildError;
pub use fragment_registry_builder::FragmentRegistryBuilder;
