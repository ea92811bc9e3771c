use anyhow::Context;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::commands::RunnableCommand;
use graphql_ir::builder::DocumentIr;
use graphql_ir::builder::IrBuilder;
use graphql_ir::builder::IrBuilderOptions;
use graphql_ir::document::ExecutableDocument;
use graphql_ir::document::FragmentRegistryBuilder;
use graphql_ir::schema::SchemaBuilder;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct BuildCmd {
    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for \
             executable documents within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Do not suffix operation names with Query, Mutation or \
             Subscription.",
        long,
    )]
    no_semantic_naming: bool,

    #[arg(
        help="File to write the IR JSON to. Prints to stdout when omitted.",
        long,
        short='o',
    )]
    output: Option<PathBuf>,

    #[arg(
        help="Package name recorded on every operation and fragment instead \
             of the one derived from each document's directory.",
        long,
    )]
    package_name: Option<String>,

    #[arg(
        help="One or more schema (SDL) files.",
        long,
        num_args=1..,
        required=true,
        short='s',
    )]
    schema: Vec<PathBuf>,

    #[arg(
        help="Paths to one or more GraphQL files or directories containing \
             GraphQL files whose operations and fragments should be built.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}
impl BuildCmd {
    fn build_ir(&self, document_paths: &[PathBuf]) -> anyhow::Result<DocumentIr> {
        let schema = SchemaBuilder::from_files(&self.schema)
            .and_then(|builder| builder.build())
            .context("Failed to build the schema")?;

        let documents = document_paths.iter()
            .map(|path| {
                ExecutableDocument::from_file(path)
                    .with_context(|| format!("Failed to load {path:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let document_refs: Vec<&ExecutableDocument> = documents.iter().collect();
        let fragment_registry = FragmentRegistryBuilder::from_documents(&document_refs)
            .context("Failed to register fragment definitions")?;

        let options = IrBuilderOptions {
            package_name: self.package_name.clone(),
            use_semantic_naming: !self.no_semantic_naming,
        };
        let ir = IrBuilder::new(&schema, &fragment_registry, options)
            .build_all(&documents)
            .context("Failed to build the IR")?;

        Ok(ir)
    }

    fn execute(&self) -> CommandResult {
        let document_paths = match self.find_document_paths() {
            Ok(paths) => paths,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} {err:#}",
                output_utils::RED_X,
            )),
        };
        log::debug!("Building IR for {} document(s)...", document_paths.len());

        let ir = match self.build_ir(&document_paths) {
            Ok(ir) => ir,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} {err:#}",
                output_utils::RED_X,
            )),
        };

        let json = match serde_json::to_string_pretty(&ir) {
            Ok(json) => json,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} Failed to serialize the IR: {err}",
                output_utils::RED_X,
            )),
        };

        match &self.output {
            None => CommandResult::stdout(format_args!("{json}")),
            Some(output_path) => match std::fs::write(output_path, json) {
                Ok(()) => CommandResult::success_note(format_args!(
                    "{} Wrote {} operation(s) and {} fragment(s) to {output_path:?}.",
                    output_utils::GREEN_CHECK,
                    ir.operations.len(),
                    ir.fragments.len(),
                )),
                Err(err) => CommandResult::stderr(format_args!(
                    "{} Failed to write {output_path:?}: {err}",
                    output_utils::RED_X,
                )),
            },
        }
    }

    fn find_document_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        let graphql_file_exts: HashSet<&str> =
            self.graphql_file_exts.iter()
                .map(|ext| ext.trim_start_matches('.'))
                .collect();

        log::debug!(
            "Scanning {} input paths...",
            self.file_or_dir_paths.len(),
        );
        let mut file_paths = vec![];
        for path in &self.file_or_dir_paths {
            let walker = WalkDir::new(path.as_path())
                .follow_links(true)
                .sort_by_file_name();
            for entry in walker {
                let entry = entry.with_context(|| format!(
                    "Failed to walk filesystem entities at/under {path:?}",
                ))?;
                let entry_path = entry.path();
                if !entry.file_type().is_file() {
                    log::trace!("Skipping non-file: {entry_path:#?}.");
                    continue;
                }
                if has_graphql_ext(entry_path, &graphql_file_exts) {
                    log::trace!("Found document at {entry_path:#?}.");
                    file_paths.push(entry_path.to_path_buf());
                }
            }
        }

        Ok(file_paths)
    }
}

#[inherent::inherent]
impl RunnableCommand for BuildCmd {
    /// The build is CPU-bound (`rayon` fans it out), so it runs off the
    /// async runtime's worker threads.
    pub async fn run(self, _cli: Cli) -> CommandResult {
        match tokio::task::spawn_blocking(move || self.execute()).await {
            Ok(result) => result,
            Err(err) => CommandResult::stderr(format_args!(
                "{} The build task did not complete: {err}",
                output_utils::RED_X,
            )),
        }
    }
}

fn has_graphql_ext(path: &Path, graphql_file_exts: &HashSet<&str>) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| graphql_file_exts.contains(ext))
}
