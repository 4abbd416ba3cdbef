//! CLI logic for the Folio documentation tool.
//!
//! This module contains the core CLI logic: importing tag files and writing
//! the HTML index of everything they declare.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::PathBuf};

use log::{error, info};

use folio::{FolioError, Project, html::HtmlRenderer};

/// Run the Folio CLI application
///
/// Imports the tag files named on the command line and in the configuration,
/// resolves their includes and writes the HTML index to the output file.
/// A tag file that cannot be read or parsed is left out of the index; the
/// first such failure is returned once the index is written.
///
/// # Errors
///
/// Returns `FolioError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed tag files
pub fn run(args: &Args) -> Result<(), FolioError> {
    info!(
        tag_files = args.tagfiles.len(),
        output_path = args.output;
        "Building documentation index"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let mut paths: Vec<PathBuf> = args.tagfiles.iter().map(PathBuf::from).collect();
    paths.extend(
        app_config
            .tagfiles()
            .files()
            .iter()
            .map(|source| source.path.clone()),
    );

    let mut project = Project::new(app_config.clone());
    let mut first_failure = None;
    for path in &paths {
        if let Err(err) = project.import_tag_file(path) {
            error!(path:? = path, err:%; "Skipping tag file");
            first_failure.get_or_insert(err);
        }
    }
    project.resolve_includes();

    let mut renderer = HtmlRenderer::new(&app_config);
    let html = project.render_index(&mut renderer);

    fs::write(&args.output, html)?;

    info!(output_file = args.output; "Index written successfully");

    match first_failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
