//! Diagram rendering.
//!
//! The HTML renderer never runs graph tools itself. Inline diagram sources
//! are written to numbered scratch files by the [`GraphAdapter`], which then
//! asks a [`GraphRenderer`] to produce the image (and, for dot and msc
//! diagrams, an image map) and writes the markup that embeds the result.
//!
//! [`ExternalTools`] is the production renderer; it runs `dot`, `mscgen`,
//! `dia` and PlantUML as child processes.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use log::{debug, error, warn};
use thiserror::Error;

use crate::{
    config::{GraphConfig, HtmlConfig, ImageFormat},
    html::escape::convert_to_xml,
};

/// Errors raised while writing diagram sources or running graph tools.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("could not write scratch file `{}`", path.display())]
    Scratch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start `{tool}`")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("`{tool}` exited with {status}")]
    Tool { tool: String, status: ExitStatus },

    #[error("no `{tool}` is configured")]
    MissingTool { tool: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The kind of diagram a source file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Dot,
    Msc,
    Dia,
    PlantUml,
}

/// One rendering request.
#[derive(Debug, Clone, Copy)]
pub struct RenderJob<'a> {
    pub kind: DiagramKind,
    /// Diagram source on disk.
    pub source: &'a Path,
    pub output_dir: &'a Path,
    /// Output file name without extension.
    pub base_name: &'a str,
    pub format: ImageFormat,
    /// Scope used to resolve links inside the diagram.
    pub context: &'a str,
}

impl RenderJob<'_> {
    /// Path of the rendered image.
    pub fn image_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.base_name, self.format.extension()))
    }
}

/// Renders diagram sources into images.
pub trait GraphRenderer {
    /// Render the image described by `job`.
    ///
    /// Returns the `<area>` elements of the image map, or an empty string
    /// when the diagram has none.
    fn render(&mut self, job: &RenderJob<'_>) -> Result<String, GraphError>;
}

/// Numbers of the next inline scratch file per diagram kind.
///
/// Counters only ever grow, so scratch names are never reused by one
/// adapter. Tests create a fresh set to get predictable names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchCounters {
    dot: usize,
    msc: usize,
    plantuml: usize,
}

impl ScratchCounters {
    pub fn new() -> Self {
        Self {
            dot: 1,
            msc: 1,
            plantuml: 1,
        }
    }

    /// Start every counter at `value`.
    pub fn starting_at(value: usize) -> Self {
        Self {
            dot: value,
            msc: value,
            plantuml: value,
        }
    }

    pub fn next_dot(&mut self) -> usize {
        take(&mut self.dot)
    }

    pub fn next_msc(&mut self) -> usize {
        take(&mut self.msc)
    }

    pub fn next_plantuml(&mut self) -> usize {
        take(&mut self.plantuml)
    }

    /// Number the next inline dot graph will get.
    pub fn dot(&self) -> usize {
        self.dot
    }

    pub fn msc(&self) -> usize {
        self.msc
    }

    pub fn plantuml(&self) -> usize {
        self.plantuml
    }
}

fn take(counter: &mut usize) -> usize {
    let value = *counter;
    *counter += 1;
    value
}

impl Default for ScratchCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes diagram scratch files and the markup embedding rendered diagrams.
pub struct GraphAdapter {
    renderer: Box<dyn GraphRenderer>,
    counters: ScratchCounters,
    output_dir: PathBuf,
    image_format: ImageFormat,
    cleanup: bool,
}

impl GraphAdapter {
    pub fn new(
        renderer: Box<dyn GraphRenderer>,
        output_dir: impl Into<PathBuf>,
        image_format: ImageFormat,
        cleanup: bool,
    ) -> Self {
        Self {
            renderer,
            counters: ScratchCounters::new(),
            output_dir: output_dir.into(),
            image_format,
            cleanup,
        }
    }

    pub fn from_config(
        renderer: Box<dyn GraphRenderer>,
        html: &HtmlConfig,
        graphs: &GraphConfig,
    ) -> Self {
        Self::new(
            renderer,
            html.output_dir(),
            graphs.image_format(),
            graphs.cleanup(),
        )
    }

    pub fn with_counters(mut self, counters: ScratchCounters) -> Self {
        self.counters = counters;
        self
    }

    pub fn counters(&self) -> &ScratchCounters {
        &self.counters
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write an inline `\dot` graph and embed it.
    pub fn write_inline_dot(
        &mut self,
        out: &mut String,
        text: &str,
        rel_path: &str,
        context: &str,
    ) -> Result<(), GraphError> {
        let index = self.counters.next_dot();
        let path = self.output_dir.join(format!("inline_dotgraph_{index}.dot"));
        write_scratch(&path, text)?;

        out.push_str("<div align=\"center\">\n");
        self.write_dot_file(out, &path, rel_path, context);
        out.push_str("</div>\n");

        self.remove_scratch(&path);
        Ok(())
    }

    /// Write an inline `\msc` chart and embed it.
    pub fn write_inline_msc(
        &mut self,
        out: &mut String,
        text: &str,
        rel_path: &str,
        context: &str,
    ) -> Result<(), GraphError> {
        let index = self.counters.next_msc();
        let path = self.output_dir.join(format!("inline_mscgraph_{index}.msc"));
        write_scratch(&path, &format!("msc {{{text}}}"))?;

        out.push_str("<div align=\"center\">\n");
        self.write_msc_file(out, &path, rel_path, context);
        self.remove_scratch(&path);
        out.push_str("</div>\n");
        Ok(())
    }

    /// Write an inline `\startuml` diagram and embed it.
    pub fn write_inline_plantuml(
        &mut self,
        out: &mut String,
        text: &str,
        rel_path: &str,
        context: &str,
    ) -> Result<(), GraphError> {
        let index = self.counters.next_plantuml();
        let path = self.output_dir.join(format!("inline_umlgraph_{index}.pu"));
        write_scratch(&path, &format!("@startuml\n{text}@enduml\n"))?;

        out.push_str("<div align=\"center\">\n");
        self.write_plantuml_file(out, &path, rel_path, context);
        out.push_str("</div>\n");

        self.remove_scratch(&path);
        Ok(())
    }

    /// Render a dot file and write the image with its client-side map.
    pub fn write_dot_file(&mut self, out: &mut String, file: &Path, rel_path: &str, context: &str) {
        let base_name = format!("dot_{}", stem_before_first_dot(file));
        let job = RenderJob {
            kind: DiagramKind::Dot,
            source: file,
            output_dir: &self.output_dir,
            base_name: &base_name,
            format: self.image_format,
            context,
        };
        let Some(map) = render_logged(self.renderer.as_mut(), &job) else {
            return;
        };

        match self.image_format {
            ImageFormat::Svg => {
                out.push_str(&format!(
                    "<object type=\"image/svg+xml\" data=\"{rel_path}{base_name}.svg\"></object>\n"
                ));
            }
            ImageFormat::Png => {
                let image = format!("{base_name}.png");
                let map_name = format!("{base_name}.map");
                out.push_str(&format!(
                    "<img src=\"{rel_path}{image}\" alt=\"{image}\" border=\"0\" \
                     usemap=\"#{map_name}\"/>\n"
                ));
                if !map.is_empty() {
                    out.push_str(&format!("<map name=\"{map_name}\" id=\"{map_name}\">"));
                    out.push_str(&map);
                    out.push_str("</map>\n");
                }
            }
        }
    }

    /// Render a message sequence chart and write the image with its map.
    pub fn write_msc_file(&mut self, out: &mut String, file: &Path, rel_path: &str, context: &str) {
        let base_name = format!("msc_{}", stem_before_first_dot(file));
        let job = RenderJob {
            kind: DiagramKind::Msc,
            source: file,
            output_dir: &self.output_dir,
            base_name: &base_name,
            format: self.image_format,
            context,
        };
        let Some(map) = render_logged(self.renderer.as_mut(), &job) else {
            return;
        };

        let map_name = format!("{base_name}.map");
        out.push_str(&format!(
            "<img src=\"{rel_path}{base_name}.{}\" alt=\"{base_name}\" border=\"0\" \
             usemap=\"#{map_name}\"/>\n",
            self.image_format.extension()
        ));
        out.push_str(&format!("<map name=\"{map_name}\" id=\"{map_name}\">"));
        out.push_str(&map);
        out.push_str("</map>\n");
    }

    /// Render a dia diagram; dia output is always a bitmap.
    pub fn write_dia_file(&mut self, out: &mut String, file: &Path, rel_path: &str, context: &str) {
        let base_name = format!("dia_{}", stem_before_first_dot(file));
        let job = RenderJob {
            kind: DiagramKind::Dia,
            source: file,
            output_dir: &self.output_dir,
            base_name: &base_name,
            format: ImageFormat::Png,
            context,
        };
        if render_logged(self.renderer.as_mut(), &job).is_none() {
            return;
        }
        out.push_str(&format!("<img src=\"{rel_path}{base_name}.png\" />\n"));
    }

    /// Render a PlantUML source file.
    pub fn write_plantuml_file(
        &mut self,
        out: &mut String,
        file: &Path,
        rel_path: &str,
        context: &str,
    ) {
        let base_name = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let job = RenderJob {
            kind: DiagramKind::PlantUml,
            source: file,
            output_dir: &self.output_dir,
            base_name: &base_name,
            format: self.image_format,
            context,
        };
        if render_logged(self.renderer.as_mut(), &job).is_none() {
            return;
        }

        match self.image_format {
            ImageFormat::Svg => out.push_str(&format!(
                "<object type=\"image/svg+xml\" data=\"{rel_path}{base_name}.svg\"></object>\n"
            )),
            ImageFormat::Png => {
                out.push_str(&format!("<img src=\"{rel_path}{base_name}.png\" />\n"))
            }
        }
    }

    fn remove_scratch(&self, path: &Path) {
        if !self.cleanup {
            return;
        }
        if let Err(err) = fs::remove_file(path) {
            warn!(path:? = path, err:%; "Could not remove scratch file");
        }
    }
}

fn write_scratch(path: &Path, text: &str) -> Result<(), GraphError> {
    debug!(path:? = path; "Writing diagram source");
    fs::write(path, text).map_err(|source| GraphError::Scratch {
        path: path.to_path_buf(),
        source,
    })
}

fn render_logged(renderer: &mut dyn GraphRenderer, job: &RenderJob<'_>) -> Option<String> {
    match renderer.render(job) {
        Ok(map) => Some(map),
        Err(err) => {
            error!(kind:? = job.kind, source:? = job.source, err:%; "Diagram rendering failed");
            None
        }
    }
}

/// File name up to its first dot: `graphs/flow.v2.dot` gives `flow`.
fn stem_before_first_dot(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.find('.') {
        Some(pos) => name[..pos].to_string(),
        None => name,
    }
}

/// Renders diagrams by running the configured command-line tools.
#[derive(Debug, Clone)]
pub struct ExternalTools {
    dot: PathBuf,
    mscgen: PathBuf,
    dia: PathBuf,
    java: PathBuf,
    plantuml_jar: Option<PathBuf>,
}

impl ExternalTools {
    pub fn from_config(graphs: &GraphConfig) -> Self {
        Self {
            dot: graphs.dot().to_path_buf(),
            mscgen: graphs.mscgen().to_path_buf(),
            dia: graphs.dia().to_path_buf(),
            java: graphs.java().to_path_buf(),
            plantuml_jar: graphs.plantuml_jar().map(Path::to_path_buf),
        }
    }

    fn render_dot(&self, job: &RenderJob<'_>) -> Result<String, GraphError> {
        let format = job.format.extension();
        run(Command::new(&self.dot)
            .arg(format!("-T{format}"))
            .arg("-o")
            .arg(job.image_path())
            .arg(job.source))?;

        if job.format == ImageFormat::Svg {
            return Ok(String::new());
        }
        let cmap = capture(Command::new(&self.dot).arg("-Tcmap").arg(job.source))?;
        Ok(cmap_areas(&cmap))
    }

    fn render_msc(&self, job: &RenderJob<'_>) -> Result<String, GraphError> {
        run(Command::new(&self.mscgen)
            .arg("-T")
            .arg(job.format.extension())
            .arg("-o")
            .arg(job.image_path())
            .arg(job.source))?;

        let map_file = tempfile::Builder::new()
            .prefix(job.base_name)
            .suffix(".ismap")
            .tempfile_in(job.output_dir)?;
        run(Command::new(&self.mscgen)
            .arg("-T")
            .arg("ismap")
            .arg("-o")
            .arg(map_file.path())
            .arg(job.source))?;
        let ismap = fs::read_to_string(map_file.path())?;
        Ok(ismap_areas(&ismap))
    }

    fn render_dia(&self, job: &RenderJob<'_>) -> Result<String, GraphError> {
        run(Command::new(&self.dia)
            .arg("-e")
            .arg(job.image_path())
            .arg("-t")
            .arg("png")
            .arg(job.source))?;
        Ok(String::new())
    }

    fn render_plantuml(&self, job: &RenderJob<'_>) -> Result<String, GraphError> {
        let Some(jar) = &self.plantuml_jar else {
            return Err(GraphError::MissingTool { tool: "plantuml" });
        };
        run(Command::new(&self.java)
            .arg("-Djava.awt.headless=true")
            .arg("-jar")
            .arg(jar)
            .arg(format!("-t{}", job.format.extension()))
            .arg("-o")
            .arg(job.output_dir)
            .arg(job.source))?;
        Ok(String::new())
    }
}

impl GraphRenderer for ExternalTools {
    fn render(&mut self, job: &RenderJob<'_>) -> Result<String, GraphError> {
        debug!(kind:? = job.kind, base_name = job.base_name; "Running graph tool");
        match job.kind {
            DiagramKind::Dot => self.render_dot(job),
            DiagramKind::Msc => self.render_msc(job),
            DiagramKind::Dia => self.render_dia(job),
            DiagramKind::PlantUml => self.render_plantuml(job),
        }
    }
}

fn tool_name(command: &Command) -> String {
    command.get_program().to_string_lossy().into_owned()
}

fn run(command: &mut Command) -> Result<(), GraphError> {
    let status = command.status().map_err(|source| GraphError::Spawn {
        tool: tool_name(command),
        source,
    })?;
    if !status.success() {
        return Err(GraphError::Tool {
            tool: tool_name(command),
            status,
        });
    }
    Ok(())
}

fn capture(command: &mut Command) -> Result<String, GraphError> {
    let output = command.output().map_err(|source| GraphError::Spawn {
        tool: tool_name(command),
        source,
    })?;
    if !output.status.success() {
        return Err(GraphError::Tool {
            tool: tool_name(command),
            status: output.status,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// The `<area>` lines of a dot client-side map.
fn cmap_areas(cmap: &str) -> String {
    let mut areas = String::new();
    for line in cmap.lines().map(str::trim).filter(|l| l.starts_with("<area")) {
        areas.push_str(line);
        areas.push('\n');
    }
    areas
}

/// Convert mscgen `ismap` lines (`rect URL x1,y1 x2,y2`) to `<area>` elements.
fn ismap_areas(ismap: &str) -> String {
    let mut areas = String::new();
    for line in ismap.lines() {
        let mut fields = line.split_whitespace();
        let (Some(shape), Some(url), Some(top_left), Some(bottom_right)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        if shape != "rect" {
            continue;
        }
        areas.push_str(&format!(
            "<area href=\"{}\" shape=\"rect\" coords=\"{top_left},{bottom_right}\" alt=\"\"/>\n",
            convert_to_xml(url)
        ));
    }
    areas
}
