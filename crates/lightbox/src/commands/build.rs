//! `lightbox build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use lightbox_config::CliSettings;
use lightbox_renderer::{Extension, ImageRegistry, Target, TargetFamily};
use rayon::prelude::*;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::sources::{self, SourceDocument};

/// Directory of the stylesheet and script inside interactive output.
const STATIC_DIR: &str = "_static";

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output root directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Targets to build, comma separated (overrides config).
    #[arg(short, long, value_delimiter = ',')]
    targets: Vec<Target>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

impl BuildArgs {
    /// Read the source tree, collect images once and write every target.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let settings = CliSettings {
            output_dir: self.output_dir,
            targets: (!self.targets.is_empty()).then_some(self.targets),
            ..CliSettings::default()
        };
        let project = self.project.load(settings)?;
        let build = &project.config.build_resolved;

        output.info(&format!("Source: {}", project.source_dir.display()));
        output.info(&format!("Output: {}", build.output_dir.display()));

        let paths = sources::discover(&project.source_dir)?;
        let documents = paths
            .par_iter()
            .map(|path| sources::read_document(&project.source_dir, path))
            .collect::<Result<Vec<SourceDocument>, _>>()?;

        let mut rejected = 0;
        for diagnostic in documents.iter().flat_map(|d| &d.diagnostics) {
            output.diagnostic(diagnostic);
            rejected += usize::from(diagnostic.kind.is_error());
        }

        // Sequential and in document order, so output names are stable.
        let mut registry = ImageRegistry::new();
        for source in &documents {
            source.document.collect_assets(&mut registry);
        }

        build.targets.par_iter().try_for_each(|&target| {
            let writer = TargetWriter {
                target,
                dir: build.target_dir(target),
                images_dir: &build.images_dir,
                registry: &registry,
            };
            writer.write(&project.source_dir, &documents)
        })?;

        if rejected > 0 {
            output.warning(&format!(
                "{rejected} lightbox directive(s) were rejected and left out"
            ));
        }
        let names: Vec<_> = build.targets.iter().map(|t| t.name()).collect();
        output.success(&format!(
            "Built {} document(s) with {} image(s) for {}",
            documents.len(),
            registry.len(),
            names.join(", ")
        ));
        Ok(())
    }
}

/// Writes the output tree of one target.
struct TargetWriter<'a> {
    target: Target,
    dir: PathBuf,
    images_dir: &'a str,
    registry: &'a ImageRegistry,
}

impl TargetWriter<'_> {
    fn write(&self, source_dir: &Path, documents: &[SourceDocument]) -> Result<(), CliError> {
        if self.target == Target::SingleHtml {
            let mut page = String::new();
            for source in documents {
                page.push_str(&self.render(source)?);
                page.push('\n');
            }
            write_file(&self.dir.join("index.html"), &page)?;
        } else {
            documents.par_iter().try_for_each(|source| {
                let rendered = self.render(source)?;
                let file = output_file(self.target, source.document.docname());
                write_file(&self.dir.join(file), &rendered)
            })?;
        }

        self.copy_images(source_dir)?;
        if self.target.family() == TargetFamily::Interactive {
            self.write_static()?;
        }

        tracing::info!(builder = self.target.name(), dir = %self.dir.display(), "Wrote target");
        Ok(())
    }

    fn render(&self, source: &SourceDocument) -> Result<String, CliError> {
        Ok(source
            .document
            .render(self.target, self.registry, self.images_dir)?)
    }

    /// Stylesheets and scripts the extension declares.
    fn write_static(&self) -> Result<(), CliError> {
        let extension = Extension::setup();
        let dir = self.dir.join(STATIC_DIR);
        for name in extension.stylesheets.iter().chain(&extension.scripts) {
            let data = lightbox_assets::get(name)
                .ok_or_else(|| CliError::Validation(format!("Missing static asset {name}")))?;
            write_file(&dir.join(name), data)?;
        }
        Ok(())
    }

    /// Copy registered images to where rendered output links them.
    fn copy_images(&self, source_dir: &Path) -> Result<(), CliError> {
        if self.registry.is_empty() {
            return Ok(());
        }
        let dest = match self.target {
            Target::Html | Target::SingleHtml | Target::DirHtml | Target::Epub => {
                self.dir.join(self.images_dir)
            }
            Target::Latex | Target::Text | Target::Man | Target::Texinfo => self.dir.clone(),
        };
        std::fs::create_dir_all(&dest)?;
        for (source, name) in self.registry.iter() {
            std::fs::copy(source_dir.join(source), dest.join(name))?;
        }
        Ok(())
    }
}

/// Output file of one document, relative to the target directory.
fn output_file(target: Target, docname: &str) -> PathBuf {
    match target {
        Target::DirHtml => PathBuf::from(format!("{}index.html", target.page_path(docname))),
        Target::Html | Target::SingleHtml => PathBuf::from(format!("{docname}.html")),
        Target::Latex => PathBuf::from(format!("{docname}.tex")),
        Target::Text => PathBuf::from(format!("{docname}.txt")),
        Target::Man => PathBuf::from(format!("{docname}.1")),
        Target::Texinfo => PathBuf::from(format!("{docname}.texi")),
        Target::Epub => PathBuf::from(format!("{docname}.xhtml")),
    }
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_output_file() {
        assert_eq!(
            output_file(Target::Html, "guide/setup"),
            PathBuf::from("guide/setup.html")
        );
        assert_eq!(
            output_file(Target::DirHtml, "guide/setup"),
            PathBuf::from("guide/setup/index.html")
        );
        assert_eq!(
            output_file(Target::DirHtml, "index"),
            PathBuf::from("index.html")
        );
        assert_eq!(
            output_file(Target::Latex, "index"),
            PathBuf::from("index.tex")
        );
        assert_eq!(
            output_file(Target::Texinfo, "guide/setup"),
            PathBuf::from("guide/setup.texi")
        );
    }

    #[test]
    fn test_target_writer_links_and_copies_images() {
        let dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        let source_dir = root.join("docs");
        fs::create_dir_all(source_dir.join("guide/img")).unwrap();
        fs::write(source_dir.join("guide/img/shot.png"), b"png").unwrap();
        fs::write(
            source_dir.join("guide/setup.md"),
            "# Setup\n\n::lightbox[img/shot.png]{alt=\"Shot\" caption=\"First run\"}\n",
        )
        .unwrap();

        let documents = vec![
            sources::read_document(&source_dir, &source_dir.join("guide/setup.md")).unwrap(),
        ];
        let mut registry = ImageRegistry::new();
        documents[0].document.collect_assets(&mut registry);

        for target in [Target::Html, Target::Latex] {
            let writer = TargetWriter {
                target,
                dir: root.join("out").join(target.name()),
                images_dir: "_images",
                registry: &registry,
            };
            writer.write(&source_dir, &documents).unwrap();
        }

        let html = fs::read_to_string(root.join("out/html/guide/setup.html")).unwrap();
        assert!(html.contains("src=\"../_images/shot.png\""));
        assert!(root.join("out/html/_images/shot.png").is_file());
        assert!(root.join("out/html/_static/lightbox.js").is_file());

        let latex = fs::read_to_string(root.join("out/latex/guide/setup.tex")).unwrap();
        assert!(latex.contains("\\includegraphics{shot.png}"));
        assert!(latex.contains("\\caption{First run}"));
        assert!(root.join("out/latex/shot.png").is_file());
        assert!(!root.join("out/latex/_static").exists());
    }
}
