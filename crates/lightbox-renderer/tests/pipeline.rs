//! End-to-end read → collect → render over a temporary source tree.

use std::fs;
use std::path::Path;

use lightbox_renderer::directive::{
    DirectiveContext, DirectiveProcessor, DirectiveProcessorConfig, Document, RawOptions,
};
use lightbox_renderer::{
    Block, DiagnosticKind, ImageRegistry, SizingResult, Target, escape_latex,
};
use pretty_assertions::assert_eq;
use static_assertions::assert_impl_all;

assert_impl_all!(DirectiveProcessor: Send);
assert_impl_all!(Document: Send, Sync);
assert_impl_all!(ImageRegistry: Send, Sync);
assert_impl_all!(Block: Send, Sync);

fn landscape(_: &Path) -> Option<(u32, u32)> {
    Some((1600, 900))
}

fn source_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir_all(docs.join("images")).unwrap();
    fs::create_dir_all(docs.join("guide/img")).unwrap();
    fs::create_dir_all(dir.path().join("docs-evil")).unwrap();
    fs::write(docs.join("images/example.png"), b"png").unwrap();
    fs::write(docs.join("guide/img/example.png"), b"png").unwrap();
    fs::write(dir.path().join("docs-evil/a.png"), b"png").unwrap();
    dir
}

fn read(root: &Path, docname: &str, input: &str) -> (Document, DirectiveProcessor) {
    let config =
        DirectiveProcessorConfig::new(root, docname).with_size_provider(landscape);
    let mut processor = DirectiveProcessor::new(config);
    let document = processor.read(input);
    (document, processor)
}

#[test]
fn test_interactive_scenario_without_caption() {
    let dir = source_tree();
    let root = dir.path().join("docs");
    let (document, processor) = read(&root, "index", "::lightbox[/images/example.png]\n");
    assert!(processor.diagnostics().is_empty());

    let mut registry = ImageRegistry::new();
    document.collect_assets(&mut registry);
    let html = document.render(Target::Html, &registry, "_images").unwrap();

    assert_eq!(html.matches("type=\"checkbox\"").count(), 1);
    assert_eq!(html.matches("class=\"lightbox-trigger-label\"").count(), 1);
    assert_eq!(html.matches("class=\"lightbox-overlay\"").count(), 1);
    assert_eq!(html.matches("lightbox-caption").count(), 0);
    assert!(html.contains("<img src=\"_images/example.png\" alt=\"\" class=\"lightbox-trigger\""));
    assert!(html.contains("style=\"width: 100%;\""));
    assert!(html.contains("min(95vw, calc(95vh * 1.7778))"));
}

#[test]
fn test_full_interactive_markup() {
    let dir = source_tree();
    let root = dir.path().join("docs");
    let (document, _) = read(
        &root,
        "guide/setup",
        r#"::lightbox[img/example.png]{alt="Setup" caption="Step 1" percentage="50 80" .shadow}"#,
    );
    let mut registry = ImageRegistry::new();
    document.collect_assets(&mut registry);

    let html = document.render(Target::Html, &registry, "_images").unwrap();
    assert_eq!(
        html,
        "<div class=\"lightbox-container\">\n\
         <label for=\"lightbox-guide-setup-1\" class=\"lightbox-trigger-label\" tabindex=\"0\" \
         role=\"button\" aria-label=\"Enlarge image: Setup\">\n  \
         <img src=\"../_images/example.png\" alt=\"Setup\" class=\"lightbox-trigger shadow\" \
         style=\"width: 50%;\">\n\
         </label>\n\
         <input type=\"checkbox\" id=\"lightbox-guide-setup-1\" class=\"lightbox-toggle\" \
         aria-hidden=\"true\" tabindex=\"-1\">\n\
         <div class=\"lightbox-overlay\" role=\"dialog\" aria-modal=\"true\" aria-label=\"Setup\">\n  \
         <label for=\"lightbox-guide-setup-1\" class=\"lightbox-close\" tabindex=\"0\" \
         role=\"button\" aria-label=\"Close lightbox\">&times;</label>\n  \
         <div class=\"lightbox-content\">\n    \
         <img src=\"../_images/example.png\" alt=\"Setup\" class=\"shadow\" \
         style=\"width: min(80vw, calc(80vh * 1.7778));height: min(80vh, calc(80vw / 1.7778));\">\n    \
         <p class=\"lightbox-caption\">Step 1</p>\n  \
         </div>\n  \
         <label for=\"lightbox-guide-setup-1\" class=\"lightbox-backdrop-close\" \
         aria-hidden=\"true\"></label>\n\
         </div>\n\
         </div>"
    );
}

#[test]
fn test_print_width_follows_overlay_unless_overridden() {
    let dir = source_tree();
    let root = dir.path().join("docs");
    let registry = ImageRegistry::new();

    let (document, _) = read(
        &root,
        "index",
        "::lightbox[/images/example.png]{percentage=\"60 90\"}\n",
    );
    let latex = document.render(Target::Latex, &registry, "_images").unwrap();
    assert!(latex.contains("max width=0.90\\linewidth"));

    let (document, _) = read(
        &root,
        "index",
        "::lightbox[/images/example.png]{percentage=\"60 90\" latex-width=\"0.8\"}\n",
    );
    let latex = document.render(Target::Latex, &registry, "_images").unwrap();
    assert!(latex.contains("max width=0.8\\linewidth"));
    let html = document.render(Target::Html, &registry, "_images").unwrap();
    assert!(html.contains("min(90vw, calc(90vh * 1.7778))"));
}

#[test]
fn test_typeset_emits_one_image_per_directive() {
    let dir = source_tree();
    let root = dir.path().join("docs");
    let (document, _) = read(
        &root,
        "index",
        "::lightbox[/images/example.png]{caption=\"A\"}\n\n::lightbox[/images/example.png]\n",
    );
    let mut registry = ImageRegistry::new();
    document.collect_assets(&mut registry);

    let latex = document.render(Target::Latex, &registry, "_images").unwrap();
    assert_eq!(latex.matches("\\includegraphics").count(), 2);
    assert_eq!(latex.matches("\\begin{figure}").count(), 2);
    assert_eq!(latex.matches("\\caption{").count(), 1);
}

#[test]
fn test_caption_escaping_for_print() {
    let caption = "40% & special $_#^~\\";
    let escaped = escape_latex(caption);
    for needle in [r"\%", r"\&", r"\$", r"\_", r"\#"] {
        assert!(escaped.contains(needle));
    }

    let dir = source_tree();
    let root = dir.path().join("docs");
    let options: RawOptions = [("caption".to_owned(), caption.to_owned())]
        .into_iter()
        .collect();
    let mut processor = DirectiveProcessor::new(
        DirectiveProcessorConfig::new(&root, "index").with_size_provider(landscape),
    );
    let block = processor.read_directive(Some("/images/example.png"), &options, 1);
    let Block::Lightbox(tree) = &block else {
        panic!("expected a lightbox block");
    };
    assert_eq!(tree.caption.as_deref(), Some(caption));
}

#[test]
fn test_sibling_prefix_directory_is_outside_the_root() {
    let dir = source_tree();
    let root = dir.path().join("docs");
    let ctx = DirectiveContext {
        source_root: &root,
        docname: "index",
        line: 1,
        size_provider: &landscape,
    };
    let mut diagnostics = Vec::new();
    let err = ctx
        .resolve_asset("../docs-evil/a.png", &mut diagnostics)
        .unwrap_err();
    assert!(err.resolved.ends_with("docs-evil/a.png"));

    let (document, processor) = read(&root, "index", "::lightbox[../docs-evil/a.png]\n");
    assert_eq!(document.blocks().next(), Some(&Block::Rejected));
    assert_eq!(processor.diagnostics()[0].kind, DiagnosticKind::PathTraversal);
    for target in Target::ALL {
        let out = document.render(target, &ImageRegistry::new(), "_images").unwrap();
        assert!(out.is_empty(), "{target} rendered {out:?}");
    }
}

#[test]
fn test_repeated_registration_is_idempotent() {
    let dir = source_tree();
    let root = dir.path().join("docs");
    let (index, _) = read(&root, "index", "::lightbox[/images/example.png]\n");
    let (guide, _) = read(
        &root,
        "guide/setup",
        "::lightbox[/images/example.png]\n::lightbox[img/example.png]\n",
    );

    let mut registry = ImageRegistry::new();
    for _ in 0..2 {
        index.collect_assets(&mut registry);
        guide.collect_assets(&mut registry);
    }

    let entries: Vec<(&str, &str)> = registry.iter().collect();
    assert_eq!(
        entries,
        vec![
            ("guide/img/example.png", "example1.png"),
            ("images/example.png", "example.png"),
        ]
    );
}

#[test]
fn test_fallback_targets_show_a_single_plain_image() {
    let dir = source_tree();
    let root = dir.path().join("docs");
    let (document, _) = read(
        &root,
        "index",
        "Intro\n::lightbox[/images/example.png]{alt=\"Example\" caption=\"Not shown\"}\nOutro\n",
    );
    let mut registry = ImageRegistry::new();
    document.collect_assets(&mut registry);

    assert_eq!(
        document.render(Target::Text, &registry, "_images").unwrap(),
        "Intro\n[image: Example]\nOutro\n"
    );
    let epub = document.render(Target::Epub, &registry, "_images").unwrap();
    assert_eq!(epub.matches("<img ").count(), 1);
    assert!(!epub.contains("lightbox"));
    assert!(!epub.contains("Not shown"));
}

#[test]
fn test_sizing_defaults() {
    let sizing = SizingResult::compute(&[], None);
    assert_eq!(
        (sizing.thumbnail_percentage, sizing.overlay_percentage),
        (100, 95)
    );
    let sizing = SizingResult::compute(&[40], None);
    assert_eq!(
        (sizing.thumbnail_percentage, sizing.overlay_percentage),
        (40, 95)
    );
}

#[test]
fn test_special_file_name_is_escaped_for_every_target() {
    let dir = source_tree();
    let root = dir.path().join("docs");
    fs::write(root.join("images/fig 50%#1.png"), b"png").unwrap();
    let (document, processor) = read(
        &root,
        "guide/setup",
        "::lightbox[/images/fig 50%#1.png]{caption=\"c\"}\n",
    );
    assert!(processor.diagnostics().is_empty());

    let mut registry = ImageRegistry::new();
    document.collect_assets(&mut registry);

    let latex = document.render(Target::Latex, &registry, "_images").unwrap();
    assert!(latex.contains("{\\includegraphics{fig 50\\%\\#1.png}}"));

    let html = document.render(Target::Html, &registry, "_images").unwrap();
    assert_eq!(
        html.matches("src=\"../_images/fig%2050%25%231.png\"").count(),
        2
    );
    assert!(!html.contains("50%#1"));
}
