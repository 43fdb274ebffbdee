use crate::report::{Category, Finding, Report};
use crate::resolver::{Resolution, Resolver};
use crate::results::PageMetadata;
use crate::utils::display_path;
use std::collections::HashMap;
use std::path::Path;

/// Runs every check over `pages`, which must be in discovery order.
///
/// Checks run in a fixed sequence (page metadata, duplicates, images,
/// references) so the report is identical across runs over the same tree.
pub fn validate(pages: &[PageMetadata], resolver: &Resolver, not_found_page: &str) -> Report {
    let mut validator = Validator {
        resolver,
        not_found_page,
        report: Report::new(pages.len()),
    };

    for page in pages {
        validator.check_metadata(page);
    }
    validator.check_duplicates(pages, "title", Category::Title, |page| page.title.as_deref());
    validator.check_duplicates(pages, "description", Category::Desc, |page| {
        page.description.as_deref()
    });
    for page in pages {
        validator.check_images(page);
    }
    for page in pages {
        validator.check_references(page);
    }

    ::log::info!(
        "Validated {} pages: {} errors, {} warnings",
        pages.len(),
        validator.report.errors.len(),
        validator.report.warnings.len()
    );
    validator.report
}

struct Validator<'a> {
    resolver: &'a Resolver,
    not_found_page: &'a str,
    report: Report,
}

impl Validator<'_> {
    fn display(&self, path: &Path) -> String {
        display_path(self.resolver.root(), path)
    }

    fn check_metadata(&mut self, page: &PageMetadata) {
        let shown = self.display(&page.file);

        if page.title.is_none() {
            self.report
                .error(Finding::new(Category::Title, "Missing <title>").on_page(&shown));
        }
        if page.description.is_none() {
            self.report
                .warning(Finding::new(Category::Desc, "Missing meta description").on_page(&shown));
        }
        if page.h1_count != 1 {
            self.report.warning(
                Finding::new(
                    Category::H1,
                    format!("Expected 1 <h1>, found {}", page.h1_count),
                )
                .on_page(&shown),
            );
        }

        let is_not_found_page = page
            .file
            .file_name()
            .is_some_and(|name| name == self.not_found_page);
        if !is_not_found_page && page.canonical.is_none() {
            self.report
                .warning(Finding::new(Category::Canon, "Missing canonical").on_page(&shown));
        }
    }

    /// One warning per value shared by more than one page, groups in order of first appearance
    fn check_duplicates<F>(&mut self, pages: &[PageMetadata], label: &str, category: Category, key: F)
    where
        F: Fn(&PageMetadata) -> Option<&str>,
    {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<Vec<&Path>> = Vec::new();

        for page in pages {
            let Some(value) = key(page).filter(|value| !value.is_empty()) else {
                continue;
            };
            let slot = *index.entry(value).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(&page.file);
        }

        for group in groups.iter().filter(|group| group.len() > 1) {
            let members = group
                .iter()
                .map(|file| self.display(file))
                .collect::<Vec<_>>()
                .join(" | ");
            self.report
                .warning(Finding::new(category, format!("Duplicate {label}: {members}")));
        }
    }

    fn check_images(&mut self, page: &PageMetadata) {
        let shown = self.display(&page.file);

        for image in &page.images {
            let src = image.src.as_str();
            if src.is_empty() {
                self.report
                    .warning(Finding::new(Category::Img, "Missing src").on_page(&shown));
                continue;
            }

            if let Resolution::FilesystemTarget { path, .. } = self.resolver.resolve(&page.file, src) {
                if !self.resolver.target_exists(&path) {
                    self.report.error(
                        Finding::new(Category::Img, format!("Broken src '{src}'")).on_page(&shown),
                    );
                }
            }

            if image.alt.is_none() {
                self.report.warning(
                    Finding::new(Category::Img, format!("Missing alt attribute for '{src}'"))
                        .on_page(&shown),
                );
            }
            if image.width.is_empty() || image.height.is_empty() {
                self.report.warning(
                    Finding::new(Category::Img, format!("Missing width/height for '{src}'"))
                        .on_page(&shown),
                );
            }
        }
    }

    fn check_references(&mut self, page: &PageMetadata) {
        let shown = self.display(&page.file);

        for reference in &page.references {
            let raw = reference.value.as_str();
            let line = reference.line;

            match self.resolver.resolve(&page.file, raw) {
                Resolution::External | Resolution::DataUri => {}
                Resolution::SamePageFragment(fragment) => {
                    self.check_anchor(page, &fragment, line, &shown);
                }
                Resolution::FilesystemTarget { path, fragment } if path == page.file => {
                    self.check_anchor(page, &fragment, line, &shown);
                }
                Resolution::FilesystemTarget { path, .. } => {
                    if !self.resolver.target_exists(&path) {
                        let target = self.display(&path);
                        self.report.error(
                            Finding::new(
                                Category::Link,
                                format!("Broken '{raw}' (line {line}) -> '{target}'"),
                            )
                            .on_page(&shown)
                            .at_line(line),
                        );
                    }
                }
            }
        }
    }

    fn check_anchor(&mut self, page: &PageMetadata, fragment: &str, line: u64, shown: &str) {
        if fragment.is_empty() || page.ids.contains(fragment) {
            return;
        }
        self.report.warning(
            Finding::new(
                Category::Anchor,
                format!("Missing id '#{fragment}' (line {line})"),
            )
            .on_page(shown)
            .at_line(line),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{ImageRef, Reference};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn page(root: &Path, name: &str) -> PageMetadata {
        PageMetadata {
            title: Some(format!("Title of {name}")),
            description: Some(format!("Description of {name}")),
            canonical: Some(format!("https://example.com/{name}")),
            h1_count: 1,
            ..PageMetadata::new(root.join(name))
        }
    }

    fn image(src: &str) -> ImageRef {
        ImageRef {
            src: src.to_string(),
            alt: Some("picture".to_string()),
            width: "10".to_string(),
            height: "10".to_string(),
        }
    }

    fn messages(findings: &[Finding]) -> Vec<String> {
        findings.iter().map(Finding::to_string).collect()
    }

    fn run(root: &Path, pages: &[PageMetadata]) -> Report {
        validate(pages, &Resolver::new(root.to_path_buf()), "404.html")
    }

    #[test]
    fn test_well_formed_page_is_clean() {
        let root = PathBuf::from("/site");
        let report = run(&root, &[page(&root, "index.html")]);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.pages_scanned, 1);
    }

    #[test]
    fn test_metadata_findings() {
        let root = PathBuf::from("/site");
        let bare = PageMetadata::new(root.join("blog/post.html"));
        let report = run(&root, &[bare]);

        assert_eq!(
            messages(&report.errors),
            vec!["[TITLE] Missing <title>: blog/post.html"]
        );
        assert_eq!(
            messages(&report.warnings),
            vec![
                "[DESC] Missing meta description: blog/post.html",
                "[H1] Expected 1 <h1>, found 0: blog/post.html",
                "[CANON] Missing canonical: blog/post.html",
            ]
        );
    }

    #[test]
    fn test_h1_count_reported() {
        let root = PathBuf::from("/site");
        let mut two = page(&root, "two.html");
        two.h1_count = 2;
        let report = run(&root, &[page(&root, "one.html"), two]);
        assert_eq!(
            messages(&report.warnings),
            vec!["[H1] Expected 1 <h1>, found 2: two.html"]
        );
    }

    #[test]
    fn test_not_found_page_needs_no_canonical() {
        let root = PathBuf::from("/site");
        let mut not_found = page(&root, "404.html");
        not_found.canonical = None;
        let report = run(&root, &[not_found]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_duplicates_grouped_in_discovery_order() {
        let root = PathBuf::from("/site");
        let mut a = page(&root, "a.html");
        let mut b = page(&root, "b.html");
        let mut c = page(&root, "c.html");
        let untitled = PageMetadata {
            description: Some("Shared".to_string()),
            canonical: Some("x".to_string()),
            h1_count: 1,
            ..PageMetadata::new(root.join("d.html"))
        };
        a.title = Some("Same".to_string());
        c.title = Some("Same".to_string());
        b.description = Some("Shared".to_string());

        let report = run(&root, &[a, b, c, untitled]);
        assert_eq!(
            messages(&report.warnings),
            vec![
                "[TITLE] Duplicate title: a.html | c.html",
                "[DESC] Duplicate description: b.html | d.html",
            ]
        );
        // Missing title is an error but never part of a duplicate group
        assert_eq!(messages(&report.errors), vec!["[TITLE] Missing <title>: d.html"]);
    }

    #[test]
    fn test_image_checks() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("logo.png"), b"png").unwrap();

        let mut index = page(root, "index.html");
        index.images = vec![
            image("logo.png"),
            ImageRef {
                alt: None,
                ..image("missing.png")
            },
            ImageRef {
                width: String::new(),
                ..image("https://cdn.example.com/a.png")
            },
            image("data:image/gif;base64,R0lGOD"),
            ImageRef {
                alt: None,
                ..image("")
            },
        ];

        let report = run(root, &[index]);
        assert_eq!(
            messages(&report.errors),
            vec!["[IMG] Broken src 'missing.png': index.html"]
        );
        assert_eq!(
            messages(&report.warnings),
            vec![
                "[IMG] Missing alt attribute for 'missing.png': index.html",
                "[IMG] Missing width/height for 'https://cdn.example.com/a.png': index.html",
                "[IMG] Missing src: index.html",
            ]
        );
    }

    #[test]
    fn test_empty_alt_is_accepted() {
        let root = PathBuf::from("/site");
        let mut index = page(&root, "index.html");
        index.images = vec![ImageRef {
            alt: Some(String::new()),
            ..image("https://example.com/a.png")
        }];
        let report = run(&root, &[index]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_anchor_checks() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("index.html"), "").unwrap();

        let mut index = page(root, "index.html");
        index.ids.insert("top".to_string());
        index.references = vec![
            Reference::new("#top", 3),
            Reference::new("#", 4),
            Reference::new("#gone", 5),
            Reference::new("index.html#top", 6),
            Reference::new("./index.html#nowhere", 7),
            Reference::new("/index.html", 8),
        ];

        let report = run(root, &[index]);
        assert!(report.errors.is_empty());
        assert_eq!(
            messages(&report.warnings),
            vec![
                "[ANCHOR] Missing id '#gone' (line 5): index.html",
                "[ANCHOR] Missing id '#nowhere' (line 7): index.html",
            ]
        );
        assert_eq!(report.warnings[0].line, Some(5));
    }

    #[test]
    fn test_link_checks() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("about")).unwrap();
        fs::write(root.join("about/index.html"), "").unwrap();
        fs::create_dir_all(root.join("blog")).unwrap();
        fs::write(root.join("blog/post.html"), "").unwrap();

        let mut post = page(root, "blog/post.html");
        post.references = vec![
            Reference::new("/about", 2),
            Reference::new("../about/", 3),
            Reference::new("https://example.com", 4),
            Reference::new("mailto:a@b.com", 5),
            Reference::new("//cdn.example.com/x.js", 6),
            Reference::new("missing.html#frag", 7),
            Reference::new("/nope", 8),
        ];

        let report = run(root, &[post]);
        assert_eq!(
            messages(&report.errors),
            vec![
                "[LINK] Broken 'missing.html#frag' (line 7) -> 'blog/missing.html': blog/post.html",
                "[LINK] Broken '/nope' (line 8) -> 'nope': blog/post.html",
            ]
        );
        assert_eq!(report.errors[1].line, Some(8));
        assert!(report.warnings.is_empty());
    }
}
