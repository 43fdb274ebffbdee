use crate::parsers::{self, MarkupHandler, StartTag};
use crate::results::{ImageRef, PageMetadata, Reference};
use std::path::PathBuf;

/// Parses one HTML document into its page metadata record
pub fn parse(file: PathBuf, bytes: &[u8]) -> PageMetadata {
    let html = parsers::decode(bytes);
    let mut builder = PageMetadataBuilder::new(file);
    parsers::scan(&html, &mut builder);
    let page = builder.finish();

    ::log::debug!(
        "Parsed {}: {} ids, {} images, {} references",
        page.file.display(),
        page.ids.len(),
        page.images.len(),
        page.references.len()
    );

    page
}

/// Title buffering state, reset for each document
#[derive(Debug, Default)]
struct TitleState {
    awaiting_close: bool,
    buffer: Vec<String>,
}

/// Collects [`PageMetadata`] from markup events
#[derive(Debug)]
pub struct PageMetadataBuilder {
    page: PageMetadata,
    title: TitleState,
}

impl PageMetadataBuilder {
    pub fn new(file: PathBuf) -> Self {
        Self {
            page: PageMetadata::new(file),
            title: TitleState::default(),
        }
    }

    pub fn finish(self) -> PageMetadata {
        self.page
    }

    fn record_meta(&mut self, tag: &StartTag) {
        if tag.attr_or_empty("name").eq_ignore_ascii_case("description") {
            let content = tag.attr_or_empty("content").trim();
            if !content.is_empty() {
                self.page.description = Some(content.to_string());
            }
        }
    }

    fn record_link(&mut self, tag: &StartTag) {
        if tag.attr_or_empty("rel").trim().eq_ignore_ascii_case("canonical") {
            let href = tag.attr_or_empty("href").trim();
            if !href.is_empty() {
                self.page.canonical = Some(href.to_string());
            }
        }
    }

    fn record_image(&mut self, tag: &StartTag) {
        self.page.images.push(ImageRef {
            src: tag.attr_or_empty("src").to_string(),
            alt: tag.attr("alt").map(str::to_string),
            width: tag.attr_or_empty("width").to_string(),
            height: tag.attr_or_empty("height").to_string(),
        });
    }
}

impl MarkupHandler for PageMetadataBuilder {
    fn start_tag(&mut self, tag: &StartTag, line: u64) {
        match tag.name.as_str() {
            "title" => {
                self.title.awaiting_close = true;
                self.title.buffer.clear();
            }
            "meta" => self.record_meta(tag),
            "link" => self.record_link(tag),
            "h1" => self.page.h1_count += 1,
            "img" => self.record_image(tag),
            _ => {}
        }

        if let Some(id) = tag.attr("id").filter(|id| !id.is_empty()) {
            self.page.ids.insert(id.to_string());
        }

        let reference_attr = match tag.name.as_str() {
            "a" | "link" => Some("href"),
            "script" | "img" => Some("src"),
            _ => None,
        };
        if let Some(value) = reference_attr
            .and_then(|attr| tag.attr(attr))
            .filter(|value| !value.is_empty())
        {
            self.page.references.push(Reference::new(value, line));
        }
    }

    fn end_tag(&mut self, name: &str, _line: u64) {
        if name != "title" || !self.title.awaiting_close {
            return;
        }
        self.title.awaiting_close = false;
        let text = self.title.buffer.concat();
        let text = text.trim();
        if !text.is_empty() && self.page.title.is_none() {
            self.page.title = Some(text.to_string());
        }
    }

    fn text(&mut self, text: &str, _line: u64) {
        if self.title.awaiting_close {
            self.title.buffer.push(text.to_string());
        }
    }
}
