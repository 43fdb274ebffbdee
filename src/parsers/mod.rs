pub mod html;


use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use std::cell::Cell;

/// A start tag with its attributes, names lower-cased and character references decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub self_closing: bool,
}

impl StartTag {
    /// Value of the named attribute, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the named attribute, or an empty string when absent
    pub fn attr_or_empty(&self, name: &str) -> &str {
        self.attr(name).unwrap_or("")
    }
}

impl From<&Tag> for StartTag {
    fn from(tag: &Tag) -> Self {
        Self {
            name: tag.name.to_string(),
            attrs: tag
                .attrs
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect(),
            self_closing: tag.self_closing,
        }
    }
}

/// Receives markup events from [`scan`] in document order.
///
/// `line` is 1-based. For start tags it is the line of the opening `<`; for
/// end tags and text it is the line the tokenizer had reached when the
/// token completed.
pub trait MarkupHandler {
    fn start_tag(&mut self, tag: &StartTag, line: u64);

    fn end_tag(&mut self, _name: &str, _line: u64) {}

    fn text(&mut self, _text: &str, _line: u64) {}
}

/// Bridges the html5ever tokenizer to a [`MarkupHandler`].
///
/// `open_line` holds the line of the first `<` fed since the last emitted
/// token. Inside a tag the tokenizer emits nothing but parse errors, so when
/// a start tag arrives that is the line of its opening `<`.
struct HandlerSink<'h, H: MarkupHandler> {
    handler: &'h mut H,
    open_line: &'h Cell<Option<u64>>,
}

impl<H: MarkupHandler> TokenSink for HandlerSink<'_, H> {
    type Handle = ();

    fn process_token(&mut self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        if let Token::ParseError(err) = &token {
            ::log::trace!("Tolerated markup error on line {}: {}", line_number, err);
            return TokenSinkResult::Continue;
        }
        let open_line = self.open_line.take();

        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => {
                    let start = StartTag::from(&tag);
                    let line = open_line.unwrap_or(line_number);
                    self.handler.start_tag(&start, line);
                    if !start.self_closing {
                        if let Some(kind) = raw_text_kind(&start.name) {
                            return TokenSinkResult::RawData(kind);
                        }
                    }
                }
                TagKind::EndTag => self.handler.end_tag(&tag.name, line_number),
            },
            Token::CharacterTokens(text) => self.handler.text(&text, line_number),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Elements whose content the tokenizer must not read as markup
fn raw_text_kind(name: &str) -> Option<RawKind> {
    match name {
        "title" | "textarea" => Some(RawKind::Rcdata),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "script" => Some(RawKind::ScriptData),
        _ => None,
    }
}

/// Tokenizes `html` and feeds every tag and text event to `handler`.
///
/// Never fails: malformed markup is reported by the tokenizer as parse
/// errors, which are logged and skipped. Input is fed in pieces that each
/// begin at a `<`, so start tags are reported on the line they open.
pub fn scan<H: MarkupHandler>(html: &str, handler: &mut H) {
    let open_line = Cell::new(None);
    let sink = HandlerSink {
        handler,
        open_line: &open_line,
    };
    let mut tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let mut input = BufferQueue::default();

    let mut line = 1;
    for chunk in split_before_tags(html) {
        if chunk.starts_with('<') && open_line.get().is_none() {
            open_line.set(Some(line));
        }
        input.push_back(StrTendril::from_slice(chunk));
        let _ = tokenizer.feed(&mut input);
        line += count_newlines(chunk);
    }
    tokenizer.end();
}

/// Splits `html` so that every piece after the first starts with `<`
fn split_before_tags(html: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for (index, _) in html.match_indices('<') {
        if index > start {
            chunks.push(&html[start..index]);
            start = index;
        }
    }
    if start < html.len() {
        chunks.push(&html[start..]);
    }
    chunks
}

/// Line breaks as the tokenizer counts them: `\n`, `\r\n` and lone `\r`
fn count_newlines(text: &str) -> u64 {
    let lone_cr = text
        .match_indices('\r')
        .filter(|(index, _)| !text[index + 1..].starts_with('\n'))
        .count();
    (text.matches('\n').count() + lone_cr) as u64
}

/// Decodes raw file bytes, replacing invalid UTF-8 sequences with U+FFFD
pub fn decode(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
