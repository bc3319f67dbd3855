use pulldown_cmark::{Event, Options, Parser, Tag};

/// Renders markdown down to a plain-text excerpt of at most `words` words,
/// with a trailing `...` when the body had more to say.
pub fn excerpt(markdown: &str, words: usize) -> String {
    let options = Options::all().difference(Options::ENABLE_SMART_PUNCTUATION);
    let mut text = String::new();
    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Text(s) | Event::Code(s) => text.push_str(&s),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            // Block boundaries must not glue words together.
            Event::Start(Tag::Paragraph | Tag::Heading { .. } | Tag::Item | Tag::BlockQuote) => {
                text.push(' ');
            }
            _ => { }
        }
    }

    let mut remaining = text.split_whitespace();
    let taken = remaining.by_ref().take(words).collect::<Vec<_>>();
    let mut excerpt = taken.join(" ");
    if remaining.next().is_some() {
        excerpt.push_str("...");
    }

    excerpt
}
