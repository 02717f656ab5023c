//! Markdown → ratatui `Text` for assistant answers.
//!
//! Covers what the assistant actually emits: paragraphs, headings, bold,
//! italic, inline code, code blocks, bullet/numbered lists, blockquotes and
//! links. Anything else (tables, HTML, images) is dropped.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Parse `content` into owned, styled lines using `base_fg` for body text.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut renderer = Renderer::new(base_fg);
    for event in Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH) {
        renderer.event(event);
    }
    renderer.text
}

struct Renderer {
    text: Text<'static>,
    base: Style,
    /// Inline styles; each entry is already merged with its parent.
    styles: Vec<Style>,
    /// `None` = bullet list, `Some(n)` = next number of an ordered list.
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
    link: Option<String>,
    pending_gap: bool,
}

impl Renderer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base: Style::default().fg(base_fg),
            styles: Vec::new(),
            lists: Vec::new(),
            quote_depth: 0,
            in_code_block: false,
            link: None,
            pending_gap: false,
        }
    }

    fn current(&self) -> Style {
        self.styles.last().copied().unwrap_or(self.base)
    }

    fn push_style(&mut self, style: Style) {
        let merged = self.current().patch(style);
        self.styles.push(merged);
    }

    fn new_line(&mut self) {
        let mut line = Line::default();
        if self.quote_depth > 0 {
            line.push_span(Span::styled(
                "│ ".repeat(self.quote_depth),
                Style::default().fg(Color::DarkGray),
            ));
        }
        self.text.lines.push(line);
    }

    fn span(&mut self, span: Span<'static>) {
        if self.text.lines.is_empty() {
            self.new_line();
        }
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        }
    }

    /// Starts a block, separated from the previous one by a blank line.
    fn block(&mut self) {
        if self.pending_gap {
            self.text.lines.push(Line::default());
            self.pending_gap = false;
        }
        self.new_line();
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                let text = text.replace('\t', "    ");
                if self.in_code_block {
                    let style = Style::default().fg(Color::White).bg(Color::Black);
                    let mut lines = text.lines().peekable();
                    while let Some(line) = lines.next() {
                        self.span(Span::styled(format!("  {line}"), style));
                        if lines.peek().is_some() {
                            self.new_line();
                        }
                    }
                } else {
                    let style = self.current();
                    self.span(Span::styled(text, style));
                }
            }
            Event::Code(code) => self.span(Span::styled(
                code.to_string(),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )),
            // Assistant answers use single newlines as line breaks
            Event::SoftBreak | Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.block();
                self.span(Span::styled(
                    "─".repeat(32),
                    Style::default().fg(Color::DarkGray),
                ));
                self.pending_gap = true;
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Paragraphs inside list items continue the item's line.
                if self.lists.is_empty() {
                    self.block();
                }
            }
            Tag::Heading { level, .. } => {
                self.block();
                let style = heading_style(level).fg(self.base.fg.unwrap_or(Color::Reset));
                self.push_style(style);
            }
            Tag::BlockQuote(_) => {
                self.quote_depth += 1;
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(_) => {
                self.block();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.block();
                    // block() opened an empty line the first item replaces
                    self.text.lines.pop();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.new_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                self.span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.push_style(link_style());
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.pending_gap = self.lists.is_empty(),
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.pending_gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.styles.pop();
                self.pending_gap = true;
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.pending_gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.pending_gap = true;
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.link.take() {
                    self.span(Span::styled(format!(" <{url}>"), link_style()));
                }
            }
            _ => {}
        }
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default().add_modifier(Modifier::BOLD),
        _ => Style::default().add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED)
}

/// Flattens rendered text back to plain strings, one per line.
#[cfg(test)]
pub fn plain_lines(text: &Text<'_>) -> Vec<String> {
    text.lines
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_and_italic_spans() {
        let text = render("Try **Hades** or *Celeste*", Color::Gray);
        let line = &text.lines[0];
        let bold = line.spans.iter().find(|s| s.content == "Hades").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        let italic = line.spans.iter().find(|s| s.content == "Celeste").unwrap();
        assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn plain_text_uses_base_color() {
        let text = render("hello", Color::Green);
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn bullet_and_numbered_lists() {
        let text = render("Picks:\n\n- Hades\n- Celeste\n\n1. First\n2. Second", Color::Gray);
        let lines = plain_lines(&text);
        assert!(lines.contains(&"• Hades".to_string()), "{lines:?}");
        assert!(lines.contains(&"• Celeste".to_string()), "{lines:?}");
        assert!(lines.contains(&"1. First".to_string()), "{lines:?}");
        assert!(lines.contains(&"2. Second".to_string()), "{lines:?}");
    }

    #[test]
    fn heading_text_is_bold() {
        let text = render("## Top picks", Color::Blue);
        let span = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "Top picks")
            .unwrap();
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(span.style.fg, Some(Color::Blue));
    }

    #[test]
    fn link_url_is_appended() {
        let text = render("[Steam](https://store.steampowered.com)", Color::Gray);
        let lines = plain_lines(&text);
        assert_eq!(lines[0], "Steam <https://store.steampowered.com>");
    }

    #[test]
    fn inline_code_styled() {
        let text = render("Run `hades.exe`", Color::Gray);
        let code = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "hades.exe")
            .unwrap();
        assert_eq!(code.style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn single_newlines_break_lines() {
        let text = render("You can ask me:\n• comparisons\n• picks", Color::Gray);
        assert_eq!(
            plain_lines(&text),
            vec!["You can ask me:", "• comparisons", "• picks"]
        );
    }

    #[test]
    fn paragraphs_separated_by_blank_line() {
        let text = render("one\n\ntwo", Color::Gray);
        assert_eq!(plain_lines(&text), vec!["one", "", "two"]);
    }
}
