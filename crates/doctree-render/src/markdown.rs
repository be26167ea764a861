//! Markdown-to-HTML conversion for module docstrings.

use std::collections::HashMap;
use std::fmt::Write;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::options::RenderOptions;

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// In-progress fenced or indented code block.
struct CodeBlock {
    language: Option<String>,
    content: String,
}

/// In-progress heading: collected text for the slug, HTML for the body.
struct Heading {
    level: u8,
    text: String,
    html: String,
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell: usize,
}

impl TableState {
    fn alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            _ => "",
        }
    }
}

/// Streaming markdown renderer producing HTML body fragments.
///
/// Headings get slugified `id` attributes with duplicate suffixes, fenced
/// code blocks carry a `language-*` class, and when LaTeX math is enabled
/// math segments are emitted as MathJax-compatible delimiters.
pub struct MarkdownRenderer {
    output: String,
    latex_math: bool,
    code: Option<CodeBlock>,
    table: TableState,
    image_alt: Option<String>,
    pending_image: Option<(String, String)>,
    heading: Option<Heading>,
    used_ids: HashMap<String, usize>,
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            latex_math: options.latex_math,
            code: None,
            table: TableState::default(),
            image_alt: None,
            pending_image: None,
            heading: None,
            used_ids: HashMap::new(),
        }
    }

    /// Parser options for the configured feature set.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        if self.latex_math {
            options |= Options::ENABLE_MATH;
        }
        options
    }

    /// Render markdown to an HTML fragment.
    pub fn render(&mut self, markdown: &str) -> String {
        for event in Parser::new_ext(markdown, self.parser_options()) {
            self.process_event(event);
        }
        std::mem::take(&mut self.output)
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                let html = format!("<code>{}</code>", escape_html(&code));
                if let Some(heading) = &mut self.heading {
                    heading.text.push_str(&code);
                    heading.html.push_str(&html);
                } else {
                    self.output.push_str(&html);
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::InlineMath(math) => {
                write!(
                    self.output,
                    r#"<span class="math">\({}\)</span>"#,
                    escape_html(&math)
                )
                .unwrap();
            }
            Event::DisplayMath(math) => {
                write!(
                    self.output,
                    r#"<div class="math">\[{}\]</div>"#,
                    escape_html(&math)
                )
                .unwrap();
            }
            Event::SoftBreak => {
                if let Some(code) = &mut self.code {
                    code.content.push('\n');
                } else {
                    self.output.push('\n');
                }
            }
            Event::HardBreak => self.output.push_str("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    r#"<input type="checkbox" checked disabled>"#
                } else {
                    r#"<input type="checkbox" disabled>"#
                });
            }
            Event::FootnoteReference(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.code.is_none() {
                    self.output.push_str("<p>");
                }
            }
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the slug is known.
                self.heading = Some(Heading {
                    level: heading_level_to_num(level),
                    text: String::new(),
                    html: String::new(),
                });
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => info
                        .split_whitespace()
                        .next()
                        .map(str::to_owned),
                    _ => None,
                };
                self.code = Some(CodeBlock {
                    language,
                    content: String::new(),
                });
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(alignments) => {
                self.table = TableState {
                    alignments,
                    in_head: false,
                    cell: 0,
                };
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell = 0;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.cell = 0;
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.alignment_style();
                let tag = if self.table.in_head { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Link { dest_url, .. } => {
                let link = format!(r#"<a href="{}">"#, escape_html(&dest_url));
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image_alt = Some(String::new());
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.code.is_none() {
                    self.output.push_str("</p>");
                }
            }
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.take() {
                    let id = self.unique_id(&slugify(&heading.text));
                    write!(
                        self.output,
                        r#"<h{level} id="{id}">{}</h{level}>"#,
                        heading.html.trim(),
                        level = heading.level,
                    )
                    .unwrap();
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    match code.language {
                        Some(lang) => write!(
                            self.output,
                            r#"<pre><code class="language-{}">{}</code></pre>"#,
                            escape_html(&lang),
                            escape_html(&code.content)
                        )
                        .unwrap(),
                        None => write!(
                            self.output,
                            "<pre><code>{}</code></pre>",
                            escape_html(&code.content)
                        )
                        .unwrap(),
                    }
                }
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.table.in_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.in_head {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.cell += 1;
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let alt = self.image_alt.take().unwrap_or_default();
                if let Some((src, title)) = self.pending_image.take() {
                    let title_attr = if title.is_empty() {
                        String::new()
                    } else {
                        format!(r#" title="{}""#, escape_html(&title))
                    };
                    write!(
                        self.output,
                        r#"<img src="{}"{title_attr} alt="{}">"#,
                        escape_html(&src),
                        escape_html(&alt)
                    )
                    .unwrap();
                }
            }
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Superscript
            | TagEnd::Subscript => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = &mut self.code {
            code.content.push_str(text);
        } else if let Some(alt) = &mut self.image_alt {
            alt.push_str(text);
        } else if let Some(heading) = &mut self.heading {
            heading.text.push_str(text);
            heading.html.push_str(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    /// Push inline markup to either the heading buffer or the output.
    fn push_inline(&mut self, content: &str) {
        if let Some(heading) = &mut self.heading {
            heading.html.push_str(content);
        } else {
            self.output.push_str(content);
        }
    }

    /// Deduplicate a heading slug within the current document.
    fn unique_id(&mut self, slug: &str) -> String {
        let count = self.used_ids.entry(slug.to_owned()).or_insert(0);
        let id = if *count == 0 {
            slug.to_owned()
        } else {
            format!("{slug}-{count}")
        };
        *count += 1;
        id
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Turn heading text into an anchor slug.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_dash = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.truncate(slug.trim_end_matches('-').len());
    if slug.is_empty() { "section".to_owned() } else { slug }
}
