//! Image directives embedded in model replies as `{{description}}`.

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// The first `{{...}}` directive found in a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDirective {
    /// Byte range of the whole directive, braces included.
    start: usize,
    end: usize,
    /// Trimmed text between the braces.
    prompt: String,
}

impl ImageDirective {
    /// Finds the first non-blank directive in `text`.
    ///
    /// Blank pairs such as `{{ }}` are skipped. Returns `None` when no closed
    /// pair encloses any text.
    pub fn find(text: &str) -> Option<Self> {
        let mut from = 0;
        while let Some(offset) = text[from..].find(OPEN) {
            let start = from + offset;
            let inner_start = start + OPEN.len();
            let inner_len = text[inner_start..].find(CLOSE)?;
            let end = inner_start + inner_len + CLOSE.len();

            let inner = text[inner_start..inner_start + inner_len].trim();
            if !inner.is_empty() {
                return Some(Self {
                    start,
                    end,
                    prompt: inner.to_string(),
                });
            }
            from = end;
        }
        None
    }

    /// Text to send to the image generator.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replaces the directive in `text` with a Markdown image pointing at `url`.
    pub fn splice(&self, text: &str, url: &str) -> String {
        format!(
            "{}![{}]({}){}",
            &text[..self.start],
            self.prompt,
            url,
            &text[self.end..]
        )
    }
}
