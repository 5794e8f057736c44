use std::fmt;

/// HELP/TYPE comments and sample lines produced for one input document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Exposition {
    lines: Vec<String>,
}

impl Exposition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, lines: I) {
        self.lines.extend(lines);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Canonical output: every line joined with a single space.
    pub fn to_single_line(&self) -> String {
        self.lines.join(" ")
    }

    /// One line per comment and sample, for logs and humans. Unlike a
    /// text re-split of the single-line form, the first sample also gets
    /// its own line instead of trailing the TYPE comment.
    pub fn to_multiline(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for Exposition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_single_line())
    }
}
