//! Line-oriented markup writer with a readable and a compact mode.

/// Accumulates markup either pretty-printed (two-space indents, one
/// element per line) or compact (no inter-element whitespace at all).
#[derive(Debug)]
pub(crate) struct DocWriter {
    out: String,
    compact: bool,
    depth: usize,
}

impl DocWriter {
    pub(crate) fn new(compact: bool) -> Self {
        Self {
            out: String::new(),
            compact,
            depth: 0,
        }
    }

    /// Write an opening tag and indent everything until its close.
    pub(crate) fn open(&mut self, tag: &str) {
        self.put(tag);
        self.depth += 1;
    }

    /// Write a closing tag for `name`.
    pub(crate) fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        let tag = format!("</{name}>");
        self.put(&tag);
    }

    /// Write one self-contained element or text line.
    pub(crate) fn line(&mut self, markup: &str) {
        self.put(markup);
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn put(&mut self, markup: &str) {
        if self.compact {
            self.out.push_str(markup);
            return;
        }
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(markup);
        self.out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_indents_children() {
        let mut doc = DocWriter::new(false);
        doc.open("<g>");
        doc.line("<rect/>");
        doc.close("g");
        assert_eq!(doc.finish(), "<g>\n  <rect/>\n</g>\n");
    }

    #[test]
    fn test_compact_strips_whitespace() {
        let mut doc = DocWriter::new(true);
        doc.open("<g>");
        doc.line("<rect/>");
        doc.close("g");
        assert_eq!(doc.finish(), "<g><rect/></g>");
    }

    #[test]
    fn test_nested_depth() {
        let mut doc = DocWriter::new(false);
        doc.open("<svg>");
        doc.open("<g>");
        doc.line("<text>hi</text>");
        doc.close("g");
        doc.close("svg");
        assert_eq!(
            doc.finish(),
            "<svg>\n  <g>\n    <text>hi</text>\n  </g>\n</svg>\n"
        );
    }
}
