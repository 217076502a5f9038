//! A small indentation-tracking string buffer shared by both backends.
//! Mirrors the teacher's `Printer`-delegates-to-a-writer split, minus
//! anything sourcemap-specific — neither emitted target here carries
//! token-for-token sourcemaps, only the string-literal rewrite maps from
//! spec.md §6.

#[derive(Default)]
pub struct CodePrinter {
    buf: String,
    indent: u32,
    at_line_start: bool,
}

impl CodePrinter {
    #[must_use]
    pub fn new() -> Self {
        Self { buf: String::new(), indent: 0, at_line_start: true }
    }

    fn pad(&mut self) {
        if self.at_line_start {
            for _ in 0..self.indent {
                self.buf.push_str("    ");
            }
            self.at_line_start = false;
        }
    }

    pub fn write(&mut self, text: &str) {
        self.pad();
        self.buf.push_str(text);
    }

    pub fn write_line(&mut self, text: &str) {
        self.pad();
        self.buf.push_str(text);
        self.buf.push('\n');
        self.at_line_start = true;
    }

    pub fn blank_line(&mut self) {
        self.buf.push('\n');
        self.at_line_start = true;
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Current 0-indexed line number, for source-map entries recorded
    /// before a `write_line` flushes the line.
    #[must_use]
    pub fn current_line(&self) -> u32 {
        u32::try_from(self.buf.matches('\n').count()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn current_col(&self) -> u32 {
        let after_last_newline = self.buf.rsplit('\n').next().unwrap_or(&self.buf);
        u32::try_from(after_last_newline.chars().count()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
#[path = "../tests/printer.rs"]
mod tests;
