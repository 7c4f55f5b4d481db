//! Minimal writer for human-readable protobuf text format.

use std::fmt::Write;

/// Types that can render themselves as text-format fields.
pub trait TextFormat {
    fn write_fields(&self, writer: &mut TextFormatWriter);

    /// Render as a complete text-format document.
    fn to_text_format(&self) -> String {
        let mut writer = TextFormatWriter::new();
        self.write_fields(&mut writer);
        writer.finish()
    }
}

/// Accumulates text-format output with two-space indentation per nesting level.
#[derive(Debug, Default)]
pub struct TextFormatWriter {
    out: String,
    depth: usize,
}

impl TextFormatWriter {
    pub const fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    pub fn string_field(&mut self, name: &str, value: &str) {
        self.indent();
        let _ = writeln!(self.out, "{name}: \"{}\"", escape(value));
    }

    pub fn uint_field(&mut self, name: &str, value: u64) {
        self.indent();
        let _ = writeln!(self.out, "{name}: {value}");
    }

    /// Writes a nested message field.
    pub fn message(&mut self, name: &str, value: &impl TextFormat) {
        self.indent();
        let _ = writeln!(self.out, "{name} {{");
        self.depth += 1;
        value.write_fields(self);
        self.depth -= 1;
        self.indent();
        self.out.push_str("}\n");
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}
