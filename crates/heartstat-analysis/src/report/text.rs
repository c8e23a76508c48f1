//! Plain-text report document: banner, numbered sections and aligned tables.
use std::fs;
use std::path::Path;

use crate::error::StatsError;

pub const RULE_WIDTH: usize = 80;

pub fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(RULE_WIDTH).collect()
}

#[derive(Debug, Clone, Default)]
pub struct ReportSection {
    pub title: String,
    lines: Vec<String>,
}

impl ReportSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: Vec::new(),
        }
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append a multi-line block, one entry per line.
    pub fn add_content(&mut self, block: &str) {
        self.lines.extend(block.lines().map(str::to_string));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    subtitle: Vec<String>,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Line shown inside the banner under the title.
    pub fn add_banner_line(&mut self, line: impl Into<String>) {
        self.subtitle.push(line.into());
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    /// Render the banner, then each section as a blank line, a dashed rule,
    /// `N. TITLE`, a dashed rule and its body. Lines are joined with `\n`.
    pub fn render(&self) -> String {
        let mut out = vec![rule('='), self.title.clone()];
        out.extend(self.subtitle.iter().cloned());
        out.push(rule('='));

        for (idx, section) in self.sections.iter().enumerate() {
            out.push(String::new());
            out.push(rule('-'));
            out.push(format!("{}. {}", idx + 1, section.title));
            out.push(rule('-'));
            out.extend(section.lines.iter().cloned());
        }
        out.join("\n")
    }

    /// Write the rendered report as UTF-8, replacing any existing file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<String, StatsError> {
        let text = self.render();
        write_text(path.as_ref(), &text)?;
        Ok(text)
    }
}

pub fn write_text(path: &Path, text: &str) -> Result<(), StatsError> {
    fs::write(path, text.as_bytes()).map_err(|e| StatsError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Column-aligned table: row labels left-aligned, cells right-aligned.
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    header: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
}

impl TextTable {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, label: impl Into<String>, cells: Vec<String>) {
        self.rows.push((label.into(), cells));
    }

    pub fn render(&self) -> String {
        let label_width = self.rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        let n_cols = self
            .rows
            .iter()
            .map(|(_, c)| c.len())
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0);

        let widths: Vec<usize> = (0..n_cols)
            .map(|i| {
                let head = self.header.get(i).map(|h| h.len()).unwrap_or(0);
                self.rows
                    .iter()
                    .filter_map(|(_, cells)| cells.get(i).map(|c| c.len()))
                    .chain(std::iter::once(head))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_line = |label: &str, cells: &[String]| {
            let mut line = format!("{:<width$}", label, width = label_width);
            for (i, width) in widths.iter().enumerate() {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                line.push_str(&format!("  {:>width$}", cell, width = width));
            }
            line.trim_end().to_string()
        };

        let mut lines = vec![format_line("", &self.header)];
        for (label, cells) in &self.rows {
            lines.push(format_line(label, cells));
        }
        lines.join("\n")
    }
}

/// Two-column listing: labels left-aligned, values right-aligned.
pub fn series<L: AsRef<str>, V: AsRef<str>>(pairs: &[(L, V)]) -> Vec<String> {
    let label_width = pairs.iter().map(|(l, _)| l.as_ref().len()).max().unwrap_or(0);
    let value_width = pairs.iter().map(|(_, v)| v.as_ref().len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(l, v)| {
            format!(
                "{:<lw$}    {:>vw$}",
                l.as_ref(),
                v.as_ref(),
                lw = label_width,
                vw = value_width
            )
        })
        .collect()
}

/// Fixed-precision number, `NaN` for non-finite values.
pub fn fmt_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    format!("{:.*}", decimals, value)
}
