//! Bordered text tables for command output

use std::fmt;

use tabled::builder::Builder;
use tabled::settings::style::{HorizontalLine, Style};

/// Rows of display strings under a fixed header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Listing {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Render as a psql-style table: outer border, a rule under the header
    pub fn render(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().cloned());
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }

        let style = Style::ascii()
            .horizontals([(1, HorizontalLine::inherit(Style::ascii()))])
            .remove_horizontal();

        let mut table = builder.build();
        table.with(style);
        table.to_string()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
