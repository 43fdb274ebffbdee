use serde::Serialize;
use std::fmt;

/// Which check produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Title,
    Desc,
    H1,
    Canon,
    Img,
    Anchor,
    Link,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Category::Title => "TITLE",
            Category::Desc => "DESC",
            Category::H1 => "H1",
            Category::Canon => "CANON",
            Category::Img => "IMG",
            Category::Anchor => "ANCHOR",
            Category::Link => "LINK",
        };
        write!(f, "[{tag}]")
    }
}

/// One error or warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub category: Category,
    pub message: String,

    /// Root-relative page the finding belongs to; `None` for cross-page findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
}

impl Finding {
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            page: None,
            line: None,
        }
    }

    pub fn on_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn at_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category, self.message)?;
        if let Some(page) = &self.page {
            write!(f, ": {page}")?;
        }
        Ok(())
    }
}

/// Output format for a [`Report`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Findings of one audit run, in generation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub pages_scanned: usize,
}

impl Report {
    pub fn new(pages_scanned: usize) -> Self {
        Self {
            pages_scanned,
            ..Self::default()
        }
    }

    pub fn error(&mut self, finding: Finding) {
        self.errors.push(finding);
    }

    pub fn warning(&mut self, finding: Finding) {
        self.warnings.push(finding);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Process exit status: 1 when any error was found, warnings never count
    pub fn exit_code(&self) -> u8 {
        if self.has_errors() { 1 } else { 0 }
    }

    pub fn summary(&self) -> String {
        format!(
            "SUMMARY: {} errors, {} warnings, {} pages scanned.",
            self.errors.len(),
            self.warnings.len(),
            self.pages_scanned
        )
    }

    /// Render the report in the requested format
    pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Text => Ok(self.to_string()),
            ReportFormat::Json => serde_json::to_string_pretty(self).map(|json| json + "\n"),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.errors.is_empty() {
            writeln!(f, "ERRORS:")?;
            for error in &self.errors {
                writeln!(f, "  {error}")?;
            }
        }
        if !self.warnings.is_empty() {
            writeln!(f, "\nWARNINGS:")?;
            for warning in &self.warnings {
                writeln!(f, "  {warning}")?;
            }
        }
        writeln!(f, "\n{}", self.summary())
    }
}
