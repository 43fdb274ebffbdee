use clap::{Parser, ValueEnum};
use site_audit::ReportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-audit")]
#[command(about = "Checks a generated static site for broken links and missing page metadata")]
#[command(version)]
pub struct Args {
    /// Site output directory to audit
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Number of files parsed concurrently
    #[arg(short, long, default_value_t = 4)]
    pub concurrency: usize,

    /// Regex for root-relative paths to skip (repeatable)
    #[arg(long = "exclude", value_name = "REGEX")]
    pub exclude: Vec<String>,

    /// File name of the not-found page, which needs no canonical link
    #[arg(long, default_value = "404.html")]
    pub not_found_page: String,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

/// Convert from CLI argument format to report format
pub fn convert_format(arg: FormatArg) -> ReportFormat {
    match arg {
        FormatArg::Text => ReportFormat::Text,
        FormatArg::Json => ReportFormat::Json,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["site-audit"]);
        assert_eq!(args.root, PathBuf::from("."));
        assert_eq!(args.concurrency, 4);
        assert!(args.exclude.is_empty());
        assert_eq!(args.not_found_page, "404.html");
        assert_eq!(args.format, FormatArg::Text);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "site-audit",
            "--root",
            "public",
            "-c",
            "8",
            "--exclude",
            "^drafts/",
            "--exclude",
            "old\\.html$",
            "--format",
            "json",
        ]);
        assert_eq!(args.root, PathBuf::from("public"));
        assert_eq!(args.concurrency, 8);
        assert_eq!(args.exclude, vec!["^drafts/", "old\\.html$"]);
        assert_eq!(convert_format(args.format), ReportFormat::Json);
    }
}
