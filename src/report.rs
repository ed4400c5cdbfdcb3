//! HTML recommendation report and where it is written

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

use crate::model::{Category, SessionState, Tabular};

const REPORT_PREFIX: &str = "Recommendations";

/// Columns of the report table: flattened key and header.
const REPORT_COLUMNS: [(&str, &str); 5] = [
    ("name", "Song Title"),
    ("album_image_url_small", "Cover Art"),
    ("artist_name", "Artist"),
    ("album_name", "Album"),
    ("share_url", "Share URL"),
];

/// Persists rendered reports.
pub trait ReportSink {
    /// Free file name for a report written now.
    fn next_path(&self) -> PathBuf;

    fn write(&self, path: &Path, html: &str) -> Result<()>;
}

/// Writes reports as files into a directory
pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportSink for FileReportSink {
    fn next_path(&self) -> PathBuf {
        unique_report_path(&self.dir, Utc::now().date_naive(), |p| p.exists())
    }

    fn write(&self, path: &Path, html: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, html).with_context(|| format!("writing report to {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = html.len(), "Report written");
        Ok(())
    }
}

/// `Recommendations_<yyMonDD>.html`, or with `_1`, `_2`, ... appended until
/// `taken` reports the name as free.
pub fn unique_report_path(dir: &Path, date: NaiveDate, taken: impl Fn(&Path) -> bool) -> PathBuf {
    let stem = format!("{REPORT_PREFIX}_{}", date.format("%y%b%d"));
    let mut path = dir.join(format!("{stem}.html"));
    let mut n = 0;
    while taken(&path) {
        n += 1;
        path = dir.join(format!("{stem}_{n}.html"));
    }
    path
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Page header thanking the user for the seeds they picked.
pub fn render_header(state: &SessionState) -> String {
    format!(
        r#"<style type="text/css">
  .tab {{ margin-left: 40px; }}
  body {{ font-family: Sans-Serif }}
  table {{ font-family: Sans-Serif }}
</style>
<body>
  <h1>We found the following songs you might like!</h1>
  <h3>Thank you for telling us you like:</h3>
  <h3 class="tab">
    Artists: {artists} <br>
    Tracks: {tracks} <br>
    Genres: {genres} <br>
  </h3>
</body>"#,
        artists = escape_html(&state.display_label(Category::Artist)),
        tracks = escape_html(&state.display_label(Category::Track)),
        genres = escape_html(&state.display_label(Category::Genre)),
    )
}

fn render_cell(column: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let value = escape_html(value);
    match column {
        "album_image_url_small" => format!(r#"<img src="{value}" />"#),
        "share_url" => format!(r#"<a href="{value}" target="_blank">{value}</a>"#),
        _ => value,
    }
}

/// Table of recommended tracks.
pub fn render_tracklist(table: &Tabular) -> String {
    if table.is_empty() {
        return "<p>No recommendations were returned.</p>".to_string();
    }

    let mut html = String::from(
        "<table style=\"border-collapse: collapse; border: solid 1px #CCC;\">\n  <thead>\n    <tr style=\"border: solid 1px #CCC;\">\n",
    );
    for (_, header) in REPORT_COLUMNS {
        html.push_str(&format!("      <th>{header}</th>\n"));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    let keys: Vec<&str> = REPORT_COLUMNS.iter().map(|(key, _)| *key).collect();
    for row in table.project(&keys) {
        html.push_str("    <tr style=\"border: solid 1px #CCC;\">\n");
        for (key, value) in keys.iter().zip(row) {
            html.push_str(&format!("      <td>{}</td>\n", render_cell(key, &value)));
        }
        html.push_str("    </tr>\n");
    }
    html.push_str("  </tbody>\n</table>");
    html
}

pub fn render_report(state: &SessionState, table: &Tabular) -> String {
    format!("{}\n{}", render_header(state), render_tracklist(table))
}
