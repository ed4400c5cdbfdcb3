//! View module - console rendering
//!
//! Tables are drawn with ratatui widgets into an off-screen buffer and
//! printed as plain lines, so the session keeps a scrolling transcript
//! instead of taking over the screen.
//!
//! - `utils`: column width helpers
//! - `content`: the tables for each session screen

mod content;
mod utils;

pub use content::{
    artists_table, genres_table, menu_table, recommendations_table, tracks_table,
};

use crossterm::style::{Stylize, style};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Cell, Row, Table, Widget},
};

use utils::{fit_column_widths, truncate_string};

const FALLBACK_WIDTH: u16 = 100;
const MIN_WIDTH: u16 = 40;
const COLUMN_SPACING: u16 = 1;

/// Width tables are rendered at.
pub fn terminal_width() -> u16 {
    crossterm::terminal::size()
        .map(|(cols, _)| cols)
        .unwrap_or(FALLBACK_WIDTH)
        .max(MIN_WIDTH)
}

/// Render a bordered table of `rows` under `headers` as text lines.
pub fn render_table(title: &str, headers: &[&str], rows: &[Vec<String>], width: u16) -> String {
    let columns = headers.len();
    let natural: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|text| text.chars().count())
                .max()
                .unwrap_or(0)
                .max(headers[col].chars().count())
        })
        .collect();

    let spacing = COLUMN_SPACING as usize * columns.saturating_sub(1);
    let available = (width as usize).saturating_sub(2 + spacing);
    let widths = fit_column_widths(&natural, available);

    let header = Row::new(headers.iter().map(|h| Cell::from(h.to_string())))
        .style(Style::default().add_modifier(Modifier::BOLD));
    let body = rows.iter().map(|row| {
        Row::new(
            row.iter()
                .zip(&widths)
                .map(|(text, &w)| Cell::from(truncate_string(text, w).trim_end().to_string())),
        )
    });

    let table = Table::new(body, widths.iter().map(|&w| Constraint::Length(w as u16)))
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(Block::bordered().title(format!(" {title} ")));

    let table_width = (widths.iter().sum::<usize>() + spacing + 2).min(width as usize) as u16;
    let height = (rows.len() + 3).min(u16::MAX as usize) as u16;
    let area = Rect::new(0, 0, table_width, height);
    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf);

    buffer_lines(&buf)
}

fn buffer_lines(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let mut line = String::with_capacity(area.width as usize);
        for x in area.left()..area.right() {
            line.push_str(buf[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

pub fn error(text: &str) -> String {
    style(text).red().to_string()
}

pub fn warning(text: &str) -> String {
    style(text).yellow().to_string()
}

pub fn success(text: &str) -> String {
    style(text).green().to_string()
}
