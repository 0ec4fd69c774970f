use crate::config::KeeperConfig;
use crate::index::DisplayBook;
use crate::model::format_date;
use chrono::NaiveDate;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 6] = [
    "Index",
    "Title",
    "Author",
    "Start Date",
    "End Date",
    "Reading State",
];
const UNSPECIFIED: &str = "unspecified";

fn display_date(date: Option<NaiveDate>, config: &KeeperConfig) -> String {
    match date {
        None => UNSPECIFIED.to_string(),
        // Fall back to ISO when the configured format is broken
        Some(d) => format_date(d, &config.display_date_format).unwrap_or_else(|| d.to_string()),
    }
}

fn row(db: &DisplayBook, config: &KeeperConfig) -> [String; 6] {
    [
        db.index.to_string(),
        db.book.title.clone(),
        db.book.author.clone(),
        display_date(db.book.date_start, config),
        display_date(db.book.date_end, config),
        db.book.state.to_string(),
    ]
}

fn border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line
}

fn cells<S: AsRef<str>>(values: &[S], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (value, w) in values.iter().zip(widths) {
        let value = value.as_ref();
        let padding = w.saturating_sub(value.width());
        line.push(' ');
        line.push_str(value);
        line.push_str(&" ".repeat(padding + 1));
        line.push('|');
    }
    line
}

/// Renders books as a bordered table, in the order given.
pub fn render_books(books: &[DisplayBook], config: &KeeperConfig) -> String {
    let rows: Vec<[String; 6]> = books.iter().map(|db| row(db, config)).collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.width()).collect();
    for r in &rows {
        for (w, value) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(value.width());
        }
    }

    let headers: Vec<String> = HEADERS.iter().map(|h| h.to_uppercase()).collect();
    let separator = border(&widths);
    let mut out = vec![separator.clone(), cells(&headers, &widths), separator.clone()];
    for r in &rows {
        out.push(cells(r, &widths));
    }
    if !rows.is_empty() {
        out.push(separator);
    }
    out.join("\n")
}
