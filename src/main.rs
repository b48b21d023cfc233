use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use photo_table::state::query::ALL;
use photo_table::{query, Catalog, Criteria, EnrichedPhoto, SortField};

/// Message shown when the filters leave nothing to display
const NO_MATCHES: &str = "No photos matching selected criteria";

/// Photos from albums: search, filter and sort the photo table
#[derive(Parser, Debug)]
#[command(name = "photo-table", version, about)]
struct Args {
    /// Directory with users.json, albums.json and photos.json (defaults to the built-in data)
    #[arg(long, env = "PHOTO_TABLE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Case-insensitive substring of the photo title
    #[arg(long, default_value = "")]
    search: String,

    /// Uploader name, or "All"
    #[arg(long, default_value = ALL)]
    user: String,

    /// Album title, or "All"
    #[arg(long, default_value = ALL)]
    album: String,

    /// Click a column header (id, title, album, user); repeat to cycle the sort
    #[arg(long = "sort", value_name = "COLUMN")]
    sort: Vec<SortField>,

    /// Print the visible rows as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Do not colour uploader names
    #[arg(long)]
    plain: bool,
}

/// Main application state
struct PhotoTable {
    /// The static source tables
    catalog: Catalog,
    /// Photos joined with album and uploader, computed once
    photos: Vec<EnrichedPhoto>,
    /// Current filter and sort
    criteria: Criteria,
    /// Colour uploader names by their style class
    color: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User typed in the search box
    Search(String),
    /// User picked an uploader tab
    SelectUser(String),
    /// User picked an album button
    SelectAlbum(String),
    /// User clicked a column header
    SortBy(SortField),
}

impl PhotoTable {
    /// Create a new instance of the application
    fn new(catalog: Catalog, color: bool) -> Result<Self> {
        // Broken fixtures are fatal: nothing sensible can be displayed
        let photos = catalog.enrich().context("Catalog tables do not join")?;

        info!("Photo table ready with {} photos", photos.len());

        Ok(PhotoTable {
            catalog,
            photos,
            criteria: Criteria::default(),
            color,
        })
    }

    /// Handle an application message and update the criteria
    fn update(&mut self, message: Message) {
        debug!("{:?}", message);

        let criteria = std::mem::take(&mut self.criteria);
        self.criteria = match message {
            Message::Search(text) => criteria.with_search(text),
            Message::SelectUser(name) => criteria.with_user(&name),
            Message::SelectAlbum(title) => criteria.with_album(&title),
            Message::SortBy(field) => criteria.clicked(field),
        };
    }

    fn visible(&self) -> Vec<&EnrichedPhoto> {
        query(&self.photos, &self.criteria)
    }

    /// Render the filter panel and the table as text
    fn view(&self) -> String {
        let mut out = String::new();

        out.push_str("Photos from albums\n\n");
        out.push_str(&format!(
            "Users:  {}\n",
            selector(&self.catalog.user_names(), self.criteria.user_filter.label())
        ));
        out.push_str(&format!(
            "Albums: {}\n",
            selector(&self.catalog.album_titles(), self.criteria.album_filter.label())
        ));
        out.push_str(&format!("Search: {:?}\n\n", self.criteria.search_text));

        let visible = self.visible();
        if visible.is_empty() {
            out.push_str(NO_MATCHES);
            out.push('\n');
            return out;
        }

        let cells: Vec<[String; 4]> = visible
            .iter()
            .map(|photo| {
                [
                    photo.id.to_string(),
                    photo.title.clone(),
                    photo.album_title().to_string(),
                    photo.user_name().to_string(),
                ]
            })
            .collect();

        let headers: Vec<String> = SortField::ALL
            .iter()
            .map(|field| {
                format!("{} {}", field.header(), self.criteria.sort.indicator(*field).arrow())
            })
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        out.push_str(&format_row(&headers, &widths));
        for (row, photo) in cells.iter().zip(&visible) {
            let mut row = row.clone();
            if self.color {
                // last column, so the escape codes never shift padding
                row[3] = paint(&row[3], photo.user.name_class());
            }
            out.push_str(&format_row(&row, &widths));
        }

        out
    }
}

/// "[All] Roma Anna" with the active choice bracketed
fn selector(options: &[&str], active: &str) -> String {
    std::iter::once(ALL)
        .chain(options.iter().copied())
        .map(|option| {
            if option == active {
                format!("[{}]", option)
            } else {
                option.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Terminal rendering of the uploader cell's style class
fn paint(text: &str, class: &str) -> String {
    let code = match class {
        "has-text-link" => "34",
        "has-text-danger" => "31",
        _ => return text.to_string(),
    };
    format!("\x1b[{}m{}\x1b[0m", code, text)
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}

fn main() -> Result<()> {
    // Logs go to stderr so the table on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let catalog = match &args.data_dir {
        Some(dir) => Catalog::load_dir(dir)?,
        None => Catalog::builtin()?,
    };

    let mut app = PhotoTable::new(catalog, !args.plain)?;

    let mut messages = vec![
        Message::Search(args.search),
        Message::SelectUser(args.user),
        Message::SelectAlbum(args.album),
    ];
    messages.extend(args.sort.into_iter().map(Message::SortBy));

    for message in messages {
        app.update(message);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&app.visible())?);
    } else {
        print!("{}", app.view());
    }

    Ok(())
}
