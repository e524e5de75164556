//! Shared pieces of the `gridstar` command-line front end: argument parsing
//! helpers, map and config loading, and terminal rendering of a finished
//! search.

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use gridstar_core::{Cell, Mark, MarkedGrid, ObstacleGrid};
use gridstar_paths::{SearchConfig, SearchResult, SearchStats};

/// Parse a `row,col` pair as typed on the command line.
pub fn parse_cell(s: &str) -> Result<Cell, String> {
    let (r, c) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got `{s}`"))?;
    let row = r
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid row `{r}`: {e}"))?;
    let col = c
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid column `{c}`: {e}"))?;
    Ok(Cell::new(row, col))
}

/// Read a text map (`.` free, `#` blocked, one line per row).
pub fn load_map(path: &Path) -> Result<ObstacleGrid, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(ObstacleGrid::parse(&text)?)
}

/// Read a JSON search configuration. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<SearchConfig, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Terminal colour for each mark.
pub const fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::Free => Color::DarkGrey,
        Mark::Obstacle => Color::Grey,
        Mark::Expanded => Color::DarkYellow,
        Mark::Path => Color::Cyan,
        Mark::Start => Color::Green,
        Mark::Goal => Color::Red,
    }
}

/// Draw `marked` one row per line. With `color` off the output is exactly
/// the grid's `Display` text plus a trailing newline.
pub fn render<W: Write>(out: &mut W, marked: &MarkedGrid, color: bool) -> io::Result<()> {
    for row in marked.rows() {
        for &mark in row {
            if color {
                queue!(out, SetForegroundColor(mark_color(mark)), Print(mark.glyph()))?;
            } else {
                queue!(out, Print(mark.glyph()))?;
            }
        }
        if color {
            queue!(out, ResetColor)?;
        }
        queue!(out, Print('\n'))?;
    }
    out.flush()
}

/// One-paragraph report of a finished search.
pub fn summary(result: &SearchResult, stats: SearchStats, elapsed: Duration) -> String {
    let outcome = match result {
        SearchResult::Found { path, cost } => {
            format!("path found: {} cells, cost {cost:.3}", path.len())
        }
        SearchResult::NotFound => "no path found".to_string(),
    };
    format!(
        "{outcome}\nexpanded {} cells, {} relaxations, frontier peak {}\nsearch took {:.3} ms",
        stats.expansions,
        stats.relaxations,
        stats.frontier_peak,
        elapsed.as_secs_f64() * 1000.0
    )
}
