//! Startup banner: framed logo and help text, plus a connection row.

use owo_colors::Style;

/// Full product name shown in the top border.
pub const CLI_FULL_NAME: &str = "Distributed Cloud Shell";

const LOGO: &[&str] = &[
    r" __  _____ ___ _  _ ",
    r" \ \/ / __/ __| || |",
    r"  >  < (__\__ \ __ |",
    r" /_/\_\___|___/_||_|",
];

const HELP_LINES: &[&str] = &[
    "Type 'help' for documentation.",
    "Run 'namespace' to set namespace.",
    "Press Ctrl+C twice to quit.",
];

const LOGO_PAD_LEFT: usize = 2;
const LOGO_PAD_RIGHT: usize = 2;
const LOGO_PAD_ROWS: usize = 1;
const TEXT_PAD_LEFT: usize = 2;
const TEXT_PAD_RIGHT: usize = 2;

/// What the connection row reports.
#[derive(Debug, Clone)]
pub struct BannerInfo {
    pub version: String,
    pub tenant: Option<String>,
    pub api_url: Option<String>,
    pub namespace: String,
}

struct Palette {
    frame: Option<Style>,
    title: Option<Style>,
    logo: Option<Style>,
    text: Option<Style>,
}

impl Palette {
    fn new(color: bool) -> Self {
        if color {
            Self {
                frame: Some(Style::new().red()),
                title: Some(Style::new().bold().white()),
                logo: Some(Style::new().bright_red()),
                text: Some(Style::new().bold()),
            }
        } else {
            Self {
                frame: None,
                title: None,
                logo: None,
                text: None,
            }
        }
    }
}

fn paint(text: &str, style: Option<Style>) -> String {
    match style {
        Some(style) => style.style(text).to_string(),
        None => text.to_string(),
    }
}

/// Terminal columns occupied by `text`, counted in chars.
///
/// Exact for the frame glyphs and for accented text; double-width glyphs
/// count as one column.
fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn pad(width: usize) -> String {
    " ".repeat(width)
}

fn max_width(lines: &[&str]) -> usize {
    lines.iter().map(|l| display_width(l)).max().unwrap_or(0)
}

fn connection_lines(info: &BannerInfo) -> Vec<String> {
    let mut lines = Vec::new();
    match &info.api_url {
        Some(url) => {
            if let Some(tenant) = info.tenant.as_deref().filter(|t| !t.is_empty()) {
                lines.push(format!("• Tenant: {}", tenant));
            }
            lines.push(format!("• API URL: {}", url));
        }
        None => {
            lines.push("Not connected · Set F5XC_API_URL to connect".to_string());
            lines.push("• API URL: not configured".to_string());
        }
    }
    lines.push(format!("• Namespace: {}", info.namespace));
    lines
}

/// Render the banner; plain text when `color` is false.
pub fn render_banner(info: &BannerInfo, color: bool) -> String {
    let palette = Palette::new(color);
    let logo_width = max_width(LOGO);
    let text_width = max_width(HELP_LINES);
    let connection = connection_lines(info);
    let title = format!(" {} v{} ", CLI_FULL_NAME, info.version);

    let logo_col = LOGO_PAD_LEFT + logo_width + LOGO_PAD_RIGHT;
    let text_col = TEXT_PAD_LEFT + text_width + TEXT_PAD_RIGHT;
    let widest_connection = connection
        .iter()
        .map(|l| display_width(l) + 4)
        .max()
        .unwrap_or(0);
    let inner = (logo_col + 1 + text_col)
        .max(widest_connection)
        .max(display_width(&title) + 4);
    // Extra columns from a wide title or connection row go to the text column
    let text_col = inner - logo_col - 1;

    let rows = LOGO_PAD_ROWS + LOGO.len() + LOGO_PAD_ROWS;
    let text_start = (rows - HELP_LINES.len()) / 2;
    let bar = |s: &str| paint(s, palette.frame);

    let mut out = String::from("\n");

    let dashes_after_title = inner.saturating_sub(3 + display_width(&title));
    out.push_str(&bar("╭───"));
    out.push_str(&paint(&title, palette.title));
    out.push_str(&bar(&format!("{}╮", "─".repeat(dashes_after_title))));
    out.push('\n');

    for row in 0..rows {
        out.push_str(&bar("│"));
        out.push_str(&pad(LOGO_PAD_LEFT));
        match row.checked_sub(LOGO_PAD_ROWS).and_then(|i| LOGO.get(i)) {
            Some(line) => {
                out.push_str(&paint(line, palette.logo));
                out.push_str(&pad(logo_width - display_width(line)));
            }
            None => out.push_str(&pad(logo_width)),
        }
        out.push_str(&pad(LOGO_PAD_RIGHT));
        out.push_str(&bar("│"));

        match row.checked_sub(text_start).and_then(|i| HELP_LINES.get(i)) {
            Some(line) => {
                out.push_str(&pad(TEXT_PAD_LEFT));
                out.push_str(&paint(line, palette.text));
                out.push_str(&pad(text_col - TEXT_PAD_LEFT - display_width(line)));
            }
            None => out.push_str(&pad(text_col)),
        }
        out.push_str(&bar("│"));
        out.push('\n');
    }

    out.push_str(&bar(&format!("├{}┤", "─".repeat(inner))));
    out.push('\n');

    for line in &connection {
        out.push_str(&bar("│"));
        out.push_str("  ");
        out.push_str(&paint(line, palette.text));
        out.push_str(&pad(inner - 2 - display_width(line)));
        out.push_str(&bar("│"));
        out.push('\n');
    }

    out.push_str(&bar(&format!("╰{}╯", "─".repeat(inner))));
    out.push('\n');
    out
}
