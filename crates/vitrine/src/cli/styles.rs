//! Terminal styles for the vitrine CLI.
//!
//! Renderers refer to styles by what they mark (a price, a badge, a muted
//! timestamp), never by color. `console` drops the escape codes on its own when
//! stdout is not a terminal.

use console::Style;
use once_cell::sync::Lazy;

pub struct Styles {
    pub position: Style,
    pub name: Style,
    pub price: Style,
    pub original_price: Style,
    pub muted: Style,
    pub time: Style,
    pub badge_new: Style,
    pub badge_sale: Style,
    pub badge_featured: Style,
    pub filter_tag: Style,
    pub heading: Style,
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
}

pub static STYLES: Lazy<Styles> = Lazy::new(|| Styles {
    position: Style::new().yellow(),
    name: Style::new().bold(),
    price: Style::new().green(),
    original_price: Style::new().color256(245).strikethrough(),
    muted: Style::new().color256(245),
    time: Style::new().color256(245).italic(),
    badge_new: Style::new().cyan(),
    badge_sale: Style::new().red(),
    badge_featured: Style::new().magenta(),
    filter_tag: Style::new().black().on_yellow(),
    heading: Style::new().bold().underlined(),
    info: Style::new().color256(245),
    success: Style::new().green(),
    warning: Style::new().yellow(),
    error: Style::new().red().bold(),
});
