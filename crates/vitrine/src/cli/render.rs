//! # Rendering
//!
//! Turns `CmdResult` values into terminal text or JSON. Column layout is
//! computed with `unicode-width` so names with wide or combining characters
//! still line up; styling is applied after padding so escape codes never count
//! toward a column's width.

use chrono::{DateTime, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vitrineapp::commands::{CmdMessage, CmdResult, DisplayProduct, MessageLevel};
use vitrineapp::model::Product;

use super::styles::STYLES;

pub const NAME_WIDTH: usize = 30;
pub const MATERIAL_WIDTH: usize = 22;
pub const PRICE_WIDTH: usize = 12;

pub fn render_json(result: &CmdResult) -> anyhow::Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(result)?))
}

/// Listing for `browse` and `search`.
pub fn render_listing(result: &CmdResult, currency: &str) -> String {
    let mut out = String::new();

    if !result.active_filters.is_empty() {
        let tags: Vec<String> = result
            .active_filters
            .iter()
            .map(|f| STYLES.filter_tag.apply_to(format!("[{}]", f.label())).to_string())
            .collect();
        out.push_str(&format!("Filters: {}\n", tags.join(" ")));
    }

    if let (Some(page), Some(first), Some(last)) = (
        result.page,
        result.listed_products.first(),
        result.listed_products.last(),
    ) {
        let sort = result
            .sort
            .as_ref()
            .map(|s| format!(" · {}", s.label()))
            .unwrap_or_default();
        out.push_str(
            &STYLES
                .muted
                .apply_to(format!(
                    "Showing {}-{} of {}{}",
                    first.position, last.position, page.total_items, sort
                ))
                .to_string(),
        );
        out.push_str("\n\n");
    }

    for dp in &result.listed_products {
        out.push_str(&product_line(dp, currency));
        out.push('\n');
    }

    if let Some(page) = result.page {
        if page.total_pages > 1 {
            let hint = if page.page < page.total_pages {
                format!(" (next: --page {})", page.page + 1)
            } else {
                String::new()
            };
            out.push('\n');
            out.push_str(
                &STYLES
                    .muted
                    .apply_to(format!("Page {} of {}{}", page.page, page.total_pages, hint))
                    .to_string(),
            );
            out.push('\n');
        }
    }

    out.push_str(&render_messages(&result.messages));
    out
}

fn product_line(dp: &DisplayProduct, currency: &str) -> String {
    let p = &dp.product;
    let position = STYLES.position.apply_to(format!("{:>3}.", dp.position));
    let name = STYLES.name.apply_to(pad_to_width(&truncate_to_width(&p.name, NAME_WIDTH), NAME_WIDTH));
    let price = match p.price {
        Some(price) => STYLES
            .price
            .apply_to(format!("{:>width$}", format_amount(price, currency), width = PRICE_WIDTH))
            .to_string(),
        None => STYLES
            .muted
            .apply_to(format!("{:>width$}", "on request", width = PRICE_WIDTH))
            .to_string(),
    };
    let material = STYLES.muted.apply_to(pad_to_width(
        &truncate_to_width(&p.material, MATERIAL_WIDTH),
        MATERIAL_WIDTH,
    ));
    let rating = match p.rating {
        Some(r) => format!("★ {:.1}", r),
        None => "     ".to_string(),
    };

    let mut line = format!("{} {}  {}  {}  {}", position, name, price, material, rating);
    let badges = badges(p);
    if !badges.is_empty() {
        line.push_str("  ");
        line.push_str(&badges);
    }
    if let Some(created) = p.created_at {
        line.push_str("  ");
        line.push_str(&STYLES.time.apply_to(format_time_ago(created)).to_string());
    }
    if let Some(score) = dp.score {
        line.push_str(&STYLES.muted.apply_to(format!("  (score {})", score)).to_string());
    }
    line
}

fn badges(p: &Product) -> String {
    let mut out = Vec::new();
    if p.is_featured {
        out.push(STYLES.badge_featured.apply_to("featured").to_string());
    }
    if p.is_new {
        out.push(STYLES.badge_new.apply_to("new").to_string());
    }
    if p.is_sale {
        let label = match p.discount_percent() {
            Some(pct) => format!("sale -{}%", pct),
            None => "sale".to_string(),
        };
        out.push(STYLES.badge_sale.apply_to(label).to_string());
    }
    out.join(" ")
}

pub fn render_options(result: &CmdResult) -> String {
    let mut out = String::new();

    if let Some(options) = &result.filter_options {
        out.push_str(&format!("{}\n", STYLES.heading.apply_to("Price ranges")));
        for bracket in &options.price_brackets {
            out.push_str(&format!(
                "  {}  {}\n",
                pad_to_width(&bracket.value, 12),
                bracket.label
            ));
        }
        out.push_str(&format!("\n{}\n", STYLES.heading.apply_to("Materials")));
        for material in &options.materials {
            out.push_str(&format!("  {}\n", material));
        }
        out.push_str(&format!("\n{}\n", STYLES.heading.apply_to("Subcategories")));
        for subcategory in &options.subcategories {
            out.push_str(&format!("  {}\n", subcategory));
        }
    }

    if !result.sort_keys.is_empty() {
        out.push_str(&format!("\n{}\n", STYLES.heading.apply_to("Sort by")));
        for key in &result.sort_keys {
            out.push_str(&format!("  {}  {}\n", pad_to_width(key.as_str(), 16), key.label()));
        }
    }

    out.push_str(&render_messages(&result.messages));
    out
}

pub fn render_quote(result: &CmdResult, currency: &str) -> String {
    let mut out = String::new();

    if let Some(quote) = &result.quote {
        for line in &quote.lines {
            out.push_str(&format!(
                "{:>3} × {}  {:>width$}  {:>width$}\n",
                line.quantity,
                pad_to_width(&truncate_to_width(&line.name, NAME_WIDTH), NAME_WIDTH),
                format_amount(line.unit_price, currency),
                format_amount(line.line_total(), currency),
                width = PRICE_WIDTH
            ));
        }

        let totals = quote.totals;
        let label_width = 3 + 3 + NAME_WIDTH + 2 + PRICE_WIDTH + 2;
        out.push('\n');
        out.push_str(&format!(
            "{}{:>width$}\n",
            pad_to_width("Items", label_width),
            totals.item_count,
            width = PRICE_WIDTH
        ));
        out.push_str(&format!(
            "{}{}\n",
            pad_to_width("Subtotal", label_width),
            STYLES.price.apply_to(format!(
                "{:>width$}",
                format_amount(totals.subtotal, currency),
                width = PRICE_WIDTH
            ))
        ));
        if totals.savings > 0.0 {
            out.push_str(&format!(
                "{}{}\n",
                pad_to_width("You save", label_width),
                STYLES.badge_sale.apply_to(format!(
                    "{:>width$}",
                    format_amount(totals.savings, currency),
                    width = PRICE_WIDTH
                ))
            ));
        }
    }

    out.push_str(&render_messages(&result.messages));
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|msg| {
            let style = match msg.level {
                MessageLevel::Info => &STYLES.info,
                MessageLevel::Success => &STYLES.success,
                MessageLevel::Warning => &STYLES.warning,
                MessageLevel::Error => &STYLES.error,
            };
            format!("{}\n", style.apply_to(&msg.content))
        })
        .collect()
}

/// Formats an amount with Indian digit grouping (1,25,000). Whole amounts drop
/// the decimals.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, fraction) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (h, t) = rest.split_at(rest.len() - 2);
            groups.push(t);
            rest = h;
        }
        groups.push(rest);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if fraction == 0 {
        format!("{}{}{}", sign, currency, grouped)
    } else {
        format!("{}{}{}.{:02}", sign, currency, grouped, fraction)
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
