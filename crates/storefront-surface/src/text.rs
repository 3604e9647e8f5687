//! Plain-text tables for terminal output

use std::fmt::Write;
use storefront_model::{Product, ProductStatus, StatusFilter, StatusSummary, Store, StoreId};

/// Store list table; the active store is flagged with `*`
#[must_use]
pub fn store_table(stores: &[Store], active: Option<StoreId>) -> String {
    let rows: Vec<[String; 4]> = stores
        .iter()
        .map(|s| {
            let flag = if Some(s.id) == active { "*" } else { "" };
            [
                format!("{flag}{}", s.id),
                s.name.clone(),
                s.address.clone(),
                format!("{} sq.m", s.floor_area_text()),
            ]
        })
        .collect();
    table(["ID", "NAME", "ADDRESS", "FLOOR AREA"], &rows)
}

/// Product table restricted to rows matching `filter`
#[must_use]
pub fn product_table(products: &[Product], filter: StatusFilter) -> String {
    let rows: Vec<[String; 6]> = products
        .iter()
        .filter(|p| filter.matches(p.status))
        .map(|p| {
            [
                p.id.to_string(),
                p.name.clone(),
                format!("{} USD", p.price),
                p.made_in.clone(),
                stars(p.rating),
                p.status.as_str().to_string(),
            ]
        })
        .collect();
    table(["ID", "NAME", "PRICE", "MADE IN", "RATING", "STATUS"], &rows)
}

/// One-line status summary, the active filter in brackets
#[must_use]
pub fn summary_line(summary: &StatusSummary, filter: StatusFilter) -> String {
    let mut parts = vec![mark(
        format!("all {}", summary.total()),
        filter == StatusFilter::All,
    )];
    for status in ProductStatus::ALL {
        parts.push(mark(
            format!("{} {}", status.label(), summary.count(status)),
            filter == StatusFilter::Only(status),
        ));
    }
    parts.join("  ")
}

/// Contact block for a store
#[must_use]
pub fn contacts(store: &Store) -> String {
    format!(
        "{} (#{})\nEmail: {}\nPhone Number: {}\nAddress: {}\nEstablished Date: {}\nFloor Area: {}\n",
        store.name,
        store.id,
        store.email,
        store.phone_number,
        store.address,
        store.established,
        store.floor_area_text()
    )
}

fn mark(text: String, active: bool) -> String {
    if active {
        format!("[{text}]")
    } else {
        text
    }
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "*".repeat(filled), ".".repeat(5 - filled))
}

fn table<const N: usize>(header: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths = header.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_line(&mut out, header.iter(), &widths);
    for row in rows {
        write_line(&mut out, row.iter(), &widths);
    }
    out
}

fn write_line<S: AsRef<str>>(out: &mut String, cells: impl Iterator<Item = S>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}
