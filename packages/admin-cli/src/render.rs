//! Plain-text table rendering and status coloring for the list screens.

use colored::Colorize;
use limpiar_api::{BookingStatus, PaymentStatus, PropertyStatus};

/// Print a column-padded table. Widths come from the widest cell per
/// column; colored cells would skew the padding, so color only whole
/// pre-padded strings via the status helpers below.
pub fn table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(visible_len(cell));
            }
        }
    }

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header_line.bold());
    println!("{}", "─".repeat(header_line.len()).dimmed());

    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| pad_visible(cell, widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{line}");
    }

    if rows.is_empty() {
        println!("{}", "(no results)".dimmed());
    }
}

/// Length without ANSI escapes, so colored cells pad correctly.
fn visible_len(s: &str) -> usize {
    console::measure_text_width(s)
}

fn pad_visible(s: &str, width: usize) -> String {
    let len = visible_len(s);
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

pub fn payment_status(status: PaymentStatus) -> String {
    match status {
        PaymentStatus::Succeeded => status.as_str().green().to_string(),
        PaymentStatus::Pending => status.as_str().yellow().to_string(),
        PaymentStatus::Failed => status.as_str().red().to_string(),
    }
}

pub fn property_status(status: PropertyStatus) -> String {
    match status {
        PropertyStatus::Verified => status.as_str().green().to_string(),
        PropertyStatus::Pending => status.as_str().yellow().to_string(),
    }
}

pub fn booking_status(status: BookingStatus) -> String {
    match status {
        BookingStatus::Completed => status.as_str().green().to_string(),
        BookingStatus::Pending | BookingStatus::OnHold | BookingStatus::NotStarted => {
            status.as_str().yellow().to_string()
        }
        BookingStatus::Failed => status.as_str().red().to_string(),
        BookingStatus::Refund => status.as_str().blue().to_string(),
    }
}

pub fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".dimmed().to_string()
    }
}
