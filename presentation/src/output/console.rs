//! Console output formatter for tour packages

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use rust_decimal::{Decimal, RoundingStrategy};
use tourgen_domain::{ItineraryDay, LOCATION_SUGGESTIONS, PriceAudit, TourPackage};

/// Enable or disable ANSI colors for everything formatted afterwards
pub fn set_color_enabled(enabled: bool) {
    colored::control::set_override(enabled);
}

/// Format an amount in the package currency.
///
/// USD, EUR and GBP use their symbol with two decimals, JPY uses `¥` without
/// decimals, any other code is written in front of the amount.
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let code = currency.trim().to_uppercase();
    let (symbol, decimals) = match code.as_str() {
        "USD" => (Some("$"), 2),
        "EUR" => (Some("€"), 2),
        "GBP" => (Some("£"), 2),
        "JPY" => (Some("¥"), 0),
        _ => (None, 2),
    };

    let digits = group_thousands(amount, decimals);
    match symbol {
        Some(symbol) if amount.is_sign_negative() && !amount.is_zero() => {
            format!("-{symbol}{}", digits.trim_start_matches('-'))
        }
        Some(symbol) => format!("{symbol}{digits}"),
        None => format!("{code} {digits}"),
    }
}

fn group_thousands(amount: Decimal, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + whole.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

fn day_count(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Formats tour packages for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete package
    pub fn format(package: &TourPackage) -> String {
        let money = |amount| format_money(amount, &package.currency_code);
        let mut output = String::new();

        // Header
        output.push_str(&Self::header(&package.name));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Destination:".cyan().bold(),
            package.location
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Duration:".cyan().bold(),
            day_count(package.duration_days)
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Estimated total:".cyan().bold(),
            money(package.total_cost).green().bold()
        ));

        output.push_str(&package.summary);
        output.push('\n');

        // Itinerary
        output.push_str(&Self::section_header("Itinerary"));
        for day in &package.days {
            output.push_str(&format!(
                "\n{} {}\n",
                format!("Day {}: {}", day.day, day.title).yellow().bold(),
                Self::image_marker(day)
            ));
            for activity in &day.activities {
                output.push_str(&format!("  * {}\n", activity));
            }
        }

        // Hotel
        let hotel = &package.hotel;
        output.push_str(&Self::section_header("Suggested Hotel"));
        output.push_str(&format!(
            "\n{} ({}) - {} per night\n",
            hotel.name.bold(),
            hotel.rating_label,
            money(hotel.price_per_night)
        ));
        output.push_str(&Self::indent(&hotel.description, "  "));
        output.push('\n');

        // Price breakdown
        output.push_str(&Self::section_header("Price Breakdown"));
        output.push('\n');
        for line in &package.price_lines {
            output.push_str(&format!(
                "  {:<20} {:>14}  {}\n",
                line.category,
                money(line.cost),
                line.note.dimmed()
            ));
        }
        output.push_str(&format!(
            "  {:<20} {:>14}\n",
            "Total".bold(),
            money(package.total_cost).bold()
        ));

        if let PriceAudit::Mismatch { computed, .. } = PriceAudit::of(package) {
            output.push_str(&format!(
                "\n{} the breakdown adds up to {}, not the stated total\n",
                "Note:".yellow().bold(),
                money(computed)
            ));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(package: &TourPackage) -> String {
        serde_json::to_string_pretty(package).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format name, total and one line per day (concise output)
    pub fn format_summary(package: &TourPackage) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            format!("=== {} ===", package.name).cyan().bold()
        ));

        output.push_str(&format!(
            "{} {} ({})\n",
            "Where:".bold(),
            package.location,
            day_count(package.duration_days)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Total:".bold(),
            format_money(package.total_cost, &package.currency_code)
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Hotel:".dimmed(),
            package.hotel.name
        ));

        for day in &package.days {
            output.push_str(&format!("  Day {:>2}  {}\n", day.day, day.title));
        }

        output
    }

    /// Render a color-free Markdown snapshot of the package for export.
    ///
    /// Days with a real image link to the file written next to the document.
    pub fn format_document(package: &TourPackage) -> String {
        let money = |amount| format_money(amount, &package.currency_code);
        let mut doc = String::new();

        doc.push_str(&format!("# {}\n\n", package.name));
        doc.push_str(&format!("**Destination:** {}  \n", package.location));
        doc.push_str(&format!(
            "**Duration:** {}  \n",
            day_count(package.duration_days)
        ));
        doc.push_str(&format!(
            "**Estimated total:** {}\n\n",
            money(package.total_cost)
        ));
        doc.push_str(&package.summary);
        doc.push_str("\n\n## Itinerary\n");

        for day in &package.days {
            doc.push_str(&format!("\n### Day {}: {}\n\n", day.day, day.title));
            if let Some(file_name) = package.image_file_name(day) {
                doc.push_str(&format!("![Day {}]({})\n\n", day.day, file_name));
            }
            for activity in &day.activities {
                doc.push_str(&format!("- {}\n", activity));
            }
        }

        let hotel = &package.hotel;
        doc.push_str("\n## Suggested Hotel\n\n");
        doc.push_str(&format!(
            "**{}** ({}), {} per night\n\n{}\n",
            hotel.name,
            hotel.rating_label,
            money(hotel.price_per_night),
            hotel.description
        ));

        doc.push_str("\n## Price Breakdown\n\n| Item | Cost | Details |\n|---|---:|---|\n");
        for line in &package.price_lines {
            doc.push_str(&format!(
                "| {} | {} | {} |\n",
                line.category,
                money(line.cost),
                line.note
            ));
        }
        doc.push_str(&format!("| **Total** | **{}** | |\n", money(package.total_cost)));

        doc
    }

    /// Format the message shown when a run fails
    pub fn format_failure(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// Format the list of suggested destinations
    pub fn format_destinations() -> String {
        let mut output = format!("{}\n", "Suggested destinations:".cyan().bold());
        for destination in LOCATION_SUGGESTIONS {
            output.push_str(&format!("  * {}\n", destination));
        }
        output
    }

    fn image_marker(day: &ItineraryDay) -> String {
        match &day.image {
            Some(image) if !image.is_placeholder() => "[image]".green().to_string(),
            Some(_) => "[no image]".dimmed().to_string(),
            None => String::new(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, package: &TourPackage) -> String {
        Self::format(package)
    }

    fn format_json(&self, package: &TourPackage) -> String {
        Self::format_json(package)
    }

    fn format_summary(&self, package: &TourPackage) -> String {
        Self::format_summary(package)
    }
}
