//! Renders a `DisplayState` and the current rates as terminal text.
use super::{catalog, ui};
use crate::core::format::{format_amount, format_pinned_base, format_pinned_target, format_rate};
use crate::core::{Conversion, DisplayState, FxError, PIN_CAPACITY, PinnedEntry, RateSnapshot};
use comfy_table::Cell;

/// "TWD 1,000.00 -> 🇺🇸 USD 31.00"
pub fn pinned_line(entry: &PinnedEntry) -> String {
    format!(
        "{} {} -> {} {} {}",
        entry.base,
        format_pinned_base(entry.base_amount),
        catalog::flag(&entry.target),
        entry.target,
        format_pinned_target(&entry.target, entry.target_amount)
    )
}

fn render_holding(state: &DisplayState) -> String {
    format!(
        "Holding: {} {}",
        catalog::label(state.base_currency()),
        ui::style_text(
            &format_amount(state.base_currency(), state.base_amount()),
            ui::StyleType::Highlight
        )
    )
}

fn render_pinned(pinned: &[PinnedEntry]) -> String {
    let mut output = format!(
        "{}\n",
        ui::style_text(
            &format!("Pinned ({}/{PIN_CAPACITY})", pinned.len()),
            ui::StyleType::Title
        )
    );
    for (i, entry) in pinned.iter().enumerate() {
        output.push_str(&format!("  #{} {}\n", i + 1, pinned_line(entry)));
    }
    output
}

pub fn conversions_table(conversions: &[Conversion]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Name"),
        ui::header_cell("Amount"),
        ui::header_cell("Rate"),
    ]);

    for conversion in conversions {
        table.add_row(vec![
            Cell::new(format!(
                "{} {}",
                catalog::flag(&conversion.currency),
                conversion.currency
            )),
            Cell::new(catalog::name(&conversion.currency)),
            ui::amount_cell(format_amount(&conversion.currency, conversion.amount)),
            ui::subtle_cell(format_rate(conversion.cross_rate)),
        ]);
    }

    table.to_string()
}

/// Full view: holding line, pinned list, and the conversion table, or the
/// reason rates are missing.
pub fn render(
    state: &DisplayState,
    snapshot: Option<&RateSnapshot>,
    conversions: &[Conversion],
    rates_error: Option<&FxError>,
) -> String {
    let mut output = String::new();

    if let Some(snapshot) = snapshot {
        let updated = snapshot
            .fetched_at()
            .with_timezone(&chrono::Local)
            .format("%H:%M");
        output.push_str(&ui::style_text(
            &format!("Last updated: {updated}"),
            ui::StyleType::Subtle,
        ));
        output.push('\n');
    }

    output.push_str(&render_holding(state));
    output.push_str("\n\n");

    if !state.pinned().is_empty() {
        output.push_str(&render_pinned(state.pinned()));
        output.push('\n');
    }

    match (snapshot, rates_error) {
        (None, Some(err)) => {
            output.push_str(&ui::style_text(&err.to_string(), ui::StyleType::Error));
        }
        (None, None) => {
            output.push_str(&ui::style_text("No exchange rates yet", ui::StyleType::Subtle));
        }
        (Some(_), _) if conversions.is_empty() => {
            output.push_str(&ui::style_text(
                &format!("No rates available for {}", state.base_currency()),
                ui::StyleType::Error,
            ));
        }
        (Some(_), _) => output.push_str(&conversions_table(conversions)),
    }

    output
}
