use comfy_table::Color;

use crate::consts::DATE_FORMAT;
use crate::output::format::{
    MONTH_NAMES, WEEKDAY_NAMES, bar, create_styled_table, format_percent, header_cell,
    occupancy_color, right_cell, styled_cell,
};
use crate::stats::{Mean, OccupancySummary, place_name};

#[derive(Debug, Clone, Copy)]
pub(crate) struct SummaryTableOptions {
    pub(crate) use_color: bool,
}

fn ratio_color(mean: &Mean, use_color: bool) -> Option<Color> {
    (use_color && mean.count > 0).then(|| occupancy_color(mean.value()))
}

fn print_bucket_table(label: &str, names: &[&str], buckets: &[Mean], use_color: bool) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell(label, use_color),
        header_cell("Avg", use_color),
        header_cell("", use_color),
        header_cell("Samples", use_color),
    ]);

    for (name, mean) in names.iter().zip(buckets) {
        let color = ratio_color(mean, use_color);
        table.add_row(vec![
            styled_cell(name, None),
            right_cell(&format_percent(mean.value(), 0), color, false),
            styled_cell(&bar(mean.value()), color),
            right_cell(&mean.count.to_string(), None, false),
        ]);
    }

    println!("{table}");
}

fn print_evolution_table(summary: &OccupancySummary, use_color: bool) {
    if summary.evolution.len() < 2 {
        println!("  Not enough data for the last {} days.\n", summary.days);
        return;
    }

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Date", use_color),
        header_cell("Avg", use_color),
        header_cell("", use_color),
        header_cell("Samples", use_color),
    ]);
    for day in &summary.evolution {
        let color = ratio_color(&day.mean, use_color);
        table.add_row(vec![
            styled_cell(&day.date.format(DATE_FORMAT).to_string(), None),
            right_cell(&format_percent(day.mean.value(), 0), color, false),
            styled_cell(&bar(day.mean.value()), color),
            right_cell(&day.mean.count.to_string(), None, false),
        ]);
    }
    println!("{table}");
}

pub(crate) fn print_summary_table(summary: &OccupancySummary, opts: SummaryTableOptions) {
    let c = opts.use_color;
    let place = place_name(summary.place)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Venue {}", summary.place));

    let total = format_percent(summary.total.value(), 1);
    if c && summary.total.count > 0 {
        let code = match occupancy_color(summary.total.value()) {
            Color::Green => 32,
            Color::Yellow => 33,
            _ => 31,
        };
        println!("\n  {place}: \x1b[1;{code}m{total}\x1b[0m average occupancy\n");
    } else {
        println!("\n  {place}: {total} average occupancy\n");
    }

    print_bucket_table("Weekday", &WEEKDAY_NAMES, &summary.weekday, c);
    print_bucket_table("Month", &MONTH_NAMES, &summary.month, c);

    println!("\n  Last {} days\n", summary.days);
    print_evolution_table(summary, c);

    let samples = summary.total.count;
    if summary.skipped_records > 0 {
        println!(
            "\n  {samples} samples ({} records skipped)\n",
            summary.skipped_records
        );
    } else {
        println!("\n  {samples} samples\n");
    }
}
