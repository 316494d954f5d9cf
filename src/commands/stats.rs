//! Statistics command.

use std::io::Write;
use std::sync::Arc;

use staffmail::rendering::Table;
use staffmail::{RecordStore, Result, Statistics, StatisticsService};

use super::{OutputFormat, output_error, write_json};

/// Executes the stats command.
pub fn cmd_stats(
    store: Arc<dyn RecordStore>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let stats = StatisticsService::new(store).collect()?;
    match format {
        OutputFormat::Json => write_json(out, &stats),
        OutputFormat::Table => write_summary(out, &stats).map_err(output_error),
    }
}

fn write_summary(out: &mut dyn Write, stats: &Statistics) -> std::io::Result<()> {
    writeln!(out, "Departments:     {}", stats.total_departments)?;
    writeln!(out, "Employees:       {}", stats.total_employees)?;
    writeln!(
        out,
        "Subscriptions:   {} ({} active)",
        stats.total_subscriptions, stats.active_subscriptions
    )?;

    if !stats.departments.is_empty() {
        writeln!(out)?;
        let mut table = Table::new(["DEPARTMENT", "EMPLOYEES", "SUPERVISORS", "HEAD"]);
        for d in &stats.departments {
            table.push_row([
                d.name.clone(),
                d.employees.to_string(),
                d.supervisors.to_string(),
                if d.has_head { "yes" } else { "no" }.to_string(),
            ]);
        }
        table.write_to(out)?;
    }

    for (title, names) in [
        ("Without a supervisor", &stats.without_supervisor),
        ("Without a head", &stats.without_head),
    ] {
        if !names.is_empty() {
            writeln!(out)?;
            writeln!(out, "{title}: {}", names.join(", "))?;
        }
    }
    Ok(())
}
