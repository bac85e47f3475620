//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV rendering of scan
//! results.

use crate::cli::OutputFormat;
use crate::types::{NetworkService, ScanResult};
use console::{style, Style};
use std::io::{self, Write};

/// Format and print a scan result according to the specified format.
///
/// `show_closed` only affects the plain format; JSON and CSV follow the
/// report convention of listing open ports only.
pub fn print_results(result: &ScanResult, format: OutputFormat, show_closed: bool) -> io::Result<()> {
    match format {
        OutputFormat::Plain => print_plain(result, show_closed),
        OutputFormat::Json => print_json(result),
        OutputFormat::Csv => print_csv(result),
    }
}

/// Print results in human-readable plain text format.
fn print_plain(result: &ScanResult, show_closed: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(
        out,
        "  {} {} ports scanned in {:.2}s, {} open",
        style("Statistics:").bold(),
        result.total_ports,
        result.duration.as_secs_f64(),
        style(result.open_ports).green().bold(),
    )?;
    writeln!(out)?;

    let rows: Vec<&NetworkService> = result
        .services
        .iter()
        .filter(|s| s.is_up || show_closed)
        .collect();

    if rows.is_empty() {
        writeln!(out, "  {}", style("No ports to display.").dim())?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "  {:>6}  {:^8}  {:<10}  {:^6}  {}",
        style("PORT").bold(),
        style("STATE").bold(),
        style("SERVICE").bold(),
        style("TLS").bold(),
        style("BANNER").bold()
    )?;
    writeln!(
        out,
        "  {}",
        style("────────────────────────────────────────────────────────").dim()
    )?;

    for svc in rows {
        let state_style = if svc.is_up {
            Style::new().green().bold()
        } else {
            Style::new().red()
        };
        let state = if svc.is_up { "open" } else { "closed" };

        writeln!(
            out,
            "  {:>6}  {:^8}  {:<10}  {:^6}  {}",
            svc.port,
            state_style.apply_to(state),
            svc.service,
            if svc.is_secure { "yes" } else { "" },
            style(truncate_string(&svc.banner, 40)).dim()
        )?;
    }

    writeln!(out)?;
    Ok(())
}

/// Print results in JSON format.
fn print_json(result: &ScanResult) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&result.to_report())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}

/// Print results in CSV format.
fn print_csv(result: &ScanResult) -> io::Result<()> {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    wtr.write_record(["ip", "port", "service", "protocol", "is_secure", "banner"])?;

    for record in result.to_report().services {
        let port = record.port.to_string();
        wtr.write_record([
            record.ip.as_str(),
            port.as_str(),
            record.service.as_str(),
            record.protocol.as_str(),
            if record.is_secure { "true" } else { "false" },
            record.banner.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Truncate a string to a maximum byte length, adding ellipsis if truncated.
///
/// Banners are remote-supplied text, so the cut must land on a char
/// boundary rather than a raw byte index.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
