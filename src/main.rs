use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context};
use tabled::settings::{Settings, Style};
use tabled::{Table, Tabled};

use distinct_counter::{compare, load_addresses, ComparisonReport, LoadedAddresses};

const DEFAULT_LOG_PATH: &str = "lms-stage-access.log";
const DEFAULT_ERROR_RATE: f64 = 0.01;

const USAGE: &str = "usage: distinct-counter [LOG_PATH] [ERROR_RATE] [--json]";

#[derive(Tabled)]
struct ComparisonRow {
    metric: &'static str,
    exact: String,
    hyperloglog: String,
}

fn main() -> anyhow::Result<()> {
    let mut json_output = false;
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json_output = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ if arg.starts_with('-') => bail!("unknown flag {arg}\n{USAGE}"),
            _ => positional.push(arg),
        }
    }
    if positional.len() > 2 {
        bail!("too many arguments\n{USAGE}");
    }

    let path = positional
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));
    let error_rate = match positional.get(1) {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("invalid error rate {raw:?}"))?,
        None => DEFAULT_ERROR_RATE,
    };

    let file =
        File::open(&path).with_context(|| format!("failed to open log file {}", path.display()))?;
    let loaded = load_addresses(BufReader::new(file))
        .with_context(|| format!("failed to read log file {}", path.display()))?;

    let report = compare(&loaded.addresses, error_rate)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_table(&loaded, &report);
    }

    Ok(())
}

fn render_table(loaded: &LoadedAddresses, report: &ComparisonReport) {
    let rows = vec![
        ComparisonRow {
            metric: "distinct addresses",
            exact: report.exact_count.to_string(),
            hyperloglog: format!("{:.1}", report.estimated_count),
        },
        ComparisonRow {
            metric: "elapsed (s)",
            exact: format!("{:.6}", report.exact_elapsed.as_secs_f64()),
            hyperloglog: format!("{:.6}", report.estimate_elapsed.as_secs_f64()),
        },
    ];

    let table_config = Settings::default().with(Style::markdown());
    let table = Table::new(rows).with(table_config).to_string();
    println!("{table}");

    println!("relative error: {:.4}%", report.relative_error() * 100.0);
    if loaded.skipped > 0 || loaded.malformed > 0 {
        println!(
            "lines without a usable address: {} skipped, {} malformed",
            loaded.skipped, loaded.malformed
        );
    }
}
