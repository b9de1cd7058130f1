//! report-runner: headless dashboard reporting over a record snapshot.
//!
//! Usage:
//!   report-runner --snapshot customers.json --period month --date 2024-03-31
//!   report-runner --sample 200 --seed 42 --json
//!   report-runner --snapshot customers.json --ipc-mode
//!   report-runner --sample 200 --seed 42 --export sample.json

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clinic_core::{
    appointments_on, build_dashboard_report, compute_category_summary, compute_procedure_counts,
    filter_customers, format_phone_input,
    record::parse_record_date,
    sample::SampleGenerator,
    sort_newest_first, Bucket, Category, CustomerVisitRecord, DashboardReport, PaymentStatus,
    RecordSnapshot, ReportConfig, ReportPeriod,
};
use std::env;
use std::io::{self, BufRead, Write};

/// Days of history a generated sample spans.
const SAMPLE_SPAN_DAYS: u64 = 90;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Load {
        records: Vec<CustomerVisitRecord>,
    },
    Report {
        #[serde(default)]
        period: Option<ReportPeriod>,
        #[serde(default, rename = "referenceDate")]
        reference_date: Option<String>,
    },
    Filter {
        #[serde(default)]
        search: String,
        #[serde(default)]
        category: String,
        #[serde(default)]
        status: String,
    },
    Schedule {
        date: String,
    },
    FormatPhone {
        raw: String,
    },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json_out = args.iter().any(|a| a == "--json");

    let config = match str_arg(&args, "--config") {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    let period = match str_arg(&args, "--period") {
        Some(p) => p.parse::<ReportPeriod>()?,
        None => config.default_period,
    };
    let reference = match str_arg(&args, "--date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };

    let mut records = match (str_arg(&args, "--snapshot"), str_arg(&args, "--sample")) {
        (Some(path), _) => RecordSnapshot::load(path)?.records,
        (None, Some(count)) => {
            let count: usize = count.parse().context("--sample expects a record count")?;
            let seed = parse_arg(&args, "--seed", 42u64);
            SampleGenerator::new(seed).generate(count, reference, SAMPLE_SPAN_DAYS)
        }
        (None, None) => Vec::new(),
    };
    sort_newest_first(&mut records);

    if let Some(path) = str_arg(&args, "--export") {
        export_snapshot(&records, path)?;
    }

    if ipc_mode {
        return run_ipc_loop(records, &config);
    }

    let report = build_dashboard_report(&records, period, reference, &config);
    if json_out {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, &records);
    }

    let search = str_arg(&args, "--search").unwrap_or_default();
    let category = optional_label::<Category>(str_arg(&args, "--category").unwrap_or_default())?;
    let status = optional_label::<PaymentStatus>(str_arg(&args, "--status").unwrap_or_default())?;
    if !search.is_empty() || category.is_some() || status.is_some() {
        let matches = filter_customers(&records, search, category, status);
        if json_out {
            println!("{}", serde_json::to_string_pretty(&matches)?);
        } else {
            print_customers(&matches);
        }
    }

    Ok(())
}

fn run_ipc_loop(mut records: Vec<CustomerVisitRecord>, config: &ReportConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, e)?;
                continue;
            }
        };

        let reply = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Load { records: loaded } => {
                records = loaded;
                sort_newest_first(&mut records);
                log::info!("Snapshot replaced: {} records", records.len());
                Ok(serde_json::json!({ "loaded": records.len() }))
            }
            IpcCommand::Report { period, reference_date } => {
                handle_report(&records, config, period, reference_date.as_deref())
            }
            IpcCommand::Filter { search, category, status } => {
                handle_filter(&records, &search, &category, &status)
            }
            IpcCommand::Schedule { date } => parse_date(&date).and_then(|day| {
                Ok(serde_json::to_value(appointments_on(&records, day))?)
            }),
            IpcCommand::FormatPhone { raw } => {
                Ok(serde_json::json!({ "formatted": format_phone_input(&raw) }))
            }
        };

        match reply {
            Ok(value) => writeln!(stdout, "{value}")?,
            Err(e) => write_error(&mut stdout, e)?,
        }
        stdout.flush()?;
    }
    Ok(())
}

fn handle_report(
    records: &[CustomerVisitRecord],
    config: &ReportConfig,
    period: Option<ReportPeriod>,
    reference_date: Option<&str>,
) -> Result<serde_json::Value> {
    let reference = match reference_date {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let period = period.unwrap_or(config.default_period);
    let report = build_dashboard_report(records, period, reference, config);
    Ok(serde_json::to_value(report)?)
}

fn handle_filter(
    records: &[CustomerVisitRecord],
    search: &str,
    category: &str,
    status: &str,
) -> Result<serde_json::Value> {
    let category = optional_label::<Category>(category)?;
    let status = optional_label::<PaymentStatus>(status)?;
    Ok(serde_json::to_value(filter_customers(records, search, category, status))?)
}

/// Write the working record set as a wrapped snapshot file.
fn export_snapshot(records: &[CustomerVisitRecord], path: &str) -> Result<()> {
    let snapshot = RecordSnapshot {
        exported_at: Some(chrono::Utc::now().to_rfc3339()),
        records: records.to_vec(),
    };
    std::fs::write(path, snapshot.to_json()?)
        .with_context(|| format!("Cannot write snapshot {path}"))?;
    log::info!("Exported {} records to {path}", records.len());
    Ok(())
}

fn write_error(stdout: &mut impl Write, e: impl std::fmt::Display) -> Result<()> {
    let err_json = serde_json::json!({ "error": e.to_string() });
    writeln!(stdout, "{err_json}")?;
    stdout.flush()?;
    Ok(())
}

fn print_summary(report: &DashboardReport, records: &[CustomerVisitRecord]) {
    let stats = &report.stats;
    println!("=== DASHBOARD ({} as of {}) ===", report.period.as_str(), report.reference_date);
    println!("  records:        {}", report.record_count);
    println!("  revenue:        {}", won(stats.total_revenue));
    println!("  refunds:        {}", won(stats.total_refund));
    println!("  net revenue:    {}", won(stats.net_revenue));
    println!("  customers:      {}", stats.customer_count);
    println!("  consultations:  {}", stats.consult_count);

    println!();
    println!("=== DAILY REVENUE ===");
    for day in &report.daily_revenue {
        println!("  {:>5}  {}", day.label, won(day.revenue));
    }

    println!();
    println!("=== REVENUE BY CATEGORY ===");
    if report.category_revenue.is_empty() {
        println!("  (no revenue recorded)");
    }
    for bucket in &report.category_revenue {
        println!("  {:<8} {}", bucket.name, won(bucket.value));
    }

    println!();
    println!("=== VISITS BY SOURCE ===");
    if report.source_stats.is_empty() {
        println!("  (no visits recorded)");
    }
    for bucket in &report.source_stats {
        println!("  {:<8} {}", bucket.name, bucket.value);
    }

    println!();
    println!("=== TREATMENT RECORDS ===");
    for row in compute_category_summary(records) {
        println!(
            "  {:<8} {:>4} visits  {}",
            row.category, row.customer_count, won(row.revenue)
        );
        for proc_count in compute_procedure_counts(records, row.category) {
            if proc_count.count > 0 {
                println!("      {:<12} {}", proc_count.procedure, proc_count.count);
            }
        }
    }
}

fn print_customers(matches: &[&CustomerVisitRecord]) {
    println!();
    println!("=== CUSTOMERS ({}) ===", matches.len());
    for r in matches {
        println!(
            "  {} | {} | {} | {} | {} | {}",
            r.date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            r.name.as_deref().unwrap_or("-"),
            r.phone.as_deref().unwrap_or("-"),
            r.procedure.as_deref().unwrap_or("-"),
            r.payment_status.map_or("-", |s| s.label()),
            won(r.amount.unwrap_or(0)),
        );
    }
}

/// `1234567` → `₩1,234,567`.
fn won(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}₩{grouped}")
}

/// Empty label means "no filter"; anything else must be a known label.
fn optional_label<T: Bucket>(label: &str) -> Result<Option<T>> {
    if label.is_empty() {
        return Ok(None);
    }
    Ok(Some(T::parse_label(label)?))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    parse_record_date(s).ok_or_else(|| {
        clinic_core::ClinicError::InvalidDate { value: s.to_string() }.into()
    })
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
