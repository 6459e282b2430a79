// Entry point and high-level CLI flow.
//
// - Option [1] loads the complaints CSV once, normalizing district names.
// - Option [2] runs every dashboard query, writes each result as JSON and
//   prints a markdown preview.
// After generating the dashboard data the user can go back to the menu or
// exit.
mod aggregate;
mod config;
mod loader;
mod normalizer;
mod output;
mod queries;
mod store;
mod types;
mod util;

use config::DashboardConfig;
use std::io::{self, Write};
use store::TableStore;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use types::{CrossTabResponse, Table};

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Report Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        let resp = buf.trim().to_uppercase();
        match resp.as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn handle_load(store: &TableStore, cfg: &DashboardConfig) {
    match store.load(&cfg.data_path) {
        Ok((_, report)) => {
            println!(
                "Processing dataset... ({} rows loaded, {} district names normalized)",
                util::format_int(report.total_rows),
                util::format_int(report.renamed_districts)
            );
            if !report.missing_columns.is_empty() {
                let names: Vec<&str> = report.missing_columns.iter().map(|c| c.header()).collect();
                println!("Note: columns not in file: {}", names.join(", "));
            }
            println!();
        }
        Err(e) => {
            error!(error = %e, "load failed");
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

fn save<T: serde::Serialize>(cfg: &DashboardConfig, name: &str, value: &T) {
    let path = cfg.out_dir.join(name);
    if let Err(e) = output::write_json(&path, value) {
        error!(path = %path.display(), error = %e, "write failed");
        eprintln!("Write error: {}", e);
    }
}

fn show_crosstab(title: &str, response: &CrossTabResponse, max_rows: usize) {
    println!("{}\n", title);
    match &response.error {
        Some(msg) => println!("(unavailable: {})\n", msg),
        None => output::preview(output::render_crosstab(&response.table, max_rows)),
    }
}

fn handle_generate_reports(table: &Table, cfg: &DashboardConfig) {
    if let Err(e) = std::fs::create_dir_all(&cfg.out_dir) {
        eprintln!("Cannot create {}: {}\n", cfg.out_dir.display(), e);
        return;
    }
    println!("Generating dashboard data...");
    println!("Outputs saved to {}\n", cfg.out_dir.display());
    let n = cfg.preview_rows;

    let summary = queries::summary(table);
    save(cfg, "summary.json", &summary);
    println!("Summary (summary.json):");
    println!(
        "{} complaints across {} states and {} districts; {} submitted, {} in progress, {} resolved\n",
        util::format_int(summary.total_complaints),
        util::format_int(summary.total_states),
        util::format_int(summary.total_districts),
        util::format_int(summary.total_submitted),
        util::format_int(summary.total_in_progress),
        util::format_int(summary.total_resolved)
    );

    let breakdowns = [
        ("Complaints by State", "by_state.json", queries::by_state(table)),
        ("Complaints by District", "by_district.json", queries::by_district(table)),
        ("Complaints by Issue Type", "by_issue_type.json", queries::by_issue_type(table)),
    ];
    for (title, file, counts) in &breakdowns {
        save(cfg, file, counts);
        println!("{}\n", title);
        output::preview(output::render_counts(counts, n, true));
    }

    let crosstabs = [
        ("State by Issue Type", "state_by_issue_type.json", queries::state_by_issue_type(table)),
        ("State by Status", "state_by_status.json", queries::state_by_status(table)),
        (
            "State by Signal Strength",
            "state_by_signal_strength.json",
            queries::state_by_signal_strength(table),
        ),
    ];
    for (title, file, response) in &crosstabs {
        save(cfg, file, response);
        show_crosstab(title, response, n);
    }

    let months = queries::reported_month_totals(table);
    save(cfg, "reported_month_totals.json", &months);
    println!("Complaints by Reported Month\n");
    output::preview(output::render_counts(&months, 12, false));

    info!(out_dir = %cfg.out_dir.display(), "dashboard data written");
}

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cfg = DashboardConfig::from_env();
    info!(data = %cfg.data_path.display(), out = %cfg.out_dir.display(), "startup");
    let store = TableStore::new();

    loop {
        println!("Complaint Dashboard:");
        println!("[1] Load the file");
        println!("[2] Generate Dashboard Data\n");
        match read_choice().as_str() {
            "1" => {
                if store.is_loaded() {
                    println!("Data already loaded.\n");
                } else {
                    handle_load(&store, &cfg);
                }
            }
            "2" => {
                println!();
                let Some(table) = store.get() else {
                    println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
                    continue;
                };
                handle_generate_reports(table, &cfg);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
