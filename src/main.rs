use clap::Parser;
use site_audit::Audit;
use std::process::ExitCode;

mod args;
use args::{Args, convert_format};

/// Exit status for conditions that stop the audit before a report exists
const FATAL_EXIT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    ::log::info!("Auditing site at {}", args.root.display());

    let audit = Audit::new(&args.root)
        .with_max_concurrency(args.concurrency)
        .with_exclude_patterns(args.exclude)
        .with_not_found_page(args.not_found_page);

    let start_time = std::time::Instant::now();
    let report = match audit.run().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Audit aborted: {}", e);
            eprintln!("error: {e}");
            return ExitCode::from(FATAL_EXIT);
        }
    };
    ::log::info!(
        "Audit complete - {} pages in {:.2} seconds",
        report.pages_scanned,
        start_time.elapsed().as_secs_f64()
    );

    match report.render(convert_format(args.format)) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => {
            ::log::error!("Failed to render report: {}", e);
            eprintln!("error: {e}");
            return ExitCode::from(FATAL_EXIT);
        }
    }

    ExitCode::from(report.exit_code())
}
