use clap::Args;
use std::path::PathBuf;
use water_compliance::analysis::{analyze, AnalysisOutcome, ComplianceReport, ComplianceRules};
use water_compliance::error::AppError;
use water_compliance::table::UsageTable;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// CSV export with `Date ` and `Value` columns
    pub(crate) path: PathBuf,
    /// Print the same JSON body the /analyze endpoint returns
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let table = UsageTable::from_path(&args.path)?;
    let outcome = analyze(&table);

    if args.json {
        let body = serde_json::to_string_pretty(&outcome)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{body}");
    } else {
        print!("{}", render_outcome(&outcome, &ComplianceRules::regulatory()));
    }

    Ok(())
}

fn render_outcome(outcome: &AnalysisOutcome, rules: &ComplianceRules) -> String {
    let mut out = String::new();
    out.push_str("Water extraction compliance\n");
    out.push_str(&format!(
        "Window: {} -> {}\n",
        rules.window_start, rules.window_end
    ));

    match outcome {
        AnalysisOutcome::Report(report) => render_report(&mut out, report, rules),
        AnalysisOutcome::NoDataInRange(empty) => {
            out.push_str(&format!("\n{}\n", empty.error));
        }
    }

    out
}

fn render_report(out: &mut String, report: &ComplianceReport, rules: &ComplianceRules) {
    out.push_str(&format!("\nAverage KLD: {:.2}\n", report.average_kld));
    out.push_str(&format!(
        "Daily exceedances (> {} KL): {}\n",
        rules.daily_limit, report.daily_exceed_count
    ));
    for violation in &report.daily_violation_details {
        out.push_str(&format!("- {}: {}\n", violation.date, violation.value));
    }

    out.push_str(&format!("\nAverage KLY: {:.2}\n", report.average_kly));
    out.push_str(&format!(
        "Annual exceedances (> {} KL): {}\n",
        rules.annual_limit, report.annual_exceed_count
    ));
    for violation in &report.annual_violation_details {
        out.push_str(&format!("- {}: {}\n", violation.year, violation.total));
    }

    let direction = if report.trend_slope > 0.0 {
        "rising"
    } else if report.trend_slope < 0.0 {
        "falling"
    } else {
        "flat"
    };
    out.push_str(&format!(
        "\nTrend: {:.4} per observation ({direction})\n",
        report.trend_slope
    ));
}
