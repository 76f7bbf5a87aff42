use chrono::NaiveDate;
use serde_json::json;
use water_compliance::analysis::{analyze, AnalysisOutcome, ComplianceReport};
use water_compliance::table::{RawRecord, UsageTable};

fn table(rows: &[(&str, &str)]) -> UsageTable {
    UsageTable::from_records(
        rows.iter()
            .map(|(date, value)| RawRecord::new(*date, *value))
            .collect(),
    )
}

fn report(outcome: &AnalysisOutcome) -> &ComplianceReport {
    outcome.report().expect("analysis produced a report")
}

#[test]
fn rows_outside_the_window_yield_the_no_data_payload() {
    let outcome = analyze(&table(&[
        ("2021-12-16", "5000"),
        ("2023-12-17", "5000"),
        ("2019-05-01", "10"),
    ]));

    assert_eq!(
        serde_json::to_value(&outcome).expect("serializes"),
        json!({ "error": "No data found in selected date range" })
    );
}

#[test]
fn scenario_a_drops_rows_before_the_window() {
    let outcome = analyze(&table(&[("2020-06-01", "100"), ("2022-06-01", "4000")]));
    let report = report(&outcome);

    assert_eq!(report.average_kld, 4000.0);
    assert_eq!(report.daily_exceed_count, 1);
    assert_eq!(
        report.daily_violation_details[0].date,
        NaiveDate::from_ymd_opt(2022, 6, 1).expect("valid date")
    );
    assert_eq!(report.average_kly, 4000.0);
    assert_eq!(report.annual_exceed_count, 0);
}

#[test]
fn scenario_b_unparseable_only_row_yields_no_data() {
    let outcome = analyze(&table(&[("not-a-date", "500")]));
    assert!(outcome.is_empty_range());
}

#[test]
fn scenario_c_same_year_rows_sum_into_one_annual_violation() {
    let outcome = analyze(&table(&[("2022-02-01", "700000"), ("2022-09-30", "700000.5")]));
    let report = report(&outcome);

    assert_eq!(report.annual_exceed_count, 1);
    assert_eq!(report.annual_violation_details[0].year, 2022);
    assert_eq!(report.annual_violation_details[0].total, 1_400_000.5);
    assert_eq!(report.daily_exceed_count, 2);
}

#[test]
fn scenario_d_single_row_has_zero_slope() {
    let outcome = analyze(&table(&[("2023-01-10", "1234.567")]));
    let report = report(&outcome);

    assert_eq!(report.trend_slope, 0.0);
    assert_eq!(report.average_kld, 1234.57);
    assert_eq!(report.average_kly, 1234.57);
}

#[test]
fn daily_violations_are_exactly_the_rows_above_the_limit() {
    let rows = [
        ("2022-01-01", "3700"),
        ("2022-01-02", "3700.01"),
        ("2022-01-03", "12"),
        ("2022-01-04", "9000"),
        ("2022-01-05", "garbage"),
    ];
    let outcome = analyze(&table(&rows));
    let report = report(&outcome);

    let values: Vec<f64> = report
        .daily_violation_details
        .iter()
        .map(|violation| violation.value)
        .collect();
    assert_eq!(values, vec![3700.01, 9000.0]);
    assert_eq!(report.daily_exceed_count, report.daily_violation_details.len());
}

#[test]
fn annual_violations_follow_ascending_years() {
    let outcome = analyze(&table(&[
        ("2023-03-01", "1350501"),
        ("2021-12-20", "1350500"),
        ("2022-03-01", "2000000"),
    ]));
    let report = report(&outcome);

    let years: Vec<i32> = report
        .annual_violation_details
        .iter()
        .map(|violation| violation.year)
        .collect();
    assert_eq!(years, vec![2022, 2023]);
    assert_eq!(report.annual_exceed_count, 2);
    assert_eq!(report.average_kly, 1_567_000.33);
}

#[test]
fn trend_uses_sorted_dates_and_rounds_to_four_places() {
    let outcome = analyze(&table(&[
        ("2022-01-03", "3"),
        ("2022-01-01", "1"),
        ("2022-01-02", "2.3333333"),
    ]));
    let report = report(&outcome);

    assert_eq!(report.trend_slope, 1.0);
    assert_eq!(report.average_kld, 2.11);
}

#[test]
fn report_serializes_with_the_published_field_names() {
    let outcome = analyze(&table(&[("2022-05-05", "3800"), ("2022-05-06", "3600")]));
    let value = serde_json::to_value(&outcome).expect("serializes");

    assert_eq!(
        value,
        json!({
            "average_kld": 3700.0,
            "daily_exceed_count": 1,
            "daily_violation_details": [{ "date": "2022-05-05", "value": 3800.0 }],
            "average_kly": 7400.0,
            "annual_exceed_count": 0,
            "annual_violation_details": [],
            "trend_slope": -200.0
        })
    );
}

#[test]
fn repeated_analysis_is_byte_identical() {
    let input = table(&[
        ("2022-01-01", "3812.125"),
        ("2022-07-01", "1.1"),
        ("2023-02-14", "4100.9"),
    ]);

    let first = serde_json::to_string(&analyze(&input)).expect("serializes");
    let second = serde_json::to_string(&analyze(&input)).expect("serializes");
    assert_eq!(first, second);
}

#[test]
fn csv_export_with_trailing_space_header_is_analyzed() {
    let csv = "Date ,Value,Meter\n\
12/20/2021,3900,A\n\
2022-02-01 00:00:00,1000,A\n\
,2000,A\n\
2022-02-03,n/a,A\n";

    let table = UsageTable::from_reader(csv.as_bytes()).expect("export loads");
    let outcome = analyze(&table);
    let report = report(&outcome);

    assert_eq!(report.daily_exceed_count, 1);
    assert_eq!(report.average_kld, 2450.0);
    assert_eq!(
        report
            .annual_violation_details
            .iter()
            .map(|violation| violation.year)
            .collect::<Vec<_>>(),
        Vec::<i32>::new()
    );
    assert_eq!(report.trend_slope, -2900.0);
}

#[test]
fn latin1_cell_does_not_reject_the_export() {
    let csv: &[u8] = b"Date ,Value,Site\n\
2022-03-01,4000,Caf\xe9 Row\n\
2022-03-02,\xe9\xe9\xe9,Pump\n\
2022-03-03,3000,Pump\n";

    let table = UsageTable::from_bytes(csv).expect("export loads");
    assert_eq!(table.len(), 3);

    let outcome = analyze(&table);
    let report = report(&outcome);
    assert_eq!(report.daily_exceed_count, 1);
    assert_eq!(report.average_kld, 3500.0);
}

#[test]
fn workbook_export_is_analyzed_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/usage.xlsx");
    let table = UsageTable::from_path(path).expect("workbook loads");

    let outcome = analyze(&table);
    let report = report(&outcome);
    assert_eq!(report.average_kld, 3500.0);
    assert_eq!(report.daily_exceed_count, 1);
    assert_eq!(report.trend_slope, -1000.0);
}
