use funding_report::commands::{execute_report, validate_args, ReportArgs};
use funding_report::output::read_report;
use funding_report::parser::{
    CellValue, Column, EntityReport, InvestorMatch, Metric, Report, ReportQuery,
};
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

fn write_dataset() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,startup,vertical,subvertical,city,investors,round,amount").unwrap();
    writeln!(file, "2020-01-15,A,FinTech,Payments,Mumbai,\"Acme Ventures, Beta\",Seed,10").unwrap();
    writeln!(file, "2020-02-15,A,FinTech,Payments,Mumbai,Beta,Series A,5").unwrap();
    writeln!(file, "2021-01-15,B,EdTech,K12,Pune,ACME Ventures,Seed,20").unwrap();
    file
}

fn args(data: PathBuf, query: ReportQuery) -> ReportArgs {
    ReportArgs {
        data_path: data,
        query,
        print_summary: false,
        ..Default::default()
    }
}

#[test]
fn test_overall_report_writes_json_and_chart() {
    let data = write_dataset();
    let out = TempDir::new().unwrap();
    let json_path = out.path().join("report.json");
    let charts_dir = out.path().join("charts");

    let report_args = ReportArgs {
        output_json: Some(json_path.clone()),
        charts_dir: Some(charts_dir.clone()),
        ..args(
            data.path().to_path_buf(),
            ReportQuery::OverallAnalysis {
                metric: Metric::Total,
            },
        )
    };
    assert!(validate_args(&report_args).is_ok());

    let report = execute_report(report_args).unwrap();
    match &report {
        Report::Overall(summary) => assert_eq!(summary.total, 35.0),
        other => panic!("unexpected report: {:?}", other),
    }

    let document = read_report(&json_path).unwrap();
    assert_eq!(document.report, report);
    assert!(charts_dir.join("mom.svg").exists());
}

#[test]
fn test_investor_report_writes_all_charts() {
    let data = write_dataset();
    let out = TempDir::new().unwrap();

    let report_args = ReportArgs {
        charts_dir: Some(out.path().to_path_buf()),
        ..args(
            data.path().to_path_buf(),
            ReportQuery::InvestorProfile {
                token: "acme".to_string(),
                match_mode: InvestorMatch::Substring,
            },
        )
    };

    let report = execute_report(report_args).unwrap();
    assert!(matches!(report, Report::Investor(EntityReport::Found(_))));

    for chart in ["biggest_investments.svg", "sectors.svg", "yoy_investment.svg"] {
        assert!(out.path().join(chart).exists(), "missing {}", chart);
    }
}

#[test]
fn test_investor_report_json_round_trip() {
    let mut data = NamedTempFile::new().unwrap();
    writeln!(data, "date,startup,vertical,city,investors,round,amount").unwrap();
    writeln!(data, "2019-06-01,A,FinTech,2019-01-01,Acme,2019-05-01,10").unwrap();
    writeln!(data, "nan,B,nan,Pune,Acme,Seed,nan").unwrap();

    let out = TempDir::new().unwrap();
    let json_path = out.path().join("investor.json");
    let report_args = ReportArgs {
        output_json: Some(json_path.clone()),
        ..args(
            data.path().to_path_buf(),
            ReportQuery::InvestorProfile {
                token: "acme".to_string(),
                match_mode: InvestorMatch::Token,
            },
        )
    };

    let report = execute_report(report_args).unwrap();
    let document = read_report(&json_path).unwrap();
    assert_eq!(document.report, report);

    let profile = match &document.report {
        Report::Investor(EntityReport::Found(profile)) => profile,
        other => panic!("unexpected report: {:?}", other),
    };
    assert_eq!(
        profile.recent_investments.cell(0, Column::Round),
        Some(&CellValue::Text("2019-05-01".to_string()))
    );
    assert_eq!(
        profile.recent_investments.cell(0, Column::City),
        Some(&CellValue::Text("2019-01-01".to_string()))
    );
}

#[test]
fn test_unknown_startup_is_not_an_error() {
    let data = write_dataset();
    let report = execute_report(args(
        data.path().to_path_buf(),
        ReportQuery::StartupProfile {
            name: "Ghost".to_string(),
        },
    ))
    .unwrap();

    assert_eq!(
        report,
        Report::Startup(EntityReport::NoDataForEntity {
            name: "Ghost".to_string()
        })
    );
}

#[test]
fn test_missing_column_is_an_error() {
    let mut data = NamedTempFile::new().unwrap();
    writeln!(data, "startup,amount").unwrap();
    writeln!(data, "A,1").unwrap();

    let result = execute_report(args(
        data.path().to_path_buf(),
        ReportQuery::InvestorProfile {
            token: "acme".to_string(),
            match_mode: InvestorMatch::Token,
        },
    ));

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("'investors' column not found"));
}

#[test]
fn test_missing_dataset_is_an_error() {
    let result = execute_report(args(
        PathBuf::from("/no/such/startup_cleaned.csv"),
        ReportQuery::OverallAnalysis {
            metric: Metric::Count,
        },
    ));
    assert!(result.is_err());
}
