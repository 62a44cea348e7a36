use chrono::NaiveDate;
use funding_report::parser::{load_dataset, load_dataset_from_reader, Column};
use funding_report::utils::error::LoadError;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE_CSV: &str = "\
Date,Startup,Vertical,SubVertical,City,Investors,Round,Amount,Extra
2020-01-09,BYJU'S,EdTech,E-learning,Bengaluru,\"Tiger Global, General Atlantic\",Private Equity Round,1500,x
13/01/2020,Shuttl,Transportation,App based shuttle service,Gurgaon,Susquehanna Growth Equity,Series C,83.0,x
2020/01/10,Mamaearth,E-commerce,Retailer of baby and toddler products,Bengaluru,Sequoia Capital India,Series B,nan,x
not-a-date,Wealth Bucket,FinTech,Online Investment,New Delhi,Vinod Khatumal,Pre-series A,,x
";

#[test]
fn test_load_sample_csv() {
    let dataset = load_dataset_from_reader(SAMPLE_CSV.as_bytes()).unwrap();

    assert_eq!(dataset.len(), 4);
    assert!(dataset.missing_columns().is_empty());

    let first = &dataset.events()[0];
    assert_eq!(first.startup, "BYJU'S");
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2020, 1, 9));
    assert_eq!(first.amount, Some(1500.0));
    assert_eq!(
        first.investor_names().collect::<Vec<_>>(),
        vec!["Tiger Global", "General Atlantic"]
    );
    assert_eq!(first.subvertical.as_deref(), Some("E-learning"));

    // Day-first fallback
    assert_eq!(dataset.events()[1].date, NaiveDate::from_ymd_opt(2020, 1, 13));
    assert_eq!(dataset.events()[2].amount, None);
    assert_eq!(dataset.events()[3].date, None);

    let stats = dataset.stats();
    assert_eq!(stats.rows_read, 4);
    assert_eq!(stats.unparsable_dates, 1);
    assert_eq!(stats.invalid_amounts, 0);
}

#[test]
fn test_load_records_missing_columns() {
    let csv = "startup,amount\nA,1\n";
    let dataset = load_dataset_from_reader(csv.as_bytes()).unwrap();

    assert!(dataset.has_column(Column::Startup));
    assert!(!dataset.has_column(Column::Investors));
    assert_eq!(dataset.missing_columns().len(), 6);
    assert_eq!(dataset.events()[0].investors, None);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", SAMPLE_CSV).unwrap();

    let dataset = load_dataset(file.path()).unwrap();
    assert_eq!(dataset.len(), 4);
}

#[test]
fn test_load_missing_file() {
    let result = load_dataset("/definitely/not/here.csv");
    assert!(matches!(result, Err(LoadError::Io(_))));
}
