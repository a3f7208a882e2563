use std::io::Write;

use encoding_rs::EUC_KR;
use grdp_dashboard::{Dashboard, FilterSpec, LoadError, LoadOptions, NumberFormat, ViewStatus};
use tempfile::NamedTempFile;

const DATASET: &str = "\
시도별,항목,2020,2021 p),2021
서울,1인당 GRDP,\"45,000\",\"50,000\",\"49,000\"
부산,1인당 GRDP,\"28,000\",\"30,000\",\"29,500\"
대구,1인당 GRDP,\"24,000\",-,\"25,000\"
서울,개인소득,\"2,400\",\"2,500\",\"2,450\"
부산,개인소득,\"2,000\",\"2,100\",\"2,050\"
";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_temp(suffix: &str, bytes: &[u8]) -> NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    tmp.write_all(bytes).unwrap();
    tmp.flush().unwrap();
    tmp
}

#[test]
fn cp949_file_end_to_end() {
    init_logging();
    let (bytes, _, _) = EUC_KR.encode(DATASET);
    let tmp = write_temp(".csv", &bytes);

    let dashboard = Dashboard::open(tmp.path(), &LoadOptions::default()).unwrap();
    let report = dashboard.load_report().unwrap();
    assert_eq!(report.encoding, "EUC-KR");
    assert_eq!(report.rows, 5);

    assert_eq!(dashboard.list_years(), vec![2020, 2021]);
    assert_eq!(dashboard.list_regions(), vec!["서울", "부산", "대구"]);
    assert_eq!(dashboard.list_categories(), vec!["1인당 GRDP", "개인소득"]);

    // "2021 p)" comes first, so it is the column used for 2021.
    let ambiguities = dashboard.ambiguities();
    assert_eq!(ambiguities.len(), 1);
    assert_eq!(ambiguities[0].year, 2021);
    assert_eq!(ambiguities[0].kept, "2021 p)");
    assert_eq!(ambiguities[0].ignored, "2021");

    let bundle = dashboard.evaluate(&FilterSpec::new("1인당 GRDP").with_year(2021));
    assert_eq!(bundle.status, ViewStatus::Ready);
    let summary = bundle.summary.as_ref().unwrap();
    assert_eq!(summary.max.region, "서울");
    assert_eq!(summary.max.value, 50000.0);
    assert_eq!(summary.min.region, "부산");
    assert_eq!(summary.mean, 40000.0);
    assert_eq!(bundle.diagnostics.excluded_rows, 1);

    // 3 regions × 2 years, minus 대구's missing 2021 cell.
    assert_eq!(bundle.long_table.len(), 5);
    assert_eq!(bundle.diagnostics.excluded_cells, 1);
}

#[test]
fn explicit_encoding_and_custom_columns() {
    init_logging();
    let text = "region\tmetric\t2019\t2020\nA\tincome\t1\t2\nB\tincome\t3\t4\n";
    let tmp = write_temp(".tsv", text.as_bytes());

    let options = LoadOptions::default()
        .with_encoding("utf-8")
        .with_columns("metric", "region");
    let dashboard = Dashboard::open(tmp.path(), &options).unwrap();

    let bundle = dashboard.evaluate(&FilterSpec::new("income"));
    assert_eq!(bundle.year, Some(2020));
    let top: Vec<&str> = bundle.ranked_top.iter().map(|p| p.region.as_str()).collect();
    assert_eq!(top, vec!["B", "A"]);
}

#[test]
fn json_input() {
    let text = r#"[
        {"시도별": "서울", "항목": "개인소득", "2020": 2400, "2021": "2,500"},
        {"시도별": "부산", "항목": "개인소득", "2020": 2000, "2021": null}
    ]"#;
    let tmp = write_temp(".json", text.as_bytes());
    let dashboard = Dashboard::open(tmp.path(), &LoadOptions::default()).unwrap();

    let bundle = dashboard.evaluate(&FilterSpec::new("개인소득").with_year(2021));
    assert_eq!(bundle.by_region.len(), 1);
    assert_eq!(bundle.diagnostics.excluded_rows, 1);
    assert_eq!(bundle.long_table.len(), 3);
}

#[test]
fn dot_grouped_comma_decimal_file() {
    let text = "시도별\t항목\t2022\n서울\tm\t1.234,5\n부산\tm\t987\n대구\tm\t1.5\n";
    let tmp = write_temp(".tsv", text.as_bytes());
    let options = LoadOptions {
        number_format: NumberFormat {
            thousands_separator: Some('.'),
            decimal_separator: ',',
        },
        ..LoadOptions::default()
    };
    let dashboard = Dashboard::open(tmp.path(), &options).unwrap();

    let bundle = dashboard.evaluate(&FilterSpec::new("m"));
    assert_eq!(bundle.status, ViewStatus::Ready);
    let summary = bundle.summary.unwrap();
    assert_eq!(summary.max.region, "서울");
    assert_eq!(summary.max.value, 1234.5);
    assert_eq!(summary.count, 2);
    assert_eq!(bundle.diagnostics.excluded_rows, 1);
}

#[test]
fn clashing_separators_fail_to_open() {
    let tmp = write_temp(".csv", DATASET.as_bytes());
    let options = LoadOptions {
        number_format: NumberFormat {
            thousands_separator: Some(','),
            decimal_separator: ',',
        },
        ..LoadOptions::default()
    };
    let err = Dashboard::open(tmp.path(), &options).unwrap_err();
    assert!(matches!(err, LoadError::Settings(_)));
}

#[test]
fn missing_region_column_is_fatal() {
    let tmp = write_temp(".csv", "항목,2020\nm,1\n".as_bytes());
    let err = Dashboard::open(tmp.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { .. }));
    assert!(err.to_string().contains("시도별"));
}

#[test]
fn unsupported_extension() {
    let tmp = write_temp(".xlsx", b"irrelevant");
    let err = Dashboard::open(tmp.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "xlsx"));
}

#[test]
fn missing_file() {
    let err = Dashboard::open(
        std::path::Path::new("/nonexistent/regional.csv"),
        &LoadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn absent_category_gives_explicit_empty_bundle() {
    let tmp = write_temp(".csv", DATASET.as_bytes());
    let dashboard = Dashboard::open(tmp.path(), &LoadOptions::default()).unwrap();

    let bundle = dashboard.evaluate(&FilterSpec::new("지역총소득").with_year(2021));
    assert_eq!(bundle.status, ViewStatus::NoMatchingRows);
    assert!(bundle.is_empty());
    assert_eq!(bundle.diagnostics.matched_rows, 0);
}

#[test]
fn evaluation_is_repeatable() {
    let tmp = write_temp(".csv", DATASET.as_bytes());
    let dashboard = Dashboard::open(tmp.path(), &LoadOptions::default()).unwrap();
    let spec = dashboard.default_spec().unwrap();

    let first = dashboard.evaluate(&spec);
    let second = dashboard.evaluate(&spec);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
