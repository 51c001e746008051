// ==========================================
// 工序目录 CSV 导入器 - 集成测试
// ==========================================
// 覆盖: 文件级错误整体失败 / 行级违规不中断整批 / 主键冲突 / 数值校验
// ==========================================

use mfg_quote_engine::domain::types::ProcessCategory;
use mfg_quote_engine::importer::{ImportError, ProcessCatalogImporter, ViolationLevel};
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("创建临时CSV失败");
    file.write_all(content.as_bytes()).expect("写入临时CSV失败");
    file
}

const HEADER: &str =
    "process_id,name,category,setup_time_minutes,hourly_rate,minimum_cost,complexity_multiplier\n";

// ==========================================
// 第一部分：正常导入
// ==========================================

#[test]
fn test_import_valid_rows() {
    let csv = format!(
        "{HEADER}PROC-LASER,激光切割,PRIMARY,15,95,25,1.0\nPROC-DEBURR,去毛刺,FINISHING,5,45,10,1.0\n"
    );
    let file = write_csv(&csv);

    let importer = ProcessCatalogImporter::new();
    let report = importer.import_file(file.path()).unwrap();

    assert_eq!(report.total_rows, 2);
    assert_eq!(report.imported_count(), 2);
    assert!(report.violations.is_empty());

    let laser = &report.imported[0];
    assert_eq!(laser.process_id, "PROC-LASER");
    assert_eq!(laser.category, ProcessCategory::Primary);
    assert_eq!(laser.setup_time_minutes, 15.0);
    assert_eq!(laser.hourly_rate, 95.0);
}

#[test]
fn test_import_skips_blank_lines_and_trims_whitespace() {
    let csv = format!("{HEADER} PROC-X , 铣削 ,PRIMARY, 10 , 80 , 20 , 1.5 \n,,,,,,\n");
    let file = write_csv(&csv);

    let report = ProcessCatalogImporter::new().import_file(file.path()).unwrap();
    assert_eq!(report.total_rows, 1, "全空白行不计入");
    assert_eq!(report.imported[0].process_id, "PROC-X");
    assert_eq!(report.imported[0].complexity_multiplier, 1.5);
}

#[test]
fn test_import_missing_name_falls_back_to_id() {
    let csv = format!("{HEADER}PROC-Y,,SECONDARY,10,80,20,1.0\n");
    let file = write_csv(&csv);

    let report = ProcessCatalogImporter::new().import_file(file.path()).unwrap();
    assert_eq!(report.imported[0].name, "PROC-Y", "名称缺失回退主键");
}

// ==========================================
// 第二部分：行级违规不中断整批
// ==========================================

#[test]
fn test_bad_row_does_not_abort_batch() {
    let csv = format!(
        "{HEADER}PROC-OK,合法行,PRIMARY,15,95,25,1.0\nPROC-BAD,非法类别,UNKNOWN,15,95,25,1.0\nPROC-OK2,合法行二,FINISHING,5,45,10,1.0\n"
    );
    let file = write_csv(&csv);

    let report = ProcessCatalogImporter::new().import_file(file.path()).unwrap();
    assert_eq!(report.total_rows, 3);
    assert_eq!(report.imported_count(), 2, "非法行不影响其余行");
    assert_eq!(report.rejected_count(), 1);

    let violation = &report.violations[0];
    assert_eq!(violation.row_number, 2);
    assert_eq!(violation.field, "category");
    assert_eq!(violation.level, ViolationLevel::Error);
}

#[test]
fn test_duplicate_process_id_reported_as_conflict() {
    let csv = format!(
        "{HEADER}PROC-DUP,第一次,PRIMARY,15,95,25,1.0\nPROC-DUP,第二次,PRIMARY,15,95,25,1.0\n"
    );
    let file = write_csv(&csv);

    let report = ProcessCatalogImporter::new().import_file(file.path()).unwrap();
    assert_eq!(report.imported_count(), 1, "首次出现者胜出");
    assert_eq!(report.violations[0].level, ViolationLevel::Conflict);
    assert_eq!(report.violations[0].process_id.as_deref(), Some("PROC-DUP"));
}

#[test]
fn test_negative_and_unparsable_numbers_rejected() {
    let csv = format!(
        "{HEADER}PROC-NEG,负费率,PRIMARY,15,-95,25,1.0\nPROC-TXT,文本费率,PRIMARY,15,abc,25,1.0\n"
    );
    let file = write_csv(&csv);

    let report = ProcessCatalogImporter::new().import_file(file.path()).unwrap();
    assert_eq!(report.imported_count(), 0);
    assert_eq!(report.violations.len(), 2);
    for violation in &report.violations {
        assert_eq!(violation.field, "hourly_rate");
    }
}

#[test]
fn test_missing_primary_key_rejected() {
    let csv = format!("{HEADER},无主键,PRIMARY,15,95,25,1.0\n");
    let file = write_csv(&csv);

    let report = ProcessCatalogImporter::new().import_file(file.path()).unwrap();
    assert_eq!(report.imported_count(), 0);
    assert_eq!(report.violations[0].field, "process_id");
    assert!(report.violations[0].process_id.is_none());
}

// ==========================================
// 第三部分：文件级错误整体失败
// ==========================================

#[test]
fn test_missing_file_is_error() {
    let err = ProcessCatalogImporter::new()
        .import_file(Path::new("/nonexistent/processes.csv"))
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_unsupported_extension_rejected() {
    let mut file = Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .expect("创建临时文件失败");
    file.write_all(b"not a csv").expect("写入失败");

    let err = ProcessCatalogImporter::new()
        .import_file(file.path())
        .unwrap_err();
    match err {
        ImportError::UnsupportedFormat(ext) => assert_eq!(ext, "xlsx"),
        other => panic!("期望 UnsupportedFormat, 实际 {:?}", other),
    }
}
