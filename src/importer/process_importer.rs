// ==========================================
// 制造报价系统 - 工序目录 CSV 导入器
// ==========================================
// 阶段: 文件解析 → 字段映射 → 数据校验 → 导入报告
// 红线: 单行非法只记违规不中断整批; 文件级错误才整体失败
// ==========================================

use crate::domain::process::ProcessDefinition;
use crate::domain::types::ProcessCategory;
use crate::importer::error::ImportError;
use csv::ReaderBuilder;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;
use tracing::instrument;

// ==========================================
// 违规与报告
// ==========================================

/// 违规等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationLevel {
    Error,    // 整行拒绝
    Conflict, // 主键冲突（同批次内）
}

/// 单行校验违规
#[derive(Debug, Clone)]
pub struct ImportViolation {
    pub row_number: usize, // 数据行号（表头后第 1 行为 1）
    pub process_id: Option<String>,
    pub level: ViolationLevel,
    pub field: String,
    pub message: String,
}

/// 导入报告
#[derive(Debug, Default)]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported: Vec<ProcessDefinition>,
    pub violations: Vec<ImportViolation>,
}

impl ImportReport {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.total_rows - self.imported.len()
    }
}

// ==========================================
// ProcessCatalogImporter - 工序目录导入器
// ==========================================
// CSV 表头: process_id,name,category,setup_time_minutes,
//           hourly_rate,minimum_cost,complexity_multiplier
pub struct ProcessCatalogImporter;

impl ProcessCatalogImporter {
    pub fn new() -> Self {
        Self
    }

    /// 从 CSV 文件导入工序定义
    #[instrument(skip(self), fields(path = %file_path.display()))]
    pub fn import_file(&self, file_path: &Path) -> Result<ImportReport, ImportError> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(file_path)
            .map_err(|e| ImportError::FileNotFound(format!("{}: {}", file_path.display(), e)))?;
        let records = self.parse_to_raw_records(file)?;
        Ok(self.map_and_validate(records))
    }

    /// 阶段 1: CSV → 原始记录（表头 → 值的映射）
    fn parse_to_raw_records(
        &self,
        file: File,
    ) -> Result<Vec<HashMap<String, String>>, ImportError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }

    /// 阶段 2/3: 字段映射 + 校验, 汇总导入报告
    fn map_and_validate(&self, records: Vec<HashMap<String, String>>) -> ImportReport {
        let mut report = ImportReport {
            total_rows: records.len(),
            ..Default::default()
        };
        let mut seen_ids: HashSet<String> = HashSet::new();

        for (idx, row) in records.iter().enumerate() {
            let row_number = idx + 1;

            match self.map_row(row, row_number, &mut seen_ids) {
                Ok(process) => report.imported.push(process),
                Err(violation) => report.violations.push(violation),
            }
        }

        tracing::info!(
            total = report.total_rows,
            imported = report.imported_count(),
            rejected = report.rejected_count(),
            "工序目录导入完成"
        );
        report
    }

    /// 单行映射: 任一字段非法即整行拒绝（返回首个违规）
    fn map_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
        seen_ids: &mut HashSet<String>,
    ) -> Result<ProcessDefinition, ImportViolation> {
        // 主键非空
        let process_id = match row.get("process_id").filter(|v| !v.is_empty()) {
            Some(id) => id.clone(),
            None => {
                return Err(ImportViolation {
                    row_number,
                    process_id: None,
                    level: ViolationLevel::Error,
                    field: "process_id".to_string(),
                    message: "主键缺失".to_string(),
                })
            }
        };

        // 主键唯一（同批次内）
        if !seen_ids.insert(process_id.clone()) {
            return Err(ImportViolation {
                row_number,
                process_id: Some(process_id),
                level: ViolationLevel::Conflict,
                field: "process_id".to_string(),
                message: "重复工序号（同批次内）".to_string(),
            });
        }

        let name = row
            .get("name")
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| process_id.clone());

        let category = match row.get("category").and_then(|v| ProcessCategory::parse(v)) {
            Some(c) => c,
            None => {
                return Err(ImportViolation {
                    row_number,
                    process_id: Some(process_id),
                    level: ViolationLevel::Error,
                    field: "category".to_string(),
                    message: format!(
                        "工序类别非法: {}（期望 PRIMARY/SECONDARY/FINISHING）",
                        row.get("category").map(String::as_str).unwrap_or("")
                    ),
                })
            }
        };

        let setup_time_minutes =
            self.parse_non_negative(row, "setup_time_minutes", row_number, &process_id)?;
        let hourly_rate = self.parse_non_negative(row, "hourly_rate", row_number, &process_id)?;
        let minimum_cost = self.parse_non_negative(row, "minimum_cost", row_number, &process_id)?;
        let complexity_multiplier =
            self.parse_non_negative(row, "complexity_multiplier", row_number, &process_id)?;

        Ok(ProcessDefinition {
            process_id,
            name,
            category,
            setup_time_minutes,
            hourly_rate,
            minimum_cost,
            complexity_multiplier,
        })
    }

    /// 数值字段解析: 必填、可解析、非负有限
    fn parse_non_negative(
        &self,
        row: &HashMap<String, String>,
        field: &str,
        row_number: usize,
        process_id: &str,
    ) -> Result<f64, ImportViolation> {
        let raw = row.get(field).filter(|v| !v.is_empty()).ok_or_else(|| {
            ImportViolation {
                row_number,
                process_id: Some(process_id.to_string()),
                level: ViolationLevel::Error,
                field: field.to_string(),
                message: "数值字段缺失".to_string(),
            }
        })?;

        let value: f64 = raw.parse().map_err(|_| ImportViolation {
            row_number,
            process_id: Some(process_id.to_string()),
            level: ViolationLevel::Error,
            field: field.to_string(),
            message: format!("数值解析失败: {}", raw),
        })?;

        if !value.is_finite() || value < 0.0 {
            return Err(ImportViolation {
                row_number,
                process_id: Some(process_id.to_string()),
                level: ViolationLevel::Error,
                field: field.to_string(),
                message: format!("数值必须为非负有限数: {}", value),
            });
        }

        Ok(value)
    }
}

impl Default for ProcessCatalogImporter {
    fn default() -> Self {
        Self::new()
    }
}
