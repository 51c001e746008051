// ==========================================
// 制造报价系统 - 配置管理器
// ==========================================
// 职责: 定价配置加载、完整性校验、快照导出
// 存储: JSON 配置文件（本系统无数据库, 目录即配置输入）
// 红线: 折扣表/路线/覆写的完整性在加载时校验一次;
//       校验通过后引擎侧不再做配置级检查
// ==========================================

use crate::config::defaults::{default_catalog, default_global_config};
use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::catalog::Catalog;
use crate::domain::pricing::GlobalPricingConfig;
use crate::engine::volume::VolumeBreakMatcher;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};

/// 配置文件载体（global + catalog 同文件）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfigFile {
    pub global: GlobalPricingConfig,
    pub catalog: Catalog,
}

// ==========================================
// PricingConfigManager - 配置管理器
// ==========================================
#[derive(Debug)]
pub struct PricingConfigManager {
    global: GlobalPricingConfig,
    catalog: Catalog,
    source: Option<PathBuf>, // None = 内置默认配置
}

impl PricingConfigManager {
    /// 从配置文件加载（加载即校验）
    pub fn load_from_path(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;

        let file: PricingConfigFile = serde_json::from_str(&raw)?;
        Self::validate(&file.global, &file.catalog)?;

        tracing::info!(path = %path.display(), "定价配置加载完成");
        Ok(Self {
            global: file.global,
            catalog: file.catalog,
            source: Some(path.to_path_buf()),
        })
    }

    /// 优先默认路径的配置文件, 缺失时回退内置默认配置
    pub fn load_or_default() -> ConfigResult<Self> {
        let path = Self::default_config_path();
        if path.exists() {
            return Self::load_from_path(&path);
        }

        tracing::info!("未找到配置文件, 使用内置默认配置");
        Self::from_defaults()
    }

    /// 使用内置默认配置（默认配置本身也过一遍完整性校验）
    pub fn from_defaults() -> ConfigResult<Self> {
        let global = default_global_config();
        let catalog = default_catalog();
        Self::validate(&global, &catalog)?;
        Ok(Self {
            global,
            catalog,
            source: None,
        })
    }

    /// 默认配置文件路径: <用户配置目录>/mfg-quote/pricing.json
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mfg-quote")
            .join("pricing.json")
    }

    // ==========================================
    // 完整性校验（加载时一次）
    // ==========================================

    /// 配置完整性校验:
    /// 1) 折扣表无缝无重叠覆盖 [1, ∞)
    /// 2) 路线步骤序号连续无重复, 步骤引用的工序存在
    /// 3) 覆写值均为有限数
    /// 4) 乘数顺序 economy < standard < rush 仅预期, 违反只告警不拒绝
    pub fn validate(global: &GlobalPricingConfig, catalog: &Catalog) -> ConfigResult<()> {
        // 1. 折扣表
        let matcher = VolumeBreakMatcher::new();
        matcher
            .validate_schedule(&global.volume_breaks)
            .map_err(|v| ConfigError::MalformedVolumeSchedule(v.to_string()))?;

        // 2/3. 路线
        for routing in catalog.routings.values() {
            routing
                .validate_steps()
                .map_err(ConfigError::InvalidRouting)?;

            for step in &routing.steps {
                if catalog.get_process(&step.process_id).is_none() {
                    return Err(ConfigError::CatalogIntegrity(format!(
                        "路线{}引用了不存在的工序{}",
                        routing.routing_id, step.process_id
                    )));
                }
            }

            for (tier, tier_override) in &routing.tier_overrides {
                if let Err((field, value)) = tier_override.validate_finite() {
                    return Err(ConfigError::OverrideNotFinite {
                        routing_id: routing.routing_id.clone(),
                        tier: tier.to_string(),
                        field: field.to_string(),
                        value,
                    });
                }
            }
        }

        // 4. 乘数顺序预期（不强制）
        let m = &global.default_tier_multipliers;
        if !(m.economy < m.standard && m.standard < m.rush) {
            tracing::warn!(
                economy = m.economy,
                standard = m.standard,
                rush = m.rush,
                "档位乘数顺序不符合 economy < standard < rush 的预期"
            );
        }

        Ok(())
    }

    // ==========================================
    // 访问器
    // ==========================================

    pub fn global(&self) -> &GlobalPricingConfig {
        &self.global
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 拆出配置所有权（交给 QuoteApi 持有）
    pub fn into_parts(self) -> (GlobalPricingConfig, Catalog) {
        (self.global, self.catalog)
    }

    /// 获取配置快照（JSON 格式）
    ///
    /// 用途: 报价留痕时记录当时生效的配置
    pub fn snapshot_json(&self) -> ConfigResult<String> {
        let snapshot = json!({
            "source": self.source.as_ref().map(|p| p.display().to_string()),
            "global": self.global,
            "catalog_summary": {
                "processes": self.catalog.processes.len(),
                "materials": self.catalog.materials.len(),
                "finishes": self.catalog.finishes.len(),
                "routings": self.catalog.routings.len(),
            },
        });
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::VolumeBreak;

    #[test]
    fn test_defaults_load_and_validate() {
        let manager = PricingConfigManager::from_defaults().unwrap();
        assert!(!manager.catalog().routings.is_empty());
        assert_eq!(manager.global().minimum_order_value, 50.0);
    }

    #[test]
    fn test_validate_rejects_gapped_schedule() {
        let mut global = default_global_config();
        global.volume_breaks = vec![
            VolumeBreak {
                min_quantity: 1,
                max_quantity: Some(9),
                discount_percent: 0.0,
            },
            VolumeBreak {
                min_quantity: 20,
                max_quantity: None,
                discount_percent: 5.0,
            },
        ];

        let err = PricingConfigManager::validate(&global, &default_catalog()).unwrap_err();
        match err {
            ConfigError::MalformedVolumeSchedule(msg) => {
                assert!(msg.contains("断档"), "错误信息应说明断档: {}", msg)
            }
            other => panic!("期望 MalformedVolumeSchedule, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_dangling_process_ref() {
        let global = default_global_config();
        let mut catalog = default_catalog();
        if let Some(r) = catalog.routings.get_mut("RT-SHEET-METAL") {
            r.steps[0].process_id = "PROC-GHOST".to_string();
        }

        let err = PricingConfigManager::validate(&global, &catalog).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogIntegrity(_)));
    }

    #[test]
    fn test_snapshot_contains_global_config() {
        let manager = PricingConfigManager::from_defaults().unwrap();
        let snapshot = manager.snapshot_json().unwrap();
        assert!(snapshot.contains("minimum_order_value"));
        assert!(snapshot.contains("catalog_summary"));
    }
}
