// ==========================================
// 制造报价系统 - 命令行入口
// ==========================================
// 用途: 加载定价配置, 对指定路线/档位/数量输出报价分解与交期区间
//
// 用法:
//   mfg-quote <routing_id> <tier> <quantity> [material_cost] [surface_area]
//
// 配置文件缺省取 <用户配置目录>/mfg-quote/pricing.json,
// 可用环境变量 MFG_QUOTE_CONFIG 指定路径; 均缺失时使用内置默认配置。
// ==========================================

use mfg_quote_engine::config::PricingConfigManager;
use mfg_quote_engine::{i18n, logging, QuoteApi};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 定价与交期估算引擎", mfg_quote_engine::APP_NAME);
    tracing::info!("系统版本: {}", mfg_quote_engine::VERSION);
    tracing::info!("==================================================");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let mut args = std::env::args().skip(1);

    let routing_id = args.next().ok_or_else(usage)?;
    let tier_name = args.next().ok_or_else(usage)?;
    let quantity: u32 = args
        .next()
        .ok_or_else(usage)?
        .parse()
        .map_err(|_| i18n::t("quote.invalid_quantity"))?;

    // 物料成本/表面积来自零件数据; CLI 试算时允许手工给定, 缺省为 0
    let base_material_cost: f64 = parse_or_default(args.next(), 0.0)?;
    let surface_area: f64 = parse_or_default(args.next(), 0.0)?;

    // 加载配置: 环境变量 → 默认路径 → 内置默认
    let manager = match std::env::var("MFG_QUOTE_CONFIG") {
        Ok(path) => PricingConfigManager::load_from_path(Path::new(&path))
            .map_err(|e| e.to_string())?,
        Err(_) => PricingConfigManager::load_or_default().map_err(|e| e.to_string())?,
    };

    let api = QuoteApi::from_config_manager(manager);

    let breakdown = api
        .quote_by_tier_name(&routing_id, &tier_name, quantity, base_material_cost, surface_area)
        .map_err(|e| e.to_string())?;

    if breakdown.empty_routing {
        tracing::warn!("{}", i18n::t("quote.empty_routing"));
    }

    let tier = mfg_quote_engine::PricingTier::parse(&tier_name)
        .ok_or_else(|| i18n::t("quote.unknown_tier"))?;
    let today = chrono::Local::now().date_naive();
    let lead_time = api
        .lead_time(&routing_id, tier, quantity, &[], today)
        .map_err(|e| e.to_string())?;

    let output = serde_json::json!({
        "breakdown": breakdown,
        "lead_time": lead_time,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?
    );

    tracing::info!("{}", i18n::t("quote.success"));
    Ok(())
}

fn parse_or_default(arg: Option<String>, default: f64) -> Result<f64, String> {
    match arg {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("数值解析失败: {}", raw)),
        None => Ok(default),
    }
}

fn usage() -> String {
    i18n::t("cli.usage")
}
