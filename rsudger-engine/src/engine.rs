//! Signature classification engine
//! 签名串识别引擎
//! 核心职责：
//! 1. 从 DatasetProvider 一次性构建三套有序规则集与参考表
//! 2. agent 版本扫描（含唯一一次无版本重试）
//! 3. platform 关联优先 / 规则扫描
//! 4. device 规则扫描 + 三级兜底

use std::time::Instant;

use crate::core::{
    AgentView, Category, ClassificationResult, DeviceOrigin, DeviceTier, DeviceView, PlatformOrigin,
    PlatformView,
};
use crate::error::{DatasetError, DatasetResult, LookupError, LookupResult, MatchingFault};
use crate::indexer::{ReferenceTables, RuleSet, ScanHit};
use crate::options::{EngineOptions, FallbackPolicy};
use crate::provider::DatasetProvider;
use crate::utils::preview_compact;

/// agent 解析结果（显式有界重试）
/// 版本扫描成功为 Direct；版本扫描故障后无版本重试成功为 Recovered
/// 重试再故障不在此类型中表达，直接升级为 LookupError::RetryExhausted
/// 注意：fancy-regex 下无版本重试（is_match）与版本扫描（captures）共享同一回溯上限，
/// 回溯超限的模式在重试中同样超限，实际数据上 Recovered 基本不会出现
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentResolution {
    Direct(Option<ScanHit>),
    Recovered {
        hit: Option<ScanHit>,
        fault: MatchingFault,
    },
}

impl AgentResolution {
    /// 先执行版本扫描，故障时执行且仅执行一次重试
    pub fn resolve<F, R>(versioned: F, retry: R) -> LookupResult<Self>
    where
        F: FnOnce() -> Result<Option<ScanHit>, MatchingFault>,
        R: FnOnce() -> Result<Option<ScanHit>, MatchingFault>,
    {
        match versioned() {
            Ok(hit) => Ok(Self::Direct(hit)),
            Err(first) => {
                log::warn!("Version-aware agent scan faulted, retrying without version: {}", first);
                match retry() {
                    Ok(hit) => Ok(Self::Recovered { hit, fault: first }),
                    Err(retry) => Err(LookupError::RetryExhausted { first, retry }),
                }
            }
        }
    }

    pub fn hit(&self) -> Option<&ScanHit> {
        match self {
            Self::Direct(hit) | Self::Recovered { hit, .. } => hit.as_ref(),
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }
}

/// 识别引擎
/// 构建完成后不可变，可被任意多个线程无锁并发查询
#[derive(Debug, Clone)]
pub struct ClassificationEngine {
    agent_rules: RuleSet,
    platform_rules: RuleSet,
    device_rules: RuleSet,
    tables: ReferenceTables,
}

impl ClassificationEngine {
    /// 使用默认选项构建
    pub fn build<P: DatasetProvider + ?Sized>(provider: &P) -> DatasetResult<Self> {
        Self::build_with_options(provider, &EngineOptions::default())
    }

    /// 构建引擎：读取八张表 → 编译规则 → 建立索引 → 校验外键
    pub fn build_with_options<P: DatasetProvider + ?Sized>(
        provider: &P,
        options: &EngineOptions,
    ) -> DatasetResult<Self> {
        let start = Instant::now();
        let limit = options.backtrack_limit;

        let agent_rules = RuleSet::build(Category::Agent, &provider.load_agent_rules()?, limit)?;
        let platform_rules =
            RuleSet::build(Category::Platform, &provider.load_platform_rules()?, limit)?;
        let device_rules = RuleSet::build(Category::Device, &provider.load_device_rules()?, limit)?;

        let tables = ReferenceTables::build(
            provider.load_agent_records()?,
            provider.load_platform_records()?,
            provider.load_device_records()?,
            provider.load_class_names()?,
            provider.load_agent_platform_links()?,
            &options.fallback,
        )?;

        let engine = Self {
            agent_rules,
            platform_rules,
            device_rules,
            tables,
        };
        engine.check_rule_targets()?;

        log::info!(
            "Classification engine built | Time: {}ms | Rules: agent={} platform={} device={} | Records: agent={} platform={} device={} class={} link={}",
            start.elapsed().as_millis(),
            engine.agent_rules.len(),
            engine.platform_rules.len(),
            engine.device_rules.len(),
            engine.tables.agent_count(),
            engine.tables.platform_count(),
            engine.tables.device_count(),
            engine.tables.class_count(),
            engine.tables.link_count(),
        );

        Ok(engine)
    }

    /// 每条规则的目标 id 必须在对应记录表中存在
    fn check_rule_targets(&self) -> DatasetResult<()> {
        let tables = &self.tables;
        let missing = self
            .agent_rules
            .iter()
            .find(|rule| tables.agent(rule.category_id).is_none())
            .map(|rule| (Category::Agent, rule.category_id))
            .or_else(|| {
                self.platform_rules
                    .iter()
                    .find(|rule| tables.platform(rule.category_id).is_none())
                    .map(|rule| (Category::Platform, rule.category_id))
            })
            .or_else(|| {
                self.device_rules
                    .iter()
                    .find(|rule| tables.device(rule.category_id).is_none())
                    .map(|rule| (Category::Device, rule.category_id))
            });

        match missing {
            Some((category, category_id)) => {
                Err(DatasetError::MissingRecord { category, category_id })
            }
            None => Ok(()),
        }
    }

    /// 识别一个签名串
    /// 任一分类无匹配都不是错误；只有匹配故障无法恢复时返回 LookupError
    pub fn classify(&self, signature: &str) -> LookupResult<ClassificationResult> {
        let resolution = self.resolve_agent(signature)?;
        let agent = resolution.hit().and_then(|hit| self.agent_view(hit));

        let platform = self.resolve_platform(signature, agent.as_ref().map(|a| a.id))?;

        let tier = resolution
            .hit()
            .and_then(|hit| self.tables.agent(hit.category_id))
            .map_or(DeviceTier::default(), |entry| entry.tier);
        let device = self.resolve_device(signature, tier)?;

        let result = ClassificationResult {
            agent,
            platform,
            device,
        };
        log::debug!(
            "Classified | Input preview: {} | Result: {} | Recovered: {}",
            preview_compact(signature, 120),
            result,
            resolution.is_recovered()
        );
        Ok(result)
    }

    /// agent 扫描：先带版本，故障时无版本重试一次
    pub fn resolve_agent(&self, signature: &str) -> LookupResult<AgentResolution> {
        AgentResolution::resolve(
            || self.agent_rules.scan(signature, true),
            || self.agent_rules.scan(signature, false),
        )
    }

    fn agent_view(&self, hit: &ScanHit) -> Option<AgentView> {
        let entry = self.tables.agent(hit.category_id)?;
        let record = &entry.record;
        Some(AgentView {
            id: hit.category_id,
            name: AgentView::display_name(&record.family, hit.version.as_deref()),
            family: record.family.clone(),
            version: hit.version.clone(),
            engine: record.engine.clone(),
            class_id: record.class_id,
            class_name: entry.class_name.clone(),
            vendor: record.vendor.clone(),
            icon: record.icon.clone(),
        })
    }

    /// 关联优先：存在 agent→platform 关联时完全跳过平台规则扫描
    fn resolve_platform(
        &self,
        signature: &str,
        agent_id: Option<u32>,
    ) -> LookupResult<Option<PlatformView>> {
        if let Some(platform_id) = agent_id.and_then(|id| self.tables.linked_platform(id)) {
            return Ok(self.platform_view(platform_id, PlatformOrigin::Link));
        }

        let hit = self.platform_rules.scan(signature, false)?;
        Ok(hit.and_then(|hit| self.platform_view(hit.category_id, PlatformOrigin::Rule)))
    }

    fn platform_view(&self, id: u32, origin: PlatformOrigin) -> Option<PlatformView> {
        self.tables.platform(id).map(|record| PlatformView {
            id,
            record: record.clone(),
            origin,
        })
    }

    /// 设备规则命中直接使用，否则按 agent 层级合成
    fn resolve_device(&self, signature: &str, tier: DeviceTier) -> LookupResult<DeviceView> {
        let matched = self
            .device_rules
            .scan(signature, false)?
            .and_then(|hit| {
                self.tables.device(hit.category_id).map(|record| DeviceView {
                    record: record.clone(),
                    origin: DeviceOrigin::Rule(hit.category_id),
                })
            });

        Ok(matched.unwrap_or_else(|| DeviceView {
            record: FallbackPolicy::device_for(tier),
            origin: DeviceOrigin::Fallback(tier),
        }))
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn rule_set(&self, category: Category) -> &RuleSet {
        match category {
            Category::Agent => &self.agent_rules,
            Category::Platform => &self.platform_rules,
            Category::Device => &self.device_rules,
        }
    }

    pub fn agent_count(&self) -> usize {
        self.tables.agent_count()
    }

    pub fn platform_count(&self) -> usize {
        self.tables.platform_count()
    }

    pub fn device_count(&self) -> usize {
        self.tables.device_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AgentRecord, DeviceRecord, PlatformRecord};
    use crate::provider::MemoryDataset;

    const CHROME_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_2) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/49.0.2575.0 Safari/537.36";
    const OPERA_MINI: &str = "Opera/9.80 (J2ME/MIDP; Opera Mini/7.5.33361/35.2883; U; en) Presto/2.8.119 Version/11.1010";
    const NINTENDO_DSI: &str = "Opera/9.50 (Nintendo DSi; Opera/507; U; en-US)";

    fn agent(family: &str, class_id: u32) -> AgentRecord {
        AgentRecord {
            family: family.to_string(),
            engine: "Test".to_string(),
            class_id,
            vendor: "Vendor".to_string(),
            icon: format!("{}.png", family.to_lowercase()),
        }
    }

    fn platform(family: &str, name: &str) -> PlatformRecord {
        PlatformRecord {
            family: family.to_string(),
            name: name.to_string(),
            vendor: "Vendor".to_string(),
            icon: format!("{}.png", family.to_lowercase()),
        }
    }

    fn dataset() -> MemoryDataset {
        MemoryDataset::new()
            .agent_rule(2, "/opera mini\\/([\\d.]+)/si")
            .agent_rule(3, "/opera\\/([\\d.]+)/si")
            .agent_rule(1, "/chrome\\/([\\d.]+)/si")
            .agent_rule(42, "/myapp\\/([\\d.]+)/si")
            .agent_rule(5, "/^curl\\/([\\d.]+)/si")
            .agent_rule(6, "/googlebot/si")
            .agent(1, AgentRecord {
                family: "Chrome".to_string(),
                engine: "WebKit/Blink".to_string(),
                class_id: 1,
                vendor: "Google Inc.".to_string(),
                icon: "chrome.png".to_string(),
            })
            .agent(2, agent("Opera Mini", 3))
            .agent(3, agent("Opera", 1))
            .agent(42, agent("MyApp", 1))
            .agent(5, agent("curl", 5))
            .agent(6, agent("Googlebot", 50))
            .platform_rule(8, "/mac os x 10[._]11/si")
            .platform_rule(9, "/windows nt 6\\.1/si")
            .platform_rule(7, "/android/si")
            .platform(7, platform("Android", "Android"))
            .platform(8, platform("OS X", "OS X 10.11 El Capitan"))
            .platform(9, platform("Windows", "Windows 7"))
            .device_rule(1, "/ipad/si")
            .device_rule(4, "/nintendo/si")
            .device(1, DeviceRecord::new("Tablet", "tablet.png"))
            .device(4, DeviceRecord::new("Game console", "console.png"))
            .class(1, "Browser")
            .class(3, "Mobile browser")
            .class(5, "Library")
            .link(42, 7)
    }

    fn engine() -> ClassificationEngine {
        ClassificationEngine::build(&dataset()).unwrap()
    }

    fn faulting_options() -> EngineOptions {
        EngineOptions {
            backtrack_limit: 100_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_chrome_on_mac() {
        let result = engine().classify(CHROME_MAC).unwrap();

        let agent = result.agent.unwrap();
        assert_eq!(agent.id, 1);
        assert_eq!(agent.name, "Chrome 49.0.2575.0");
        assert_eq!(agent.version.as_deref(), Some("49.0.2575.0"));
        assert_eq!(agent.engine, "WebKit/Blink");
        assert_eq!(agent.class_name.as_deref(), Some("Browser"));

        let platform = result.platform.unwrap();
        assert_eq!(platform.record.name, "OS X 10.11 El Capitan");
        assert_eq!(platform.origin, PlatformOrigin::Rule);

        assert_eq!(result.device.record.name, "Personal computer");
        assert_eq!(result.device.record.icon, "desktop.png");
        assert_eq!(result.device.origin, DeviceOrigin::Fallback(DeviceTier::PersonalComputer));
    }

    #[test]
    fn test_first_agent_rule_wins_and_mobile_fallback() {
        let result = engine().classify(OPERA_MINI).unwrap();
        let agent = result.agent.unwrap();
        assert_eq!(agent.id, 2);
        assert_eq!(agent.name, "Opera Mini 7.5.33361");
        assert_eq!(result.device.record, DeviceRecord::new("Smartphone", "phone.png"));
        assert_eq!(result.device.origin, DeviceOrigin::Fallback(DeviceTier::Mobile));
    }

    #[test]
    fn test_agent_link_skips_platform_rules() {
        // windows 规则也能匹配，但关联优先
        let result = engine().classify("MyApp/2.1 (Windows NT 6.1; Win64)").unwrap();
        assert_eq!(result.agent.as_ref().map(|a| a.id), Some(42));
        let platform = result.platform.unwrap();
        assert_eq!(platform.id, 7);
        assert_eq!(platform.record.family, "Android");
        assert_eq!(platform.origin, PlatformOrigin::Link);
    }

    #[test]
    fn test_agent_link_without_platform_match() {
        let engine = engine();
        // 不含任何平台特征，平台规则全部不命中
        let signature = "MyApp/3.0";
        assert_eq!(engine.rule_set(Category::Platform).scan(signature, false).unwrap(), None);

        let result = engine.classify(signature).unwrap();
        assert_eq!(result.agent.as_ref().map(|a| a.name.as_str()), Some("MyApp 3.0"));
        let platform = result.platform.unwrap();
        assert_eq!(platform.id, 7);
        assert_eq!(platform.record.name, "Android");
        assert_eq!(platform.origin, PlatformOrigin::Link);
    }

    #[test]
    fn test_non_physical_fallback() {
        let engine = engine();

        let curl = engine.classify("curl/8.4.0").unwrap();
        assert_eq!(curl.agent.as_ref().map(|a| a.name.as_str()), Some("curl 8.4.0"));
        assert_eq!(curl.platform, None);
        assert_eq!(curl.device.record, DeviceRecord::new("Other", "other.png"));

        // class 50 不在 class 表中
        let bot = engine.classify("Mozilla/5.0 (compatible; Googlebot/2.1)").unwrap();
        let agent = bot.agent.unwrap();
        assert_eq!(agent.name, "Googlebot");
        assert_eq!(agent.version, None);
        assert_eq!(agent.class_name, None);
        assert_eq!(bot.device.origin, DeviceOrigin::Fallback(DeviceTier::NonPhysical));
    }

    #[test]
    fn test_device_rule_beats_fallback() {
        let result = engine().classify(NINTENDO_DSI).unwrap();
        let agent = result.agent.unwrap();
        assert_eq!(agent.id, 3);
        assert_eq!(agent.name, "Opera 9.50");
        assert_eq!(result.platform, None);
        assert_eq!(result.device.record.name, "Game console");
        assert_eq!(result.device.origin, DeviceOrigin::Rule(4));
    }

    #[test]
    fn test_unknown_agent_still_scans_platform() {
        let result = engine().classify("SomeClient/1.0 (Windows NT 6.1)").unwrap();
        assert_eq!(result.agent, None);
        assert_eq!(result.platform.map(|p| p.id), Some(9));
        assert_eq!(result.device.origin, DeviceOrigin::Fallback(DeviceTier::PersonalComputer));
    }

    #[test]
    fn test_empty_signature() {
        let result = engine().classify("").unwrap();
        assert_eq!(result.agent, None);
        assert_eq!(result.platform, None);
        assert_eq!(result.device.record.name, "Personal computer");
        assert_eq!(result.to_string(), "unknown | unknown | Personal computer");
    }

    #[test]
    fn test_classify_is_idempotent() {
        let engine = engine();
        assert_eq!(engine.classify(CHROME_MAC).unwrap(), engine.classify(CHROME_MAC).unwrap());
    }

    #[test]
    fn test_custom_fallback_policy() {
        let options = EngineOptions {
            fallback: FallbackPolicy::new([1], Vec::new()),
            ..Default::default()
        };
        let engine = ClassificationEngine::build_with_options(&dataset(), &options).unwrap();
        let result = engine.classify(CHROME_MAC).unwrap();
        assert_eq!(result.device.origin, DeviceOrigin::Fallback(DeviceTier::Mobile));
        // curl 的 class 5 不再属于非实体设备
        let curl = engine.classify("curl/8.4.0").unwrap();
        assert_eq!(curl.device.origin, DeviceOrigin::Fallback(DeviceTier::PersonalComputer));
    }

    #[test]
    fn test_rule_without_record_fails_build() {
        let dataset = dataset().device_rule(99, "/kindle/si");
        let err = ClassificationEngine::build(&dataset).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingRecord { category: Category::Device, category_id: 99 }
        ));
    }

    #[test]
    fn test_invalid_pattern_fails_build() {
        let dataset = dataset().platform_rule(8, "/mac os x (10/si");
        let err = ClassificationEngine::build(&dataset).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidPattern { category: Category::Platform, category_id: 8, .. }
        ));
    }

    #[test]
    fn test_recovered_resolution_keeps_fault() {
        let fault = MatchingFault {
            category: Category::Agent,
            category_id: 1,
            order: 0,
            reason: "backtrack limit exceeded".to_string(),
        };
        let first = fault.clone();
        let resolution = AgentResolution::resolve(
            || Err(first),
            || Ok(Some(ScanHit { category_id: 1, version: None })),
        )
        .unwrap();

        assert!(resolution.is_recovered());
        assert_eq!(resolution.hit().map(|h| h.category_id), Some(1));
        assert_eq!(
            resolution,
            AgentResolution::Recovered {
                hit: Some(ScanHit { category_id: 1, version: None }),
                fault,
            }
        );
    }

    #[test]
    fn test_retry_runs_only_after_fault() {
        let resolution = AgentResolution::resolve(
            || Ok(None),
            || panic!("retry must not run"),
        )
        .unwrap();
        assert_eq!(resolution, AgentResolution::Direct(None));
    }

    #[test]
    fn test_retry_exhausted() {
        let dataset = MemoryDataset::new()
            .agent_rule(1, "(a|b|ab)*(?=c)")
            .agent(1, agent("Pathological", 1));
        let engine =
            ClassificationEngine::build_with_options(&dataset, &faulting_options()).unwrap();

        let err = engine.classify(&"ab".repeat(28)).unwrap_err();
        match err {
            LookupError::RetryExhausted { first, retry } => {
                assert_eq!(first.category_id, 1);
                assert_eq!(retry.category, Category::Agent);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_platform_fault_is_not_retried() {
        let dataset = MemoryDataset::new()
            .platform_rule(3, "(a|b|ab)*(?=c)")
            .platform(3, platform("Pathological", "Pathological"));
        let engine =
            ClassificationEngine::build_with_options(&dataset, &faulting_options()).unwrap();

        let err = engine.classify(&"ab".repeat(28)).unwrap_err();
        assert!(matches!(
            err,
            LookupError::Fault(MatchingFault { category: Category::Platform, category_id: 3, .. })
        ));
    }

    #[test]
    fn test_concurrent_classify() {
        let engine = engine();
        let inputs = [CHROME_MAC, OPERA_MINI, NINTENDO_DSI, "curl/8.4.0"];
        let expected: Vec<_> = inputs.iter().map(|ua| engine.classify(ua).unwrap()).collect();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for (ua, want) in inputs.iter().zip(&expected) {
                        assert_eq!(&engine.classify(ua).unwrap(), want);
                    }
                });
            }
        });
    }

    #[test]
    fn test_counts() {
        let engine = engine();
        assert_eq!(engine.agent_count(), 6);
        assert_eq!(engine.platform_count(), 3);
        assert_eq!(engine.device_count(), 2);
        assert_eq!(engine.rule_set(Category::Agent).len(), 6);
        assert_eq!(engine.tables().link_count(), 1);
    }
}
