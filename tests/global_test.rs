use rsudger::{detect, get_global_detector, init_global_detector, DatasetConfig, RsudgerError};

const DATASET: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/reference_dataset.json");

// 全局单例在进程内只能初始化一次，全部断言放在同一个测试中顺序执行
#[test]
fn test_global_detector_lifecycle() {
    let _ = env_logger::builder().is_test(true).try_init();

    assert!(matches!(
        detect("Opera/9.50 (Nintendo DSi; Opera/507; U; en-US)"),
        Err(RsudgerError::DetectorNotInitialized(_))
    ));

    // 初始化失败不会占用单例
    assert!(matches!(
        init_global_detector(DatasetConfig::json("tests/data/missing.json")),
        Err(RsudgerError::DetectorInitError(_))
    ));
    assert!(get_global_detector().is_err());

    init_global_detector(DatasetConfig::json(DATASET)).unwrap();
    let result = detect("Opera/9.50 (Nintendo DSi; Opera/507; U; en-US)").unwrap();
    assert_eq!(result.agent.unwrap().name, "Opera 9.50");

    // 重复初始化是幂等的，即使配置不同也保留首个实例
    init_global_detector(DatasetConfig::json("tests/data/missing.json")).unwrap();
    assert_eq!(get_global_detector().unwrap().agent_count(), 7);
}
