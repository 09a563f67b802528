//! rsudger command line tool
//! 加载数据集并识别一个或多个签名串，结果以格式化 JSON 输出
//!
//! 运行命令：
//! cargo run --features cli -- --dataset udgerdb_v3.dat "Mozilla/5.0 ..."

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::{Builder, Env, Target};
use rsudger::{CustomConfigBuilder, DatasetOrigin, RsuResult, UaDetector};

/// Udger-compatible user-agent classifier
#[derive(Parser, Debug)]
#[command(name = "rsudger", version, about = "Classify user-agent signatures against a udger dataset")]
struct Cli {
    /// Dataset path (SQLite udger v3 database, or JSON document with --json)
    #[arg(short, long)]
    dataset: PathBuf,

    /// Treat the dataset as a JSON document (implied by a .json extension)
    #[arg(long)]
    json: bool,

    /// Backtracking step limit for a single pattern evaluation
    #[arg(long)]
    backtrack_limit: Option<usize>,

    /// Signature strings to classify
    #[arg(required = true)]
    signatures: Vec<String>,
}

impl Cli {
    fn origin(&self) -> DatasetOrigin {
        let is_json = self.json
            || self
                .dataset
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            DatasetOrigin::JsonFile(self.dataset.clone())
        } else {
            DatasetOrigin::SqliteFile(self.dataset.clone())
        }
    }
}

fn run(cli: &Cli) -> RsuResult<()> {
    let mut builder = CustomConfigBuilder::new().origin(cli.origin());
    if let Some(limit) = cli.backtrack_limit {
        builder = builder.backtrack_limit(limit);
    }

    let detector = UaDetector::new(builder.build())?;
    println!(
        "Loaded: {} agents, {} platforms, {} devices",
        detector.agent_count(),
        detector.platform_count(),
        detector.device_count()
    );

    for signature in &cli.signatures {
        let result = detector.detect(signature)?;
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
