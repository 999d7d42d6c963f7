//! 汽车进程仿真
//!
//! 运行一个或多个"停车/行驶"交替的汽车进程，并输出状态切换日志。

use clap::Parser;
use des_sched::demo::{ScenarioError, ScenarioSpec};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "car-sim", about = "汽车进程仿真：停车与行驶交替")]
struct Args {
    /// 场景 JSON 文件；指定后忽略下面的车辆参数
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// 仿真运行到的逻辑时间
    #[arg(long, default_value_t = 15.0)]
    until: f64,
    /// 停车时长
    #[arg(long, default_value_t = 5.0)]
    parking: f64,
    /// 行驶时长
    #[arg(long, default_value_t = 2.0)]
    driving: f64,
    #[arg(long, default_value_t = 1)]
    cars: usize,
    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,
    /// 每处理一个事件输出一行日志
    #[arg(long)]
    log_events: bool,
}

fn run(args: &Args) -> Result<(), ScenarioError> {
    let scenario = match &args.scenario {
        Some(path) => ScenarioSpec::load(path)?,
        None => ScenarioSpec::fleet(args.cars, args.parking, args.driving, args.until)?,
    };

    let outcome = scenario.run(args.log_events)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for record in &outcome.trace {
            println!("{record}");
        }
        println!(
            "done @ {}, events={}",
            outcome.final_time, outcome.events
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing（输出到 stderr，不干扰 stdout 上的结果）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("car-sim: {err}");
            ExitCode::FAILURE
        }
    }
}
