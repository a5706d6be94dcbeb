use clap::Parser;

use pixel_ink::{
    cli::{Cli, Commands},
    handler::{handle_decode, handle_encode},
};

/// 安装 `env_logger` (受 RUST_LOG 控制)，解析参数后把 `encode` / `decode`
/// 交给 `handler`。任何错误都由 anyhow 连同上下文一起打印并以非零状态退出。
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(args) => handle_encode(args),
        Commands::Decode(args) => handle_decode(args),
    }
}
