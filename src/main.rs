use clap::Parser;

use pgm_hide::{
    cli::{Cli, Commands},
    handler::{handle_embed, handle_extract},
    logging::init_logging,
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的子命令（`embed` 或 `extract`）
/// 将执行分派到相应的处理函数。任何失败都以非零状态码退出。
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();
    init_logging(cli.log_level);

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Embed(args) => handle_embed(args),
        Commands::Extract(args) => handle_extract(args),
    }
}
