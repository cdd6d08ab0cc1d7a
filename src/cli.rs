//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::logging::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// 一款基于半字节替换的隐写工具，把一幅 PGM 灰度图隐藏到另一幅同尺寸的 PGM 灰度图中。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于半字节替换的隐写工具：用秘密图像像素的高 4 位替换封面图像像素的低 4 位，并可从隐写图像中恢复秘密图像的近似值。"
)]
pub struct Cli {
    /// 日志级别，日志输出到标准错误。
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：embed (嵌入) 和 extract (提取)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 把秘密图像嵌入封面图像，保存二进制隐写图像，并立即提取出秘密图像。
    Embed(EmbedArgs),

    /// 从二进制隐写图像中提取秘密图像，保存为文本格式。
    Extract(ExtractArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// 文本格式 (P2) 的封面图像路径。
    #[arg(short, long)]
    pub cover: PathBuf,

    /// 文本格式 (P2) 的秘密图像路径。
    #[arg(short, long)]
    pub secret: PathBuf,

    /// 二进制格式 (P5) 隐写图像的输出路径。
    /// 默认为封面图像同目录下的 `stego_<封面文件名>.pgm`。
    #[arg(short = 'o', long)]
    pub stego: Option<PathBuf>,

    /// 提取出的秘密图像 (P2) 的输出路径。
    /// 默认为封面图像同目录下的 `extracted_<封面文件名>.pgm`。
    #[arg(short, long)]
    pub extracted: Option<PathBuf>,

    /// 两幅图像的期望宽度。
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// 两幅图像的期望高度。
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 二进制格式 (P5) 的隐写图像路径。
    #[arg(short, long)]
    pub stego: PathBuf,

    /// 提取结果 (P2) 的输出路径。
    /// 默认为隐写图像同目录下的 `extracted_<隐写文件名>.pgm`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 隐写图像的期望宽度。
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// 隐写图像的期望高度。
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
