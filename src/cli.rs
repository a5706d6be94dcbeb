//! # 命令行参数
//!
//! `encode` 与 `decode` 共用编解码器类型 (`-c LSB|MSB`) 和隐写深度 (`-d`)。
//! 深度在这里只解析为整数，范围检查留给 `Codec::new`，以便错误信息带出具体的值。
//! 输出路径可省略；已有文件只有在 `-f` 时才会被覆盖。

use crate::codec::Alignment;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// 一款基于位深度隐写术的命令行工具，可将任意文件隐藏在无损格式图像 (如 PNG, BMP) 的像素低位或高位中。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于位深度隐写术的命令行工具，可将任意文件隐藏在无损格式图像 (如 PNG, BMP) 的像素低位 (LSB) 或高位 (MSB) 中，并在之后恢复。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：encode (隐藏) 和 decode (恢复)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文件内容编码进无损格式图像。
    Encode(EncodeArgs),

    /// 从经过隐写的图像中解码出隐藏的数据。
    Decode(DecodeArgs),
}

/// 编解码器类型。
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    /// 使用每个通道的最低有效位。
    #[value(name = "LSB", alias = "lsb")]
    Lsb,

    /// 使用每个通道的最高有效位。
    #[value(name = "MSB", alias = "msb")]
    Msb,
}

impl From<CodecKind> for Alignment {
    fn from(kind: CodecKind) -> Self {
        match kind {
            CodecKind::Lsb => Alignment::Lsb,
            CodecKind::Msb => Alignment::Msb,
        }
    }
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// 使用的编解码器类型。
    #[arg(short, long, value_enum)]
    pub codec: CodecKind,

    /// 每个通道用于隐写的比特数 (1-8)。
    #[arg(short, long)]
    pub depth: u8,

    /// 要隐藏的数据文件路径。
    #[arg(short, long)]
    pub input: PathBuf,

    /// 用于隐写的载体图像路径 (如 PNG, BMP)。
    #[arg(short = 'm', long)]
    pub image: PathBuf,

    /// 结果图像的输出路径。缺省时为载体图像旁的 `doctored_<文件名>`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 编码时使用的编解码器类型。
    #[arg(short, long, value_enum)]
    pub codec: CodecKind,

    /// 编码时使用的隐写深度 (1-8)。
    #[arg(short, long)]
    pub depth: u8,

    /// 包含隐藏数据的图像路径。
    #[arg(short = 'm', long)]
    pub image: PathBuf,

    /// 恢复数据的输出路径。缺省时为图像旁的 `recovered_<文件名>.bin`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
