//! # 子命令执行
//!
//! 每个子命令按固定顺序执行：先构造编解码器 (非法深度在此失败)，
//! 再确定输出路径并做覆盖检查，然后才读取载体图像与负载文件，
//! 最后写出结果。容量不足等编解码错误原样向上传递，不会留下半成品文件。

use crate::carrier::Carrier;
use crate::cli::{DecodeArgs, EncodeArgs};
use crate::codec::Codec;
use crate::constants::{ENCODED_PREFIX, RECOVERED_EXTENSION, RECOVERED_PREFIX};
use crate::pixels::PixelGrid;
use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Encode' 命令的执行逻辑。
///
/// 负责校验编解码器配置、读取载体图像和数据文件、调用隐写核心函数嵌入数据，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含编解码器配置与输入/输出路径的 `EncodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 隐写深度不在 1 到 8 之间。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或数据文件，或图像不是受支持的 8 位格式。
/// * 图像没有足够的空间来隐藏数据。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let codec = Codec::new(args.codec.into(), args.depth)?;

    let dest = match args.output {
        Some(path) => path,
        None => default_encoded_path(&args.image)?,
    };
    ensure_writable(&dest, args.force)?;

    let mut picture = Carrier::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let payload = fs::read(&args.input).with_context(|| {
        format!(
            "Unable to read input file: {}",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    debug!(
        "Carrier {}x{} ({} pixels) with channels {:?}, payload {} bytes",
        picture.width(),
        picture.height(),
        picture.pixel_count(),
        picture.channel_names(),
        payload.len()
    );

    let summary = codec.encode(&mut picture, &payload)?;

    info!(
        "Wrote {} of {} available bits into {} samples",
        summary.bits_written, summary.capacity, summary.samples_touched
    );

    picture.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The data has been successfully encoded and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数取回负载，
/// 最后将恢复的数据写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含编解码器配置与输入/输出路径的 `DecodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 隐写深度不在 1 到 8 之间。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件，或图像太小，无法包含长度头部。
/// * 无法写入到目标文件。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let codec = Codec::new(args.codec.into(), args.depth)?;

    let dest = match args.output {
        Some(path) => path,
        None => default_recovered_path(&args.image)?,
    };
    ensure_writable(&dest, args.force)?;

    let picture = Carrier::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let payload = codec.decode(&picture).with_context(|| {
        format!(
            "Failed to recover data from '{}'. \nThe image may not contain hidden data or is too small.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    info!("Recovered {} bytes", payload.len());

    fs::write(&dest, payload).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The data has been successfully decoded and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 载体图像同目录下的 `doctored_<文件名>`。
fn default_encoded_path(image: &Path) -> Result<PathBuf> {
    let name = image.file_name().with_context(|| {
        format!(
            "Image path has no file name: {}",
            image.to_string_lossy().red().bold()
        )
    })?;
    Ok(image.with_file_name(format!("{ENCODED_PREFIX}{}", name.to_string_lossy())))
}

/// 图像同目录下的 `recovered_<文件名主干>.bin`。
fn default_recovered_path(image: &Path) -> Result<PathBuf> {
    let stem = image.file_stem().with_context(|| {
        format!(
            "Image path has no file name: {}",
            image.to_string_lossy().red().bold()
        )
    })?;
    Ok(image.with_file_name(format!(
        "{RECOVERED_PREFIX}{}.{RECOVERED_EXTENSION}",
        stem.to_string_lossy()
    )))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}
