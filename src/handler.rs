//! # 命令处理逻辑模块
//!
//! 包含处理 `embed` 和 `extract` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。
//! 任一阶段失败都会立即终止后续阶段，并返回说明失败阶段的错误信息。

use crate::cli::{EmbedArgs, ExtractArgs};
use crate::codec::{read_binary_file, read_text_file, write_binary_file, write_text_file};
use crate::constants::{EXTRACTED_PREFIX, PGM_EXTENSION, STEGO_PREFIX};
use crate::raster::Dimensions;
use crate::steganography::{embed_raster, extract};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// 根据输入文件生成默认输出路径：同目录下的 `<prefix><文件名>.pgm`。
fn default_output(source: &Path, prefix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{prefix}{stem}.{PGM_EXTENSION}"))
}

/// 未指定 `--force` 时拒绝覆盖已存在的输出文件。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'Embed' 命令的执行逻辑。
///
/// 依次读取封面图像和秘密图像、检查尺寸、嵌入秘密图像、以二进制格式保存隐写图像，
/// 然后从隐写图像中提取秘密图像并以文本格式保存。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和期望尺寸的 `EmbedArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 隐写图像与提取结果的输出路径相同。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取或解析封面图像或秘密图像。
/// * 两幅图像的尺寸不一致。
/// * 无法写入隐写图像或提取结果。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let dimensions = Dimensions::new(args.width, args.height)?;
    let stego_path = args
        .stego
        .unwrap_or_else(|| default_output(&args.cover, STEGO_PREFIX));
    let extracted_path = args
        .extracted
        .unwrap_or_else(|| default_output(&args.cover, EXTRACTED_PREFIX));

    anyhow::ensure!(
        stego_path != extracted_path,
        "The stego image and the extracted image cannot share the same path: {}",
        stego_path.to_string_lossy().red().bold()
    );
    ensure_writable(&stego_path, args.force)?;
    ensure_writable(&extracted_path, args.force)?;

    let mut cover = read_text_file(&args.cover, dimensions).with_context(|| {
        format!(
            "Unable to read cover image: {}",
            args.cover.to_string_lossy().red().bold()
        )
    })?;
    tracing::info!(path = %args.cover.display(), "cover image loaded");

    let secret = read_text_file(&args.secret, dimensions).with_context(|| {
        format!(
            "Unable to read secret image: {}",
            args.secret.to_string_lossy().red().bold()
        )
    })?;
    tracing::info!(path = %args.secret.display(), "secret image loaded");

    embed_raster(&mut cover, &secret)
        .with_context(|| "Image dimensions do not match. \nThe cover and secret images must be the same size.")?;

    write_binary_file(&stego_path, &cover).with_context(|| {
        format!(
            "Unable to save stego image: {}",
            stego_path.to_string_lossy().red().bold()
        )
    })?;
    tracing::info!(path = %stego_path.display(), "stego image saved");

    let extracted = extract(&cover)
        .with_context(|| "Failed to extract the secret image from the stego image.")?;

    write_text_file(&extracted_path, &extracted).with_context(|| {
        format!(
            "Unable to save extracted secret image: {}",
            extracted_path.to_string_lossy().red().bold()
        )
    })?;
    tracing::info!(path = %extracted_path.display(), "extracted image saved");

    println!(
        "The secret image has been successfully hidden and saved: {}",
        stego_path.to_string_lossy().green().bold()
    );
    println!(
        "The extracted secret image has been saved: {}",
        extracted_path.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 读取二进制格式的隐写图像，提取隐藏的高 4 位并以文本格式保存。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和期望尺寸的 `ExtractArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取或解析隐写图像。
/// * 无法写入提取结果。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let dimensions = Dimensions::new(args.width, args.height)?;
    let output_path = args
        .output
        .unwrap_or_else(|| default_output(&args.stego, EXTRACTED_PREFIX));

    ensure_writable(&output_path, args.force)?;

    let stego = read_binary_file(&args.stego, dimensions).with_context(|| {
        format!(
            "Unable to read stego image: {}. \nThe file may not be a binary PGM of the expected size.",
            args.stego.to_string_lossy().red().bold()
        )
    })?;
    tracing::info!(path = %args.stego.display(), "stego image loaded");

    let extracted = extract(&stego)
        .with_context(|| "Failed to extract the secret image from the stego image.")?;

    write_text_file(&output_path, &extracted).with_context(|| {
        format!(
            "Unable to save extracted secret image: {}",
            output_path.to_string_lossy().red().bold()
        )
    })?;
    tracing::info!(path = %output_path.display(), "extracted image saved");

    println!(
        "The secret image has been successfully extracted and saved: {}",
        output_path.to_string_lossy().green().bold()
    );

    Ok(())
}
