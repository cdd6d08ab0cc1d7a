//! # 半字节隐写模块
//!
//! 封面像素的低 4 位被替换为秘密像素的高 4 位；提取时把低 4 位移回高位，
//! 低 4 位补 0。这是有损的近似还原：秘密像素只有高 4 位能被恢复。

use crate::constants::{HIGH_NIBBLE_MASK, LOW_NIBBLE_MASK, NIBBLE_BITS};
use crate::error::{RasterError, Result};
use crate::raster::Raster;

fn ensure_same_len(left: &[u8], right: &[u8]) -> Result<()> {
    if left.len() != right.len() {
        return Err(RasterError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

/// 把 `secret` 每个字节的高 4 位写入 `cover` 对应字节的低 4 位。
///
/// `cover[i] = (cover[i] & 0xF0) | (secret[i] >> 4)`，封面原有的低 4 位被永久覆盖。
///
/// # Errors
///
/// 两个缓冲区长度不同时返回 [`RasterError::LengthMismatch`]，此时 `cover` 保持不变。
pub fn embed(cover: &mut [u8], secret: &[u8]) -> Result<()> {
    ensure_same_len(cover, secret)?;

    for (pixel, &hidden) in cover.iter_mut().zip(secret) {
        *pixel = (*pixel & HIGH_NIBBLE_MASK) | (hidden >> NIBBLE_BITS);
    }

    tracing::trace!(samples = cover.len(), "embedded secret nibbles");
    Ok(())
}

/// 从 `stego` 中取出隐藏的半字节写入 `output`：`output[i] = (stego[i] & 0x0F) << 4`。
///
/// # Errors
///
/// 两个缓冲区长度不同时返回 [`RasterError::LengthMismatch`]。
pub fn extract_into(stego: &[u8], output: &mut [u8]) -> Result<()> {
    ensure_same_len(stego, output)?;

    for (pixel, &carrier) in output.iter_mut().zip(stego) {
        *pixel = (carrier & LOW_NIBBLE_MASK) << NIBBLE_BITS;
    }

    tracing::trace!(samples = stego.len(), "extracted secret nibbles");
    Ok(())
}

/// 在整幅图像上执行 [`embed`]，额外要求两幅图像宽高完全一致。
///
/// # Errors
///
/// 宽或高不一致时返回 [`RasterError::DimensionMismatch`]。
pub fn embed_raster(cover: &mut Raster, secret: &Raster) -> Result<()> {
    if cover.dimensions() != secret.dimensions() {
        return Err(RasterError::DimensionMismatch {
            left_width: cover.width(),
            left_height: cover.height(),
            right_width: secret.width(),
            right_height: secret.height(),
        });
    }
    embed(cover.samples_mut(), secret.samples())
}

/// 从隐写图像中提取秘密图像的近似值。
///
/// 结果中每个像素的低 4 位恒为 0，这是预期行为：嵌入时只保存了高 4 位。
/// 输出图像按隐写图像的尺寸分配，长度检查因此总能通过。
pub fn extract(stego: &Raster) -> Result<Raster> {
    let mut output = Raster::new(stego.dimensions())?;
    extract_into(stego.samples(), output.samples_mut())?;
    Ok(output)
}
