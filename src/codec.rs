//! # PGM 编解码模块
//!
//! 在磁盘上的两种灰度图编码与内存中的 [`Raster`] 之间转换：
//!
//! * `P2` 文本格式：ASCII 头部，随后是以空白分隔的十进制像素值。
//! * `P5` 二进制格式：同样的 ASCII 头部，最后一个头部字段后紧跟一个空白字节，
//!   然后是行优先的原始像素字节。
//!
//! 解码要么完整成功，要么失败且不返回任何图像。解码器会检查头部声明的尺寸
//! 是否与调用方期望的尺寸一致，并且只接受最大灰度值 255。

use crate::constants::{ATTRIBUTION_COMMENT, BINARY_MAGIC, MAX_VALUE, TEXT_MAGIC};
use crate::error::{RasterError, Result};
use crate::raster::{Dimensions, Raster};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// 以空白分隔的记号读取器。
struct Tokens<R> {
    reader: R,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = match self.reader.fill_buf()?.first() {
            Some(&byte) => byte,
            None => return Ok(None),
        };
        self.reader.consume(1);
        Ok(Some(byte))
    }

    fn skip_line(&mut self) -> io::Result<()> {
        while let Some(byte) = self.next_byte()? {
            if byte == b'\n' {
                break;
            }
        }
        Ok(())
    }

    /// 读取下一个记号，并且只消费紧随其后的一个空白字节。
    ///
    /// 二进制格式依赖这一点：最大灰度值之后的单个空白字节之后就是像素数据。
    fn next_token(&mut self, skip_comments: bool) -> io::Result<Option<String>> {
        let mut token = Vec::new();
        while let Some(byte) = self.next_byte()? {
            match byte {
                b'#' if skip_comments && token.is_empty() => self.skip_line()?,
                byte if byte.is_ascii_whitespace() => {
                    if !token.is_empty() {
                        break;
                    }
                }
                byte => token.push(byte),
            }
        }

        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(String::from_utf8_lossy(&token).into_owned()))
        }
    }

    fn header_token(&mut self, field: &str) -> Result<String> {
        self.next_token(true)?
            .ok_or_else(|| RasterError::format(format!("header ended before the {field}")))
    }

    fn header_number(&mut self, field: &str) -> Result<u32> {
        let token = self.header_token(field)?;
        token
            .parse()
            .map_err(|_| RasterError::format(format!("{field} is not a number: {token:?}")))
    }

    /// 校验头部：格式标记、尺寸与期望一致、最大灰度值为 255。
    fn read_header(&mut self, magic: &str, expected: Dimensions) -> Result<()> {
        let tag = self.header_token("format tag")?;
        if tag != magic {
            return Err(RasterError::format(format!(
                "expected format tag {magic}, found {tag:?}"
            )));
        }

        let width = self.header_number("width")?;
        let height = self.header_number("height")?;
        let max_value = self.header_number("maximum value")?;

        if width != expected.width || height != expected.height {
            return Err(RasterError::format(format!(
                "image is {width}x{height}, expected {}x{}",
                expected.width, expected.height
            )));
        }
        if max_value != MAX_VALUE {
            return Err(RasterError::format(format!(
                "unsupported maximum value {max_value}, only {MAX_VALUE} is supported"
            )));
        }

        tracing::debug!(magic, width, height, max_value, "parsed PGM header");
        Ok(())
    }
}

/// 把一个文本像素记号转换为字节。
///
/// 超出 0..=255 的值按 256 取模截断 (`-1` → 255，`300` → 44)，
/// 与按字节宽度扫描数值的行为一致，这里不做范围校验。
/// 数字逐位以 `u8` 回绕运算折叠，因此任意长度的数字串都能得到正确的模 256 结果。
fn coerce_sample(token: &str) -> Result<u8> {
    let (negative, digits) = match token.as_bytes() {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        digits => (false, digits),
    };
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(RasterError::format(format!(
            "pixel value is not a number: {token:?}"
        )));
    }

    let value = digits
        .iter()
        .fold(0u8, |acc, &digit| acc.wrapping_mul(10).wrapping_add(digit - b'0'));
    Ok(if negative { value.wrapping_neg() } else { value })
}

/// 从 `P2` 文本格式的数据流中解码一幅图像。
///
/// # Errors
///
/// * 格式标记不是 `P2`、尺寸与 `expected` 不符或最大灰度值不是 255 时返回 [`RasterError::Format`]。
/// * 像素数量少于 `width * height` 时返回 [`RasterError::TruncatedData`]。
pub fn decode_text<R: BufRead>(source: R, expected: Dimensions) -> Result<Raster> {
    let mut tokens = Tokens::new(source);
    tokens.read_header(TEXT_MAGIC, expected)?;

    let count = expected.sample_count()?;
    let mut samples = Vec::with_capacity(count);
    while samples.len() < count {
        let Some(token) = tokens.next_token(false)? else {
            return Err(RasterError::TruncatedData {
                expected: count,
                found: samples.len(),
            });
        };
        samples.push(coerce_sample(&token)?);
    }

    Raster::from_samples(expected, samples)
}

/// 从 `P5` 二进制格式的数据流中解码一幅图像。
///
/// # Errors
///
/// 与 [`decode_text`] 相同；像素字节不足时返回 [`RasterError::TruncatedData`]。
pub fn decode_binary<R: BufRead>(source: R, expected: Dimensions) -> Result<Raster> {
    let mut tokens = Tokens::new(source);
    tokens.read_header(BINARY_MAGIC, expected)?;

    let count = expected.sample_count()?;
    let mut samples = Vec::with_capacity(count);
    (&mut tokens.reader)
        .take(count as u64)
        .read_to_end(&mut samples)?;

    if samples.len() < count {
        return Err(RasterError::TruncatedData {
            expected: count,
            found: samples.len(),
        });
    }

    Raster::from_samples(expected, samples)
}

fn write_header<W: Write>(destination: &mut W, magic: &str, raster: &Raster) -> io::Result<()> {
    write!(
        destination,
        "{magic}\n{ATTRIBUTION_COMMENT}\n{} {}\n{}\n",
        raster.width(),
        raster.height(),
        raster.max_value()
    )
}

/// 以 `P2` 文本格式写出图像，每行一个十进制像素值。
///
/// 写入中途失败时不会回滚，目标可能只包含部分数据，由调用方负责清理。
pub fn encode_text<W: Write>(raster: &Raster, mut destination: W) -> Result<()> {
    write_header(&mut destination, TEXT_MAGIC, raster)?;
    for sample in raster.samples() {
        writeln!(destination, "{sample}")?;
    }
    Ok(())
}

/// 以 `P5` 二进制格式写出图像：ASCII 头部之后紧跟连续的原始像素字节。
pub fn encode_binary<W: Write>(raster: &Raster, mut destination: W) -> Result<()> {
    write_header(&mut destination, BINARY_MAGIC, raster)?;
    destination.write_all(raster.samples())?;
    Ok(())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| RasterError::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| RasterError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// 读取 `P2` 文本格式的图像文件。
pub fn read_text_file(path: impl AsRef<Path>, expected: Dimensions) -> Result<Raster> {
    let path = path.as_ref();
    let raster = decode_text(open(path)?, expected)?;
    tracing::debug!(path = %path.display(), "read text PGM");
    Ok(raster)
}

/// 读取 `P5` 二进制格式的图像文件。
pub fn read_binary_file(path: impl AsRef<Path>, expected: Dimensions) -> Result<Raster> {
    let path = path.as_ref();
    let raster = decode_binary(open(path)?, expected)?;
    tracing::debug!(path = %path.display(), "read binary PGM");
    Ok(raster)
}

/// 以 `P2` 文本格式写出图像文件。
pub fn write_text_file(path: impl AsRef<Path>, raster: &Raster) -> Result<()> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    encode_text(raster, &mut writer)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), samples = raster.samples().len(), "wrote text PGM");
    Ok(())
}

/// 以 `P5` 二进制格式写出图像文件。
pub fn write_binary_file(path: impl AsRef<Path>, raster: &Raster) -> Result<()> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    encode_binary(raster, &mut writer)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), samples = raster.samples().len(), "wrote binary PGM");
    Ok(())
}
