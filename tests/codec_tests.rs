use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use pgm_hide::codec::{
    decode_binary, decode_text, encode_binary, encode_text, read_binary_file, read_text_file,
    write_binary_file, write_text_file,
};
use pgm_hide::{Dimensions, Raster, RasterError};
use rand::{Rng, RngCore};
use tempfile::tempdir;

/// 一个辅助函数，用于创建一幅随机尺寸、随机像素的测试图像
fn random_raster() -> Raster {
    let mut rng = rand::rng();
    let dimensions = Dimensions::new(rng.random_range(1..=32), rng.random_range(1..=32)).unwrap();
    let mut samples = vec![0u8; dimensions.sample_count().unwrap()];
    rng.fill_bytes(&mut samples);
    Raster::from_samples(dimensions, samples).unwrap()
}

fn raster(width: u32, height: u32, samples: &[u8]) -> Raster {
    Raster::from_samples(Dimensions::new(width, height).unwrap(), samples.to_vec()).unwrap()
}

fn dims(width: u32, height: u32) -> Dimensions {
    Dimensions::new(width, height).unwrap()
}

/// 验证文本格式编码后再解码得到相同图像
#[test]
fn test_text_round_trip() -> anyhow::Result<()> {
    let original = random_raster();

    let mut encoded = Vec::new();
    encode_text(&original, &mut encoded)?;
    let decoded = decode_text(encoded.as_slice(), original.dimensions())?;

    assert_eq!(original, decoded);
    Ok(())
}

/// 验证二进制格式编码后再解码得到相同图像
#[test]
fn test_binary_round_trip() -> anyhow::Result<()> {
    let original = random_raster();

    let mut encoded = Vec::new();
    encode_binary(&original, &mut encoded)?;
    let decoded = decode_binary(encoded.as_slice(), original.dimensions())?;

    assert_eq!(original, decoded);
    Ok(())
}

/// 验证文本格式的精确输出：头部、署名注释、每行一个像素
#[test]
fn test_encode_text_layout() -> anyhow::Result<()> {
    let mut encoded = Vec::new();
    encode_text(&raster(2, 2, &[10, 20, 30, 40]), &mut encoded)?;

    assert_eq!(
        String::from_utf8(encoded)?,
        "P2\n# Created by pgm_hide\n2 2\n255\n10\n20\n30\n40\n"
    );
    Ok(())
}

/// 验证二进制格式的精确输出：ASCII 头部之后紧跟原始像素字节
#[test]
fn test_encode_binary_layout() -> anyhow::Result<()> {
    let mut encoded = Vec::new();
    encode_binary(&raster(3, 1, &[0, 10, 255]), &mut encoded)?;

    let mut expected = b"P5\n# Created by pgm_hide\n3 1\n255\n".to_vec();
    expected.extend_from_slice(&[0, 10, 255]);
    assert_eq!(encoded, expected);
    Ok(())
}

/// 像素数据以空白或 '#' 字节开头时，二进制解码不能把它们当作头部的一部分
#[test]
fn test_binary_payload_starting_with_header_like_bytes() -> anyhow::Result<()> {
    let original = raster(2, 2, &[b'\n', b'#', b' ', b'7']);

    let mut encoded = Vec::new();
    encode_binary(&original, &mut encoded)?;
    let decoded = decode_binary(encoded.as_slice(), dims(2, 2))?;

    assert_eq!(decoded.samples(), &[b'\n', b'#', b' ', b'7']);
    Ok(())
}

/// 验证多行注释和不规则空白都能被正确解析
#[test]
fn test_decode_text_with_comments_and_loose_whitespace() -> anyhow::Result<()> {
    let data = "P2\n# first comment\n# second comment\n3   2\n255\n1 2 3\n\n\t4\n5 6 7 8\n";
    let decoded = decode_text(data.as_bytes(), dims(3, 2))?;

    // 多余的尾部数据被忽略
    assert_eq!(decoded.samples(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(decoded.max_value(), 255);
    Ok(())
}

/// 超出 0..=255 的文本像素值按 256 取模截断
#[test]
fn test_decode_text_coerces_modulo_256() -> anyhow::Result<()> {
    let data = "P2\n3 1\n255\n-1 256 300\n";
    let decoded = decode_text(data.as_bytes(), dims(3, 1))?;

    assert_eq!(decoded.samples(), &[255, 0, 44]);
    Ok(())
}

/// 任意长度的数字串都按 256 取模，不受 64 位整数范围限制
#[test]
fn test_decode_text_coerces_arbitrarily_long_values() -> anyhow::Result<()> {
    let data = "P2\n4 1\n255\n18446744073709551615 4294967296 +257 -99999999999999999999999\n";
    let decoded = decode_text(data.as_bytes(), dims(4, 1))?;

    // 2^64 - 1 ≡ 255，2^32 ≡ 0，10^23 - 1 ≡ 255 (mod 256)，取负后为 1
    assert_eq!(decoded.samples(), &[255, 0, 1, 1]);
    Ok(())
}

/// 错误的格式标记应返回 Format 错误
#[test]
fn test_decode_rejects_wrong_tag() {
    let text = "P5\n2 1\n255\n1 2\n";
    let result = decode_text(text.as_bytes(), dims(2, 1));
    assert!(matches!(result, Err(RasterError::Format(_))));

    let binary = b"P2\n2 1\n255\n\x01\x02";
    let result = decode_binary(&binary[..], dims(2, 1));
    assert!(matches!(result, Err(RasterError::Format(_))));
}

/// 头部尺寸与期望尺寸不一致时应返回 Format 错误
#[test]
fn test_decode_rejects_dimension_mismatch() {
    let data = "P2\n2 2\n255\n1 2 3 4\n";
    let result = decode_text(data.as_bytes(), dims(4, 1));
    assert!(matches!(result, Err(RasterError::Format(_))));
}

/// 最大灰度值不是 255 时应返回 Format 错误
#[test]
fn test_decode_rejects_unsupported_max_value() {
    let data = "P2\n2 1\n65535\n1 2\n";
    let result = decode_text(data.as_bytes(), dims(2, 1));
    assert!(matches!(result, Err(RasterError::Format(_))));

    let data = b"P5\n2 1\n15\n\x01\x02";
    let result = decode_binary(&data[..], dims(2, 1));
    assert!(matches!(result, Err(RasterError::Format(_))));
}

/// 头部不完整或包含非数字字段时应返回 Format 错误
#[test]
fn test_decode_rejects_malformed_header() {
    let result = decode_text("P2\n2".as_bytes(), dims(2, 1));
    assert!(matches!(result, Err(RasterError::Format(_))));

    let result = decode_text("P2\ntwo 1\n255\n1 2\n".as_bytes(), dims(2, 1));
    assert!(matches!(result, Err(RasterError::Format(_))));

    let result = decode_text("".as_bytes(), dims(2, 1));
    assert!(matches!(result, Err(RasterError::Format(_))));
}

/// 非数字的像素记号应返回 Format 错误
#[test]
fn test_decode_text_rejects_non_numeric_sample() {
    let data = "P2\n2 1\n255\n1 x\n";
    let result = decode_text(data.as_bytes(), dims(2, 1));
    assert!(matches!(result, Err(RasterError::Format(_))));

    for token in ["-", "+", "1.5", "--3", "12a"] {
        let data = format!("P2\n1 1\n255\n{token}\n");
        let result = decode_text(data.as_bytes(), dims(1, 1));
        assert!(matches!(result, Err(RasterError::Format(_))), "token {token:?}");
    }
}

/// 像素数量不足时应返回 TruncatedData 错误，并报告期望与实际数量
#[test]
fn test_decode_rejects_truncated_data() {
    let data = "P2\n2 2\n255\n1 2 3\n";
    let result = decode_text(data.as_bytes(), dims(2, 2));
    assert!(matches!(
        result,
        Err(RasterError::TruncatedData {
            expected: 4,
            found: 3
        })
    ));

    let data = b"P5\n2 2\n255\n\x01\x02";
    let result = decode_binary(&data[..], dims(2, 2));
    assert!(matches!(
        result,
        Err(RasterError::TruncatedData {
            expected: 4,
            found: 2
        })
    ));
}

/// 验证文件读写辅助函数以及打开失败时的 Open 错误
#[test]
fn test_file_helpers() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let text_path = dir.path().join("image.pgm");
    let binary_path = dir.path().join("image_bin.pgm");
    let original = random_raster();

    write_text_file(&text_path, &original)?;
    write_binary_file(&binary_path, &original)?;

    assert_eq!(read_text_file(&text_path, original.dimensions())?, original);
    assert_eq!(read_binary_file(&binary_path, original.dimensions())?, original);

    let missing = dir.path().join("missing.pgm");
    let result = read_text_file(&missing, original.dimensions());
    assert!(matches!(result, Err(RasterError::Open { ref path, .. }) if *path == missing));

    let unwritable = dir.path().join("no_such_dir").join("out.pgm");
    let result = write_binary_file(&unwritable, &original);
    assert!(matches!(result, Err(RasterError::Open { .. })));

    Ok(())
}

/// 本工具写出的 P2/P5 文件可以被 `image` 库的 PNM 解码器读取
#[test]
fn test_output_readable_by_image_crate() -> anyhow::Result<()> {
    let original = random_raster();

    let mut binary = Vec::new();
    encode_binary(&original, &mut binary)?;
    let decoded = image::load_from_memory_with_format(&binary, ImageFormat::Pnm)?.to_luma8();
    assert_eq!(decoded.dimensions(), (original.width(), original.height()));
    assert_eq!(decoded.as_raw().as_slice(), original.samples());

    let mut text = Vec::new();
    encode_text(&original, &mut text)?;
    let decoded = image::load_from_memory_with_format(&text, ImageFormat::Pnm)?.to_luma8();
    assert_eq!(decoded.as_raw().as_slice(), original.samples());

    Ok(())
}

/// `image` 库写出的 P2/P5 文件可以被本工具读取
#[test]
fn test_reads_image_crate_output() -> anyhow::Result<()> {
    let original = random_raster();

    for (encoding, binary) in [(SampleEncoding::Binary, true), (SampleEncoding::Ascii, false)] {
        let mut encoded = Vec::new();
        PnmEncoder::new(&mut encoded)
            .with_subtype(PnmSubtype::Graymap(encoding))
            .write_image(
                original.samples(),
                original.width(),
                original.height(),
                ExtendedColorType::L8,
            )?;

        let decoded = if binary {
            decode_binary(encoded.as_slice(), original.dimensions())?
        } else {
            decode_text(encoded.as_slice(), original.dimensions())?
        };
        assert_eq!(decoded, original);
    }

    Ok(())
}

/// 验证尺寸与像素缓冲区的构造约束
#[test]
fn test_raster_construction_invariants() {
    assert!(matches!(
        Dimensions::new(0, 5),
        Err(RasterError::Format(_))
    ));

    let result = Raster::from_samples(dims(2, 2), vec![1, 2, 3]);
    assert!(matches!(
        result,
        Err(RasterError::LengthMismatch { left: 4, right: 3 })
    ));

    let blank = Raster::new(dims(3, 2)).unwrap();
    assert_eq!(blank.samples(), &[0; 6]);
    assert_eq!((blank.width(), blank.height()), (3, 2));
}
