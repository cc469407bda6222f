use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use crate::depth_pipeline::common::error::{ConversionError, FormatError, Result};
use crate::depth_pipeline::conversions::NpyToTiffPipeline;
use crate::depth_pipeline::npy::tests::{f32_payload, npy_bytes};
use crate::depth_pipeline::npy::{DecodedField, FieldReader, NpyReader};
use crate::depth_pipeline::tiff::{ConversionConfig, ImageWriter, OutputMode, StandardTiffWriter, TiffCompression};
use crate::depth_pipeline::visualize::{ColorImage, ColorMap, pack_argb};

struct MockReader {
    should_fail: bool,
    payload: Vec<u8>,
}

impl MockReader {
    fn mono(height: usize, width: usize) -> Self {
        let values: Vec<f32> = (0..height * width).map(|i| i as f32).collect();
        Self {
            should_fail: false,
            payload: npy_bytes("<f4", false, &[height, width], &f32_payload(&values)),
        }
    }
}

impl FieldReader for MockReader {
    fn read_field(&self, _data: &[u8]) -> Result<DecodedField> {
        if self.should_fail {
            return Err(FormatError::BadMagic.into());
        }
        NpyReader.read_field(&self.payload)
    }
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<ColorImage>>>,
}

impl MockWriter {
    fn new(should_fail: bool) -> (Self, Arc<Mutex<Vec<ColorImage>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                should_fail,
                written: written.clone(),
            },
            written,
        )
    }
}

impl ImageWriter for MockWriter {
    fn write_image(&self, image: &ColorImage, _output: &mut dyn Write, _config: &ConversionConfig) -> Result<()> {
        if self.should_fail {
            return Err(ConversionError::EncodeError("Mock encode error".to_string()));
        }
        self.written.lock().unwrap().push(image.clone());
        Ok(())
    }
}

#[test]
fn test_config_builder() {
    let config = ConversionConfig::builder()
        .output_mode(OutputMode::Colorized(ColorMap::Grayscale))
        .compression(TiffCompression::Deflate)
        .validate_dimensions(false)
        .max_dimension(Some(1024))
        .build();

    assert_eq!(config.output_mode, OutputMode::Colorized(ColorMap::Grayscale));
    assert_eq!(config.compression, TiffCompression::Deflate);
    assert!(!config.validate_dimensions);
    assert_eq!(config.max_dimension, Some(1024));

    let default = ConversionConfig::builder().build();
    assert_eq!(default.output_mode, OutputMode::Native);
    assert!(default.validate_dimensions);
}

#[test]
fn test_successful_conversion() {
    let (writer, written) = MockWriter::new(false);
    let pipeline = NpyToTiffPipeline::with_custom(MockReader::mono(2, 2), writer, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let timings = pipeline.convert_with_timings(b"ignored", &mut output).unwrap();

    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!((written[0].width(), written[0].height()), (2, 2));
    for step in ["decode_npy", "validate_dimensions", "render", "encode_tiff"] {
        assert!(timings.get_step(step).is_some(), "missing step {step}");
    }
    assert_eq!(timings.steps().len(), 4);
}

#[test]
fn test_colorized_mono_output() {
    let (writer, written) = MockWriter::new(false);
    let config = ConversionConfig::builder()
        .output_mode(OutputMode::Colorized(ColorMap::Ramp))
        .build();
    let pipeline = NpyToTiffPipeline::with_custom(MockReader::mono(2, 2), writer, config);

    pipeline.convert(b"ignored", &mut Cursor::new(Vec::new())).unwrap();

    let written = written.lock().unwrap();
    let image = &written[0];
    assert_eq!(image.rgba(0, 0), Some([0, 0, 255, 255]));
    assert_eq!(image.rgba(1, 1), Some([255, 0, 0, 255]));
}

#[test]
fn test_colorized_rgb_uses_red_channel() {
    let pipeline = NpyToTiffPipeline::new(
        ConversionConfig::builder()
            .output_mode(OutputMode::Colorized(ColorMap::Ramp))
            .build(),
    );
    let bytes = npy_bytes("|u1", false, &[1, 2, 3], &[0, 255, 255, 200, 0, 0]);

    let image = pipeline.render(&bytes).unwrap();

    assert_eq!(image.pixels(), &[pack_argb(0, 0, 255), pack_argb(255, 0, 0)]);
}

#[test]
fn test_reader_failure() {
    let (writer, written) = MockWriter::new(false);
    let reader = MockReader {
        should_fail: true,
        payload: Vec::new(),
    };
    let pipeline = NpyToTiffPipeline::with_custom(reader, writer, ConversionConfig::default());

    let result = pipeline.convert(b"NOTNPY", &mut Cursor::new(Vec::new()));

    assert!(matches!(
        result.unwrap_err(),
        ConversionError::Format(FormatError::BadMagic)
    ));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let (writer, _) = MockWriter::new(true);
    let pipeline = NpyToTiffPipeline::with_custom(MockReader::mono(2, 2), writer, ConversionConfig::default());

    let result = pipeline.convert(b"ignored", &mut Cursor::new(Vec::new()));

    assert!(matches!(result.unwrap_err(), ConversionError::EncodeError(_)));
}

#[test]
fn test_dimension_validation_failure() {
    let (writer, written) = MockWriter::new(false);
    let config = ConversionConfig::builder().max_dimension(Some(3)).build();
    let pipeline = NpyToTiffPipeline::with_custom(MockReader::mono(2, 4), writer, config);

    let result = pipeline.convert(b"ignored", &mut Cursor::new(Vec::new()));

    assert!(matches!(result.unwrap_err(), ConversionError::InvalidDimensions(4, 2)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_empty_image_rejected_unless_validation_disabled() {
    let (writer, _) = MockWriter::new(false);
    let pipeline = NpyToTiffPipeline::with_custom(MockReader::mono(0, 3), writer, ConversionConfig::default());
    assert!(matches!(
        pipeline.render(b"ignored"),
        Err(ConversionError::InvalidDimensions(3, 0))
    ));

    let (writer, _) = MockWriter::new(false);
    let config = ConversionConfig::builder().validate_dimensions(false).build();
    let pipeline = NpyToTiffPipeline::with_custom(MockReader::mono(0, 3), writer, config);
    assert!(pipeline.render(b"ignored").is_ok());
}

#[test]
fn test_tiff_output_is_written() {
    for compression in [TiffCompression::None, TiffCompression::Lzw, TiffCompression::Deflate] {
        let config = ConversionConfig::builder().compression(compression).build();
        let pipeline = NpyToTiffPipeline::with_custom(NpyReader, StandardTiffWriter, config);
        let bytes = npy_bytes("<f4", false, &[4, 5], &f32_payload(&[1.0; 20]));

        let mut output = Cursor::new(Vec::new());
        pipeline.convert(&bytes, &mut output).unwrap();

        let tiff = output.into_inner();
        assert!(tiff.starts_with(b"II*\0") || tiff.starts_with(b"MM\0*"));
    }
}

#[test]
fn test_convert_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("depth.npy");
    let output = dir.path().join("depth.tiff");
    std::fs::write(&input, npy_bytes("<f4", false, &[3, 3], &f32_payload(&[0.5; 9]))).unwrap();

    NpyToTiffPipeline::new(ConversionConfig::default())
        .convert_file(&input, &output)
        .unwrap();

    assert!(std::fs::metadata(&output).unwrap().len() > 0);
}

#[test]
fn test_convert_file_failure_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.npy");
    let output = dir.path().join("broken.tiff");
    std::fs::write(&input, b"NOTNPY...").unwrap();

    let result = NpyToTiffPipeline::new(ConversionConfig::default()).convert_file(&input, &output);

    assert!(matches!(result, Err(ConversionError::Format(FormatError::BadMagic))));
    assert!(!output.exists());
}

#[test]
fn test_convert_file_with_timings() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("depth.npy");
    let output = dir.path().join("depth.tiff");
    std::fs::write(&input, npy_bytes("<f4", false, &[2, 2], &f32_payload(&[0.0, 1.0, 2.0, 3.0]))).unwrap();

    let timings = NpyToTiffPipeline::new(ConversionConfig::default())
        .convert_file_with_timings(&input, &output)
        .unwrap();

    assert!(timings.get_step("read_input_file").is_some());
    assert!(timings.get_step("decode_npy").is_some());
    assert!(timings.get_step("write_output_file").is_some());
    assert!(std::fs::metadata(&output).unwrap().len() > 0);
}

#[test]
fn test_convert_file_with_timings_failure_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.npy");
    let output = dir.path().join("broken.tiff");
    std::fs::write(&input, b"NOTNPY...").unwrap();

    let result = NpyToTiffPipeline::new(ConversionConfig::default()).convert_file_with_timings(&input, &output);

    assert!(matches!(result, Err(ConversionError::Format(FormatError::BadMagic))));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = NpyToTiffPipeline::new(ConversionConfig::default())
        .convert_file(dir.path().join("absent.npy"), dir.path().join("out.tiff"));

    assert!(matches!(result, Err(ConversionError::InputReadError(_))));
}
