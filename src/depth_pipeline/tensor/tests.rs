use crate::depth_pipeline::common::error::ConversionError;
use crate::depth_pipeline::tensor::{IMAGENET_MEAN, IMAGENET_STD, ModelInputs};
use crate::depth_pipeline::visualize::{ColorImage, ColorMap, DepthField, colorize, pack_argb};

#[test]
fn test_output_tensor_shapes() {
    let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

    let shapes: [&[usize]; 3] = [&[2, 3], &[1, 2, 3], &[1, 1, 2, 3]];
    for shape in shapes {
        let field = DepthField::from_tensor(&data, shape).unwrap();
        assert_eq!((field.width(), field.height()), (3, 2));
        assert_eq!(field.values(), &data);
    }
}

#[test]
fn test_output_tensor_rejects_batches_and_short_buffers() {
    assert!(matches!(
        DepthField::from_tensor(&[0.0; 8], &[2, 2, 2]),
        Err(ConversionError::ShapeMismatch(_))
    ));
    assert!(matches!(
        DepthField::from_tensor(&[0.0; 3], &[1, 2, 2]),
        Err(ConversionError::ShapeMismatch(_))
    ));
    assert!(matches!(
        DepthField::from_tensor(&[0.0; 3], &[3]),
        Err(ConversionError::ShapeMismatch(_))
    ));
}

#[test]
fn test_output_tensor_ignores_extra_values() {
    let field = DepthField::from_tensor(&[1.0, 2.0, 9.0], &[1, 1, 2]).unwrap();
    assert_eq!(field.values(), &[1.0, 2.0]);
}

#[test]
fn test_output_tensor_visualized() {
    let field = DepthField::from_tensor(&[0.5, 2.5], &[1, 1, 1, 2]).unwrap();
    let image = colorize(&field, ColorMap::Grayscale);

    assert_eq!(image.rgba(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(image.rgba(1, 0), Some([255, 255, 255, 255]));
}

#[test]
fn test_prepare_inputs() {
    let rgb = ColorImage::new(2, 1, vec![pack_argb(255, 0, 0), pack_argb(0, 255, 51)]).unwrap();
    let prior = ColorImage::new(2, 1, vec![pack_argb(0, 9, 9), pack_argb(255, 0, 0)]).unwrap();

    let inputs = ModelInputs::prepare(&rgb, &prior).unwrap();

    assert_eq!(inputs.rgb_shape(), [1, 3, 1, 2]);
    assert_eq!(inputs.prior_shape(), [1, 1, 2]);
    assert_eq!(inputs.rgb.len(), 6);

    let expected_r0 = (1.0 - IMAGENET_MEAN[0]) / IMAGENET_STD[0];
    let expected_g1 = (1.0 - IMAGENET_MEAN[1]) / IMAGENET_STD[1];
    let expected_b0 = (0.0 - IMAGENET_MEAN[2]) / IMAGENET_STD[2];
    assert!((inputs.rgb[0] - expected_r0).abs() < 1e-5);
    assert!((inputs.rgb[2 + 1] - expected_g1).abs() < 1e-5);
    assert!((inputs.rgb[4] - expected_b0).abs() < 1e-5);

    assert_eq!(inputs.prior_depth, vec![0.0, 1.0]);
}

#[test]
fn test_prepare_inputs_size_mismatch() {
    let rgb = ColorImage::new(2, 1, vec![0; 2]).unwrap();
    let prior = ColorImage::new(1, 2, vec![0; 2]).unwrap();

    assert!(matches!(
        ModelInputs::prepare(&rgb, &prior),
        Err(ConversionError::ShapeMismatch(_))
    ));
}

#[test]
fn test_prepare_resized_inputs() {
    let white = pack_argb(255, 255, 255);
    let rgb = ColorImage::new(3, 2, vec![white; 6]).unwrap();
    let prior = ColorImage::new(1, 1, vec![pack_argb(255, 0, 0)]).unwrap();

    assert!(matches!(
        ModelInputs::prepare(&rgb, &prior),
        Err(ConversionError::ShapeMismatch(_))
    ));

    let inputs = ModelInputs::prepare_resized(&rgb, &prior, 4).unwrap();
    assert_eq!(inputs.rgb_shape(), [1, 3, 4, 4]);
    assert_eq!(inputs.prior_shape(), [1, 4, 4]);
    assert!(inputs.prior_depth.iter().all(|&v| (v - 1.0).abs() < 1e-6));

    let expected_r = (1.0 - IMAGENET_MEAN[0]) / IMAGENET_STD[0];
    assert!(inputs.rgb[..16].iter().all(|&v| (v - expected_r).abs() < 1e-4));
}

#[test]
fn test_prepare_resized_rejects_empty_image() {
    let empty = ColorImage::new(0, 0, Vec::new()).unwrap();
    let prior = ColorImage::new(1, 1, vec![0]).unwrap();

    assert!(matches!(
        ModelInputs::prepare_resized(&empty, &prior, 4),
        Err(ConversionError::InvalidDimensions(0, 0))
    ));
}
