use epi_disparity_rs::light_field::container::{make, parse, payload_view};
use epi_disparity_rs::light_field::{
    FixedPointFormat, FrameStack, ImageBlob, LightFieldPipeline, PipelineConfig,
    ReferenceDisparity, SampleEncoding,
};

fn rgb_stack(views: usize, w: u32, h: u32, f: impl Fn(usize, usize, usize) -> u8) -> FrameStack {
    let frames = (0..views)
        .map(|a| {
            let mut data = Vec::with_capacity((w * h * 3) as usize);
            for y in 0..h as usize {
                for x in 0..w as usize {
                    let v = f(a, x, y);
                    data.extend_from_slice(&[v, v, v]);
                }
            }
            ImageBlob::new(w, h, 3, SampleEncoding::U8, data).unwrap()
        })
        .collect();
    FrameStack::new(frames).unwrap()
}

fn signed(blob: &ImageBlob) -> Vec<i64> {
    let q = FixedPointFormat::default();
    let mut out = Vec::new();
    for y in 0..blob.height() as usize {
        for x in 0..blob.width() as usize {
            out.push(blob.fixed_value(x, y, 0, &q));
        }
    }
    out
}

fn textured(a: usize, x: usize, y: usize) -> u8 {
    ((x * 13 + y * 7 + a * (x + 3)) % 200 + 20) as u8
}

/// Increasing along both image axes and across views.
fn sloped(a: usize, x: usize, y: usize) -> u8 {
    (x * x * 2 + y * 5 + a * (x + 3) + 10) as u8
}

#[test]
fn container_round_trip() {
    let payload: Vec<u8> = (0..2 * 3 * 3 * 3).map(|i| i as u8).collect();
    let bytes = make(2, 3, 3, SampleEncoding::FixedU24, &payload).unwrap();

    assert_eq!(&bytes[..4], b"IMGB");
    assert_eq!(&bytes[14..16], &[0, 0]);
    assert_eq!(payload_view(&bytes).unwrap(), payload.as_slice());

    let blob = parse(&bytes).unwrap();
    assert_eq!((blob.width(), blob.height(), blob.channels()), (2, 3, 3));
    assert_eq!(blob.to_bytes(), bytes);
}

#[test]
fn uniform_angular_ramp() {
    let stack = rgb_stack(3, 6, 5, |a, _, _| (a * 10) as u8);
    let pipeline = LightFieldPipeline::new(PipelineConfig::default()).unwrap();
    let out = pipeline.run(&stack, &stack).unwrap();

    let step = 10 << 12;
    assert!(signed(&out.confidence.horizontal).iter().all(|&c| c == step));
    assert!(signed(&out.confidence.vertical).iter().all(|&c| c == step));
    assert!(signed(&out.c_avg).iter().all(|&c| c == step));

    // no spatial gradient: the slope vanishes and the half-unit rounding
    // offset of the mean leaves disparity at 1.5 / d
    assert!(signed(&out.z_h).iter().all(|&z| z == 6144));
    assert!(signed(&out.z_v).iter().all(|&z| z == 6144));
    // equal weights of one, eps of one LSB: 2 * 6144 / (2 + 1/4096)
    assert!(signed(&out.z_conf).iter().all(|&z| z == 6143));
}

#[test]
fn runs_are_deterministic() {
    let h = rgb_stack(5, 12, 9, textured);
    let v = rgb_stack(7, 12, 9, |a, x, y| textured(a, y, x));
    let pipeline = LightFieldPipeline::new(PipelineConfig::default()).unwrap();

    let first = pipeline.run(&h, &v).unwrap();
    let second = pipeline.run(&h, &v).unwrap();
    assert_eq!(first.z_conf.to_bytes(), second.z_conf.to_bytes());
    assert_eq!(first.c_avg.to_bytes(), second.c_avg.to_bytes());
}

#[test]
fn reference_estimator_tracks_fixed_point() {
    let stack = rgb_stack(5, 10, 8, sloped);
    let config = PipelineConfig::default();

    let fixed = LightFieldPipeline::new(config.clone()).unwrap().run(&stack, &stack).unwrap();
    let reference = LightFieldPipeline::with_custom(ReferenceDisparity::new(config.format), config)
        .unwrap()
        .run(&stack, &stack)
        .unwrap();

    assert_eq!(fixed.c_avg, reference.c_avg);
    for (f, r) in signed(&fixed.z_h).iter().zip(&signed(&reference.z_h)) {
        assert!((f - r).abs() <= 3, "horizontal: fixed {} vs reference {}", f, r);
    }
    for (f, r) in signed(&fixed.z_v).iter().zip(&signed(&reference.z_v)) {
        assert!((f - r).abs() <= 3, "vertical: fixed {} vs reference {}", f, r);
    }
}

#[test]
fn mismatched_stacks_are_rejected() {
    let h = rgb_stack(3, 6, 5, textured);
    let v = rgb_stack(3, 5, 6, textured);
    let pipeline = LightFieldPipeline::new(PipelineConfig::default()).unwrap();

    let err = pipeline.run(&h, &v).unwrap_err();
    assert!(err.is_format_error());
}
