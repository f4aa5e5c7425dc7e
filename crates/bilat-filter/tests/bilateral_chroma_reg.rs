//! Bilateral filtering regression test (luma-guided chroma)
//!
//! The chroma driver windows luma with the two chroma channels; luma only
//! steers the weights and is copied through.

use bilat_core::{ChromaLayout, Image16, PlaneLayout, Samples, SamplesMut};
use bilat_filter::{
    BilateralOptions, PassStrategy, SpatialKernel, bilateral_chroma, filter_chroma,
    filter_chroma_same_size,
};
use bilat_test::{RegParams, generators};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn bilateral_chroma_reg_luma_passthrough() {
    init_logging();
    let mut rp = RegParams::new("bilateral_chroma_luma");

    let img = generators::random(21, 15, 3, 2024).expect("random");
    let kernel = SpatialKernel::gaussian(3, 1.5).expect("kernel");
    for strategy in [PassStrategy::Separable, PassStrategy::NonSeparable] {
        let opts = BilateralOptions::new(2.0).with_strategy(strategy);
        let out = filter_chroma(&img, &kernel, &opts).expect("filter_chroma");
        let luma_in = img.channel(0).expect("channel");
        let luma_out = out.channel(0).expect("channel");
        let expected = luma_in.crop(3, 3, 15, 9).expect("crop");
        rp.compare_images(&expected, &luma_out);
    }

    assert!(rp.cleanup(), "bilateral_chroma_luma regression test failed");
}

#[test]
fn bilateral_chroma_reg_flat_chroma() {
    init_logging();
    let mut rp = RegParams::new("bilateral_chroma_flat");

    // Luma varies wildly, chroma is constant: chroma must stay constant
    let luma = generators::random(12, 10, 1, 5).expect("random");
    let a = generators::flat(12, 10, 1, 0x7000).expect("flat");
    let b = generators::flat(12, 10, 1, 0x9100).expect("flat");
    let img = Image16::from_planes(&[&luma, &a, &b]).expect("planes");
    let kernel = SpatialKernel::uniform(2);
    for vectorize in [false, true] {
        let opts = BilateralOptions::new(1.0).with_vectorize(vectorize);
        let out = filter_chroma(&img, &kernel, &opts).expect("filter_chroma");
        let oa = out.channel(1).expect("channel");
        let ob = out.channel(2).expect("channel");
        rp.compare_samples(&vec![0x7000; oa.data().len()], oa.data(), 0);
        rp.compare_samples(&vec![0x9100; ob.data().len()], ob.data(), 0);
    }

    assert!(rp.cleanup(), "bilateral_chroma_flat regression test failed");
}

/// Chroma noise is smoothed within a luma region but never averaged across
/// a strong luma edge.
#[test]
fn bilateral_chroma_reg_luma_edge() {
    init_logging();
    let mut rp = RegParams::new("bilateral_chroma_edge");

    let (w, h) = (24, 16);
    let luma = generators::step_edge(w, h, 0x0800, 0xf000).expect("step");
    let a = generators::add_noise(&generators::step_edge(w, h, 20000, 40000).expect("a"), 300, 1);
    let b = generators::add_noise(&generators::flat(w, h, 1, 30000).expect("b"), 300, 2);
    let img = Image16::from_planes(&[&luma, &a, &b]).expect("planes");
    let kernel = SpatialKernel::gaussian(2, 1.0).expect("kernel");

    for strategy in [PassStrategy::Separable, PassStrategy::NonSeparable] {
        let opts = BilateralOptions::new(1.0).with_strategy(strategy);
        let out = filter_chroma(&img, &kernel, &opts).expect("filter_chroma");
        let mut ok = true;
        for y in 0..out.height() {
            for x in 0..out.width() {
                let left = x + 2 < w / 2;
                let va = out.get(x, y, 1).unwrap_or(0);
                let vb = out.get(x, y, 2).unwrap_or(0);
                let expected_a = if left { 20000 } else { 40000 };
                ok &= va.abs_diff(expected_a) <= 300;
                ok &= vb.abs_diff(30000) <= 300;
            }
        }
        rp.compare_values(1.0, ok as u8 as f64, 0.0);
    }
    let out = filter_chroma(&img, &kernel, &BilateralOptions::new(1.0)).expect("filter_chroma");
    rp.write_image_and_check(&out).expect("write edge");

    assert!(rp.cleanup(), "bilateral_chroma_edge regression test failed");
}

/// A chroma step too small to stop mixing on its own stays sharp when it
/// sits under a full-scale luma step, and is smoothed under flat luma.
#[test]
fn bilateral_chroma_reg_luma_guides_weights() {
    init_logging();
    let mut rp = RegParams::new("bilateral_chroma_guide");

    let (w, h) = (12, 8);
    let a = generators::step_edge(w, h, 30000, 30100).expect("a");
    let b = generators::step_edge(w, h, 30000, 29900).expect("b");
    let kernel = SpatialKernel::uniform(2);

    let edge = generators::step_edge(w, h, 0, 0xffff).expect("luma");
    let img = Image16::from_planes(&[&edge, &a, &b]).expect("planes");
    for strategy in [PassStrategy::Separable, PassStrategy::NonSeparable] {
        for vectorize in [false, true] {
            let opts = BilateralOptions::new(1.0)
                .with_strategy(strategy)
                .with_vectorize(vectorize);
            let out = filter_chroma(&img, &kernel, &opts).expect("filter_chroma");
            let expected = img.crop(2, 2, w - 4, h - 4).expect("crop");
            rp.compare_images(&expected, &out);
        }
    }

    let flat = generators::flat(w, h, 1, 0x8000).expect("luma");
    let img = Image16::from_planes(&[&flat, &a, &b]).expect("planes");
    let out = filter_chroma(&img, &kernel, &BilateralOptions::new(1.0)).expect("filter_chroma");
    let expected = img.crop(2, 2, w - 4, h - 4).expect("crop");
    let changed = (0..out.height())
        .flat_map(|y| (0..out.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| out.get(x, y, 1) != expected.get(x, y, 1))
        .count();
    rp.compare_values(1.0, (changed > 0) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "bilateral_chroma_guide regression test failed");
}

/// Planar source and interleaved destination give the same result as the
/// interleaved path.
#[test]
fn bilateral_chroma_reg_planar_layout() {
    init_logging();
    let mut rp = RegParams::new("bilateral_chroma_planar");

    let (w, h) = (14, 11);
    let img = generators::random(w, h, 3, 77).expect("random");
    let kernel = SpatialKernel::gaussian(2, 1.0).expect("kernel");
    let opts = BilateralOptions::new(0.5);
    let expected = filter_chroma(&img, &kernel, &opts).expect("filter_chroma");

    let mut planar = Vec::with_capacity(w * h * 3);
    for c in 0..3 {
        planar.extend_from_slice(img.channel(c).expect("channel").data());
    }
    let layout = ChromaLayout {
        luma: PlaneLayout::planar(0, w, h),
        a: PlaneLayout::planar(1, w, h),
        b: PlaneLayout::planar(2, w, h),
    };
    let mut dst = vec![0u16; (w - 4) * (h - 4) * 3];
    bilateral_chroma(
        Samples::new(&planar, layout),
        SamplesMut::new(&mut dst, ChromaLayout::interleaved(w - 4)),
        w,
        h,
        &kernel,
        &opts,
    )
    .expect("bilateral_chroma");
    rp.compare_samples(expected.data(), &dst, 0);

    assert!(rp.cleanup(), "bilateral_chroma_planar regression test failed");
}

#[test]
fn bilateral_chroma_reg_same_size() {
    init_logging();
    let mut rp = RegParams::new("bilateral_chroma_same_size");

    let img = generators::gradient_h(10, 7, 3).expect("gradient");
    let kernel = SpatialKernel::gaussian(2, 1.0).expect("kernel");
    let out = filter_chroma_same_size(&img, &kernel, &BilateralOptions::new(1.0))
        .expect("filter_chroma_same_size");
    rp.compare_values(10.0, out.width() as f64, 0.0);
    rp.compare_values(7.0, out.height() as f64, 0.0);
    rp.compare_images(
        &img.channel(0).expect("channel"),
        &out.channel(0).expect("channel"),
    );

    assert!(rp.cleanup(), "bilateral_chroma_same_size regression test failed");
}
