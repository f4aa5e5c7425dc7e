//! Bilateral filtering regression test (luma-driven RGB)
//!
//! Only luma is smoothed; every channel keeps its original offset from luma,
//! clamped to the sample range.

use bilat_core::{Image16, PlaneLayout, RgbLayout, Samples, SamplesMut};
use bilat_filter::{
    BilateralOptions, LumaSource, SpatialKernel, bilateral_luma_rgb, bilateral_mono,
    filter_luma_rgb, filter_luma_rgb_same_size,
};
use bilat_test::{RegParams, generators};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build an RGB image whose channels sit at fixed offsets from a noisy
/// green channel.
fn offset_rgb(w: usize, h: usize, seed: u64) -> Image16 {
    let ramp = generators::gradient_h(w, h, 1).expect("gradient");
    let g = generators::add_noise(&ramp, 3000, seed);
    let r = Image16::from_data(
        w,
        h,
        1,
        g.data().iter().map(|&v| v.saturating_add(5000)).collect(),
    )
    .expect("red");
    let b = Image16::from_data(
        w,
        h,
        1,
        g.data().iter().map(|&v| v.saturating_sub(5000)).collect(),
    )
    .expect("blue");
    Image16::from_planes(&[&r, &g, &b]).expect("planes")
}

#[test]
fn bilateral_luma_reg_green_matches_mono() {
    init_logging();
    let mut rp = RegParams::new("bilateral_luma_mono");

    // With the default green source the filtered green channel is exactly
    // the mono filter of green.
    let img = offset_rgb(30, 20, 11);
    let kernel = SpatialKernel::gaussian(3, 1.5).expect("kernel");
    let opts = BilateralOptions::new(0.3);
    let out = filter_luma_rgb(&img, &kernel, &opts).expect("filter_luma_rgb");

    let (w, h) = img.dimensions();
    let (ow, oh) = (w - 6, h - 6);
    let mut green = vec![0u16; ow * oh];
    bilateral_mono(
        Samples::new(img.data(), PlaneLayout::interleaved(1, 3, w)),
        SamplesMut::new(&mut green, PlaneLayout::interleaved(0, 1, ow)),
        w,
        h,
        &kernel,
        &opts,
    )
    .expect("bilateral_mono");
    rp.compare_samples(&green, out.channel(1).expect("channel").data(), 0);

    assert!(rp.cleanup(), "bilateral_luma_mono regression test failed");
}

#[test]
fn bilateral_luma_reg_differences_preserved() {
    init_logging();
    let mut rp = RegParams::new("bilateral_luma_diff");

    let img = offset_rgb(26, 18, 3);
    let kernel = SpatialKernel::gaussian(2, 1.0).expect("kernel");
    let out = filter_luma_rgb(&img, &kernel, &BilateralOptions::new(0.01)).expect("filter");

    let mut ok = true;
    let mut changed = 0;
    for y in 0..out.height() {
        for x in 0..out.width() {
            let src = |c| img.get(x + 2, y + 2, c).unwrap_or(0) as i32;
            let dst = |c| out.get(x, y, c).unwrap_or(0) as i32;
            let g1 = dst(1);
            for c in [0, 2] {
                let expected = (g1 + src(c) - src(1)).clamp(0, 0xffff);
                ok &= dst(c) == expected;
            }
            changed += (g1 != src(1)) as usize;
        }
    }
    rp.compare_values(1.0, ok as u8 as f64, 0.0);
    // The noise makes luma change almost everywhere
    rp.compare_values(1.0, (changed > out.width() * out.height() / 2) as u8 as f64, 0.0);
    rp.write_image_and_check(&out).expect("write diff");

    assert!(rp.cleanup(), "bilateral_luma_diff regression test failed");
}

#[test]
fn bilateral_luma_reg_clamping() {
    init_logging();
    let mut rp = RegParams::new("bilateral_luma_clamp");

    // Dark green stripe next to bright green; red is pinned at the top of
    // the range and blue at the bottom, so smoothing luma upward saturates
    // red and smoothing downward floors blue.
    let (w, h) = (9, 7);
    let mut img = Image16::new(w, h, 3).expect("image");
    for y in 0..h {
        for x in 0..w {
            let g: u16 = if x % 2 == 0 { 2000 } else { 6000 };
            img.set(x, y, 0, 0xffff).expect("set");
            img.set(x, y, 1, g).expect("set");
            img.set(x, y, 2, 0).expect("set");
        }
    }
    let out = filter_luma_rgb(&img, &SpatialKernel::uniform(1), &BilateralOptions::new(0.0))
        .expect("filter");
    for y in 0..out.height() {
        for x in 0..out.width() {
            let g = img.get(x + 1, y + 1, 1).unwrap_or(0);
            let g1 = out.get(x, y, 1).unwrap_or(0);
            let r1 = out.get(x, y, 0).unwrap_or(0);
            let b1 = out.get(x, y, 2).unwrap_or(0);
            if g1 > g {
                rp.compare_values(0xffff as f64, r1 as f64, 0.0);
                rp.compare_values((g1 - g) as f64, b1 as f64, 0.0);
            } else {
                rp.compare_values((0xffff - (g - g1)) as f64, r1 as f64, 0.0);
                rp.compare_values(0.0, b1 as f64, 0.0);
            }
        }
    }

    assert!(rp.cleanup(), "bilateral_luma_clamp regression test failed");
}

#[test]
fn bilateral_luma_reg_weighted_source() {
    init_logging();
    let mut rp = RegParams::new("bilateral_luma_weighted");

    // Constant-luma image with varying hue: nothing to smooth
    let (w, h) = (11, 9);
    let mut img = Image16::new(w, h, 3).expect("image");
    for y in 0..h {
        for x in 0..w {
            let t = ((x + y) % 3) as u16;
            img.set(x, y, 0, 30000 + 1000 * t).expect("set");
            img.set(x, y, 1, 30000).expect("set");
            img.set(x, y, 2, 30000 - 1000 * t).expect("set");
        }
    }
    let weights = LumaSource::Weighted([0.5, 0.0, 0.5]);
    let opts = BilateralOptions::new(1.0).with_luma_source(weights);
    let out = filter_luma_rgb_same_size(&img, &SpatialKernel::uniform(2), &opts).expect("filter");
    rp.compare_images(&img, &out);

    // Interleaved slice entry point agrees with the image wrapper
    let mut dst = vec![0u16; (w - 4) * (h - 4) * 3];
    bilateral_luma_rgb(
        Samples::new(img.data(), RgbLayout::interleaved(w)),
        SamplesMut::new(&mut dst, RgbLayout::interleaved(w - 4)),
        w,
        h,
        &SpatialKernel::uniform(2),
        &opts,
    )
    .expect("bilateral_luma_rgb");
    let cropped = img.crop(2, 2, w - 4, h - 4).expect("crop");
    rp.compare_samples(cropped.data(), &dst, 0);

    assert!(rp.cleanup(), "bilateral_luma_weighted regression test failed");
}
