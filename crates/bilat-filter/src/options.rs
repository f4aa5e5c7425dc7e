//! Filter options
//!
//! The spatial kernel carries the radius; everything else that shapes a
//! filter call lives in [`BilateralOptions`].

use crate::fastmath::ExpBias;
use crate::{FilterError, FilterResult};

/// How the accumulator visits the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassStrategy {
    /// Non-separable when the window is at most 3 rows, separable otherwise.
    #[default]
    Auto,
    /// Horizontal pass written back into the window row, then a vertical
    /// pass. An approximation of the 2-D filter.
    Separable,
    /// Full 2-D evaluation over the window.
    NonSeparable,
}

impl PassStrategy {
    /// Whether this strategy runs the separable passes for a window of
    /// `window_size` rows.
    pub fn is_separable(self, window_size: usize) -> bool {
        match self {
            PassStrategy::Auto => window_size > 3,
            PassStrategy::Separable => true,
            PassStrategy::NonSeparable => false,
        }
    }
}

/// Fixed-point scales between 16-bit samples and filter space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleNorms {
    /// Luma is stored as `sqrt(raw * luma)`
    pub luma: f32,
    /// Chroma is stored as `raw * chroma`
    pub chroma: f32,
    /// The range scale is divided by this before use
    pub range: f32,
}

impl Default for SampleNorms {
    fn default() -> Self {
        Self {
            luma: 65536.0,
            chroma: 1.0,
            range: 65536.0,
        }
    }
}

/// Which luma the RGB driver filters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LumaSource {
    /// The green channel stands in for luma.
    #[default]
    Green,
    /// Weighted sum of R, G, B.
    Weighted([f32; 3]),
}

impl LumaSource {
    /// Rec. 709 luma weights.
    pub const REC709: LumaSource = LumaSource::Weighted([0.2126, 0.7152, 0.0722]);

    /// Luma of one pixel.
    #[inline]
    pub fn luma(&self, r: u16, g: u16, b: u16) -> u16 {
        match self {
            LumaSource::Green => g,
            LumaSource::Weighted(w) => {
                bilat_core::clamp_sample(w[0] * r as f32 + w[1] * g as f32 + w[2] * b as f32)
            }
        }
    }
}

/// Options for a bilateral filter call.
///
/// # Example
///
/// ```
/// use bilat_filter::{BilateralOptions, PassStrategy};
///
/// let opts = BilateralOptions::new(4.0)
///     .with_strategy(PassStrategy::NonSeparable)
///     .with_vectorize(false);
/// assert_eq!(opts.range_scale, 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BilateralOptions {
    /// Rows held by the window; `None` means `2 * radius + 1`
    pub window_size: Option<usize>,
    /// Multiplier of squared range distances (`scale_r`)
    pub range_scale: f32,
    /// Separable or full 2-D accumulation
    pub strategy: PassStrategy,
    /// Use the 4-lane path (only engaged for windows larger than 3 rows)
    pub vectorize: bool,
    /// Fast-exp bias table entry
    pub exp_bias: ExpBias,
    /// Sample scaling
    pub norms: SampleNorms,
    /// Luma derivation for the RGB driver
    pub luma_source: LumaSource,
}

impl Default for BilateralOptions {
    fn default() -> Self {
        Self {
            window_size: None,
            range_scale: 1.0,
            strategy: PassStrategy::Auto,
            vectorize: true,
            exp_bias: ExpBias::native(),
            norms: SampleNorms::default(),
            luma_source: LumaSource::Green,
        }
    }
}

impl BilateralOptions {
    /// Default options with the given range scale.
    pub fn new(range_scale: f32) -> Self {
        Self {
            range_scale,
            ..Self::default()
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = Some(window_size);
        self
    }

    pub fn with_strategy(mut self, strategy: PassStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_vectorize(mut self, vectorize: bool) -> Self {
        self.vectorize = vectorize;
        self
    }

    pub fn with_exp_bias(mut self, exp_bias: ExpBias) -> Self {
        self.exp_bias = exp_bias;
        self
    }

    pub fn with_norms(mut self, norms: SampleNorms) -> Self {
        self.norms = norms;
        self
    }

    pub fn with_luma_source(mut self, luma_source: LumaSource) -> Self {
        self.luma_source = luma_source;
        self
    }

    /// Window size for a kernel of radius `radius`.
    ///
    /// # Errors
    ///
    /// The window must hold the full vertical kernel span, `2 * radius + 1`
    /// rows.
    pub fn resolve_window_size(&self, radius: usize) -> FilterResult<usize> {
        let span = 2 * radius + 1;
        let ws = self.window_size.unwrap_or(span);
        if ws < span {
            return Err(FilterError::InvalidParameters(format!(
                "window size {ws} is smaller than the kernel span {span}"
            )));
        }
        Ok(ws)
    }

    /// Check the numeric options.
    pub fn validate(&self) -> FilterResult<()> {
        if !(self.range_scale.is_finite() && self.range_scale >= 0.0) {
            return Err(FilterError::InvalidParameters(format!(
                "range scale must be finite and non-negative, got {}",
                self.range_scale
            )));
        }
        let n = &self.norms;
        for (name, v) in [("luma", n.luma), ("chroma", n.chroma), ("range", n.range)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(FilterError::InvalidParameters(format!(
                    "{name} norm must be finite and positive, got {v}"
                )));
            }
        }
        if let LumaSource::Weighted(w) = self.luma_source
            && w.iter().any(|c| !c.is_finite())
        {
            return Err(FilterError::InvalidParameters(
                "luma weights must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
