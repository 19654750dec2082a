
use crate::error::SdfError;

/// Where inside its block of source pixels an output pixel is sampled.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SampleOrigin {
    /// `floor(x * downscale + downscale * 2)`.
    /// Keeps fields identical to those generated with earlier releases,
    /// but shifts the sample towards the lower right by up to two blocks.
    #[default]
    Reference,

    /// `floor(x * downscale + downscale / 2)`, the center of the block.
    BlockCenter,
}

impl SampleOrigin {
    /// The unclamped source coordinate of the output coordinate.
    #[inline]
    pub fn source_coordinate(self, output: usize, downscale: f64) -> f64 {
        let offset = match self {
            SampleOrigin::Reference => downscale * 2.0,
            SampleOrigin::BlockCenter => downscale / 2.0,
        };

        (output as f64 * downscale + offset).floor()
    }
}

/// Parameters for sampling a distance field.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FieldParams {
    /// The distance in source pixels at which the field saturates.
    /// Also the radius of the neighbourhood that is searched for the boundary.
    pub spread: f64,

    /// How many source pixels make up one output pixel, per axis.
    /// Values below one upscale, which works but is rarely useful.
    pub downscale: f64,

    pub sample_origin: SampleOrigin,
}

impl Default for FieldParams {
    fn default() -> Self {
        FieldParams {
            spread: 32.0,
            downscale: 4.0,
            sample_origin: SampleOrigin::default(),
        }
    }
}

impl FieldParams {
    pub fn new(spread: f64, downscale: f64) -> Self {
        FieldParams { spread, downscale, ..FieldParams::default() }
    }

    pub fn with_sample_origin(self, sample_origin: SampleOrigin) -> Self {
        FieldParams { sample_origin, ..self }
    }

    /// Both `spread` and `downscale` must be finite and positive.
    pub fn validate(&self) -> Result<(), SdfError> {
        check_positive("spread", self.spread)?;
        check_positive("downscale", self.downscale)?;
        Ok(())
    }

    /// The output dimensions for a mask of the specified size.
    /// Either may be zero for small masks or large downscales.
    pub fn output_size(&self, width: usize, height: usize) -> (usize, usize) {
        let scale = |length: usize| (length as f64 / self.downscale).floor() as usize;
        (scale(width), scale(height))
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), SdfError> {
    if value.is_finite() && value > 0.0 { Ok(()) }
    else {
        log::trace!("rejecting `{}` = {}", name, value);
        Err(SdfError::InvalidParameter { name, value })
    }
}
