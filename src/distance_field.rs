
use crate::binary_image::{ BinaryImage, Class };
use crate::error::SdfError;
use crate::params::FieldParams;


/// A quantized signed distance field,
/// with `0` being `spread` outside the shape,
/// `u16::MAX` being `spread` inside the shape,
/// and the boundary at half intensity.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DistanceImage {
    pub width: usize,
    pub height: usize,

    /// Row-major, one sample per pixel.
    pub samples: Vec<u16>,
}

/// The signed distances of each output pixel in source pixels,
/// positive inside the shape and capped at `spread`.
#[derive(Clone, PartialEq, Debug)]
pub struct SignedDistanceField<D: DistanceStorage> {
    pub width: usize,
    pub height: usize,
    pub distances: Vec<D::Element>,
}

/// Needs less storage with sufficient precision, but takes
/// a little longer because of conversions between f16 and f32.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct F16DistanceStorage;

/// Needs more storage with high precision.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct F32DistanceStorage;

pub trait DistanceStorage {
    type Element: Copy + Default + Send + Sync + PartialEq + std::fmt::Debug;

    fn encode(distance: f32) -> Self::Element;

    fn decode(element: Self::Element) -> f32;
}


/// Sample the distance field of the mask and quantize it to 16 bits.
pub fn compute_field(mask: &impl BinaryImage, params: &FieldParams) -> Result<DistanceImage, SdfError> {
    let (width, height) = prepare(mask, params)?;
    let spread = params.spread;

    let samples = sample_rows(width, height, |x, y| {
        quantize(find_signed_distance(mask, params, x, y), spread)
    });

    Ok(DistanceImage { width, height, samples })
}

/// Sample the distance field of the mask without quantizing it.
pub fn compute_signed_distances<D: DistanceStorage>(mask: &impl BinaryImage, params: &FieldParams)
    -> Result<SignedDistanceField<D>, SdfError>
{
    let (width, height) = prepare(mask, params)?;

    let distances = sample_rows(width, height, |x, y| {
        D::encode(find_signed_distance(mask, params, x, y) as f32)
    });

    Ok(SignedDistanceField { width, height, distances })
}

fn prepare(mask: &impl BinaryImage, params: &FieldParams) -> Result<(usize, usize), SdfError> {
    params.validate()?;

    let (width, height) = params.output_size(mask.width(), mask.height());
    log::debug!(
        "sampling {}x{} mask into {}x{} field (spread {}, downscale {}, {:?} origin)",
        mask.width(), mask.height(), width, height,
        params.spread, params.downscale, params.sample_origin
    );

    // a tiny downscale saturates the dimensions, which cannot be allocated
    let saturated = width == usize::MAX || height == usize::MAX;
    if saturated || width.checked_mul(height).is_none() {
        log::trace!("downscale {} yields {}x{} output pixels", params.downscale, width, height);
        return Err(SdfError::InvalidParameter { name: "downscale", value: params.downscale });
    }

    if width == 0 || height == 0 {
        log::trace!("downscale {} leaves no output pixels", params.downscale);
    }

    Ok((width, height))
}

/// Evaluate `sample` for every output pixel, row by row.
#[cfg(not(feature = "rayon"))]
fn sample_rows<T, F>(width: usize, height: usize, sample: F) -> Vec<T>
    where T: Copy + Default + Send, F: Fn(usize, usize) -> T + Sync
{
    let mut buffer = vec![T::default(); width * height];
    if width == 0 { return buffer; }

    for (y, row) in buffer.chunks_mut(width).enumerate() {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = sample(x, y);
        }
    }

    buffer
}

/// Evaluate `sample` for every output pixel, with the rows distributed over threads.
#[cfg(feature = "rayon")]
fn sample_rows<T, F>(width: usize, height: usize, sample: F) -> Vec<T>
    where T: Copy + Default + Send, F: Fn(usize, usize) -> T + Sync
{
    use rayon::prelude::*;

    let mut buffer = vec![T::default(); width * height];
    if width == 0 { return buffer; }

    buffer.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = sample(x, y);
        }
    });

    buffer
}


/// The signed distance of the output pixel to the nearest
/// pixel of the opposite class, capped at `spread`.
#[inline]
fn find_signed_distance(mask: &impl BinaryImage, params: &FieldParams, output_x: usize, output_y: usize) -> f64 {
    let spread = params.spread;
    let center_x = source_center(params, output_x, mask.width());
    let center_y = source_center(params, output_y, mask.height());

    let base = mask.class(center_x, center_y);
    let delta = spread.ceil();

    // only compare within `delta` pixels of the center
    let reach = delta as usize;
    let start_x = center_x.saturating_sub(reach);
    let end_x = center_x.saturating_add(reach).min(mask.width() - 1);
    let start_y = center_y.saturating_sub(reach);
    let end_y = center_y.saturating_add(reach).min(mask.height() - 1);

    // if no boundary is in reach, pretend it is exactly `delta` away
    let mut closest_square_distance = delta * delta;

    for y in start_y ..= end_y {
        let dy = y as f64 - center_y as f64;
        let dy2 = dy * dy;

        // no pixel in this row can be closer
        if dy2 >= closest_square_distance { continue; }

        for x in start_x ..= end_x {
            if mask.class(x, y) != base {
                let dx = x as f64 - center_x as f64;
                let square_distance = dx * dx + dy2;

                if square_distance < closest_square_distance {
                    closest_square_distance = square_distance;
                }
            }
        }
    }

    let closest_distance = closest_square_distance.sqrt().min(spread);
    match base {
        Class::Inside => closest_distance,
        Class::Outside => -closest_distance,
    }
}

/// Map an output coordinate to a valid coordinate of the mask.
/// Sample origins may land past the far edge, which is clamped.
#[inline]
fn source_center(params: &FieldParams, output: usize, length: usize) -> usize {
    let coordinate = params.sample_origin.source_coordinate(output, params.downscale);
    let last = (length - 1) as f64;

    // NaN cannot occur as parameters are validated
    coordinate.max(0.0).min(last) as usize
}

/// Map a signed distance to `0.0 ..= 1.0`, then to `0 ..= u16::MAX`.
#[inline]
pub fn quantize(signed_distance: f64, spread: f64) -> u16 {
    let alpha = 0.5 + 0.5 * (signed_distance / spread);
    (alpha.max(0.0).min(1.0) * 65535.0).floor() as u16
}


impl DistanceImage {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.samples[self.flatten_index(x, y)]
    }

    /// The normalized intensity, with `0.5` at the boundary.
    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> f64 {
        self.get(x, y) as f64 / 65535.0
    }

    /// Reconstruct the signed distance, which was computed
    /// using the specified spread, up to quantization.
    #[inline]
    pub fn signed_distance(&self, x: usize, y: usize, spread: f64) -> f64 {
        spread * (2.0 * self.alpha(x, y) - 1.0)
    }

    #[inline]
    pub fn flatten_index(&self, x: usize, y: usize) -> usize {
        self.width * y + x
    }
}

impl<D> SignedDistanceField<D> where D: DistanceStorage {

    #[inline]
    pub fn get_distance(&self, x: usize, y: usize) -> f32 {
        D::decode(self.distances[self.flatten_index(x, y)])
    }

    /// Quantize the distances, which were computed using the specified spread.
    pub fn to_distance_image(&self, spread: f64) -> Result<DistanceImage, SdfError> {
        FieldParams::new(spread, 1.0).validate()?;

        let samples = self.distances.iter()
            .map(|&distance| quantize(D::decode(distance) as f64, spread))
            .collect();

        Ok(DistanceImage { width: self.width, height: self.height, samples })
    }

    #[inline]
    pub fn flatten_index(&self, x: usize, y: usize) -> usize {
        self.width * y + x
    }
}


impl DistanceStorage for F16DistanceStorage {
    type Element = half::f16;

    #[inline]
    fn encode(distance: f32) -> half::f16 {
        half::f16::from_f32(distance)
    }

    #[inline]
    fn decode(element: half::f16) -> f32 {
        element.to_f32()
    }
}

impl DistanceStorage for F32DistanceStorage {
    type Element = f32;

    #[inline]
    fn encode(distance: f32) -> f32 {
        distance
    }

    #[inline]
    fn decode(element: f32) -> f32 {
        element
    }
}


/// Convert distance images to piston images.
#[cfg(feature = "piston_image")]
mod piston_image {
    use image::{ ImageBuffer, Luma };
    use super::DistanceImage;

    impl DistanceImage {
        /// A 16-bit grey-scale piston image with the same samples.
        pub fn to_gray_u16_image(&self) -> ImageBuffer<Luma<u16>, Vec<u16>> {
            ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
                Luma([ self.get(x as usize, y as usize) ])
            })
        }
    }
}
