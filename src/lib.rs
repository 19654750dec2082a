//! This crate computes a signed distance field
//! of a two-tone image, optionally at a reduced resolution.
//! The image is thresholded into a binary mask, and each output pixel
//! then searches the surrounding `spread` pixels of the mask
//! for the closest pixel on the other side of the boundary.
//! The result is quantized to 16-bit grey-scale samples.
//!
//! Enable the `rayon` feature to sample rows in parallel,
//! and `piston_image` to use `image` crate buffers directly.

pub mod error;
pub mod source;
pub mod params;
pub mod binary_image;
pub mod distance_field;

pub mod prelude {
    pub use crate::{
        build_mask,
        compute_field,
        compute_signed_distances,
        image_to_sdf,
    };

    pub use crate::error::SdfError;

    pub use crate::source::{
        Luminance, SourceImage, GraySlice
    };

    pub use crate::params::{
        FieldParams, SampleOrigin
    };

    pub use crate::binary_image::{
        BinaryImage, BinaryMask, Class
    };

    pub use crate::distance_field::{
        DistanceImage, SignedDistanceField, DistanceStorage,
        F16DistanceStorage, F32DistanceStorage
    };
}


use prelude::*;

/// Threshold the source image at half brightness.
pub fn build_mask(source: &impl SourceImage) -> BinaryMask {
    BinaryMask::of_source(source)
}

/// Sample the quantized signed distance field of the binary image.
pub fn compute_field(mask: &impl BinaryImage, params: &FieldParams) -> Result<DistanceImage, SdfError> {
    distance_field::compute_field(mask, params)
}

/// Sample the signed distances of the binary image, in source pixels, without quantizing them.
pub fn compute_signed_distances<D: DistanceStorage>(mask: &impl BinaryImage, params: &FieldParams)
    -> Result<SignedDistanceField<D>, SdfError>
{
    distance_field::compute_signed_distances(mask, params)
}

/// Threshold the source image and sample its quantized signed distance field.
/// The parameters are checked before the mask is built.
pub fn image_to_sdf(source: &impl SourceImage, params: &FieldParams) -> Result<DistanceImage, SdfError> {
    params.validate()?;
    compute_field(&build_mask(source), params)
}
