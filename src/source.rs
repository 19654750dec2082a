
use crate::error::SdfError;

/// A pixel value that can be converted to a grey-scale brightness.
pub trait Luminance {
    /// The brightness of this sample, in the range `0.0 ..= 1.0`.
    /// Values outside that range must be clamped by the implementation.
    fn luminance(&self) -> f64;
}

/// Any two dimensional grid of samples that can be thresholded into a mask.
/// Implemented for plain buffers via `GraySlice`,
/// and for piston images if the feature `piston_image` is activated.
pub trait SourceImage {
    type Sample: Luminance;

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// The sample at the specified coordinates,
    /// which are always inside `width` and `height`.
    fn sample(&self, x: usize, y: usize) -> Self::Sample;
}


impl Luminance for u8 {
    #[inline]
    fn luminance(&self) -> f64 {
        *self as f64 / 255.0
    }
}

impl Luminance for u16 {
    #[inline]
    fn luminance(&self) -> f64 {
        *self as f64 / 65535.0
    }
}

impl Luminance for f32 {
    #[inline]
    fn luminance(&self) -> f64 {
        (*self as f64).luminance()
    }
}

impl Luminance for f64 {
    #[inline]
    fn luminance(&self) -> f64 {
        // `clamp` would keep NaN
        if self.is_nan() { 0.0 } else { self.clamp(0.0, 1.0) }
    }
}

impl Luminance for bool {
    #[inline]
    fn luminance(&self) -> f64 {
        if *self { 1.0 } else { 0.0 }
    }
}


/// Convert 16-bit premultiplied color channels to an 8-bit grey value,
/// weighting the channels with the ITU-R 601 luma coefficients in 16.16 fixed point.
#[inline]
pub fn rgb16_to_gray8(red: u32, green: u32, blue: u32) -> u8 {
    ((19595 * red + 38470 * green + 7471 * blue + (1 << 15)) >> 24) as u8
}

/// Widen an 8-bit channel to 16 bits and premultiply it with an 8-bit alpha.
#[inline]
fn premultiply16(channel: u8, alpha: u8) -> u32 {
    let channel = channel as u32 * 0x101;
    let alpha = alpha as u32 * 0x101;
    channel * alpha / 0xffff
}

/// The luminance of an 8-bit color with straight (not premultiplied) alpha.
/// A fully transparent pixel is black.
#[inline]
pub fn rgba8_luminance(red: u8, green: u8, blue: u8, alpha: u8) -> f64 {
    rgb16_to_gray8(
        premultiply16(red, alpha),
        premultiply16(green, alpha),
        premultiply16(blue, alpha),
    ).luminance()
}


/// An image which is described by a row-major slice of samples.
#[derive(Clone, Copy, Debug)]
pub struct GraySlice<'b, T> {
    width: usize,
    height: usize,
    buffer: &'b [T],
}

impl<'b, T> GraySlice<'b, T> where T: Luminance + Copy {

    /// Wrap the buffer, which must contain exactly `width * height` samples.
    /// Dimensions whose product overflows report `usize::MAX` as expected length.
    pub fn from_slice(width: usize, height: usize, buffer: &'b [T]) -> Result<Self, SdfError> {
        let expected = width.checked_mul(height);

        if expected != Some(buffer.len()) {
            let expected = expected.unwrap_or(usize::MAX);
            return Err(SdfError::BufferSize { expected, actual: buffer.len() });
        }

        Ok(GraySlice { width, height, buffer })
    }
}

impl<T> SourceImage for GraySlice<'_, T> where T: Luminance + Copy {
    type Sample = T;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn sample(&self, x: usize, y: usize) -> T {
        self.buffer[self.width * y + x]
    }
}


/// Use piston images as sources.
#[cfg(feature = "piston_image")]
pub mod piston_image {
    use image::{ DynamicImage, GenericImageView, ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba };
    use super::{ Luminance, SourceImage, rgba8_luminance };

    impl Luminance for Luma<u8> {
        fn luminance(&self) -> f64 {
            self.0[0].luminance()
        }
    }

    impl Luminance for Luma<u16> {
        fn luminance(&self) -> f64 {
            self.0[0].luminance()
        }
    }

    impl Luminance for LumaA<u8> {
        fn luminance(&self) -> f64 {
            let [grey, alpha] = self.0;
            rgba8_luminance(grey, grey, grey, alpha)
        }
    }

    impl Luminance for Rgb<u8> {
        fn luminance(&self) -> f64 {
            let [red, green, blue] = self.0;
            rgba8_luminance(red, green, blue, u8::MAX)
        }
    }

    impl Luminance for Rgba<u8> {
        fn luminance(&self) -> f64 {
            let [red, green, blue, alpha] = self.0;
            rgba8_luminance(red, green, blue, alpha)
        }
    }

    impl<P, C> SourceImage for ImageBuffer<P, C>
        where P: Pixel + Luminance, C: std::ops::Deref<Target = [P::Subpixel]>
    {
        type Sample = P;

        fn width(&self) -> usize {
            ImageBuffer::width(self) as usize
        }

        fn height(&self) -> usize {
            ImageBuffer::height(self) as usize
        }

        fn sample(&self, x: usize, y: usize) -> P {
            *self.get_pixel(x as u32, y as u32)
        }
    }

    /// Every pixel of a dynamic image is sampled as 8-bit RGBA.
    impl SourceImage for DynamicImage {
        type Sample = Rgba<u8>;

        fn width(&self) -> usize {
            GenericImageView::width(self) as usize
        }

        fn height(&self) -> usize {
            GenericImageView::height(self) as usize
        }

        fn sample(&self, x: usize, y: usize) -> Rgba<u8> {
            self.get_pixel(x as u32, y as u32)
        }
    }
}
