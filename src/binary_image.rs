
use crate::source::{ Luminance, SourceImage };

/// A source sample must be brighter than this
/// in order to be inside the shape.
pub const THRESHOLD: f64 = 0.5;

/// Which side of the shape boundary a pixel lies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Class {
    Inside,
    Outside,
}

impl Class {
    /// Classify a normalized brightness. Exactly `0.5` is outside.
    #[inline]
    pub fn of_luminance(luminance: f64) -> Self {
        if luminance > THRESHOLD { Class::Inside } else { Class::Outside }
    }
}

/// Represents an image with each pixel being either true or false,
/// corresponding to inside-the-shape and outside-of-the-shape respectively.
/// This is what the field sampler searches for boundaries,
/// possibly from multiple threads at once.
pub trait BinaryImage: Sync {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn is_inside(&self, x: usize, y: usize) -> bool;

    #[inline]
    fn class(&self, x: usize, y: usize) -> Class {
        if self.is_inside(x, y) { Class::Inside } else { Class::Outside }
    }
}

/// A thresholded copy of a source image, stored row-major.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    classes: Vec<Class>,
}

impl BinaryMask {

    /// Threshold every sample of the source at a luminance of `0.5`.
    pub fn of_source(source: &impl SourceImage) -> Self {
        let width = source.width();
        let height = source.height();

        let mut classes = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                classes.push(Class::of_luminance(source.sample(x, y).luminance()));
            }
        }

        BinaryMask { width, height, classes }
    }

    /// Build a mask from a predicate, mostly useful for synthetic shapes.
    pub fn from_fn(width: usize, height: usize, is_inside: impl Fn(usize, usize) -> bool) -> Self {
        let classes = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| if is_inside(x, y) { Class::Inside } else { Class::Outside })
            .collect();

        BinaryMask { width, height, classes }
    }

    #[inline]
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    #[inline]
    fn flatten_index(&self, x: usize, y: usize) -> usize {
        self.width * y + x
    }
}

impl BinaryImage for BinaryMask {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn is_inside(&self, x: usize, y: usize) -> bool {
        self.class(x, y) == Class::Inside
    }

    #[inline]
    fn class(&self, x: usize, y: usize) -> Class {
        self.classes[self.flatten_index(x, y)]
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::GraySlice;

    #[test]
    fn half_brightness_is_outside(){
        assert_eq!(Class::of_luminance(0.5), Class::Outside);
        assert_eq!(Class::of_luminance(0.0), Class::Outside);
        assert_eq!(Class::of_luminance(0.500001), Class::Inside);
        assert_eq!(Class::of_luminance(1.0), Class::Inside);
    }

    #[test]
    fn mask_has_source_dimensions(){
        let buffer = [0.0_f64, 0.5, 0.75, 1.0, 0.2, 0.9];
        let source = GraySlice::from_slice(3, 2, &buffer).unwrap();
        let mask = BinaryMask::of_source(&source);

        assert_eq!(mask.width(), 3);
        assert_eq!(mask.height(), 2);
        assert_eq!(mask.classes(), &[
            Class::Outside, Class::Outside, Class::Inside,
            Class::Inside, Class::Outside, Class::Inside,
        ]);

        assert!(mask.is_inside(2, 0));
        assert!(!mask.is_inside(1, 1));
    }

    #[test]
    fn empty_source_yields_empty_mask(){
        let source = GraySlice::<u8>::from_slice(0, 7, &[]).unwrap();
        let mask = BinaryMask::of_source(&source);

        assert_eq!((mask.width(), mask.height()), (0, 7));
        assert!(mask.classes().is_empty());
    }

    #[test]
    fn predicate_mask_matches_coordinates(){
        let mask = BinaryMask::from_fn(4, 3, |x, y| x == 3 && y == 1);

        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(mask.is_inside(x, y), (x, y) == (3, 1));
            }
        }
    }
}
