use crate::colors::Rgb;
use crate::grid::{Grid2, RowMajorGrid};

/// An integer raster image: per-pixel RGB samples plus the shared
/// denominator defining sample precision.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub denominator: u16,
    pub pixels: RowMajorGrid<Rgb>,
}

impl Image {
    pub fn new(width: usize, height: usize, denominator: u16, pixels: RowMajorGrid<Rgb>) -> Self {
        assert!(denominator > 0);
        assert_eq!(pixels.width(), width);
        assert_eq!(pixels.height(), height);

        Self {
            width,
            height,
            denominator,
            pixels,
        }
    }

    /// The image restricted to even dimensions: an odd width or height
    /// loses its last column or row. Block formation requires this.
    pub fn trimmed_to_even(&self) -> Image {
        let width = self.width & !1;
        let height = self.height & !1;

        if width == self.width && height == self.height {
            return self.clone();
        }

        Image::new(
            width,
            height,
            self.denominator,
            RowMajorGrid::from_fn(width, height, |col, row| *self.pixels.get(col, row)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkered(width: usize, height: usize) -> Image {
        let pixels = RowMajorGrid::from_fn(width, height, |col, row| {
            Rgb::new(col as u16, row as u16, 0)
        });
        Image::new(width, height, 255, pixels)
    }

    #[test]
    fn even_dimensions_are_untouched() {
        let image = checkered(4, 6);
        assert_eq!(image.trimmed_to_even(), image);
    }

    #[test]
    fn odd_dimensions_lose_one_pixel() {
        let trimmed = checkered(5, 3).trimmed_to_even();
        assert_eq!((trimmed.width, trimmed.height), (4, 2));
        assert_eq!(trimmed.pixels.get(3, 1), &Rgb::new(3, 1, 0));
    }
}
