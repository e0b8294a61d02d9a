use geo::{AffineTransform, Coord};
use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;

/// Affine geotransform coefficients in GDAL order:
/// origin-x, pixel-width, row-rotation, origin-y, column-rotation, pixel-height.
#[derive(Shrinkwrap, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform([f64; 6]);

impl From<[f64; 6]> for GeoTransform {
    fn from(value: [f64; 6]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[f64]> for GeoTransform {
    type Error = std::array::TryFromSliceError;
    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        Ok(Self(<[f64; 6]>::try_from(value)?))
    }
}

impl GeoTransform {
    pub fn origin_x(&self) -> f64 {
        self.0[0]
    }
    pub fn pixel_width(&self) -> f64 {
        self.0[1]
    }
    pub fn row_rotation(&self) -> f64 {
        self.0[2]
    }
    pub fn origin_y(&self) -> f64 {
        self.0[3]
    }
    pub fn column_rotation(&self) -> f64 {
        self.0[4]
    }
    pub fn pixel_height(&self) -> f64 {
        self.0[5]
    }

    pub fn coefficients(&self) -> [f64; 6] {
        self.0
    }

    pub fn to_affine(&self) -> AffineTransform {
        AffineTransform::new(
            self.pixel_width(),
            self.row_rotation(),
            self.origin_x(),
            self.column_rotation(),
            self.pixel_height(),
            self.origin_y(),
        )
    }

    /// Georeferenced (x, y) of the top left corner of pixel (col, row).
    pub fn pixel_to_geo(&self, col: f64, row: f64) -> (f64, f64) {
        self.to_affine().apply(Coord { x: col, y: row }).x_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pixels_map_through_affine() {
        let transform = GeoTransform::from([440720.0, 60.0, 0.0, 3751320.0, 0.0, -60.0]);
        assert_eq!(transform.pixel_to_geo(0.0, 0.0), (440720.0, 3751320.0));
        assert_eq!(transform.pixel_to_geo(2.0, 1.0), (440840.0, 3751260.0));
    }

    #[rstest]
    fn slice_needs_six_coefficients() {
        assert!(GeoTransform::try_from([1.0, 2.0].as_slice()).is_err());
        let transform = GeoTransform::try_from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0].as_slice()).unwrap();
        assert_eq!(transform.column_rotation(), 5.0);
        assert_eq!(transform[5], 6.0);
    }
}
