use std::fmt::{self, Debug, Display};

use gdal::raster::{GdalDataType, GdalType};
use num::{Num, NumCast};
use serde::{Deserialize, Serialize};

use crate::{buffer::Buffer, components::image::PixelData};

/// Sample type shared by every band packed into an image.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SampleType {
    UInt8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64,
    /// A type the backend reports but images cannot hold, by backend name.
    Unsupported(String),
}

impl SampleType {
    /// Backend name of the type, as used in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            SampleType::UInt8 => "Byte",
            SampleType::UInt16 => "UInt16",
            SampleType::Int16 => "Int16",
            SampleType::UInt32 => "UInt32",
            SampleType::Int32 => "Int32",
            SampleType::Float32 => "Float32",
            SampleType::Float64 => "Float64",
            SampleType::Unsupported(name) => name,
        }
    }
}

impl Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<GdalDataType> for SampleType {
    fn from(value: GdalDataType) -> Self {
        match value {
            GdalDataType::UInt8 => SampleType::UInt8,
            GdalDataType::UInt16 => SampleType::UInt16,
            GdalDataType::Int16 => SampleType::Int16,
            GdalDataType::UInt32 => SampleType::UInt32,
            GdalDataType::Int32 => SampleType::Int32,
            GdalDataType::Float32 => SampleType::Float32,
            GdalDataType::Float64 => SampleType::Float64,
            other => SampleType::Unsupported(other.name()),
        }
    }
}

/// Rust sample types an image can be packed with.
pub trait DataType: Num + NumCast + Copy + Send + Sync + Debug + GdalType + 'static {
    fn sample_type() -> SampleType;

    /// Sample for a normalized fill value: integers scale 1.0 to their maximum,
    /// floats keep the value.
    fn from_unit(value: f64) -> Self;

    fn into_pixel_data(buffer: Buffer<Self, 3>) -> PixelData;

    fn buffer(data: &PixelData) -> Option<&Buffer<Self, 3>>;
}

macro_rules! impl_data_type {
    ($t:ty, $variant:ident, integer) => {
        impl_data_type!($t, $variant, |value: f64| (value * <$t>::MAX as f64).round() as $t);
    };
    ($t:ty, $variant:ident, float) => {
        impl_data_type!($t, $variant, |value: f64| value as $t);
    };
    ($t:ty, $variant:ident, $from_unit:expr) => {
        impl DataType for $t {
            fn sample_type() -> SampleType {
                SampleType::$variant
            }

            fn from_unit(value: f64) -> Self {
                ($from_unit)(value)
            }

            fn into_pixel_data(buffer: Buffer<Self, 3>) -> PixelData {
                PixelData::$variant(buffer)
            }

            fn buffer(data: &PixelData) -> Option<&Buffer<Self, 3>> {
                match data {
                    PixelData::$variant(buffer) => Some(buffer),
                    _ => None,
                }
            }
        }
    };
}

impl_data_type!(u8, UInt8, integer);
impl_data_type!(u16, UInt16, integer);
impl_data_type!(i16, Int16, integer);
impl_data_type!(u32, UInt32, integer);
impl_data_type!(i32, Int32, integer);
impl_data_type!(f32, Float32, float);
impl_data_type!(f64, Float64, float);

/// Run `$body` with `$t` bound to the Rust type of a supported [SampleType].
/// Evaluates `$unsupported` for [SampleType::Unsupported].
macro_rules! with_sample_type {
    ($sample_type:expr, $t:ident => $body:expr, $name:ident => $unsupported:expr) => {
        match $sample_type {
            $crate::components::SampleType::UInt8 => {
                type $t = u8;
                $body
            }
            $crate::components::SampleType::UInt16 => {
                type $t = u16;
                $body
            }
            $crate::components::SampleType::Int16 => {
                type $t = i16;
                $body
            }
            $crate::components::SampleType::UInt32 => {
                type $t = u32;
                $body
            }
            $crate::components::SampleType::Int32 => {
                type $t = i32;
                $body
            }
            $crate::components::SampleType::Float32 => {
                type $t = f32;
                $body
            }
            $crate::components::SampleType::Float64 => {
                type $t = f64;
                $body
            }
            $crate::components::SampleType::Unsupported($name) => $unsupported,
        }
    };
}
pub(crate) use with_sample_type;
