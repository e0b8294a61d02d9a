use std::collections::BTreeMap;

use ndarray::ArrayView3;

use crate::{
    buffer::Buffer,
    components::{
        planner::MAX_COMPONENTS,
        sample::with_sample_type,
        transforms::GeoTransform,
        DataType, SampleType,
    },
    errors::{ReadError, Result},
};

/// Attachment key of the projection reference.
pub const PROJECTION_REF: &str = "ProjectionRef";
/// Attachment key of the affine geotransform.
pub const GEO_TRANSFORM: &str = "GeoTransform";

/// Normalized fill of components no band writes to.
pub const DEFAULT_FILL: [f64; MAX_COMPONENTS] = [0.0, 0.0, 0.0, 1.0];

/// Interleaved samples, shaped (height, width, components).
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    UInt8(Buffer<u8, 3>),
    UInt16(Buffer<u16, 3>),
    Int16(Buffer<i16, 3>),
    UInt32(Buffer<u32, 3>),
    Int32(Buffer<i32, 3>),
    Float32(Buffer<f32, 3>),
    Float64(Buffer<f64, 3>),
}

impl PixelData {
    pub fn sample_type(&self) -> SampleType {
        match self {
            PixelData::UInt8(_) => SampleType::UInt8,
            PixelData::UInt16(_) => SampleType::UInt16,
            PixelData::Int16(_) => SampleType::Int16,
            PixelData::UInt32(_) => SampleType::UInt32,
            PixelData::Int32(_) => SampleType::Int32,
            PixelData::Float32(_) => SampleType::Float32,
            PixelData::Float64(_) => SampleType::Float64,
        }
    }

    /// (height, width, components)
    pub fn shape(&self) -> [usize; 3] {
        match self {
            PixelData::UInt8(buffer) => buffer.shape(),
            PixelData::UInt16(buffer) => buffer.shape(),
            PixelData::Int16(buffer) => buffer.shape(),
            PixelData::UInt32(buffer) => buffer.shape(),
            PixelData::Int32(buffer) => buffer.shape(),
            PixelData::Float32(buffer) => buffer.shape(),
            PixelData::Float64(buffer) => buffer.shape(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    Text(String),
    Numbers(Vec<f64>),
}

/// Packed 2D image with auxiliary key/value attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    data: PixelData,
    attachments: BTreeMap<String, Attachment>,
}

impl Image {
    pub fn new(data: PixelData) -> Self {
        Self {
            data,
            attachments: BTreeMap::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn height(&self) -> usize {
        self.data.shape()[0]
    }

    pub fn components(&self) -> usize {
        self.data.shape()[2]
    }

    pub fn sample_type(&self) -> SampleType {
        self.data.sample_type()
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }

    pub fn into_data(self) -> PixelData {
        self.data
    }

    /// Samples as `T`, `None` when `T` is not the image sample type.
    pub fn samples<T: DataType>(&self) -> Option<&[T]> {
        T::buffer(&self.data).map(Buffer::as_slice)
    }

    /// (height, width, components) view, `None` when `T` is not the image sample type.
    pub fn view<T: DataType>(&self) -> Option<ArrayView3<'_, T>> {
        T::buffer(&self.data).and_then(|buffer| buffer.view().ok())
    }

    pub fn sample<T: DataType>(&self, row: usize, col: usize, component: usize) -> Option<T> {
        self.view::<T>()?.get([row, col, component]).copied()
    }

    pub fn set_attachment(&mut self, key: impl Into<String>, attachment: Attachment) {
        self.attachments.insert(key.into(), attachment);
    }

    pub fn attachment(&self, key: &str) -> Option<&Attachment> {
        self.attachments.get(key)
    }

    pub fn attachments(&self) -> impl Iterator<Item = (&str, &Attachment)> {
        self.attachments.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn projection_ref(&self) -> Option<&str> {
        match self.attachment(PROJECTION_REF)? {
            Attachment::Text(projection) => Some(projection),
            Attachment::Numbers(_) => None,
        }
    }

    pub fn geo_transform(&self) -> Option<GeoTransform> {
        match self.attachment(GEO_TRANSFORM)? {
            Attachment::Numbers(coefficients) => GeoTransform::try_from(coefficients.as_slice()).ok(),
            Attachment::Text(_) => None,
        }
    }
}

/// Typed buffer of `width` x `height` pixels with `components` channels,
/// filled with [DEFAULT_FILL] truncated to `components`.
pub fn allocate_buffer<T: DataType>(
    width: usize,
    height: usize,
    components: usize,
) -> Result<Buffer<T, 3>> {
    if width == 0 || height == 0 {
        return Err(ReadError::AllocationFailed(format!(
            "invalid dimensions {width}x{height}"
        )));
    }
    if components == 0 || components > MAX_COMPONENTS {
        return Err(ReadError::AllocationFailed(format!(
            "invalid component count {components}"
        )));
    }
    let fill: Vec<T> = DEFAULT_FILL[..components]
        .iter()
        .map(|value| T::from_unit(*value))
        .collect();
    Buffer::try_new_filled([height, width, components], &fill).ok_or_else(|| {
        ReadError::AllocationFailed(format!(
            "{width}x{height}x{components} {} samples",
            T::sample_type()
        ))
    })
}

/// Default filled image data of `sample_type`.
pub fn allocate(
    width: usize,
    height: usize,
    components: usize,
    sample_type: &SampleType,
) -> Result<PixelData> {
    with_sample_type!(sample_type,
        T => allocate_buffer::<T>(width, height, components).map(T::into_pixel_data),
        name => Err(ReadError::AllocationFailed(format!("unsupported data type {name}")))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, vec![0u8])]
    #[case(2, vec![0, 0])]
    #[case(3, vec![0, 0, 0])]
    #[case(4, vec![0, 0, 0, 255])]
    fn fill_is_truncated_to_components(#[case] components: usize, #[case] pixel: Vec<u8>) {
        let buffer = allocate_buffer::<u8>(3, 2, components).unwrap();
        assert_eq!(buffer.shape(), [2, 3, components]);
        for chunk in buffer.as_slice().chunks_exact(components) {
            assert_eq!(chunk, pixel.as_slice());
        }
    }

    #[rstest]
    fn float_alpha_is_one() {
        let data = allocate(1, 1, 4, &SampleType::Float32).unwrap();
        let image = Image::new(data);
        assert_eq!(image.sample::<f32>(0, 0, 3), Some(1.0));
        assert_eq!(image.sample::<f32>(0, 0, 0), Some(0.0));
    }

    #[rstest]
    #[case(0, 4)]
    #[case(4, 0)]
    fn empty_dimensions_fail(#[case] width: usize, #[case] height: usize) {
        assert!(matches!(
            allocate(width, height, 1, &SampleType::UInt8),
            Err(ReadError::AllocationFailed(_))
        ));
    }

    #[rstest]
    fn unsupported_type_fails() {
        assert!(matches!(
            allocate(2, 2, 1, &SampleType::Unsupported("CInt16".into())),
            Err(ReadError::AllocationFailed(_))
        ));
    }

    #[rstest]
    fn wrong_sample_type_has_no_view() {
        let image = Image::new(allocate(2, 2, 1, &SampleType::UInt16).unwrap());
        assert!(image.view::<u8>().is_none());
        assert_eq!(image.view::<u16>().unwrap().shape(), &[2, 2, 1]);
        assert_eq!((image.width(), image.height(), image.components()), (2, 2, 1));
    }

    #[rstest]
    fn typed_attachments() {
        let mut image = Image::new(allocate(1, 1, 1, &SampleType::UInt8).unwrap());
        assert!(image.projection_ref().is_none());
        image.set_attachment(PROJECTION_REF, Attachment::Text("EPSG:4326".into()));
        image.set_attachment(GEO_TRANSFORM, Attachment::Numbers(vec![0., 1., 0., 0., 0., -1.]));
        assert_eq!(image.projection_ref(), Some("EPSG:4326"));
        assert_eq!(image.geo_transform().unwrap().pixel_height(), -1.0);
    }
}
