use itertools::Itertools;
use log::info;

use crate::{
    components::{
        dataset::{ColorRole, RasterDataset},
        SampleType,
    },
    errors::{ReadError, Result},
};

/// Band kept for packing, with its 1-based dataset index.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedBand {
    pub band: usize,
    pub role: ColorRole,
}

/// Single sample type shared by all bands of `dataset`, including bands
/// that will not be packed.
pub fn unify_sample_type<D: RasterDataset>(dataset: &D, name: &str) -> Result<SampleType> {
    let types: Vec<SampleType> = (1..=dataset.band_count())
        .map(|band| {
            dataset
                .band_type(band)
                .map_err(|source| ReadError::BandQueryFailed { band, source })
        })
        .process_results(|types| types.sorted().dedup().collect())?;

    match types.as_slice() {
        [] => {
            info!("{name}: no raster bands");
            Err(ReadError::NoRasterData)
        }
        [sample_type] => Ok(sample_type.clone()),
        _ => {
            info!("{name}: multiple input data types not supported");
            for sample_type in &types {
                info!("   data type {sample_type}");
            }
            Err(ReadError::UnsupportedMixedTypes(
                types.iter().map(|sample_type| sample_type.name().to_owned()).collect(),
            ))
        }
    }
}

/// Bands with a defined color role, in dataset order.
pub fn classify_bands<D: RasterDataset>(dataset: &D, name: &str) -> Result<Vec<ClassifiedBand>> {
    let mut classified = Vec::new();
    for band in 1..=dataset.band_count() {
        let role = dataset
            .color_role(band)
            .map_err(|source| ReadError::BandQueryFailed { band, source })?;
        if role.is_defined() {
            classified.push(ClassifiedBand { band, role });
        } else {
            info!("{name}: undefined classification on raster band {band}");
        }
    }

    if classified.is_empty() {
        info!("{name}: no classified raster bands");
        return Err(ReadError::NoClassifiedBands);
    }
    Ok(classified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::memory::MemoryDataset;
    use rstest::rstest;

    fn dataset(bands: &[(SampleType, ColorRole)]) -> MemoryDataset {
        bands
            .iter()
            .fold(MemoryDataset::new(2, 2), |dataset, (sample_type, role)| {
                dataset.with_filled_band(sample_type.clone(), role.clone(), 0.)
            })
    }

    #[rstest]
    fn uniform_bands_unify() {
        let dataset = dataset(&[
            (SampleType::UInt16, ColorRole::Gray),
            (SampleType::UInt16, ColorRole::Undefined),
        ]);
        assert_eq!(unify_sample_type(&dataset, "uniform").unwrap(), SampleType::UInt16);
    }

    #[test_log::test]
    fn mixed_types_are_rejected_with_every_name() {
        let dataset = dataset(&[
            (SampleType::UInt8, ColorRole::Red),
            (SampleType::UInt16, ColorRole::Green),
            (SampleType::UInt8, ColorRole::Blue),
        ]);
        match unify_sample_type(&dataset, "mixed") {
            Err(ReadError::UnsupportedMixedTypes(names)) => {
                assert_eq!(names, vec!["Byte".to_string(), "UInt16".to_string()])
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[rstest]
    fn undefined_bands_still_count_for_types() {
        let dataset = dataset(&[
            (SampleType::Float32, ColorRole::Gray),
            (SampleType::Float64, ColorRole::Undefined),
        ]);
        assert!(matches!(
            unify_sample_type(&dataset, "hidden"),
            Err(ReadError::UnsupportedMixedTypes(_))
        ));
    }

    #[rstest]
    fn no_bands_is_no_raster_data() {
        assert!(matches!(
            unify_sample_type(&MemoryDataset::new(2, 2), "empty"),
            Err(ReadError::NoRasterData)
        ));
    }

    #[test_log::test]
    fn undefined_bands_are_skipped_in_order() {
        let dataset = dataset(&[
            (SampleType::UInt8, ColorRole::Undefined),
            (SampleType::UInt8, ColorRole::Blue),
            (SampleType::UInt8, ColorRole::Undefined),
            (SampleType::UInt8, ColorRole::Red),
        ]);
        let classified = classify_bands(&dataset, "sparse").unwrap();
        assert_eq!(
            classified,
            vec![
                ClassifiedBand {
                    band: 2,
                    role: ColorRole::Blue
                },
                ClassifiedBand {
                    band: 4,
                    role: ColorRole::Red
                },
            ]
        );
    }

    #[rstest]
    fn all_undefined_is_no_classified_bands() {
        let dataset = dataset(&[
            (SampleType::UInt8, ColorRole::Undefined),
            (SampleType::UInt8, ColorRole::Undefined),
        ]);
        assert!(matches!(
            classify_bands(&dataset, "undefined"),
            Err(ReadError::NoClassifiedBands)
        ));
    }
}
