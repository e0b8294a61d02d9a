use log::{debug, info};

use crate::errors::{ReadError, Result};

/// Largest component count a packed image holds.
pub const MAX_COMPONENTS: usize = 4;

/// Component layout of the packed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentPlan {
    /// Components written from classified bands.
    pub written: usize,
    /// Components of the image, `written` plus any default filled ones.
    pub components: usize,
}

impl ComponentPlan {
    pub fn is_promoted(&self) -> bool {
        self.components > self.written
    }
}

/// Plan components for `classified` bands, promoting RGB to RGBA when asked.
///
/// Promotion is decided before the component limit is checked.
pub fn plan_components(
    classified: usize,
    map_rgb_to_rgba: bool,
    name: &str,
) -> Result<ComponentPlan> {
    if classified == 0 {
        return Err(ReadError::NoClassifiedBands);
    }

    let components = if map_rgb_to_rgba && classified == 3 {
        debug!("{name}: mapping RGB to RGBA");
        4
    } else {
        classified
    };

    if components > MAX_COMPONENTS {
        info!(
            "{name}: too many raster bands to merge into a single output, maximum of {MAX_COMPONENTS} raster bands supported"
        );
        return Err(ReadError::TooManyComponents(classified));
    }

    Ok(ComponentPlan {
        written: classified,
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, true, 1)]
    #[case(2, true, 2)]
    #[case(3, true, 4)]
    #[case(3, false, 3)]
    #[case(4, true, 4)]
    #[case(4, false, 4)]
    fn component_counts(#[case] classified: usize, #[case] promote: bool, #[case] expected: usize) {
        let plan = plan_components(classified, promote, "plan").unwrap();
        assert_eq!(plan.components, expected);
        assert_eq!(plan.written, classified);
        assert_eq!(plan.is_promoted(), expected != classified);
    }

    #[rstest]
    #[case(5, true)]
    #[case(5, false)]
    #[case(9, true)]
    fn too_many_components(#[case] classified: usize, #[case] promote: bool) {
        match plan_components(classified, promote, "plan") {
            Err(ReadError::TooManyComponents(count)) => assert_eq!(count, classified),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[rstest]
    fn zero_bands_is_not_planned() {
        assert!(matches!(
            plan_components(0, true, "plan"),
            Err(ReadError::NoClassifiedBands)
        ));
    }
}
