//! Sky positions and H3 cell bucketing
//!
//! Catalog positions are Cartesian vectors; the H3 grid wants a latitude and
//! longitude. The star's direction is projected onto the unit sphere and read
//! off as (declination, right ascension), which H3 then treats as (lat, lon).

use crate::star::{CellStar, Star};
use crate::{Error, Result};
use h3o::{CellIndex, LatLng, Resolution};

/// Direction on the sky in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPosition {
    /// Latitude (declination), -90..=90
    pub lat: f64,
    /// Longitude (right ascension), -180..=180
    pub lon: f64,
}

/// Convert a Cartesian vector to latitude/longitude in degrees.
///
/// Returns `None` for the zero vector, which has no direction.
pub fn cartesian_to_lat_lon(x: f64, y: f64, z: f64) -> Option<SkyPosition> {
    let magnitude = (x * x + y * y + z * z).sqrt();
    if magnitude == 0.0 {
        return None;
    }

    let (xn, yn, zn) = (x / magnitude, y / magnitude, z / magnitude);

    Some(SkyPosition {
        lat: zn.asin().to_degrees(),
        lon: yn.atan2(xn).to_degrees(),
    })
}

/// H3 cell containing `position` at `resolution`.
pub fn sky_cell(position: SkyPosition, resolution: Resolution) -> Result<CellIndex> {
    let ll = LatLng::new(position.lat, position.lon)
        .map_err(|e| Error::SkyCell(format!("({}, {}): {}", position.lat, position.lon, e)))?;
    Ok(ll.to_cell(resolution))
}

/// Column holding the cell id for a resolution, e.g. `h3_0`
pub fn cell_column(resolution: Resolution) -> String {
    format!("h3_{}", u8::from(resolution))
}

/// Bucket a star into its cell, logging and dropping it on failure.
pub fn locate(star: &Star, resolution: Resolution) -> Option<CellStar> {
    let Some(position) = cartesian_to_lat_lon(star.x, star.y, star.z) else {
        tracing::warn!("Could not convert coordinates for star {}", star.label());
        return None;
    };

    match sky_cell(position, resolution) {
        Ok(cell) => Some(CellStar {
            star: star.clone(),
            cell,
        }),
        Err(e) => {
            tracing::warn!("Could not generate H3 hash for star {}: {}", star.label(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_unit_vectors() {
        let p = cartesian_to_lat_lon(1.0, 0.0, 0.0).unwrap();
        assert_close(p.lat, 0.0);
        assert_close(p.lon, 0.0);

        let p = cartesian_to_lat_lon(0.0, 1.0, 0.0).unwrap();
        assert_close(p.lat, 0.0);
        assert_close(p.lon, 90.0);

        let p = cartesian_to_lat_lon(0.0, 0.0, 1.0).unwrap();
        assert_close(p.lat, 90.0);
        assert_close(p.lon, 0.0);

        let p = cartesian_to_lat_lon(-1.0, 0.0, 0.0).unwrap();
        assert_close(p.lat, 0.0);
        assert_close(p.lon, 180.0);

        let p = cartesian_to_lat_lon(0.0, 0.0, -1.0).unwrap();
        assert_close(p.lat, -90.0);
    }

    #[test]
    fn test_magnitude_is_normalized_away() {
        let near = cartesian_to_lat_lon(1.0, 1.0, 0.0).unwrap();
        let far = cartesian_to_lat_lon(250.0, 250.0, 0.0).unwrap();
        assert_close(near.lat, far.lat);
        assert_close(near.lon, 45.0);
        assert_close(far.lon, 45.0);
    }

    #[test]
    fn test_zero_vector_has_no_direction() {
        assert!(cartesian_to_lat_lon(0.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_sky_cell_resolution() {
        let p = cartesian_to_lat_lon(0.3, -0.4, 0.5).unwrap();
        for res in [Resolution::Zero, Resolution::One, Resolution::Two] {
            let cell = sky_cell(p, res).unwrap();
            assert_eq!(cell.resolution(), res);
            let text = cell.to_string();
            assert_eq!(text.len(), 15);
            assert_eq!(text.parse::<CellIndex>().unwrap(), cell);
        }
    }

    #[test]
    fn test_finer_cell_is_inside_coarser() {
        let p = cartesian_to_lat_lon(-12.0, 3.0, 7.5).unwrap();
        let coarse = sky_cell(p, Resolution::Zero).unwrap();
        let fine = sky_cell(p, Resolution::Two).unwrap();
        assert_eq!(fine.parent(Resolution::Zero), Some(coarse));
    }

    #[test]
    fn test_nan_position_is_an_error() {
        let p = SkyPosition { lat: f64::NAN, lon: 0.0 };
        assert!(matches!(sky_cell(p, Resolution::Zero), Err(Error::SkyCell(_))));
    }

    #[test]
    fn test_cell_column_names() {
        assert_eq!(cell_column(Resolution::Zero), "h3_0");
        assert_eq!(cell_column(Resolution::Two), "h3_2");
    }

    #[test]
    fn test_locate_drops_origin() {
        let origin = Star::new(Some(1), 5.0, 0.0, 0.0, 0.0);
        assert!(locate(&origin, Resolution::Zero).is_none());

        let star = Star::new(Some(2), 5.0, 1.0, 0.0, 0.0);
        let located = locate(&star, Resolution::One).unwrap();
        assert_eq!(located.star, star);
        assert_eq!(located.cell.resolution(), Resolution::One);
    }
}
