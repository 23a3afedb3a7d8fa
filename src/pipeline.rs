//! Catalog pipelines
//!
//! Each pipeline reads a validated catalog and produces the rows for its
//! tables. Writing is left to `StarStore` so callers control the database.

use crate::catalog::{Catalog, CatalogColumn, InfoRow, included_columns};
use crate::ranking::{TierCounts, plan_tiers, rank_by_magnitude, take_brightest};
use crate::sky::locate;
use crate::star::CellStar;
use crate::storage::{CellTable, CellTableBatch};
use crate::{Error, Result};
use h3o::Resolution;

/// Brightest `n` stars that could be placed on the resolution 0 grid.
///
/// Stars are bucketed before ranking, so stars without a direction never take
/// a slot from the top `n`.
pub fn brightest(catalog: &Catalog, n: usize) -> Result<CellTableBatch> {
    let located: Vec<CellStar> = catalog
        .read_stars()?
        .iter()
        .filter_map(|star| locate(star, Resolution::Zero))
        .collect();

    let stars = take_brightest(located, n, |cs| cs.star.mag);
    if stars.is_empty() {
        return Err(Error::NoStars);
    }

    tracing::info!("Selected {} brightest stars", stars.len());
    Ok(CellTableBatch {
        table: CellTable::brightest(n),
        stars,
    })
}

/// Outcome of the tiered H3 pipeline
#[derive(Debug, Clone)]
pub struct TierRun {
    /// Positioned stars in the catalog
    pub total: usize,
    /// Tier tables in resolution order; an empty rest tier is left out
    pub batches: Vec<CellTableBatch>,
}

/// Rank every positioned star, then bucket consecutive slices of the ranking
/// at increasing H3 resolutions.
pub fn tiers(catalog: &Catalog, counts: &TierCounts) -> Result<TierRun> {
    let mut stars = catalog.read_stars()?;
    if stars.is_empty() {
        return Err(Error::NoStars);
    }
    rank_by_magnitude(&mut stars, |s| s.mag);

    let total = stars.len();
    let mut batches = Vec::new();
    for plan in plan_tiers(total, counts) {
        let located: Vec<CellStar> = stars[plan.range.clone()]
            .iter()
            .filter_map(|star| locate(star, plan.resolution))
            .collect();
        tracing::info!(
            "Bucketed {} of {} stars at resolution {}",
            located.len(),
            plan.range.len(),
            u8::from(plan.resolution)
        );

        if plan.resolution == Resolution::Two && located.is_empty() {
            continue;
        }
        batches.push(CellTableBatch {
            table: CellTable::tier(plan.resolution),
            stars: located,
        });
    }

    if batches.iter().all(|b| b.stars.is_empty()) {
        return Err(Error::NoCells);
    }

    Ok(TierRun { total, batches })
}

/// Columns and rows for `stars_info`
#[derive(Debug, Clone)]
pub struct InfoRun {
    pub columns: Vec<CatalogColumn>,
    pub rows: Vec<InfoRow>,
}

/// Every catalog column except positions and kinematics, for every row with an id.
pub fn info(catalog: &Catalog) -> Result<InfoRun> {
    let columns = included_columns(catalog.headers());
    let rows = catalog.read_info_rows(&columns)?;
    if rows.is_empty() {
        return Err(Error::NoStars);
    }
    Ok(InfoRun { columns, rows })
}

/// Magnitudes of the first and last star, if any
pub fn magnitude_span(stars: &[CellStar]) -> Option<(f64, f64)> {
    Some((stars.first()?.star.mag, stars.last()?.star.mag))
}
