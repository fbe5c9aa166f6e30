//! Voxel grid construction and the geographic <-> grid index mapping.
//!
//! The grid covers a box padded around the start and end points. Voxels live
//! in one flat arena indexed by `ix + nx * (iy + ny * iz)`, where `ix` runs
//! along longitude, `iy` along latitude and `iz` along altitude.

use crate::error::{Endpoint, PlanError, PlanResult};
use crate::models::GeoPoint;
use crate::spatial::{GRID_METERS_PER_DEG_LAT, GRID_METERS_PER_DEG_LON};
use serde::{Deserialize, Serialize};

/// Horizontal padding added around the start/end box, in degrees.
pub const BOUNDS_PADDING_DEG: f64 = 0.01;
/// Vertical room above the higher endpoint, in meters.
pub const ALTITUDE_HEADROOM_M: f64 = 100.0;

// Absorbs float rounding so a voxel's own corner maps back to that voxel.
const INDEX_EPSILON: f64 = 1e-9;

const NEIGHBOR_OFFSETS: [(isize, isize, isize); 26] = neighbor_offsets();

const fn neighbor_offsets() -> [(isize, isize, isize); 26] {
    let mut offsets = [(0, 0, 0); 26];
    let mut n = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                if !(dx == 0 && dy == 0 && dz == 0) {
                    offsets[n] = (dx, dy, dz);
                    n += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    offsets
}

/// Geographic box a grid is built over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_alt_m: f64,
    pub max_alt_m: f64,
}

impl GeoBounds {
    /// Padded box around a start/end pair: 0.01° on each horizontal side,
    /// floor at the lower altitude, ceiling 100 m above the higher one.
    pub fn around(start: &GeoPoint, end: &GeoPoint) -> Self {
        Self {
            min_lat: start.lat.min(end.lat) - BOUNDS_PADDING_DEG,
            max_lat: start.lat.max(end.lat) + BOUNDS_PADDING_DEG,
            min_lon: start.lon.min(end.lon) - BOUNDS_PADDING_DEG,
            max_lon: start.lon.max(end.lon) + BOUNDS_PADDING_DEG,
            min_alt_m: start.altitude_m.min(end.altitude_m),
            max_alt_m: start.altitude_m.max(end.altitude_m) + ALTITUDE_HEADROOM_M,
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn alt_span(&self) -> f64 {
        self.max_alt_m - self.min_alt_m
    }
}

/// Grid dimensions along longitude (`nx`), latitude (`ny`) and altitude (`nz`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl GridDims {
    /// Size a grid so each voxel is roughly `resolution_m` on every axis,
    /// using the flat-earth degree lengths.
    pub fn for_bounds(bounds: &GeoBounds, resolution_m: f64) -> Self {
        Self {
            nx: axis_dimension(bounds.lon_span() * GRID_METERS_PER_DEG_LON, resolution_m),
            ny: axis_dimension(bounds.lat_span() * GRID_METERS_PER_DEG_LAT, resolution_m),
            nz: axis_dimension(bounds.alt_span(), resolution_m),
        }
    }

    pub fn voxel_count(&self) -> u64 {
        (self.nx as u64)
            .saturating_mul(self.ny as u64)
            .saturating_mul(self.nz as u64)
    }

    pub fn id_of(&self, index: VoxelIndex) -> VoxelId {
        VoxelId(index.ix + self.nx * (index.iy + self.ny * index.iz))
    }
}

/// Number of voxels needed to cover `meters` at `resolution_m`, at least 1.
pub fn axis_dimension(meters: f64, resolution_m: f64) -> usize {
    let cells = (meters / resolution_m).ceil();
    if cells.is_finite() && cells >= 1.0 {
        cells as usize
    } else {
        1
    }
}

/// Map a coordinate to its voxel index along one axis, clamped into the grid.
pub fn geo_to_index(value: f64, min: f64, span: f64, dim: usize) -> usize {
    if span <= 0.0 || dim == 0 {
        return 0;
    }
    let scaled = ((value - min) / span) * dim as f64 + INDEX_EPSILON;
    if !scaled.is_finite() || scaled < 0.0 {
        return 0;
    }
    (scaled.floor() as usize).min(dim - 1)
}

/// Map a voxel index along one axis back to the coordinate of its lower edge.
pub fn index_to_geo(index: usize, min: f64, span: f64, dim: usize) -> f64 {
    if dim == 0 {
        return min;
    }
    min + (index as f64 / dim as f64) * span
}

/// Integer position of a voxel in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelIndex {
    pub ix: usize,
    pub iy: usize,
    pub iz: usize,
}

impl VoxelIndex {
    pub fn new(ix: usize, iy: usize, iz: usize) -> Self {
        Self { ix, iy, iz }
    }
}

/// Position of a voxel in the grid arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelId(pub usize);

/// One cell of the search grid together with its search state.
#[derive(Debug, Clone)]
pub struct Voxel {
    pub index: VoxelIndex,
    pub position: GeoPoint,
    g: f64,
    h: f64,
    f: f64,
    pub parent: Option<VoxelId>,
    pub walkable: bool,
}

impl Voxel {
    fn new(index: VoxelIndex, position: GeoPoint) -> Self {
        Self {
            index,
            position,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: None,
            walkable: true,
        }
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn f(&self) -> f64 {
        self.f
    }

    /// Set cost-so-far and estimate together; `f` follows.
    pub fn set_scores(&mut self, g: f64, h: f64) {
        self.g = g;
        self.h = h;
        self.f = g + h;
    }
}

/// Dense voxel grid owned by a single planning call.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    bounds: GeoBounds,
    dims: GridDims,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    /// Allocate a grid over `bounds` at `resolution_m`.
    ///
    /// Fails with [`PlanError::GridTooLarge`] before allocating when the voxel
    /// count would exceed `max_voxels`.
    pub fn new(bounds: GeoBounds, resolution_m: f64, max_voxels: usize) -> PlanResult<Self> {
        if !resolution_m.is_finite() || resolution_m <= 0.0 {
            return Err(PlanError::InvalidResolution(resolution_m));
        }

        let dims = GridDims::for_bounds(&bounds, resolution_m);
        let count = dims.voxel_count();
        if count > max_voxels as u64 {
            return Err(PlanError::GridTooLarge {
                voxels: count,
                limit: max_voxels,
            });
        }

        let mut voxels = Vec::with_capacity(count as usize);
        for iz in 0..dims.nz {
            let altitude_m = index_to_geo(iz, bounds.min_alt_m, bounds.alt_span(), dims.nz);
            for iy in 0..dims.ny {
                let lat = index_to_geo(iy, bounds.min_lat, bounds.lat_span(), dims.ny);
                for ix in 0..dims.nx {
                    let lon = index_to_geo(ix, bounds.min_lon, bounds.lon_span(), dims.nx);
                    voxels.push(Voxel::new(
                        VoxelIndex::new(ix, iy, iz),
                        GeoPoint::new(lat, lon, altitude_m),
                    ));
                }
            }
        }

        Ok(Self {
            bounds,
            dims,
            voxels,
        })
    }

    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn voxel(&self, id: VoxelId) -> &Voxel {
        &self.voxels[id.0]
    }

    pub fn voxel_mut(&mut self, id: VoxelId) -> &mut Voxel {
        &mut self.voxels[id.0]
    }

    pub fn voxels_mut(&mut self) -> impl Iterator<Item = &mut Voxel> {
        self.voxels.iter_mut()
    }

    /// Forward mapping: the voxel index covering `point`, clamped into the grid.
    pub fn index_of(&self, point: &GeoPoint) -> VoxelIndex {
        let b = &self.bounds;
        VoxelIndex {
            ix: geo_to_index(point.lon, b.min_lon, b.lon_span(), self.dims.nx),
            iy: geo_to_index(point.lat, b.min_lat, b.lat_span(), self.dims.ny),
            iz: geo_to_index(point.altitude_m, b.min_alt_m, b.alt_span(), self.dims.nz),
        }
    }

    /// Reverse mapping: the geographic corner a voxel index stands for.
    pub fn position_of(&self, index: VoxelIndex) -> GeoPoint {
        let b = &self.bounds;
        GeoPoint::new(
            index_to_geo(index.iy, b.min_lat, b.lat_span(), self.dims.ny),
            index_to_geo(index.ix, b.min_lon, b.lon_span(), self.dims.nx),
            index_to_geo(index.iz, b.min_alt_m, b.alt_span(), self.dims.nz),
        )
    }

    pub fn locate(&self, point: &GeoPoint) -> VoxelId {
        self.dims.id_of(self.index_of(point))
    }

    /// In-bounds voxels within Chebyshev distance 1 of `id`, excluding `id`.
    /// Order is fixed: dx, then dy, then dz, each from -1 to 1.
    pub fn neighbors(&self, id: VoxelId) -> impl Iterator<Item = VoxelId> + '_ {
        let center = self.voxels[id.0].index;
        let dims = self.dims;
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy, dz)| {
            let ix = center.ix.checked_add_signed(dx)?;
            let iy = center.iy.checked_add_signed(dy)?;
            let iz = center.iz.checked_add_signed(dz)?;
            if ix >= dims.nx || iy >= dims.ny || iz >= dims.nz {
                return None;
            }
            Some(dims.id_of(VoxelIndex::new(ix, iy, iz)))
        })
    }
}

/// A freshly built grid with its located endpoints.
#[derive(Debug, Clone)]
pub struct GridBuild {
    pub grid: VoxelGrid,
    pub start: VoxelId,
    pub end: VoxelId,
}

impl GridBuild {
    /// Fail if either endpoint voxel has been marked unwalkable.
    /// Run after the no-fly filter so the check sees the zones.
    pub fn validate_endpoints(&self) -> PlanResult<()> {
        if !self.grid.voxel(self.start).walkable {
            return Err(PlanError::EndpointBlocked {
                which: Endpoint::Start,
            });
        }
        if !self.grid.voxel(self.end).walkable {
            return Err(PlanError::EndpointBlocked {
                which: Endpoint::End,
            });
        }
        Ok(())
    }
}

/// Build the padded grid for a start/end pair and locate both endpoints.
pub fn build_grid(
    start: &GeoPoint,
    end: &GeoPoint,
    resolution_m: f64,
    max_voxels: usize,
) -> PlanResult<GridBuild> {
    if !start.is_finite() {
        return Err(PlanError::InvalidCoordinate {
            which: Endpoint::Start,
        });
    }
    if !end.is_finite() {
        return Err(PlanError::InvalidCoordinate {
            which: Endpoint::End,
        });
    }

    let bounds = GeoBounds::around(start, end);
    let grid = VoxelGrid::new(bounds, resolution_m, max_voxels)?;
    let dims = grid.dims();
    tracing::debug!(
        "Grid size: {} x {} x {} = {} voxels",
        dims.nx,
        dims.ny,
        dims.nz,
        grid.len()
    );

    let start = grid.locate(start);
    let end = grid.locate(end);
    Ok(GridBuild { grid, start, end })
}
