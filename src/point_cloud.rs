use crate::format::layout::encoded_size;
use crate::format::{decode, DecodeError};
use crate::point::{Aabb, PointData};
use glam::{I16Vec3, U8Vec3};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PointCloudError {
    #[error("Coordinate columns differ in length: x={xs}, y={ys}, z={zs}")]
    LengthMismatch { xs: usize, ys: usize, zs: usize },

    #[error("Color columns do not match {expected} points: r={rs}, g={gs}, b={bs}")]
    ColorLengthMismatch {
        expected: usize,
        rs: usize,
        gs: usize,
        bs: usize,
    },

    #[error("Point count {0} does not fit in a u32 header or an addressable buffer")]
    TooManyPoints(usize),
}

/// Per point color channels, stored column by column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Colors {
    pub rs: Vec<u8>,
    pub gs: Vec<u8>,
    pub bs: Vec<u8>,
}

impl Colors {
    pub fn new(rs: Vec<u8>, gs: Vec<u8>, bs: Vec<u8>) -> Self {
        Self { rs, gs, bs }
    }

    fn color(&self, index: usize) -> U8Vec3 {
        U8Vec3::new(self.rs[index], self.gs[index], self.bs[index])
    }
}

/// Columnar point set: one `i16` column per axis and, for colored datasets,
/// one `u8` column per channel. All columns share the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointCloud {
    xs: Vec<i16>,
    ys: Vec<i16>,
    zs: Vec<i16>,
    colors: Option<Colors>,
}

impl PointCloud {
    pub fn new(xs: Vec<i16>, ys: Vec<i16>, zs: Vec<i16>) -> Result<Self, PointCloudError> {
        if xs.len() != ys.len() || xs.len() != zs.len() {
            return Err(PointCloudError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
                zs: zs.len(),
            });
        }
        // the colored encoding is the larger one, it must be addressable
        let fits = u32::try_from(xs.len())
            .ok()
            .and_then(|n| encoded_size(n, true))
            .is_some();
        if !fits {
            return Err(PointCloudError::TooManyPoints(xs.len()));
        }

        Ok(Self {
            xs,
            ys,
            zs,
            colors: None,
        })
    }

    pub fn with_colors(
        xs: Vec<i16>,
        ys: Vec<i16>,
        zs: Vec<i16>,
        colors: Colors,
    ) -> Result<Self, PointCloudError> {
        let mut cloud = Self::new(xs, ys, zs)?;
        let expected = cloud.len();

        if colors.rs.len() != expected || colors.gs.len() != expected || colors.bs.len() != expected
        {
            return Err(PointCloudError::ColorLengthMismatch {
                expected,
                rs: colors.rs.len(),
                gs: colors.gs.len(),
                bs: colors.bs.len(),
            });
        }

        cloud.colors = Some(colors);
        Ok(cloud)
    }

    /// Build from columns already known to be consistent (the decoder sizes
    /// every column from the same header).
    pub(crate) fn from_columns(
        xs: Vec<i16>,
        ys: Vec<i16>,
        zs: Vec<i16>,
        colors: Option<Colors>,
    ) -> Self {
        debug_assert!(xs.len() == ys.len() && xs.len() == zs.len());
        Self { xs, ys, zs, colors }
    }

    /// Decode a buffer in the binary layout, see [`decode`].
    pub fn from_bytes(buffer: &[u8], colored: bool) -> Result<Self, DecodeError> {
        decode(buffer, colored)
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Number of points as written in the file header.
    pub fn point_count(&self) -> u32 {
        // constructors reject anything larger
        self.xs.len() as u32
    }

    pub fn is_colored(&self) -> bool {
        self.colors.is_some()
    }

    pub fn xs(&self) -> &[i16] {
        &self.xs
    }

    pub fn ys(&self) -> &[i16] {
        &self.ys
    }

    pub fn zs(&self) -> &[i16] {
        &self.zs
    }

    pub fn colors(&self) -> Option<&Colors> {
        self.colors.as_ref()
    }

    pub fn rs(&self) -> Option<&[u8]> {
        self.colors.as_ref().map(|c| c.rs.as_slice())
    }

    pub fn gs(&self) -> Option<&[u8]> {
        self.colors.as_ref().map(|c| c.gs.as_slice())
    }

    pub fn bs(&self) -> Option<&[u8]> {
        self.colors.as_ref().map(|c| c.bs.as_slice())
    }

    pub fn position(&self, index: usize) -> Option<I16Vec3> {
        Some(I16Vec3::new(
            *self.xs.get(index)?,
            *self.ys.get(index)?,
            *self.zs.get(index)?,
        ))
    }

    pub fn point(&self, index: usize) -> Option<PointData> {
        let position = self.position(index)?;
        Some(PointData {
            position,
            color: self.colors.as_ref().map(|c| c.color(index)),
        })
    }

    /// Iterate the points as records, in file order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = PointData> + '_ {
        (0..self.len()).map(move |i| PointData {
            position: I16Vec3::new(self.xs[i], self.ys[i], self.zs[i]),
            color: self.colors.as_ref().map(|c| c.color(i)),
        })
    }

    /// Bounds of all positions, `None` when the cloud is empty.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut points = self.points();
        let mut aabb = Aabb::from_point(points.next()?.position);
        for point in points {
            aabb.extend(point.position);
        }
        Some(aabb)
    }

    /// Split into the raw columns.
    pub fn into_columns(self) -> (Vec<i16>, Vec<i16>, Vec<i16>, Option<Colors>) {
        (self.xs, self.ys, self.zs, self.colors)
    }
}
