use crate::location::QueryPoint;
use crate::CoreError;

/// Grid half-width used when the caller does not pick one.
pub const DEFAULT_RADIUS: u32 = 2;

/// Validated input for one expansion run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub center: QueryPoint,
    /// Grid half-width: offsets range over `[-radius, radius]` in each axis.
    pub radius: u32,
}

impl SearchParams {
    /// Validates the target coordinate and expansion radius.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidLatitude`] if `lat` is non-finite or outside [-90, 90].
    /// - [`CoreError::InvalidLongitude`] if `lng` is non-finite or outside [-180, 180].
    /// - [`CoreError::InvalidRadius`] if `radius` is negative or does not fit in `u32`.
    pub fn new(lat: f64, lng: f64, radius: i64) -> Result<Self, CoreError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::InvalidLatitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(CoreError::InvalidLongitude(lng));
        }
        if radius < 0 {
            return Err(CoreError::InvalidRadius {
                radius,
                reason: "must not be negative".to_owned(),
            });
        }
        let radius = u32::try_from(radius).map_err(|_| CoreError::InvalidRadius {
            radius,
            reason: "is too large".to_owned(),
        })?;

        Ok(Self {
            center: QueryPoint::new(lat, lng),
            radius,
        })
    }

    /// Number of grid queries a full expansion dispatches: `(2r + 1)^2 - 1`.
    #[must_use]
    pub fn grid_cells(&self) -> u64 {
        let side = 2 * u64::from(self.radius) + 1;
        side * side - 1
    }
}
