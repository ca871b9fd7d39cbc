//! Sky positions with asymmetric rectangular uncertainty.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// An equatorial coordinate with optional asymmetric error bars, in degrees.
///
/// Immutable after construction; the "minus" uncertainties are normalized to
/// their absolute value when the position is built.
///
/// # Examples
///
/// ```
/// use too_rust::models::SkyPosition;
///
/// let pos = SkyPosition::from_circle(30.0, 0.0, 2.0).unwrap();
/// assert_eq!(pos.ra_err_plus, Some(2.0));
/// assert_eq!(pos.dec_err_minus, Some(2.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyPosition {
    /// Right Ascension (degrees)
    pub ra: f64,
    /// Declination (degrees)
    pub dec: f64,
    /// Positive uncertainty in RA
    pub ra_err_plus: Option<f64>,
    /// Negative uncertainty in RA
    pub ra_err_minus: Option<f64>,
    /// Positive uncertainty in Dec
    pub dec_err_plus: Option<f64>,
    /// Negative uncertainty in Dec
    pub dec_err_minus: Option<f64>,
}

impl SkyPosition {
    /// Validated constructor.
    ///
    /// `ra` must lie in `[0, 360]` and `dec` in `[-90, 90]`. Positive
    /// uncertainties must be non-negative and bounded by the coordinate range;
    /// negative uncertainties are accepted with either sign and stored as
    /// their absolute value.
    pub fn from_value(
        ra: f64,
        dec: f64,
        ra_err_plus: Option<f64>,
        ra_err_minus: Option<f64>,
        dec_err_plus: Option<f64>,
        dec_err_minus: Option<f64>,
    ) -> ApiResult<Self> {
        if !(0.0..=360.0).contains(&ra) || !ra.is_finite() {
            return Err(ApiError::Validation(format!(
                "RA must be in [0, 360] degrees, but you entered {}",
                ra
            )));
        }
        if !(-90.0..=90.0).contains(&dec) || !dec.is_finite() {
            return Err(ApiError::Validation(format!(
                "Dec must be in [-90, 90] degrees, but you entered {}",
                dec
            )));
        }
        if let Some(err) = ra_err_plus {
            if !(0.0..=360.0).contains(&err) || !err.is_finite() {
                return Err(ApiError::Validation(format!(
                    "RA positive uncertainty must be in [0, 360] degrees, but you entered {}",
                    err
                )));
            }
        }
        if let Some(err) = dec_err_plus {
            if !(0.0..=90.0).contains(&err) || !err.is_finite() {
                return Err(ApiError::Validation(format!(
                    "Dec positive uncertainty must be in [0, 90] degrees, but you entered {}",
                    err
                )));
            }
        }

        Ok(Self {
            ra,
            dec,
            ra_err_plus,
            ra_err_minus: ra_err_minus.map(f64::abs),
            dec_err_plus,
            dec_err_minus: dec_err_minus.map(f64::abs),
        })
    }

    /// Build a position from a circular uncertainty region.
    ///
    /// The RA uncertainty is widened by `1 / cos(dec)` to account for the
    /// narrowing of RA degrees away from the equator. This diverges towards
    /// the poles; the resulting RA uncertainty is rejected once it exceeds
    /// 360 degrees.
    pub fn from_circle(ra: f64, dec: f64, err_radius: f64) -> ApiResult<Self> {
        let ra_delta = err_radius / dec.to_radians().cos();
        Self::from_value(
            ra,
            dec,
            Some(ra_delta),
            Some(ra_delta),
            Some(err_radius),
            Some(err_radius),
        )
    }

    /// Build a position from rectangular `(plus, minus)` uncertainties.
    pub fn from_rectangle(
        ra: f64,
        dec: f64,
        ra_err: (f64, f64),
        dec_err: (f64, f64),
    ) -> ApiResult<Self> {
        Self::from_value(
            ra,
            dec,
            Some(ra_err.0),
            Some(ra_err.1),
            Some(dec_err.0),
            Some(dec_err.1),
        )
    }

    /// Solid-angle area of the error rectangle in square degrees, or `None`
    /// if any of the four uncertainties is unset.
    ///
    /// Both Dec bounds add their uncertainty to `dec`, reproducing the
    /// upstream formula as-is; with symmetric Dec uncertainties this yields
    /// an area of zero.
    pub fn area(&self) -> Option<f64> {
        let ra1 = self.ra + self.ra_err_plus?;
        let ra2 = self.ra - self.ra_err_minus?;
        let dec1 = self.dec + self.dec_err_plus?;
        let dec2 = self.dec + self.dec_err_minus?;
        let deg_per_rad = 180.0 / std::f64::consts::PI;
        Some(
            (deg_per_rad.powi(2)
                * (ra2.to_radians() - ra1.to_radians())
                * (dec2.to_radians().sin() - dec1.to_radians().sin()))
            .abs(),
        )
    }

    /// Corners of the error rectangle as `(ul, ur, ll, lr)` coordinate pairs,
    /// or `None` if any of the four uncertainties is unset.
    pub fn bounding_rectangle(&self) -> Option<[(f64, f64); 4]> {
        let ra_plus = self.ra_err_plus?;
        let ra_minus = self.ra_err_minus?;
        let dec_plus = self.dec_err_plus?;
        let dec_minus = self.dec_err_minus?;

        let ul = (self.ra - ra_minus, self.dec + dec_plus);
        let ur = (self.ra + ra_plus, self.dec + dec_plus);
        let ll = (self.ra - ra_minus, self.dec - dec_minus);
        let lr = (self.ra + ra_plus, self.dec - dec_minus);
        Some([ul, ur, ll, lr])
    }
}
