//! Great-circle distance between two WGS84 positions.

use geo::Coord;

/// Mean Earth radius in kilometres used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Return the haversine distance in kilometres between `from` and `to`.
///
/// Coordinates follow the `geo` convention: `x = longitude`,
/// `y = latitude`, both in decimal degrees. The result is symmetric and zero
/// for identical points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use marquee_core::haversine_km;
///
/// let equator = Coord { x: 0.0, y: 0.0 };
/// let one_degree_north = Coord { x: 0.0, y: 1.0 };
/// let km = haversine_km(equator, one_degree_north);
/// assert!((km - 111.19).abs() < 0.01);
/// assert_eq!(haversine_km(equator, equator), 0.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let d_lat = (to.y - from.y).to_radians();
    let d_lon = (to.x - from.x).to_radians();
    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();

    let a = half_lat.mul_add(
        half_lat,
        from.y.to_radians().cos() * to.y.to_radians().cos() * half_lon * half_lon,
    );
    // Rounding can push `a` fractionally outside the unit interval.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
