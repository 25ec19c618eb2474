//! Venues hosting events and their optional coordinates.

use geo::Coord;

/// Identifier of a persisted venue.
pub type VenueId = u64;

/// A place hosting events.
///
/// Coordinates are WGS84 decimal degrees. Either coordinate may be missing
/// in the source data; [`Venue::location`] only reports a position when both
/// are present and finite.
///
/// # Examples
/// ```
/// use marquee_core::Venue;
///
/// let venue = Venue::new(1, "Dasarath Stadium", "Kathmandu")
///     .with_coordinates(27.6946, 85.3163);
/// let location = venue.location().expect("venue has coordinates");
/// assert_eq!(location.y, 27.6946);
/// assert_eq!(location.x, 85.3163);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Venue {
    /// Unique identifier.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// City the venue is located in.
    pub city: String,
    /// Latitude in decimal degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub longitude: Option<f64>,
}

impl Venue {
    /// Construct a venue without coordinates.
    pub fn new(id: VenueId, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            latitude: None,
            longitude: None,
        }
    }

    /// Attach coordinates while returning `self` for chaining.
    #[must_use]
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Return the venue position as a `geo` coordinate (`x = longitude`,
    /// `y = latitude`), if both coordinates are usable.
    #[must_use]
    pub fn location(&self) -> Option<Coord<f64>> {
        let latitude = self.latitude.filter(|value| value.is_finite())?;
        let longitude = self.longitude.filter(|value| value.is_finite())?;
        Some(Coord {
            x: longitude,
            y: latitude,
        })
    }
}
