//! Geographic value types handed between the synchronizer and the map.

use std::fmt;

/// Latitude/longitude pair in degrees.
///
/// Construction is unchecked; whether a pair is usable is decided by the map
/// collaborator's coordinate constructor (see [`crate::MapSurface::coordinate`]).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Axis-aligned bounding box over coordinates, grown one point at a time.
///
/// An empty box is invalid; fitting to it is skipped rather than reported.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GeoBounds {
    corners: Option<(LatLng, LatLng)>,
}

impl GeoBounds {
    pub fn extend(&mut self, point: LatLng) {
        if !point.is_finite() {
            return;
        }
        self.corners = Some(match self.corners {
            None => (point, point),
            Some((sw, ne)) => (
                LatLng::new(sw.lat.min(point.lat), sw.lng.min(point.lng)),
                LatLng::new(ne.lat.max(point.lat), ne.lng.max(point.lng)),
            ),
        });
    }

    pub fn is_valid(&self) -> bool {
        self.corners.is_some()
    }

    pub fn south_west(&self) -> Option<LatLng> {
        self.corners.map(|(sw, _)| sw)
    }

    pub fn north_east(&self) -> Option<LatLng> {
        self.corners.map(|(_, ne)| ne)
    }

    pub fn center(&self) -> Option<LatLng> {
        self.corners
            .map(|(sw, ne)| LatLng::new((sw.lat + ne.lat) * 0.5, (sw.lng + ne.lng) * 0.5))
    }
}

impl FromIterator<LatLng> for GeoBounds {
    fn from_iter<I: IntoIterator<Item = LatLng>>(iter: I) -> Self {
        let mut bounds = GeoBounds::default();
        for point in iter {
            bounds.extend(point);
        }
        bounds
    }
}

/// Options passed along with [`GeoBounds`] when fitting the map viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOptions {
    pub padding_px: f64,
    pub animate: bool,
}
