use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair picked on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `None` for non-finite or out-of-range coordinates.
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lng_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        (lat_ok && lng_ok).then_some(Self::new(latitude, longitude))
    }

    /// The (longitude, latitude) order used by routing services and GeoJSON.
    pub fn lon_lat(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Pickup,
    Dropoff,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Pickup => write!(f, "pickup"),
            SelectionMode::Dropoff => write!(f, "dropoff"),
        }
    }
}

/// Which slots are currently filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Empty,
    PickupOnly,
    DropoffOnly,
    BothSet,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// The click was new and written into the slot for `mode`.
    Accepted { mode: SelectionMode, point: GeoPoint },
    /// Same coordinates and mode as the last accepted click.
    Duplicate,
}

/// Selection state for one interactive session.
///
/// Starts empty in pickup mode. Points are only ever written through
/// [`SessionState::handle_click`] or [`SessionState::accept_click`], one slot per
/// accepted click.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pickup: Option<GeoPoint>,
    dropoff: Option<GeoPoint>,
    mode: SelectionMode,
    last_click: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pickup(&self) -> Option<GeoPoint> {
        self.pickup
    }

    pub fn dropoff(&self) -> Option<GeoPoint> {
        self.dropoff
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn last_click(&self) -> Option<&str> {
        self.last_click.as_deref()
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    pub fn phase(&self) -> SelectionPhase {
        match (self.pickup, self.dropoff) {
            (None, None) => SelectionPhase::Empty,
            (Some(_), None) => SelectionPhase::PickupOnly,
            (None, Some(_)) => SelectionPhase::DropoffOnly,
            (Some(_), Some(_)) => SelectionPhase::BothSet,
        }
    }

    /// Both points, when the route and the fare prediction are available.
    pub fn endpoints(&self) -> Option<(GeoPoint, GeoPoint)> {
        self.pickup.zip(self.dropoff)
    }

    /// Overwrites the slot named by `mode`. The other slot is untouched.
    pub fn accept_click(&mut self, point: GeoPoint, mode: SelectionMode) {
        match mode {
            SelectionMode::Pickup => self.pickup = Some(point),
            SelectionMode::Dropoff => self.dropoff = Some(point),
        }
    }

    /// Deduplicates a raw map click against the last accepted one and
    /// forwards it to [`SessionState::accept_click`] in the current mode.
    pub fn handle_click(&mut self, latitude: f64, longitude: f64) -> ClickOutcome {
        let signature = click_signature(latitude, longitude, self.mode);
        if self.last_click.as_deref() == Some(signature.as_str()) {
            log::debug!("Discarding repeated click {}", signature);
            return ClickOutcome::Duplicate;
        }

        log::debug!("Accepted click {}", signature);
        self.last_click = Some(signature);
        let point = GeoPoint::new(latitude, longitude);
        self.accept_click(point, self.mode);
        ClickOutcome::Accepted {
            mode: self.mode,
            point,
        }
    }

    /// Clears both points and the click signature. The selection mode is kept.
    pub fn reset(&mut self) {
        self.pickup = None;
        self.dropoff = None;
        self.last_click = None;
    }
}

fn click_signature(latitude: f64, longitude: f64, mode: SelectionMode) -> String {
    format!("{}_{}_{}", latitude, longitude, mode)
}
