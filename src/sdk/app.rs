//! The interactive session: explicit handlers for each user action, each one
//! followed by a fresh render of the map and the status panels.

use crate::sdk::command::{Command, HELP};
use crate::sdk::fare::{FareError, FarePredictor, FareRequest};
use crate::sdk::map::{render_map, MapView};
use crate::sdk::routing::RoutingProvider;
use crate::sdk::session::{ClickOutcome, SelectionMode, SessionState};
use crate::sdk::trip::{PassengerCount, TripDetails};
use std::fmt;

/// A message shown to the user, by severity.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Info(msg) => write!(f, "[info] {}", msg),
            Notice::Success(msg) => write!(f, "[ok] {}", msg),
            Notice::Warning(msg) => write!(f, "[warn] {}", msg),
            Notice::Error(msg) => write!(f, "[error] {}", msg),
        }
    }
}

/// Result of handling one command.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub map: MapView,
    pub notices: Vec<Notice>,
    pub quit: bool,
}

impl Frame {
    pub fn has_notice(&self, pred: impl Fn(&Notice) -> bool) -> bool {
        self.notices.iter().any(pred)
    }
}

pub struct FareApp<'a> {
    state: SessionState,
    trip: TripDetails,
    routing: Option<&'a dyn RoutingProvider>,
    predictor: &'a dyn FarePredictor,
}

impl<'a> FareApp<'a> {
    pub fn new(
        trip: TripDetails,
        routing: Option<&'a dyn RoutingProvider>,
        predictor: &'a dyn FarePredictor,
    ) -> Self {
        Self {
            state: SessionState::new(),
            trip,
            routing,
            predictor,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn trip(&self) -> &TripDetails {
        &self.trip
    }

    /// Applies `command` and renders the resulting frame.
    pub fn handle(&mut self, command: Command) -> Frame {
        let mut notices = Vec::new();
        let mut quit = false;

        match command {
            Command::Mode(mode) => self.state.set_mode(mode),
            Command::Click(point) => {
                if let ClickOutcome::Accepted { mode, .. } =
                    self.state.handle_click(point.latitude, point.longitude)
                {
                    log::info!("{} set to ({:.6}, {:.6})", mode, point.latitude, point.longitude);
                }
            }
            Command::Date(date) => self.trip.date = date,
            Command::Time(time) => self.trip.time = time,
            Command::Passengers(count) => self.trip.passengers = PassengerCount::new(count),
            Command::Reset => {
                self.state.reset();
                log::info!("Locations reset");
            }
            Command::Predict => notices.extend(self.predict()),
            Command::Show => {}
            Command::Export(_) => {}
            Command::Help => notices.push(Notice::Info(HELP.to_string())),
            Command::Quit => quit = true,
        }

        let mut frame = self.render();
        frame.quit = quit;
        frame.notices.extend(notices);

        if let Command::Export(path) = &command {
            match frame.map.write_geojson(path) {
                Ok(()) => frame
                    .notices
                    .push(Notice::Success(format!("Map written to {}", path.display()))),
                Err(e) => frame.notices.push(Notice::Error(format!(
                    "Could not write {}: {}",
                    path.display(),
                    e
                ))),
            }
        }

        frame
    }

    /// The map and status panels for the current state, without mutating it.
    pub fn render(&self) -> Frame {
        let rendered = render_map(&self.state, self.routing);
        let mut notices = Vec::new();

        if let Some(e) = rendered.route_error {
            notices.push(Notice::Warning(format!("Route drawing failed: {}", e)));
        }

        notices.push(Notice::Info(format!(
            "Click on the map to set: {}",
            match self.state.mode() {
                SelectionMode::Pickup => "Pickup Location",
                SelectionMode::Dropoff => "Dropoff Location",
            }
        )));

        for (label, point) in [("Pickup", self.state.pickup()), ("Dropoff", self.state.dropoff())] {
            notices.push(match point {
                Some(p) => Notice::Success(format!(
                    "{}: Lat: {:.6} Lon: {:.6}",
                    label, p.latitude, p.longitude
                )),
                None => Notice::Warning(format!(
                    "Click on the map to set {} location",
                    label.to_lowercase()
                )),
            });
        }

        if self.state.endpoints().is_none() {
            notices.push(Notice::Info(
                "Please select both pickup and dropoff locations on the map above to enable prediction"
                    .to_string(),
            ));
        }

        Frame {
            map: rendered.view,
            notices,
            quit: false,
        }
    }

    fn predict(&self) -> Vec<Notice> {
        let Some(request) = FareRequest::build(&self.state, &self.trip) else {
            // Prediction is disabled; the render step already says why.
            return Vec::new();
        };

        match self.predictor.predict(&request) {
            Ok(estimate) => {
                log::info!("Fare estimate {:.4}", estimate.fare);
                let mut notices = vec![Notice::Success(format!("Estimated Fare: {}", estimate))];
                if let Some((pickup, dropoff)) = self.state.endpoints() {
                    notices.push(Notice::Info(format!(
                        "Trip Details\n  Date & Time: {}\n  Passengers: {}\n  Pickup: ({:.4}, {:.4})\n  Dropoff: ({:.4}, {:.4})",
                        request.pickup_datetime,
                        self.trip.passengers,
                        pickup.latitude,
                        pickup.longitude,
                        dropoff.latitude,
                        dropoff.longitude
                    )));
                }
                notices
            }
            Err(e) => vec![fare_error_notice(e)],
        }
    }
}

fn fare_error_notice(err: FareError) -> Notice {
    match err {
        FareError::Status { status, body } => {
            Notice::Warning(format!("API Error: Status {}\nResponse: {}", status, body))
        }
        other => Notice::Error(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::fare::FareEstimate;
    use crate::sdk::session::GeoPoint;
    use chrono::{NaiveDate, NaiveTime};

    struct Fixed(f64);

    impl FarePredictor for Fixed {
        fn predict(&self, _: &FareRequest) -> Result<FareEstimate, FareError> {
            Ok(FareEstimate { fare: self.0 })
        }
    }

    fn trip() -> TripDetails {
        TripDetails::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            PassengerCount::default(),
        )
    }

    #[test]
    fn empty_session_prompts_for_both_points() {
        let predictor = Fixed(10.0);
        let app = FareApp::new(trip(), None, &predictor);
        let frame = app.render();
        assert!(frame.has_notice(|n| *n
            == Notice::Warning("Click on the map to set pickup location".into())));
        assert!(frame.has_notice(|n| *n
            == Notice::Warning("Click on the map to set dropoff location".into())));
        assert!(frame.has_notice(|n| matches!(n, Notice::Info(m) if m.contains("enable prediction"))));
    }

    #[test]
    fn predict_without_points_does_not_call_service() {
        struct Unreachable;
        impl FarePredictor for Unreachable {
            fn predict(&self, _: &FareRequest) -> Result<FareEstimate, FareError> {
                panic!("predictor must not be called");
            }
        }
        let mut app = FareApp::new(trip(), None, &Unreachable);
        let frame = app.handle(Command::Predict);
        assert!(!frame.has_notice(|n| matches!(n, Notice::Success(m) if m.starts_with("Estimated"))));
    }

    #[test]
    fn passengers_are_clamped() {
        let predictor = Fixed(10.0);
        let mut app = FareApp::new(trip(), None, &predictor);
        app.handle(Command::Passengers(20));
        assert_eq!(app.trip().passengers.get(), 8);
        app.handle(Command::Passengers(0));
        assert_eq!(app.trip().passengers.get(), 1);
    }

    #[test]
    fn coordinates_panel_uses_six_decimals() {
        let predictor = Fixed(10.0);
        let mut app = FareApp::new(trip(), None, &predictor);
        let frame = app.handle(Command::Click(GeoPoint::new(40.7, -74.0)));
        assert!(frame.has_notice(|n| *n
            == Notice::Success("Pickup: Lat: 40.700000 Lon: -74.000000".into())));
    }

    #[test]
    fn status_error_shows_code_and_body() {
        let notice = fare_error_notice(FareError::Status {
            status: 503,
            body: "upstream down".into(),
        });
        assert_eq!(
            notice,
            Notice::Warning("API Error: Status 503\nResponse: upstream down".into())
        );
    }

    #[test]
    fn quit_is_reported_in_frame() {
        let predictor = Fixed(10.0);
        let mut app = FareApp::new(trip(), None, &predictor);
        assert!(app.handle(Command::Quit).quit);
        assert!(!app.handle(Command::Show).quit);
    }
}
