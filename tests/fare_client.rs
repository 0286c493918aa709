use chrono::{NaiveDate, NaiveTime};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use taxifare_rust::sdk::fare::{FareError, FarePredictor, FareRequest, FareServiceClient};
use taxifare_rust::sdk::session::{GeoPoint, SelectionMode, SessionState};
use taxifare_rust::sdk::trip::{PassengerCount, TripDetails};

/// Accepts one connection, waits `delay`, answers with `status` and `body`.
/// Returns the base URL and a handle yielding the request line.
fn serve_once(status: &'static str, body: &'static str, delay: Duration) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/predict", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            if reader.read_line(&mut header).unwrap_or(0) == 0 || header == "\r\n" {
                break;
            }
        }

        thread::sleep(delay);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let mut stream = stream;
        // The client may already have given up.
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
        request_line.trim_end().to_string()
    });

    (url, handle)
}

fn request() -> FareRequest {
    let mut state = SessionState::new();
    state.accept_click(GeoPoint::new(40.7, -74.0), SelectionMode::Pickup);
    state.accept_click(GeoPoint::new(40.75, -73.9), SelectionMode::Dropoff);
    let trip = TripDetails::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        PassengerCount::new(2),
    );
    FareRequest::build(&state, &trip).unwrap()
}

#[test]
fn sends_query_and_reads_fare() {
    let (url, server) = serve_once("200 OK", r#"{"fare": 23.456}"#, Duration::ZERO);
    let client = FareServiceClient::new(url, Duration::from_secs(5)).unwrap();

    let estimate = client.predict(&request()).unwrap();
    assert_eq!(estimate.to_string(), "$23.46");

    let request_line = server.join().unwrap();
    assert!(request_line.starts_with("GET /predict?"), "{request_line}");
    assert!(request_line.contains("pickup_datetime=2024-01-01+12%3A00%3A00"));
    assert!(request_line.contains("pickup_longitude=-74"));
    assert!(request_line.contains("pickup_latitude=40.7"));
    assert!(request_line.contains("dropoff_longitude=-73.9"));
    assert!(request_line.contains("dropoff_latitude=40.75"));
    assert!(request_line.contains("passenger_count=2"));
}

#[test]
fn empty_payload_is_no_prediction() {
    let (url, server) = serve_once("200 OK", "{}", Duration::ZERO);
    let client = FareServiceClient::new(url, Duration::from_secs(5)).unwrap();
    assert!(matches!(
        client.predict(&request()),
        Err(FareError::NoPrediction)
    ));
    server.join().unwrap();
}

#[test]
fn error_status_is_reported_with_body() {
    let (url, server) = serve_once(
        "500 Internal Server Error",
        r#"{"detail":"model not loaded"}"#,
        Duration::ZERO,
    );
    let client = FareServiceClient::new(url, Duration::from_secs(5)).unwrap();
    match client.predict(&request()) {
        Err(FareError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, r#"{"detail":"model not loaded"}"#);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    server.join().unwrap();
}

#[test]
fn slow_service_times_out() {
    let (url, server) = serve_once("200 OK", r#"{"fare": 10.0}"#, Duration::from_millis(1500));
    let client = FareServiceClient::new(url, Duration::from_millis(200)).unwrap();
    let err = client.predict(&request()).unwrap_err();
    assert!(matches!(err, FareError::Timeout), "{err:?}");
    assert_eq!(err.to_string(), "Request timed out. Please try again.");
    server.join().unwrap();
}

#[test]
fn refused_connection_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/predict", listener.local_addr().unwrap());
    drop(listener);

    let client = FareServiceClient::new(url, Duration::from_secs(2)).unwrap();
    let err = client.predict(&request()).unwrap_err();
    assert!(matches!(err, FareError::Request(_)), "{err:?}");
    assert!(err.to_string().starts_with("Error: "));
}
