//! Google Calendar source against a mock Calendar API.

#![cfg(feature = "google")]

use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use eventboard_core::EventTime;
use eventboard_providers::google::{GoogleCalendarSource, GoogleConfig, fetch_events_with};
use eventboard_providers::{EventSource, FetchErrorKind, FetchOptions};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const CALENDAR_ID: &str = "community";
const EVENTS_PATH: &str = "/calendar/v3/calendars/community/events";

fn base_url(server: &MockServer) -> String {
    format!("{}/calendar/v3", server.uri())
}

fn source_for(server: &MockServer) -> GoogleCalendarSource {
    let config = GoogleConfig::new(CALENDAR_ID, "test-key").with_base_url(base_url(server));
    GoogleCalendarSource::new(config).unwrap()
}

fn pinned_options() -> FetchOptions {
    FetchOptions::new().with_time_min(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap())
}

fn item(id: &str, summary: &str, start: serde_json::Value, end: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "status": "confirmed",
        "summary": summary,
        "htmlLink": format!("https://www.google.com/calendar/event?eid={}", id),
        "start": start,
        "end": end,
    })
}

fn three_items() -> serde_json::Value {
    json!({
        "kind": "calendar#events",
        "summary": "Community events",
        "items": [
            item(
                "a",
                "Potluck",
                json!({ "dateTime": "2025-03-08T18:00:00-05:00" }),
                json!({ "dateTime": "2025-03-08T20:00:00-05:00" }),
            ),
            item("b", "Park cleanup", json!({ "date": "2025-03-15" }), json!({ "date": "2025-03-16" })),
            item(
                "c",
                "Board meeting",
                json!({ "dateTime": "2025-03-20T19:00:00Z" }),
                json!({ "dateTime": "2025-03-20T20:30:00Z" }),
            ),
        ]
    })
}

mod success {
    use super::*;

    #[tokio::test]
    async fn sends_the_upcoming_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .and(query_param("key", "test-key"))
            .and(query_param("timeMin", "2025-03-01T12:00:00.000Z"))
            .and(query_param("orderBy", "startTime"))
            .and(query_param("singleEvents", "true"))
            .and(query_param("maxResults", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let events = source_for(&server).fetch_upcoming(pinned_options()).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn returns_records_in_service_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(three_items()))
            .mount(&server)
            .await;

        let events = source_for(&server).fetch_upcoming(pinned_options()).await.unwrap();

        let titles: Vec<_> = events.iter().map(|e| e.title.as_deref()).collect();
        assert_eq!(titles, vec![Some("Potluck"), Some("Park cleanup"), Some("Board meeting")]);
        assert_eq!(
            events[0].external_link,
            "https://www.google.com/calendar/event?eid=a"
        );
        assert_eq!(
            events[0].start,
            EventTime::from_utc(Utc.with_ymd_and_hms(2025, 3, 8, 23, 0, 0).unwrap())
        );
        assert_eq!(
            events[1].start,
            EventTime::from_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
        );
        assert!(events[1].is_all_day());
        assert!(events.iter().all(|e| e.location.is_none()));
    }

    #[tokio::test]
    async fn calendar_id_is_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calendar/v3/calendars/community%40group.calendar.google.com/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let config = GoogleConfig::new("community@group.calendar.google.com", "test-key")
            .with_base_url(base_url(&server));
        let source = GoogleCalendarSource::new(config).unwrap();
        assert!(source.fetch_upcoming(pinned_options()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn extra_items_beyond_the_cap_are_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .and(query_param("maxResults", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(three_items()))
            .mount(&server)
            .await;

        let events = source_for(&server)
            .fetch_upcoming(pinned_options().with_max_results(2))
            .await
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].title.as_deref(), Some("Park cleanup"));
    }

    #[tokio::test]
    async fn out_of_order_items_keep_service_order() {
        let server = MockServer::start().await;
        let body = json!({
            "items": [
                item("late", "Spring fair", json!({ "date": "2025-04-12" }), json!({ "date": "2025-04-13" })),
                item(
                    "early",
                    "Potluck",
                    json!({ "dateTime": "2025-03-08T18:00:00-05:00" }),
                    json!({ "dateTime": "2025-03-08T20:00:00-05:00" }),
                ),
                item(
                    "middle",
                    "Board meeting",
                    json!({ "dateTime": "2025-03-20T19:00:00Z" }),
                    json!({ "dateTime": "2025-03-20T20:30:00Z" }),
                ),
            ]
        });
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let events = source_for(&server).fetch_upcoming(pinned_options()).await.unwrap();

        let links: Vec<_> = events.iter().map(|e| e.external_link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://www.google.com/calendar/event?eid=late",
                "https://www.google.com/calendar/event?eid=early",
                "https://www.google.com/calendar/event?eid=middle",
            ]
        );
        assert!(events[1].start < events[0].start);
    }
}

mod one_shot {
    use super::*;

    fn config_for(server: &MockServer) -> GoogleConfig {
        GoogleConfig::new(CALENDAR_ID, "test-key").with_base_url(base_url(server))
    }

    #[tokio::test]
    async fn three_upcoming_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .and(query_param("key", "test-key"))
            .and(query_param("orderBy", "startTime"))
            .and(query_param("singleEvents", "true"))
            .and(query_param("maxResults", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(three_items()))
            .expect(1)
            .mount(&server)
            .await;

        let events = fetch_events_with(config_for(&server)).await.unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].title.as_deref(), Some("Potluck"));
        assert_eq!(events[2].title.as_deref(), Some("Board meeting"));
        assert_eq!(
            events[2].end,
            EventTime::from_utc(Utc.with_ymd_and_hms(2025, 3, 20, 20, 30, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn empty_calendar_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let events = fetch_events_with(config_for(&server)).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn rejection_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetch_events_with(config_for(&server)).await.unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::RemoteRejected { status: 404 });
    }
}

mod rejected {
    use super::*;

    #[tokio::test]
    async fn forbidden_carries_status_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "code": 403,
                    "message": "The request is missing a valid API key.",
                    "status": "PERMISSION_DENIED"
                }
            })))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_upcoming(pinned_options()).await.unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::RemoteRejected { status: 403 });
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.message(), "The request is missing a valid API key.");
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn not_found_without_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_upcoming(pinned_options()).await.unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::RemoteRejected { status: 404 });
        assert_eq!(err.message(), "Not Found");
    }

    #[tokio::test]
    async fn server_error_is_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_upcoming(pinned_options()).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert!(err.is_retryable());
    }
}

mod malformed {
    use super::*;

    async fn fetch_with_body(body: &str) -> eventboard_providers::FetchError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json"),
            )
            .mount(&server)
            .await;

        source_for(&server)
            .fetch_upcoming(pinned_options())
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn invalid_json() {
        let err = fetch_with_body("{ not json").await;
        assert_eq!(err.kind(), FetchErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn missing_items() {
        let err = fetch_with_body(r#"{ "kind": "calendar#events" }"#).await;
        assert_eq!(err.kind(), FetchErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn item_without_start() {
        let body = json!({
            "items": [{
                "id": "a",
                "htmlLink": "https://www.google.com/calendar/event?eid=a",
                "end": { "date": "2025-03-16" }
            }]
        });
        let err = fetch_with_body(&body.to_string()).await;
        assert_eq!(err.kind(), FetchErrorKind::MalformedResponse);
        assert!(err.message().contains("start"));
    }
}

mod transport {
    use super::*;

    #[tokio::test]
    async fn unreachable_host() {
        // Bind then release a port so nothing is listening on it.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = GoogleConfig::new(CALENDAR_ID, "test-key")
            .with_base_url(format!("http://127.0.0.1:{}/calendar/v3", port));
        let source = GoogleCalendarSource::new(config).unwrap();

        let err = source.fetch_upcoming(pinned_options()).await.unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Transport);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "items": [] }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = GoogleConfig::new(CALENDAR_ID, "test-key")
            .with_base_url(base_url(&server))
            .with_timeout(Duration::from_millis(200));
        let source = GoogleCalendarSource::new(config).unwrap();

        let err = source.fetch_upcoming(pinned_options()).await.unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Transport);
        assert_eq!(err.message(), "request timeout");
    }
}
