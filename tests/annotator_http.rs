//! GoogleNlpAnnotator against a local one-shot HTTP stub.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use entlist::annotate::{Annotator, Credentials, GoogleNlpAnnotator};
use entlist::{analyze, Classifier, EntityType, Error};

/// Serve exactly one request, answering with `status` and `body` after
/// `delay`. The join handle yields the raw request that was received.
fn serve_once(status: &'static str, body: &'static str, delay: Duration) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
            let done = line == "\r\n";
            head.push_str(&line);
            if done {
                break;
            }
        }
        let mut payload = vec![0u8; content_length];
        reader.read_exact(&mut payload).unwrap();

        thread::sleep(delay);
        let _ = write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.flush();

        head + &String::from_utf8_lossy(&payload)
    });

    (endpoint, handle)
}

const LOUVRE_RESPONSE: &str = r#"{
    "entities": [
        {"name": "Louvre", "type": "LOCATION",
         "mentions": [{"text": {"content": "Louvre", "beginOffset": 10}, "type": "PROPER"}]}
    ],
    "languageCode": "en",
    "languageSupported": true
}"#;

#[test]
fn api_key_request_and_response() {
    let (endpoint, server) = serve_once("200 OK", LOUVRE_RESPONSE, Duration::ZERO);
    let annotator = GoogleNlpAnnotator::new(Credentials::ApiKey("test-key".into()))
        .with_endpoint(endpoint)
        .with_timeout(Duration::from_secs(5));

    let entities = annotator.detect_entities("I saw the Louvre").unwrap();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].entity_type, EntityType::Location);

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /v2/documents:analyzeEntities HTTP/1.1"));
    assert!(request
        .lines()
        .any(|l| l.eq_ignore_ascii_case("x-goog-api-key: test-key")));
    assert!(request.contains(r#""encodingType":"UTF8""#));
    assert!(request.contains(r#""languageCode":"en""#));
    assert!(request.contains(r#""type":"PLAIN_TEXT""#));
    assert!(request.contains(r#""content":"I saw the Louvre""#));
}

#[test]
fn access_token_sent_as_bearer() {
    let (endpoint, server) = serve_once("200 OK", "{}", Duration::ZERO);
    let annotator = GoogleNlpAnnotator::new(Credentials::AccessToken("tok123".into()))
        .with_endpoint(endpoint);

    assert!(annotator.detect_entities("hello there").unwrap().is_empty());

    let request = server.join().unwrap();
    assert!(request
        .lines()
        .any(|l| l.eq_ignore_ascii_case("authorization: Bearer tok123")));
    assert!(!request.to_ascii_lowercase().contains("x-goog-api-key"));
}

#[test]
fn end_to_end_through_analyze() {
    let (endpoint, server) = serve_once("200 OK", LOUVRE_RESPONSE, Duration::ZERO);
    let annotator =
        GoogleNlpAnnotator::new(Credentials::ApiKey("k".into())).with_endpoint(endpoint);

    let list = analyze(&annotator, &Classifier::default(), "I saw the Louvre").unwrap();
    assert_eq!(list.determined_proper_nouns(), ["Louvre"]);
    server.join().unwrap();
}

#[test]
fn error_status_is_annotation_failure() {
    let body = r#"{"error": {"code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED"}}"#;
    let (endpoint, server) = serve_once("403 Forbidden", body, Duration::ZERO);
    let annotator =
        GoogleNlpAnnotator::new(Credentials::ApiKey("bad".into())).with_endpoint(endpoint);

    let err = annotator.detect_entities("I saw the Louvre").unwrap_err();
    match err {
        Error::AnnotationFailed(msg) => {
            assert!(msg.contains("403"), "{msg}");
            assert!(msg.contains("PERMISSION_DENIED"), "{msg}");
            assert!(msg.contains("API key not valid."), "{msg}");
        }
        other => panic!("expected AnnotationFailed, got {other:?}"),
    }
    server.join().unwrap();
}

#[test]
fn malformed_body_is_annotation_failure() {
    let (endpoint, server) = serve_once("200 OK", "not json", Duration::ZERO);
    let annotator =
        GoogleNlpAnnotator::new(Credentials::ApiKey("k".into())).with_endpoint(endpoint);

    let err = annotator.detect_entities("I saw the Louvre").unwrap_err();
    assert!(matches!(err, Error::AnnotationFailed(_)));
    server.join().unwrap();
}

#[test]
fn slow_service_times_out() {
    let (endpoint, server) = serve_once("200 OK", "{}", Duration::from_secs(3));
    let annotator = GoogleNlpAnnotator::new(Credentials::ApiKey("k".into()))
        .with_endpoint(endpoint)
        .with_timeout(Duration::from_millis(500));

    let err = annotator.detect_entities("I saw the Louvre").unwrap_err();
    assert!(
        matches!(err, Error::AnnotationTimedOut(d) if d == Duration::from_millis(500)),
        "expected timeout, got {err:?}"
    );
    server.join().unwrap();
}
