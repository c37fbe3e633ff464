#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use figment::{
    providers::{Format, Serialized, Yaml},
    Figment,
};
use uptime_robot_exporter::config::Config;
use uptime_robot_exporter::metrics::{Metrics, SampleRegistry};
use uptime_robot_exporter::routes::create_router;
use uptime_robot_exporter::scheduler::RefreshScheduler;
use uptime_robot_exporter::state::AppState;
use uptime_robot_exporter::upstream::UptimeRobotClient;

pub const TEST_CONFIG: &str = r#"
api_key: "u123456-testkey"
exporter_name: "uptime-robot-exporter"
bind_address: "127.0.0.1"
port: 8123
log_level: "debug"
log_format: "json"
refresh_interval: 60
request_timeout: 2
"#;

pub const GOOGLE_RESPONSE: &str = r#"{
    "stat": "ok",
    "pagination": {"offset": 0, "limit": 50, "total": 1},
    "monitors": [{
        "id": 783889671,
        "friendly_name": "Google",
        "url": "https://www.google.fr",
        "type": 1,
        "sub_type": "",
        "keyword_type": null,
        "port": "",
        "interval": 300,
        "timeout": 30,
        "status": 2,
        "create_datetime": 1684600296
    }]
}"#;

pub const GOOGLE_LINE: &str = r#"uptime_robot_status{create_datetime="1684600296",friendly_name="Google",id="783889671",interval="300",job="uptime-robot-exporter",status="2",timeout="30",type="1",url="https://www.google.fr"} 2.0"#;

/// Load the test configuration, pointing the client at `api_url`.
pub fn load_test_config(api_url: &str) -> Config {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Yaml::string(TEST_CONFIG))
        .merge(("api_url", api_url))
        .extract::<Config>()
        .expect("Failed to parse test config YAML")
}

pub struct TestApp {
    pub router: Router,
    pub registry: Arc<SampleRegistry>,
    pub scheduler: Arc<RefreshScheduler<Metrics>>,
}

/// Wire the app the way `startup::run` does, without binding a socket or
/// starting the periodic loop.
pub fn build_app(config: Config) -> TestApp {
    let config = Arc::new(config);
    let client = Arc::new(UptimeRobotClient::new(&config).expect("client should build"));
    let registry = Arc::new(SampleRegistry::new());
    let metrics = Metrics::new();

    let scheduler = Arc::new(RefreshScheduler::new(
        client,
        registry.clone(),
        metrics.clone(),
        config.exporter_name.clone(),
        config.refresh_interval(),
        config.request_timeout(),
    ));

    let state = AppState {
        config: config.clone(),
        registry: registry.clone(),
        metrics,
    };

    TestApp {
        router: create_router(state),
        registry,
        scheduler,
    }
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not UTF-8")
}
