//! Integration tests for document downloads against a mock raw-content host.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ros2_release_branches::core::config::Config;
use ros2_release_branches::core::types::ReleaseName;
use ros2_release_branches::fetch::{FetchError, Fetcher};

const MANIFEST: &str = "\
repositories:
  ament/ament_cmake:
    type: git
    url: https://github.com/ament/ament_cmake.git
    version: rolling
";

const DISTRIBUTION: &str = "\
%YAML 1.1
# ROS distribution file
# see REP 143: http://ros.org/reps/rep-0143.html
---
release_platforms:
  ubuntu:
  - noble
repositories:
  ament_cmake:
    source:
      type: git
      url: https://github.com/ament/ament_cmake.git
      version: rolling
type: distribution
version: 2
";

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.github.raw_base = server.uri();
    config
}

fn kappa() -> ReleaseName {
    ReleaseName::new("kappa").unwrap()
}

#[tokio::test]
async fn downloads_manifest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ros2/ros2/rolling/ros2.repos"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MANIFEST))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&config_for(&server));
    let repos = fetcher.download_manifest().await.unwrap();

    let entry = repos.get("ament/ament_cmake").unwrap();
    assert_eq!(entry.url, "https://github.com/ament/ament_cmake.git");
    assert_eq!(entry.version.as_deref(), Some("rolling"));
}

#[tokio::test]
async fn downloads_distribution_with_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ros/rosdistro/master/kappa/distribution.yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DISTRIBUTION))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&config_for(&server));
    let distribution = fetcher.download_distribution(&kappa()).await.unwrap();

    let package = distribution.get("ament_cmake").unwrap();
    assert_eq!(
        package.source.as_ref().unwrap().url,
        "https://github.com/ament/ament_cmake.git"
    );
    assert!(distribution.extra.contains_key("release_platforms"));
}

#[tokio::test]
async fn missing_distribution_reports_status_and_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&config_for(&server));
    let err = fetcher.download_distribution(&kappa()).await.unwrap_err();

    match err {
        FetchError::Status { url, status } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/ros/rosdistro/master/kappa/distribution.yaml"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_manifest_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("repositories: [not, a, map]\n"))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&config_for(&server));
    let err = fetcher.download_manifest().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }));
}

#[tokio::test]
async fn manifest_outside_web_host_is_rejected() {
    let mut config = Config::default();
    config.manifest.repo_url = "https://gitlab.com/ros2/ros2".to_string();

    let fetcher = Fetcher::new(&config);
    let err = fetcher.download_manifest().await.unwrap_err();
    assert!(matches!(err, FetchError::Url(_)));
}
