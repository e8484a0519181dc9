#![allow(clippy::expect_used, clippy::unwrap_used, dead_code)]

use assert_cmd::Command;
use serde_json::{Value, json};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Front-matter-prefixed document served for `aws_instance`.
pub const INSTANCE_DOC: &str = "---\nsubcategory: \"EC2 (Elastic Compute Cloud)\"\nlayout: \"aws\"\npage_title: \"AWS: aws_instance\"\n---\n\n# Resource: aws_instance\n\nProvides an EC2 instance resource.\n";

/// Isolated data and config directories for one test.
pub struct TestEnv {
    pub data_dir: TempDir,
    pub config_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            data_dir: tempfile::tempdir().expect("failed to create data dir for tests"),
            config_dir: tempfile::tempdir().expect("failed to create config dir for tests"),
        }
    }

    /// A `tfdocs` command pointed at `api` for both the API and raw hosts.
    pub fn cmd(&self, api: &str) -> Command {
        let mut cmd = Command::cargo_bin("tfdocs").expect("tfdocs binary built");
        cmd.timeout(CMD_TIMEOUT);
        cmd.env("TFDOCS_DATA_DIR", self.data_dir.path());
        cmd.env("TFDOCS_CONFIG_DIR", self.config_dir.path());
        cmd.env("TFDOCS_GITHUB_API_URL", api);
        cmd.env("TFDOCS_RAW_URL", api);
        cmd.env("NO_COLOR", "1");
        for key in ["TFDOCS_PROVIDERS", "TFDOCS_OUTPUT_FORMAT", "TFDOCS_REGISTRY_URL", "GITHUB_TOKEN"] {
            cmd.env_remove(key);
        }
        cmd
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_dir.path().join("config.toml"), content)
            .expect("write config");
    }
}

/// Run `args` and parse stdout as JSON.
pub fn run_json(mut cmd: Command, args: &[&str]) -> Value {
    let stdout = cmd
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&stdout).expect("stdout is JSON")
}

fn entry(name: &str, dir: &str, download_url: &str) -> Value {
    json!({
        "name": name,
        "path": format!("docs/{dir}/{name}"),
        "sha": format!("blob-{name}"),
        "type": "file",
        "download_url": download_url,
    })
}

/// Serve `hashicorp/terraform-provider-aws` at `v5.0.0` in the current layout.
///
/// Resources: `instance`, `s3_bucket`. Data sources: `ami`, `instance`.
pub async fn mount_aws(server: &MockServer) {
    let repo = "/repos/hashicorp/terraform-provider-aws";
    let raw = format!("{}/hashicorp/terraform-provider-aws/v5.0.0/docs", server.uri());

    Mock::given(method("GET"))
        .and(path(format!("{repo}/contents/")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"name": "docs", "type": "dir"}])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{repo}/tags")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "v5.0.0"}, {"name": "v4.67.0"}])),
        )
        .mount(server)
        .await;

    let resources: Vec<Value> = ["instance.md", "s3_bucket.md"]
        .iter()
        .map(|f| entry(f, "resources", &format!("{raw}/resources/{f}")))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("{repo}/contents/docs/resources")))
        .respond_with(ResponseTemplate::new(200).set_body_json(resources))
        .mount(server)
        .await;

    let data_sources: Vec<Value> = ["ami.md", "instance.md"]
        .iter()
        .map(|f| entry(f, "data-sources", &format!("{raw}/data-sources/{f}")))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("{repo}/contents/docs/data-sources")))
        .respond_with(ResponseTemplate::new(200).set_body_json(data_sources))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hashicorp/terraform-provider-aws/v5.0.0/docs/resources/instance.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INSTANCE_DOC))
        .mount(server)
        .await;
}

/// Number of requests the server has seen so far.
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map_or(0, |requests| requests.len())
}
