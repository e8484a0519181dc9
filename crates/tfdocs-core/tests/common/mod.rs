#![allow(clippy::expect_used, clippy::unwrap_used, dead_code)]

use serde_json::{Value, json};
use tfdocs_core::Endpoints;
use tfdocs_core::github::GitHubClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A fake `terraform-provider-*` repository served by a mock GitHub.
#[derive(Debug, Clone)]
pub struct FakeRepo {
    pub owner: &'static str,
    pub name: &'static str,
    pub legacy: bool,
    pub tags: Vec<&'static str>,
    /// File names in the resource directory; `None` means the directory is missing.
    pub resources: Option<Vec<&'static str>>,
    /// File names in the data-source directory; `None` means the directory is missing.
    pub data_sources: Option<Vec<&'static str>>,
}

impl FakeRepo {
    pub fn current(owner: &'static str, name: &'static str) -> Self {
        Self {
            owner,
            name,
            legacy: false,
            tags: vec!["v5.0.0", "v4.9.0"],
            resources: Some(vec!["instance.md", "s3_bucket.md"]),
            data_sources: Some(vec!["ami.md"]),
        }
    }

    pub fn legacy(owner: &'static str, name: &'static str) -> Self {
        Self {
            owner,
            name,
            legacy: true,
            tags: vec!["v2.1.0"],
            resources: Some(vec!["monitor.html.markdown"]),
            data_sources: Some(vec!["role.html.markdown", "user.html.markdown"]),
        }
    }

    pub fn repo_path(&self) -> String {
        format!("/repos/{}/terraform-provider-{}", self.owner, self.name)
    }

    pub fn identifier(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    fn root(&self) -> &'static str {
        if self.legacy { "website/docs" } else { "docs" }
    }

    fn kind_dirs(&self) -> (&'static str, &'static str) {
        if self.legacy {
            ("r", "d")
        } else {
            ("resources", "data-sources")
        }
    }

    /// Raw URL the pipeline is expected to produce for a file.
    pub fn raw_url(&self, server: &MockServer, dir: &str, file: &str) -> String {
        format!(
            "{}/{}/terraform-provider-{}/{}/{}/{}/{}",
            server.uri(),
            self.owner,
            self.name,
            self.tags[0],
            self.root(),
            dir,
            file
        )
    }

    fn listing(&self, server: &MockServer, dir: &str, files: &[&str]) -> Value {
        let mut entries: Vec<Value> = files
            .iter()
            .map(|file| {
                json!({
                    "name": file,
                    "path": format!("{}/{}/{}", self.root(), dir, file),
                    "sha": format!("blob-{file}"),
                    "type": "file",
                    "download_url": self.raw_url(server, dir, file),
                })
            })
            .collect();
        // Subdirectories are never entities
        entries.push(json!({
            "name": "guides",
            "path": format!("{}/{}/guides", self.root(), dir),
            "sha": "tree-guides",
            "type": "dir",
            "download_url": null,
        }));
        Value::Array(entries)
    }

    fn tree(files: &[&str], sha: &str) -> Value {
        let mut entries: Vec<Value> = files
            .iter()
            .map(|file| json!({"path": file, "sha": format!("blob-{file}"), "type": "blob"}))
            .collect();
        entries.push(json!({"path": "guides", "sha": "tree-guides", "type": "tree"}));
        json!({"sha": sha, "tree": entries, "truncated": false})
    }

    /// Mount every endpoint this repository answers on `server`.
    pub async fn mount(&self, server: &MockServer) {
        let repo = self.repo_path();
        let (resource_dir, data_dir) = self.kind_dirs();

        let mut root_entries = vec![json!({"name": "main.go", "type": "file"})];
        root_entries.push(if self.legacy {
            json!({"name": "website", "type": "dir"})
        } else {
            json!({"name": "docs", "type": "dir"})
        });
        Mock::given(method("GET"))
            .and(path(format!("{repo}/contents/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(root_entries)))
            .mount(server)
            .await;

        let tags: Vec<Value> = self.tags.iter().map(|t| json!({"name": t})).collect();
        Mock::given(method("GET"))
            .and(path(format!("{repo}/tags")))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(tags)))
            .mount(server)
            .await;

        let mut parent_entries = Vec::new();
        for (dir, files) in [(resource_dir, &self.resources), (data_dir, &self.data_sources)] {
            let Some(files) = files else { continue };
            let sha = format!("tree-{dir}");
            parent_entries.push(json!({
                "name": dir,
                "path": format!("{}/{}", self.root(), dir),
                "sha": sha,
                "type": "dir",
                "download_url": null,
            }));

            Mock::given(method("GET"))
                .and(path(format!("{repo}/contents/{}/{dir}", self.root())))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(self.listing(server, dir, files)),
                )
                .mount(server)
                .await;

            Mock::given(method("GET"))
                .and(path(format!("{repo}/git/trees/{sha}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(Self::tree(files, &sha)))
                .mount(server)
                .await;
        }

        Mock::given(method("GET"))
            .and(path(format!("{repo}/contents/{}", self.root())))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(parent_entries)))
            .mount(server)
            .await;
    }
}

pub fn endpoints_for(server: &MockServer) -> Endpoints {
    Endpoints {
        api: server.uri(),
        raw: server.uri(),
        ..Endpoints::default()
    }
}

pub fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::new(endpoints_for(server)).expect("client builds")
}

/// Number of requests the server has seen so far.
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map_or(0, |requests| requests.len())
}
