#![allow(dead_code)]

pub mod handler_dirs {
    use std::path::Path;
    use tempfile::TempDir;

    /// A fresh, empty handler directory that is removed on drop
    pub fn empty() -> TempDir {
        tempfile::tempdir().expect("create temp handler dir")
    }

    /// Write a manifest into `dir` and return its path
    pub fn write_manifest(dir: &Path, file_name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, content).expect("write handler manifest");
        path
    }

    /// A handler directory with one YAML, one JSON and one TOML manifest
    pub fn wiki() -> TempDir {
        let dir = empty();
        write_manifest(
            dir.path(),
            "a_pages.yaml",
            r#"routes:
  - path: /{title}
    methods:
      get: { summary: Latest revision }
  - path: /{title}/{part}
    methods:
      get: { summary: Rendered part }
      put: { summary: Save part }
"#,
        );
        write_manifest(
            dir.path(),
            "b_revisions.json",
            r#"{"routes":[{"path":"/{title}/revisions/{rev}","methods":["GET"]}]}"#,
        );
        write_manifest(
            dir.path(),
            "c_health.toml",
            r#"[[routes]]
path = "/_health"
methods = ["GET", "HEAD"]
"#,
        );
        dir
    }
}
