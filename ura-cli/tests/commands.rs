//! End-to-end tests of the `ura` subcommands against files on disk.

use std::io::{Cursor, Read};
use std::path::PathBuf;

use ura_cli::{run, CliError, Command, InputArgs, OutputArgs, Outcome, ShareArgs, ZipArgs};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ura_core::{Element, Page, Project};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_project(dir: &tempfile::TempDir) -> PathBuf {
    let project = Project::new("Quiz Night").with_page(
        Page::new("Start")
            .with_id("start")
            .with_element(Element::text("Ready?").with_id("t")),
    );
    let path = dir.path().join("quiz.json");
    std::fs::write(&path, project.to_json().expect("json")).expect("write project");
    path
}

fn input(project: PathBuf) -> InputArgs {
    InputArgs {
        project,
        title: None,
    }
}

// ==========================================================================
// build / zip
// ==========================================================================

#[tokio::test]
async fn test_build_writes_next_to_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_project(&dir);

    let outcome = run(Command::Build(OutputArgs {
        input: input(path),
        out: None,
    }))
    .await
    .expect("build");

    let expected = dir.path().join("quiz-night.html");
    match outcome {
        Outcome::Written { path, bytes } => {
            assert_eq!(path, expected);
            let html = std::fs::read_to_string(&path).expect("read output");
            assert_eq!(html.len(), bytes);
            assert!(html.contains("<title>Quiz Night</title>"));
            assert!(html.contains("Ready?"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_zip_with_explicit_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_project(&dir);
    let out = dir.path().join("bundle.zip");

    run(Command::Zip(ZipArgs {
        output: OutputArgs {
            input: input(path),
            out: Some(out.clone()),
        },
        data_url: false,
    }))
    .await
    .expect("zip");

    let file = std::fs::File::open(&out).expect("open zip");
    let mut archive = zip::ZipArchive::new(file).expect("valid zip");
    let mut entry = archive.by_name("quiz-night.html").expect("entry");
    let mut html = String::new();
    entry.read_to_string(&mut html).expect("read entry");
    assert!(html.starts_with("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_zip_as_data_url_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_project(&dir);

    let outcome = run(Command::Zip(ZipArgs {
        output: OutputArgs {
            input: input(path),
            out: None,
        },
        data_url: true,
    }))
    .await
    .expect("zip");

    let Outcome::DataUrl { url } = outcome else {
        panic!("unexpected outcome: {outcome:?}");
    };
    let encoded = url
        .strip_prefix("data:application/zip;base64,")
        .expect("zip data url");
    let bytes = BASE64.decode(encoded).expect("valid base64");
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    assert!(archive.by_name("quiz-night.html").is_ok());
    assert!(!dir.path().join("quiz-night.zip").exists());
}

#[tokio::test]
async fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = run(Command::Build(OutputArgs {
        input: input(dir.path().join("nope.json")),
        out: None,
    }))
    .await;
    assert!(matches!(result, Err(CliError::Io { .. })));
}

#[tokio::test]
async fn test_malformed_project_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("write");

    let result = run(Command::Build(OutputArgs {
        input: input(path.clone()),
        out: None,
    }))
    .await;
    match result {
        Err(CliError::Project { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("unexpected result: {other:?}"),
    }
}

// ==========================================================================
// share
// ==========================================================================

#[tokio::test]
async fn test_share_prints_hosted_url() {
    let host = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("https://files.example/q.zip"))
        .expect(1)
        .mount(&host)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_project(&dir);

    let outcome = run(Command::Share(ShareArgs {
        input: input(path),
        upload_url: host.uri(),
    }))
    .await
    .expect("share");
    assert_eq!(
        outcome,
        Outcome::Shared {
            url: "https://files.example/q.zip".into()
        }
    );
}

#[tokio::test]
async fn test_share_rejects_bad_endpoint() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_project(&dir);

    let result = run(Command::Share(ShareArgs {
        input: input(path),
        upload_url: "ftp://files.example".into(),
    }))
    .await;
    assert!(matches!(result, Err(CliError::Upload(_))));
}
