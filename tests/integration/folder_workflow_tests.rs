/*!
 * Integration tests for translating directory trees
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use yamtwai::errors::{AppError, ValidationError};
use yamtwai::providers::mock::MockProvider;
use crate::common::{self, RecordingObserver};

/// Test mirroring a recursive tree under an output directory
#[tokio::test]
async fn test_run_folder_withOutputDir_shouldMirrorTree() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let docs = temp_dir.path().join("docs");
    let out = temp_dir.path().join("out");
    common::create_test_file(&docs, "index.md", "index\n")?;
    common::create_test_file(&docs, "a/b.md", "nested b\n")?;
    common::create_test_file(&docs, "a/c/d.md", "deep d\n")?;
    common::create_test_file(&docs, "a/image.png", "png")?;
    let provider = MockProvider::uppercase();
    let controller = common::mock_controller(common::test_config("de", 1024), &provider);

    let summary = controller.run_folder(&docs, Some(out.as_path()), true).await?;

    assert!(summary.is_clean());
    assert_eq!(summary.discovered, 3);
    assert_eq!(summary.translated.len(), 3);
    assert_eq!(
        common::list_files(&out),
        vec![PathBuf::from("a/b.de.md"), PathBuf::from("a/c/d.de.md"), PathBuf::from("index.de.md")]
    );
    assert_eq!(fs::read_to_string(out.join("a/c/d.de.md"))?, "DEEP D\n");
    // The source tree is left as it was
    assert_eq!(common::list_files(&docs).len(), 4);
    Ok(())
}

/// Test that without recursion only top-level files are translated
#[tokio::test]
async fn test_run_folder_withoutRecursion_shouldIgnoreSubdirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "top.md", "top\n")?;
    common::create_test_file(temp_dir.path(), "sub/nested.md", "nested\n")?;
    let provider = MockProvider::working();
    let controller = common::mock_controller(common::test_config("ja", 1024), &provider);

    let summary = controller.run_folder(temp_dir.path(), None, false).await?;

    assert_eq!(summary.translated.len(), 1);
    assert!(temp_dir.path().join("top.ja.md").exists());
    assert!(!temp_dir.path().join("sub/nested.ja.md").exists());

    let summary = controller.run_folder(temp_dir.path(), None, true).await?;

    // top.ja.md from the first run is recognised as an output
    assert_eq!(summary.skipped, vec![temp_dir.path().join("top.ja.md")]);
    assert_eq!(summary.translated.len(), 2);
    assert!(temp_dir.path().join("sub/nested.ja.md").exists());
    assert!(!temp_dir.path().join("top.ja.ja.md").exists());
    Ok(())
}

/// Test that one failing file does not stop the others
#[tokio::test]
async fn test_run_folder_withOneFailingFile_shouldTranslateTheRest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "ok.md", "fine content\n")?;
    let bad = common::create_test_file(temp_dir.path(), "bad.md", "this is BROKEN content\n")?;
    common::create_test_file(temp_dir.path(), "sub/deep.md", "deep content\n")?;
    let provider = MockProvider::fail_on_content("BROKEN");
    let controller = common::mock_controller(common::test_config("es", 1024), &provider);

    let summary = controller.run_folder(temp_dir.path(), None, true).await?;

    assert_eq!(summary.translated.len(), 2);
    assert_eq!(summary.failure_count(), 1);
    assert_eq!(summary.failures[0].input, bad);
    assert!(!summary.is_clean());
    assert!(temp_dir.path().join("ok.es.md").exists());
    assert!(temp_dir.path().join("sub/deep.es.md").exists());
    assert!(!temp_dir.path().join("bad.es.md").exists());
    Ok(())
}

/// Test that an unsupported target aborts before touching anything
#[tokio::test]
async fn test_run_folder_withUnsupportedLanguage_shouldAbortWithoutSideEffects() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "readme.md", "hello\n")?;
    let out = temp_dir.path().join("out");
    let provider = MockProvider::working();
    let observer = Arc::new(RecordingObserver::default());
    let controller = common::mock_controller(common::test_config("xx", 1024), &provider)
        .with_observer(observer.clone());

    let result = controller.run_folder(temp_dir.path(), Some(out.as_path()), true).await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::UnsupportedLanguage(ref code))) if code == "xx"
    ));
    assert_eq!(provider.request_count(), 0);
    assert_eq!(common::list_files(temp_dir.path()), vec![PathBuf::from("readme.md")]);
    assert!(!out.exists());
    assert!(observer.events().is_empty());
    Ok(())
}

/// Test that undecodable input is reported and isolated
#[tokio::test]
async fn test_run_folder_withNonUtf8File_shouldReportDecodeError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    fs::write(temp_dir.path().join("binary.md"), [0xff, 0xfe, 0x00, 0x80])?;
    common::create_test_file(temp_dir.path(), "text.md", "plain text\n")?;
    let provider = MockProvider::working();
    let controller = common::mock_controller(common::test_config("pt", 1024), &provider);

    let summary = controller.run_folder(temp_dir.path(), None, false).await?;

    assert_eq!(summary.translated.len(), 1);
    assert_eq!(summary.failure_count(), 1);
    assert!(summary.failures[0].error.is_decode_error());
    assert!(!temp_dir.path().join("binary.pt.md").exists());
    assert_eq!(provider.request_count(), 1);
    Ok(())
}

/// Test that a missing input root is a discovery error
#[tokio::test]
async fn test_run_folder_withMissingRoot_shouldReturnDiscoveryError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let provider = MockProvider::working();
    let controller = common::mock_controller(common::test_config("de", 1024), &provider);

    let result = controller.run_folder(&temp_dir.path().join("nope"), None, true).await;

    assert!(matches!(result, Err(AppError::Discovery { .. })));
    Ok(())
}

/// Test translating a single file into an output directory
#[tokio::test]
async fn test_run_withSingleFile_shouldWriteIntoOutputDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "docs/guide.md", "guide\n")?;
    let out = temp_dir.path().join("out");
    let provider = MockProvider::uppercase();
    let controller = common::mock_controller(common::test_config("vi", 1024), &provider);

    let summary = controller.run(&input, Some(out.as_path())).await?;

    assert_eq!(summary.translated, vec![(input, out.join("guide.vi.md"))]);
    assert_eq!(fs::read_to_string(out.join("guide.vi.md"))?, "GUIDE\n");
    Ok(())
}

/// Test the progress events of a whole run
#[tokio::test]
async fn test_run_folder_withObserver_shouldReportRunLifecycle() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "one.md", "one\n")?;
    common::create_test_file(temp_dir.path(), "one.de.md", "ONE\n")?;
    let provider = MockProvider::working();
    let observer = Arc::new(RecordingObserver::default());
    let controller = common::mock_controller(common::test_config("de", 1024), &provider)
        .with_observer(observer.clone());

    controller.run_folder(temp_dir.path(), None, false).await?;

    let events = observer.events();
    assert_eq!(events.first().map(String::as_str), Some("discovered:2"));
    assert_eq!(events.last().map(String::as_str), Some("run:1:0"));
    assert!(events.contains(&"finished:skipped".to_string()));
    assert!(events.contains(&"finished:translated".to_string()));
    assert!(events.contains(&"chunk:0".to_string()));
    Ok(())
}
