/*!
 * Integration tests for translating a single document
 */

use anyhow::Result;
use std::fs;
use std::sync::Arc;
use yamtwai::errors::FileTranslationError;
use yamtwai::providers::mock::MockProvider;
use yamtwai::translation::LanguagePair;
use crate::common::{self, RecordingObserver};

/// Three lines that each become their own chunk with a budget of 4 tokens
const THREE_CHUNKS: &str = "alpha line one\nbeta line two!\ngamma line 3..\n";

fn en_de() -> LanguagePair {
    LanguagePair::new("en", "de").unwrap()
}

/// Test the basic flow: readme.md becomes an uppercased readme.de.md
#[tokio::test]
async fn test_translate_file_withUppercaseMock_shouldWriteTranslation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "# Title\n\nHello world\n";
    let input = common::create_test_file(temp_dir.path(), "readme.md", content)?;
    let output = temp_dir.path().join("readme.de.md");
    let provider = MockProvider::uppercase();
    let controller = common::mock_controller(common::test_config("de", 1024), &provider);

    let written = controller.translate_file(&input, &output, &en_de()).await?;

    assert_eq!(written, output);
    assert_eq!(fs::read_to_string(&output)?, "# TITLE\n\nHELLO WORLD\n");
    assert_eq!(provider.request_count(), 1);
    assert_eq!(provider.requests()[0].user_content(), Some(content));
    Ok(())
}

/// Test that chunks are sent in document order and reassembled exactly
#[tokio::test]
async fn test_translate_file_withSeveralChunks_shouldKeepOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "doc.md", THREE_CHUNKS)?;
    let output = temp_dir.path().join("doc.de.md");
    let provider = MockProvider::uppercase();
    let controller = common::mock_controller(common::test_config("de", 4), &provider);

    controller.translate_file(&input, &output, &en_de()).await?;

    let sent: Vec<String> = provider.requests().iter()
        .filter_map(|r| r.user_content().map(str::to_string))
        .collect();
    assert_eq!(sent, vec!["alpha line one\n", "beta line two!\n", "gamma line 3..\n"]);
    assert_eq!(fs::read_to_string(&output)?, THREE_CHUNKS.to_uppercase());
    Ok(())
}

/// Test byte-exact reassembly with blank lines, CRLF and no trailing newline
#[tokio::test]
async fn test_translate_file_withEchoMock_shouldReproduceInputExactly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "# Heading\r\n\r\nSome paragraph text that is long enough to split.\n\n\n- item one\n- item two\n```rust\nfn main() {}\n```\nlast line without newline";
    let input = common::create_test_file(temp_dir.path(), "doc.md", content)?;
    let output = temp_dir.path().join("doc.fr.md");
    let provider = MockProvider::working();
    let controller = common::mock_controller(common::test_config("fr", 5), &provider);

    controller.translate_file(&input, &output, &LanguagePair::new("en", "fr")?).await?;

    assert_eq!(fs::read_to_string(&output)?, content);
    assert!(provider.request_count() > 1);
    Ok(())
}

/// Test whole-file atomicity: a failing chunk means no output at all
#[tokio::test]
async fn test_translate_file_withFailureOnSecondChunk_shouldWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "doc.md", THREE_CHUNKS)?;
    let output = temp_dir.path().join("out/doc.de.md");
    let provider = MockProvider::fail_on_call(2);
    let controller = common::mock_controller(common::test_config("de", 4), &provider);

    let result = controller.translate_file(&input, &output, &en_de()).await;

    match result {
        Err(FileTranslationError::Translation { path, ordinal, .. }) => {
            assert_eq!(path, input);
            assert_eq!(ordinal, 1);
        }
        other => panic!("expected a translation error, got {:?}", other),
    }
    assert!(!output.exists());
    assert!(!temp_dir.path().join("out").exists());
    assert_eq!(provider.request_count(), 2);
    Ok(())
}

/// Test that a previous output survives a failed retranslation
#[tokio::test]
async fn test_translate_file_withFailureAndExistingOutput_shouldLeaveItUntouched() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "doc.md", THREE_CHUNKS)?;
    let output = common::create_test_file(temp_dir.path(), "doc.de.md", "previous translation\n")?;
    let provider = MockProvider::fail_on_call(3);
    let controller = common::mock_controller(common::test_config("de", 4), &provider);

    assert!(controller.translate_file(&input, &output, &en_de()).await.is_err());

    assert_eq!(fs::read_to_string(&output)?, "previous translation\n");
    Ok(())
}

/// Test that a missing input is a read error and sends nothing
#[tokio::test]
async fn test_translate_file_withMissingInput_shouldReturnReadError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let provider = MockProvider::working();
    let controller = common::mock_controller(common::test_config("de", 1024), &provider);

    let result = controller
        .translate_file(&temp_dir.path().join("missing.md"), &temp_dir.path().join("missing.de.md"), &en_de())
        .await;

    assert!(matches!(result, Err(ref e) if e.is_not_found()));
    assert_eq!(provider.request_count(), 0);
    assert!(common::list_files(temp_dir.path()).is_empty());
    Ok(())
}

/// Test that an empty document produces an empty output without requests
#[tokio::test]
async fn test_translate_file_withEmptyDocument_shouldWriteEmptyOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "empty.md", "")?;
    let output = temp_dir.path().join("empty.de.md");
    let provider = MockProvider::failing();
    let controller = common::mock_controller(common::test_config("de", 1024), &provider);

    controller.translate_file(&input, &output, &en_de()).await?;

    assert_eq!(fs::read_to_string(&output)?, "");
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

/// Test the progress events of one document
#[tokio::test]
async fn test_translate_file_withObserver_shouldReportEveryChunk() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "doc.md", THREE_CHUNKS)?;
    let output = temp_dir.path().join("doc.de.md");
    let provider = MockProvider::working();
    let observer = Arc::new(RecordingObserver::default());
    let controller = common::mock_controller(common::test_config("de", 4), &provider)
        .with_observer(observer.clone());

    controller.translate_file(&input, &output, &en_de()).await?;

    assert_eq!(observer.events(), vec!["planned:3", "chunk:0", "chunk:1", "chunk:2"]);
    Ok(())
}
