// tests/batch_stream.rs
#![cfg(unix)]

mod common;
use crate::common::{drive_all, drive_to_completion, fixtures, init_tracing};

use std::collections::BTreeSet;
use std::error::Error;
use std::time::Duration;

use parlint::errors::ParlintError;
use parlint::exec::ExternalCommand;
use parlint::lint::{BatchStreamProcess, SyntaxCheckOptions, SyntaxCheckProcess};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn empty_executable_is_rejected_before_spawning() {
    let result = BatchStreamProcess::spawn("", "helper.php", ["a.php"]);

    match result {
        Err(ParlintError::ArgumentError(msg)) => assert!(msg.contains("executable")),
        Err(e) => panic!("Expected ArgumentError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn empty_file_list_is_rejected_before_spawning() {
    let result = BatchStreamProcess::spawn("php", "helper.php", Vec::<String>::new());

    assert!(matches!(result, Err(ParlintError::ArgumentError(_))));
}

#[tokio::test]
async fn record_split_across_writes_is_reassembled() -> TestResult {
    let fx = fixtures();
    init_tracing();

    let mut batch =
        BatchStreamProcess::spawn(fx.shell(), fx.split_records_helper(), ["a.php", "b.php"])?;

    // The first write completes `a.php` but leaves `b.php;` dangling.
    parlint_test_utils::with_timeout(async {
        while batch.is_skipped("a.php").is_none() {
            batch.get_chunk().await?;
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        Ok::<_, ParlintError>(())
    })
    .await?;
    assert_eq!(batch.is_skipped("a.php"), Some(true));
    assert_eq!(batch.is_skipped("b.php"), None);

    drive_to_completion(&mut batch).await?;

    assert_eq!(batch.is_skipped("a.php"), Some(true));
    assert_eq!(batch.is_skipped("b.php"), Some(false));

    Ok(())
}

#[tokio::test]
async fn records_left_in_the_pipe_are_decoded_at_finish() -> TestResult {
    let fx = fixtures();
    init_tracing();

    let files = ["one.php", "skip-two.php", "three.php", "skip-four.php"];
    let mut batch = BatchStreamProcess::spawn(fx.shell(), fx.skip_by_name_helper(), files)?;

    // Never read incrementally: everything arrives through the finalize drain.
    parlint_test_utils::with_timeout(async {
        while !batch.is_finished().await? {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        Ok::<_, ParlintError>(())
    })
    .await?;

    assert_eq!(batch.is_skipped("one.php"), Some(false));
    assert_eq!(batch.is_skipped("skip-two.php"), Some(true));
    assert_eq!(batch.is_skipped("three.php"), Some(false));
    assert_eq!(batch.is_skipped("skip-four.php"), Some(true));

    let skipped: BTreeSet<&str> = batch.skipped_files().collect();
    assert_eq!(skipped, BTreeSet::from(["skip-four.php", "skip-two.php"]));

    // Further polls neither re-decode nor change anything.
    assert!(batch.is_finished().await?);
    batch.get_chunk().await?;
    assert_eq!(batch.decoder().records().len(), 4);

    Ok(())
}

#[tokio::test]
async fn records_are_available_before_the_helper_exits() -> TestResult {
    let fx = fixtures();
    init_tracing();

    let mut batch = BatchStreamProcess::spawn(
        fx.shell(),
        fx.slow_records_helper(),
        ["first.php", "second.php"],
    )?
    .with_read_quantum(3);

    parlint_test_utils::with_timeout(async {
        while batch.is_skipped("first.php").is_none() {
            batch.get_chunk().await?;
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        Ok::<_, ParlintError>(())
    })
    .await?;

    assert_eq!(batch.is_skipped("first.php"), Some(true));
    assert_eq!(batch.is_skipped("second.php"), None);
    assert!(batch.process().pid().is_some(), "helper is still owned");

    drive_to_completion(&mut batch).await?;
    assert_eq!(batch.is_skipped("second.php"), Some(false));

    Ok(())
}

#[tokio::test]
async fn multibyte_path_split_between_read_and_drain_is_intact() -> TestResult {
    let fx = fixtures();
    init_tracing();

    let mut batch = BatchStreamProcess::spawn(fx.shell(), fx.split_utf8_helper(), ["é.php"])?
        .with_read_quantum(1);

    // Read only the lead byte of `é`; the rest comes from the finalize drain.
    parlint_test_utils::with_timeout(async {
        while batch.decoder().carry().is_empty() {
            batch.get_chunk().await?;
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        while !batch.is_finished().await? {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        Ok::<_, ParlintError>(())
    })
    .await?;

    assert_eq!(batch.is_skipped("é.php"), Some(true));
    assert_eq!(batch.decoder().records().len(), 1);

    Ok(())
}

#[tokio::test]
async fn unknown_file_stays_undecided_after_finish() -> TestResult {
    let fx = fixtures();
    init_tracing();

    let mut batch = BatchStreamProcess::spawn(fx.shell(), fx.skip_by_name_helper(), ["a.php"])?;
    drive_to_completion(&mut batch).await?;

    assert_eq!(batch.is_skipped("a.php"), Some(false));
    assert_eq!(batch.is_skipped("never-mentioned.php"), None);

    Ok(())
}

#[tokio::test]
async fn final_record_without_newline_is_decoded() -> TestResult {
    let fx = fixtures();
    init_tracing();

    let mut batch =
        BatchStreamProcess::spawn(fx.shell(), fx.unterminated_helper(), ["a.php", "b.php"])?;
    drive_to_completion(&mut batch).await?;

    assert_eq!(batch.is_skipped("a.php"), Some(false));
    assert_eq!(batch.is_skipped("b.php"), Some(true));
    assert!(batch.decoder().carry().is_empty());

    Ok(())
}

#[tokio::test]
async fn mixed_wrappers_can_be_polled_together() -> TestResult {
    let fx = fixtures();
    init_tracing();

    let mut commands: Vec<Box<dyn ExternalCommand>> = vec![
        Box::new(BatchStreamProcess::spawn(
            fx.shell(),
            fx.skip_by_name_helper(),
            ["x.php", "skip-y.php"],
        )?),
        Box::new(SyntaxCheckProcess::spawn(
            fx.fake_checker(),
            "ok.php",
            SyntaxCheckOptions::default(),
        )?),
        Box::new(SyntaxCheckProcess::spawn(
            fx.fake_checker(),
            "broken.php",
            SyntaxCheckOptions::default(),
        )?),
    ];

    drive_all(&mut commands).await?;

    for command in &commands {
        assert!(!command.is_fail()?);
        assert!(command.process().status_code().is_ok());
    }
    assert_eq!(commands[1].process().status_code()?, 0);
    assert_eq!(commands[2].process().status_code()?, 255);

    Ok(())
}
