use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_malformed_rows_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "number, expiry, name, verification_value, imported").unwrap();
    writeln!(file, "4242424242424242, 04/27, Jo Doe, 123, no").unwrap();
    // Unparseable flag
    writeln!(file, "4111111111111111, 04/27, Jo Doe, 123, maybe").unwrap();
    writeln!(file, "5105105105105100, 0427, Jo Doe, 123, 0").unwrap();

    let mut cmd = Command::new(cargo_bin!("cardkit"));
    cmd.arg("normalize")
        .arg(file.path())
        .arg("--reference-date")
        .arg("2024-06-01");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading card"))
        .stdout(predicate::str::contains("4242,visa,4,2027"))
        .stdout(predicate::str::contains("5100,master,4,2027"))
        .stdout(predicate::str::contains("1111,visa").not());
}

#[test]
fn test_garbage_input_degrades_to_absent() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "number, expiry, name, verification_value").unwrap();
    writeln!(file, "not a card, sometime soon, Jo Doe, 123").unwrap();

    let mut cmd = Command::new(cargo_bin!("cardkit"));
    cmd.arg("normalize")
        .arg(file.path())
        .arg("--reference-date")
        .arg("2024-06-01");

    cmd.assert().success().stdout(predicate::str::contains(
        ",,,,XXXX-XXXX-XXXX-,Jo,Doe,invalid,month is required; year is required; number is required",
    ));
}

#[test]
fn test_imported_card_needs_no_number() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "number, expiry, name, imported").unwrap();
    writeln!(file, ", 11/2029, Jo Doe, true").unwrap();

    let mut cmd = Command::new(cargo_bin!("cardkit"));
    cmd.arg("normalize")
        .arg(file.path())
        .arg("--reference-date")
        .arg("2024-06-01");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(",,11,2029,XXXX-XXXX-XXXX-,Jo,Doe,valid,"));
}
