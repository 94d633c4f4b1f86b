//! End-to-end tests for the `info` command.

mod common;
use common::prelude::*;

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_info_summarizes_devfile() {
    let fixture = TestFixture::new().with_devfile(devfiles::NODEJS);

    fixture
        .command()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema version: 2.2.0"))
        .stdout(predicate::str::contains("Name: nodejs"))
        .stdout(predicate::str::contains("Top-level variables: nodeImage"))
        .stdout(predicate::str::contains("Container components: 2"))
        .stdout(predicate::str::contains(
            "image: registry.access.redhat.com/ubi8/nodejs-18:latest",
        ))
        .stdout(predicate::str::contains("memory limit: 1024Mi"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_info_base_schema_has_no_variables() {
    let fixture = TestFixture::new().with_devfile(devfiles::BASE_SCHEMA);

    fixture
        .command()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "top-level variables is not supported in devfile schema version 2.0.0",
        ));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_info_fails_on_invalid_devfile() {
    let fixture = TestFixture::new().with_devfile(devfiles::BROKEN_REFERENCE);

    fixture
        .command()
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load devfile"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_info_explicit_file() {
    let fixture = TestFixture::new().with_file("other.yaml", devfiles::BASE_SCHEMA);

    fixture
        .command()
        .args(["info", "--file", "other.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: legacy"));
}
