//! End-to-end tests for the `mount` command.

mod common;
use common::prelude::*;

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_mount_add_and_paths() {
    let fixture = TestFixture::new().with_devfile(devfiles::NODEJS);

    fixture
        .command()
        .args(["mount", "add", "tools", "npm-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mounted 1 volume(s) into tools"));

    fixture
        .command()
        .args(["mount", "paths", "npm-cache", "tools"])
        .assert()
        .success()
        .stdout("/npm-cache\n");
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_mount_add_conflict_leaves_file_untouched() {
    let fixture = TestFixture::new().with_devfile(devfiles::NODEJS);
    let before = fixture.read_devfile();

    fixture
        .command()
        .args(["mount", "add", "runtime", "npm-cache:/opt/app-root/src/.npm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mounted to the same path"));

    assert_eq!(fixture.read_devfile(), before);
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_mount_remove() {
    let fixture = TestFixture::new().with_devfile(devfiles::NODEJS);

    fixture
        .command()
        .args(["mount", "remove", "npm-cache"])
        .assert()
        .success();

    assert!(!fixture.read_devfile().contains("volumeMounts"));

    fixture
        .command()
        .args(["mount", "remove", "npm-cache"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not found"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_mount_paths_not_mounted() {
    let fixture = TestFixture::new().with_devfile(devfiles::NODEJS);

    fixture
        .command()
        .args(["mount", "paths", "npm-cache", "tools"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "volume npm-cache not mounted to component tools",
        ));
}
