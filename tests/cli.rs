#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

#[test]
fn create_show_and_delete_a_plan() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("registry.json");
    let store = store.to_str().unwrap();

    Command::cargo_bin("schichtplan-cli")
        .unwrap()
        .args([
            "--store",
            store,
            "create-plan",
            "--start",
            "2025-05-05",
            "--end",
            "2025-05-11",
            "--name",
            "KW 19 Halle 2",
            "--department-id",
            "7",
        ])
        .assert()
        .success()
        .stdout(contains("angelegt"));

    Command::cargo_bin("schichtplan-cli")
        .unwrap()
        .args(["--store", store, "show", "--name", "KW 19 Halle 2"])
        .assert()
        .success()
        .stdout(contains("KW 19 Halle 2"));

    Command::cargo_bin("schichtplan-cli")
        .unwrap()
        .args(["--store", store, "delete-plan", "--id", "1"])
        .assert()
        .success();

    Command::cargo_bin("schichtplan-cli")
        .unwrap()
        .args(["--store", store, "show", "--name", "KW 19 Halle 2"])
        .assert()
        .failure()
        .stderr(contains("NOT_FOUND"));
}

#[test]
fn inverted_date_range_fails_with_a_validation_code() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("registry.json");

    Command::cargo_bin("schichtplan-cli")
        .unwrap()
        .args([
            "--store",
            store.to_str().unwrap(),
            "create-plan",
            "--start",
            "2025-05-10",
            "--end",
            "2025-05-01",
            "--department-id",
            "7",
        ])
        .assert()
        .failure()
        .stderr(contains("START_AFTER_END"));
}
