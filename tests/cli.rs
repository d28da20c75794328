#![cfg(feature = "cli")]
use assert_cmd::Command;
use rstest::rstest;
use std::fs;
use tempfile::tempdir;

fn run_fixture(model_stem: &str, expected_stem: &str, extra_args: &[&str]) {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join(format!("{model_stem}.json"));
    let output_path = dir.path().join(format!("{model_stem}.schema.json"));

    // Load the model description and copy it into the tmpdir
    let model = fs::read_to_string(format!("tests/fixtures/models/{model_stem}.json")).unwrap();
    fs::write(&input_path, model).unwrap();

    // Run CLI
    let mut cmd = Command::cargo_bin("model2jsonschema").unwrap();
    cmd.arg(input_path.to_str().unwrap())
        .arg(output_path.to_str().unwrap());
    for arg in extra_args {
        cmd.arg(arg);
    }
    cmd.assert().success();

    // Compare the written schema with the expected document
    let actual: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    let expected: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(format!("tests/fixtures/expected/{expected_stem}.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(actual, expected);
}

#[rstest]
#[case("person", "person", &[][..])]
#[case("person", "person_ordered", &["--property-ordering"][..])]
#[case("vehicles", "vehicles", &[][..])]
fn cli_fixtures(#[case] model_stem: &str, #[case] expected_stem: &str, #[case] args: &[&str]) {
    run_fixture(model_stem, expected_stem, args);
}

#[test]
fn cli_fails_without_a_root_type() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("rootless.json");
    let output_path = dir.path().join("rootless.schema.json");
    fs::write(&input_path, r#"{ "types": [] }"#).unwrap();

    Command::cargo_bin("model2jsonschema")
        .unwrap()
        .arg(input_path.to_str().unwrap())
        .arg(output_path.to_str().unwrap())
        .assert()
        .failure();
}
