use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn get_test_dir() -> PathBuf {
    let dir = PathBuf::from("target/tmp/tests");
    fs::create_dir_all(&dir).unwrap();
    dir
}

const THESAURUS: &str = r#"
<http://ex.org/voc/C3> <http://www.w3.org/2004/02/skos/core#broader> <http://ex.org/voc/C2> .
<http://ex.org/voc/C2> <http://www.w3.org/2004/02/skos/core#broader> <http://ex.org/voc/C1> .
<http://ex.org/voc/C3> <http://www.w3.org/2004/02/skos/core#prefLabel> "Leaf"@en .
<http://ex.org/voc/C2> <http://www.w3.org/2004/02/skos/core#prefLabel> "Ast"@de .
<http://ex.org/voc/C1> <http://www.w3.org/2004/02/skos/core#prefLabel> "Root"@en .
<http://ex.org/voc/C5> <http://www.w3.org/2004/02/skos/core#related> <http://ex.org/voc/C3> .
"#;

#[test]
fn test_cli_extract_default_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir();
    let input = dir.join("cli_extract.nt");
    let output = dir.join("cli_extract_reduced.nt");
    fs::write(&input, THESAURUS)?;

    let mut cmd = Command::cargo_bin("skosbranch")?;
    cmd.arg("extract")
        .arg(&input)
        .arg("--concept")
        .arg("http://ex.org/voc/C3");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Concepts kept:  3 (depth 2)"))
        .stdout(predicate::str::contains("Triples kept:   5 of 6"));

    let written = fs::read_to_string(&output)?;
    assert_eq!(written.lines().count(), 5);
    assert!(written.contains("\"Leaf\"@en"));
    assert!(!written.contains("http://ex.org/voc/C5"));

    fs::remove_file(input)?;
    fs::remove_file(output)?;
    Ok(())
}

#[test]
fn test_cli_extract_json_report() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir();
    let input = dir.join("cli_json.nt");
    let output = dir.join("cli_json_branch.ttl");
    fs::write(&input, THESAURUS)?;

    let mut cmd = Command::cargo_bin("skosbranch")?;
    cmd.arg("extract")
        .arg(&input)
        .arg("-c")
        .arg("http://ex.org/voc/C2")
        .arg("-p")
        .arg("skos:broader")
        .arg("-o")
        .arg(&output)
        .arg("--json");
    let assert = cmd.assert().success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["closure_size"], 2);
    assert_eq!(report["retained_triples"], 3);
    assert_eq!(
        report["hierarchy_predicate"],
        "http://www.w3.org/2004/02/skos/core#broader"
    );
    assert!(output.exists());

    fs::remove_file(input)?;
    fs::remove_file(output)?;
    Ok(())
}

#[test]
fn test_cli_extract_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir();
    let input = dir.join("cli_config.nt");
    let config = dir.join("cli_config.toml");
    let output = dir.join("cli_config_out.nt");
    fs::write(&input, THESAURUS)?;
    fs::write(
        &config,
        "target = \"http://ex.org/voc/C2\"\ninclude_descendants = true\n",
    )?;

    let mut cmd = Command::cargo_bin("skosbranch")?;
    cmd.arg("extract")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("-o")
        .arg(&output);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Concepts kept:  3"));

    fs::remove_file(input)?;
    fs::remove_file(config)?;
    fs::remove_file(output)?;
    Ok(())
}

#[test]
fn test_cli_extract_invalid_target() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir();
    let input = dir.join("cli_invalid.nt");
    let output = dir.join("cli_invalid_reduced.nt");
    fs::write(&input, THESAURUS)?;

    let mut cmd = Command::cargo_bin("skosbranch")?;
    cmd.arg("extract").arg(&input).arg("--concept").arg("not a uri");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown target concept"));
    assert!(!output.exists());

    let mut cmd = Command::cargo_bin("skosbranch")?;
    cmd.arg("extract").arg(&input);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No target concept"));

    fs::remove_file(input)?;
    Ok(())
}

#[test]
fn test_cli_urispace() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir();
    let input = dir.join("cli_urispace.nt");
    fs::write(&input, THESAURUS)?;

    let mut cmd = Command::cargo_bin("skosbranch")?;
    cmd.arg("urispace").arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("http://ex.org/voc/\n"));

    fs::remove_file(input)?;
    Ok(())
}

#[test]
fn test_cli_filter_lang() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir();
    let input = dir.join("cli_lang.nt");
    let output = dir.join("cli_lang_en_only.nt");
    fs::write(&input, THESAURUS)?;

    let mut cmd = Command::cargo_bin("skosbranch")?;
    cmd.arg("filter-lang")
        .arg(&input)
        .arg("--lang")
        .arg("en")
        .arg("--only");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Kept 4 of 6 triples"));

    let written = fs::read_to_string(&output)?;
    assert!(written.contains("\"Root\"@en"));
    assert!(!written.contains("\"Ast\"@de"));

    fs::remove_file(input)?;
    fs::remove_file(output)?;
    Ok(())
}

#[test]
fn test_cli_stats() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir();
    let file = dir.join("cli_stats.nt");
    fs::write(&file, THESAURUS)?;

    let mut cmd = Command::cargo_bin("skosbranch")?;
    cmd.arg("stats").arg(&file);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Triples:        6"))
        .stdout(predicate::str::contains("Subjects:       4"))
        .stdout(predicate::str::contains("Concepts:       3"))
        .stdout(predicate::str::contains("Top concepts:   1"));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_missing_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("skosbranch")?;
    cmd.arg("stats").arg("target/tmp/tests/does_not_exist.nt");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load"));
    Ok(())
}
