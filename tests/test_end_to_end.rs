//! Full pipeline runs over a real stub subprocess and real files.

#![cfg(unix)]

use std::fs;

use tempura::{subprocess_pipeline, FileEditor, MemoryEditor, Settings};

const STUB: &str = r#"
mode="$1"
case "$mode" in
  scrape)
    printf '# Tasty Pasta\n\nSource: <%s>\n\n---\n\n' "$2"
    printf '## Ingredients 🧂\n\n* 200 g flour\n* 1 cup milk\n\n'
    printf '## Instructions 🔪\n\n1. Mix\n'
    ;;
  convert)
    printf '["1.6 cups flour", "240 ml milk"]'
    ;;
  *)
    echo "unknown mode $mode" >&2
    exit 1
    ;;
esac
"#;

fn stub_settings(dir: &tempfile::TempDir) -> Settings {
    let script = dir.path().join("tempura_cli.sh");
    fs::write(&script, STUB).unwrap();
    Settings {
        recipes_dir: dir.path().join("recipes"),
        runtime: "sh".to_string(),
        script,
        ..Default::default()
    }
}

#[test]
fn test_scrape_then_convert_a_stored_recipe() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = subprocess_pipeline(stub_settings(&dir));

    // Scrape into the store.
    let mut editor = MemoryEditor::default();
    let path = pipeline
        .scrape(&mut editor, "https://example.com/recipe/42")
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "tasty-pasta.md");

    // Convert the stored document in place through a file-backed editor.
    let mut file_editor = FileEditor::open_file(&path).unwrap();
    pipeline.convert(&mut file_editor, "imperial").unwrap();
    file_editor.save().unwrap();

    let converted = fs::read_to_string(&path).unwrap();
    assert!(converted.contains("* 1.6 cups flour"));
    assert!(converted.contains("* 240 ml milk"));
    assert!(!converted.contains("200 g flour"));
    // Everything outside the ingredients section survives untouched.
    assert!(converted.starts_with("# Tasty Pasta\n"));
    assert!(converted.contains("## Instructions 🔪"));
    assert!(converted.contains("1. Mix"));
}

#[test]
fn test_find_sees_what_scrape_stored() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = subprocess_pipeline(stub_settings(&dir));

    let mut editor = MemoryEditor::default();
    pipeline
        .scrape(&mut editor, "https://example.com/recipe/42")
        .unwrap();

    let found = pipeline.find(&mut editor).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].file_name().unwrap(), "tasty-pasta.md");
}
