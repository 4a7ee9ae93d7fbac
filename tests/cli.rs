/// End-to-end tests: run the `herodex` binary against a fixture dataset and
/// check the rendered table, detail view, and state line.
use std::io::Write;
use std::path::Path;
use std::process::Command;

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let mut items = Vec::new();
    for i in 0..45usize {
        items.push(serde_json::json!({
            "id": i,
            "slug": format!("{i}-hero-{i:03}"),
            "name": format!("Hero {i:03}"),
            "images": {"xs": format!("https://example.test/xs/{i}.jpg"),
                       "lg": format!("https://example.test/lg/{i}.jpg")},
            "powerstats": {"intelligence": 50, "strength": (i % 100) as i64, "speed": 40,
                           "durability": 60, "power": 70, "combat": 80},
            "biography": {"fullName": format!("Person {i:03}"),
                          "alignment": (["bad", "neutral", "good"][i % 3]),
                          "placeOfBirth": "Metro City"},
            "appearance": {"race": "Human", "gender": "Male",
                           "height": ["6'0", format!("{} cm", 150 + i)],
                           "weight": ["200 lb", format!("{} kg", 60 + i)]}
        }));
    }
    let path = dir.join("dataset.json");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(serde_json::to_string(&items).unwrap().as_bytes())
        .unwrap();
    path
}

fn herodex(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_herodex"))
        .args(args)
        .output()
        .expect("failed to run herodex");
    assert!(
        output.status.success(),
        "herodex exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("herodex output was not valid UTF-8")
}

#[test]
fn renders_first_page_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_fixture(dir.path());
    let text = herodex(&[dataset.to_str().unwrap()]);

    assert!(text.contains("Hero 000"));
    assert!(text.contains("Hero 019"));
    assert!(!text.contains("Hero 020"));
    assert!(text.contains("page 1 of 3 (45 records)"));
    assert!(text.contains("state: sort=name&order=asc&page=1&pageSize=20"));
}

#[test]
fn last_page_shows_remainder() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_fixture(dir.path());
    let text = herodex(&[dataset.to_str().unwrap(), "--page", "3"]);

    assert!(text.contains("Hero 040"));
    assert!(text.contains("Hero 044"));
    assert!(text.contains("page 3 of 3 (45 records)"));

    // beyond the last page clamps rather than erroring
    let text = herodex(&[dataset.to_str().unwrap(), "--page", "99"]);
    assert!(text.contains("page 3 of 3"));
}

#[test]
fn search_with_operator_filters_and_encodes_state() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_fixture(dir.path());
    let text = herodex(&[
        dataset.to_str().unwrap(),
        "--search",
        ">42",
        "--field",
        "strength",
    ]);

    assert!(text.contains("Hero 043"));
    assert!(text.contains("Hero 044"));
    assert!(!text.contains("Hero 042"));
    assert!(text.contains("(2 records)"));
    assert!(text.contains("state: search=%3E42&field=strength"));
}

#[test]
fn state_round_trips_through_the_cli() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_fixture(dir.path());
    let first = herodex(&[
        dataset.to_str().unwrap(),
        "--sort",
        "powerstats.strength",
        "--order",
        "desc",
        "--page-size",
        "10",
    ]);
    let state_line = first
        .lines()
        .find_map(|l| l.strip_prefix("state: "))
        .expect("missing state line");

    let second = herodex(&[dataset.to_str().unwrap(), "--state", state_line]);
    assert_eq!(first, second);
}

#[test]
fn sort_descending_by_height() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_fixture(dir.path());
    let text = herodex(&[
        dataset.to_str().unwrap(),
        "--sort",
        "appearance.height",
        "--order",
        "desc",
    ]);
    // tallest fixture record is 150 + 44 cm
    assert!(text.lines().nth(1).unwrap().contains("194 cm"));
}

#[test]
fn detail_view_by_slug() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_fixture(dir.path());
    let text = herodex(&[dataset.to_str().unwrap(), "--slug", "7-hero-007"]);

    assert!(text.starts_with("Hero 007\n"));
    assert!(text.contains("image: https://example.test/lg/7.jpg"));
    assert!(text.contains("fullName: Person 007"));
    assert!(text.contains("height: 157 cm"));
    assert!(!text.contains("slug:"));
}

#[test]
fn unknown_slug_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_fixture(dir.path());
    let text = herodex(&[dataset.to_str().unwrap(), "--slug", "999-nobody"]);
    assert_eq!(text, "character not found: 999-nobody\n");
}

#[test]
fn missing_dataset_renders_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let text = herodex(&[missing.to_str().unwrap()]);
    assert!(text.starts_with("no data"));
    assert!(text.contains("page 1 of 1 (0 records)"));
}
