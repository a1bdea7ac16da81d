mod common;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;

use common::TestWorkspace;

const ORDERS_CSV: &str = "Order ID,Product,Unit Price\n\
                          1001,widget,980\n\
                          1002,bolt,120\n\
                          1003,gasket,45\n";

fn preview_json(args: &[&str], stdin: Option<&str>) -> Value {
    let mut command = Command::cargo_bin("csv-intake").expect("binary exists");
    command.arg("preview").args(args).arg("--json");
    if let Some(input) = stdin {
        command.write_stdin(input);
    }
    let assert = command.assert().success();
    serde_json::from_slice(&assert.get_output().stdout).expect("preview JSON")
}

#[test]
fn preview_json_reports_detected_header_and_samples() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("orders.csv", ORDERS_CSV);

    let json = preview_json(&["-i", input.to_str().unwrap()], None);
    assert_eq!(json["delimiter"], ",");
    assert_eq!(json["hasHeader"], true);
    assert_eq!(
        json["headers"],
        serde_json::json!(["order_id", "product", "unit_price"])
    );
    assert_eq!(json["countGuessed"], 3);
    assert_eq!(json["sampleRows"][0][0], "1001");
}

#[test]
fn preview_json_uses_exactly_the_wire_keys() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("orders.csv", ORDERS_CSV);

    let json = preview_json(&["-i", input.to_str().unwrap()], None);
    let mut keys: Vec<&str> = json
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "countGuessed",
            "delimiter",
            "hasHeader",
            "headers",
            "sampleRows"
        ]
    );
}

#[test]
fn preview_reads_stdin_with_dash() {
    let json = preview_json(&["-i", "-"], Some("name,email\nalice,a@example.com\n"));
    assert_eq!(json["hasHeader"], true);
    assert_eq!(json["headers"], serde_json::json!(["name", "email"]));
}

#[test]
fn preview_strips_utf8_bom() {
    let workspace = TestWorkspace::new();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(ORDERS_CSV.as_bytes());
    let input = workspace.write_bytes("orders_bom.csv", &bytes);

    let json = preview_json(&["-i", input.to_str().unwrap()], None);
    assert_eq!(json["headers"][0], "order_id");
}

#[test]
fn preview_detects_semicolon_delimiter() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("orders.csv", "id;name\n1;alice\n2;bob\n");

    let json = preview_json(&["-i", input.to_str().unwrap()], None);
    assert_eq!(json["delimiter"], ";");
    assert_eq!(json["headers"], serde_json::json!(["id", "name"]));
}

#[test]
fn preview_caps_samples_at_the_rows_argument() {
    let workspace = TestWorkspace::new();
    let mut data = String::from("id,name\n");
    for idx in 0..30 {
        data.push_str(&format!("{idx},row{idx}\n"));
    }
    let input = workspace.write("long.csv", &data);

    let json = preview_json(&["-i", input.to_str().unwrap(), "--rows", "5"], None);
    assert_eq!(json["countGuessed"], 5);
    assert_eq!(json["sampleRows"].as_array().expect("rows").len(), 5);
}

#[test]
fn preview_renders_a_table_by_default() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("orders.csv", ORDERS_CSV);

    let assert = Command::cargo_bin("csv-intake")
        .expect("binary exists")
        .args(["preview", "-i", input.to_str().unwrap()])
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout");
    let first_line = output.lines().next().unwrap_or_default();
    assert!(first_line.contains("order_id"));
    assert!(first_line.contains("unit_price"));
    assert!(output.contains("1002"));
}

#[test]
fn preview_synthesizes_names_for_headerless_input() {
    let json = preview_json(&["-i", "-"], Some("1001,980\n1002,120\n"));
    assert_eq!(json["hasHeader"], false);
    assert_eq!(json["headers"], serde_json::json!(["col_1", "col_2"]));
    assert_eq!(json["countGuessed"], 2);
}

#[test]
fn preview_fails_on_undecodable_input() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_bytes("broken.csv", b"a,b\n\xFF\xFE,2\n");

    Command::cargo_bin("csv-intake")
        .expect("binary exists")
        .args(["preview", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("malformed record"));
}
