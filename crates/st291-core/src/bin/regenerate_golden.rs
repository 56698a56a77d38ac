use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde_json::Value;
use st291_core::AncCodec;
use st291_core::bits::hex;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if !path.join("input.hex").exists() {
            continue;
        }
        regenerate_one(&path)?;
    }

    Ok(())
}

fn regenerate_one(dir: &Path) -> Result<(), String> {
    let input = dir.join("input.hex");
    let text = fs::read_to_string(&input)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let data = hex::decode(&text).map_err(|err| format!("{}: {}", input.display(), err))?;

    let codec = AncCodec::new();
    let packet = codec
        .decode_bytes(&data)
        .map_err(|err| format!("decode failed for {}: {}", input.display(), err))?;
    let encoded = codec
        .encode(&packet)
        .map_err(|err| format!("encode failed for {}: {}", input.display(), err))?;

    write_json(
        &dir.join("expected_plain.json"),
        Value::Object(codec.plain_view(&packet)),
    )?;
    write_json(
        &dir.join("expected_display.json"),
        Value::Object(codec.display_view(&packet)),
    )?;
    let output = dir.join("expected_reencoded.hex");
    fs::write(&output, format!("{}\n", encoded.to_hex()))
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}

fn write_json(output: &Path, value: Value) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&value)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))
}
