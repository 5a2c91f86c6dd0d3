//! End-to-end pipeline tests: a synthetic `.stdf` buffer in, an `.atdf`
//! text file out, both as a plain file and gzip-compressed, verifying
//! the two decode to identical records (spec §4.6 "gzip is transparent").

use std::io::Write;

use stdf_core::loader::NoopLoader;
use stdf_core::types::RecordTypeMask;
use stdf_core::NoopHook;

fn far_frame() -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&2u16.to_le_bytes());
    buf.push(0);
    buf.push(10);
    buf.push(4);
    buf.push(2);
    buf
}

/// PTR, head 1 / site 1, clean pass, result 2.5, no alarms. Trailing
/// fields (opt_flag onward) are absent from the payload entirely, which
/// exercises the decoder's short-payload recovery (they decode as `None`).
fn ptr_frame_passing() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&1001u32.to_le_bytes());
    body.push(1);
    body.push(1);
    body.push(0x00); // test_flg
    body.push(0x00); // parm_flg
    body.extend_from_slice(&2.5f32.to_le_bytes());
    body.push(0); // test_txt: empty Cf
    body.push(0); // alarm_id: empty Cf

    let mut buf = Vec::new();
    buf.extend_from_slice(&(body.len() as u16).to_le_bytes());
    buf.push(15);
    buf.push(10);
    buf.extend_from_slice(&body);
    buf
}

/// PTR with a failing result and an alarm bit set.
fn ptr_frame_failing() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&1002u32.to_le_bytes());
    body.push(1);
    body.push(2);
    body.push(0x81); // test_flg: fail + alarm bit
    body.push(0x00);
    body.extend_from_slice(&9.75f32.to_le_bytes());
    body.push(0);
    body.push(0);

    let mut buf = Vec::new();
    buf.extend_from_slice(&(body.len() as u16).to_le_bytes());
    buf.push(15);
    buf.push(10);
    buf.extend_from_slice(&body);
    buf
}

fn test_dir(label: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("stdf-atdf-pipeline-test-{}-{}", label, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_run_file_renders_pass_and_fail_ptr_lines() {
    let dir = test_dir("ptr");
    let mut data = far_frame();
    data.extend_from_slice(&ptr_frame_passing());
    data.extend_from_slice(&ptr_frame_failing());

    let input = dir.join("lot.stdf");
    std::fs::write(&input, &data).unwrap();
    let output = dir.join("lot.atdf");

    let collection =
        stdf_atdf::run_file(&input, Some(&output), &RecordTypeMask::All, &NoopHook, &NoopLoader).unwrap();
    assert_eq!(collection.total_records(), 3);

    let contents = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "FAR:4|2");
    assert_eq!(lines[1], "PTR:1001|1|1|P||2.5");
    assert_eq!(lines[2], "PTR:1002|1|2|F|A|9.75");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_gzip_and_plain_input_decode_identically() {
    let dir = test_dir("gzip");
    let mut data = far_frame();
    data.extend_from_slice(&ptr_frame_passing());

    let plain_path = dir.join("lot.stdf");
    std::fs::write(&plain_path, &data).unwrap();

    let gz_path = dir.join("lot.stdf.gz");
    {
        let file = std::fs::File::create(&gz_path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(&data).unwrap();
        encoder.finish().unwrap();
    }

    let plain_out = dir.join("plain.atdf");
    let gz_out = dir.join("gz.atdf");

    let plain_collection =
        stdf_atdf::run_file(&plain_path, Some(&plain_out), &RecordTypeMask::All, &NoopHook, &NoopLoader)
            .unwrap();
    let gz_collection =
        stdf_atdf::run_file(&gz_path, Some(&gz_out), &RecordTypeMask::All, &NoopHook, &NoopLoader).unwrap();

    assert_eq!(plain_collection.total_records(), gz_collection.total_records());
    let plain_text = std::fs::read_to_string(&plain_out).unwrap();
    let gz_text = std::fs::read_to_string(&gz_out).unwrap();
    assert_eq!(plain_text, gz_text);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_record_type_mask_filters_out_unwanted_types() {
    let dir = test_dir("mask");
    let mut data = far_frame();
    data.extend_from_slice(&ptr_frame_passing());

    let input = dir.join("lot.stdf");
    std::fs::write(&input, &data).unwrap();

    let mut only_far = std::collections::HashSet::new();
    only_far.insert(stdf_core::RecordType::Far);
    let mask = RecordTypeMask::Only(only_far);

    let collection = stdf_atdf::run_file(&input, None, &mask, &NoopHook, &NoopLoader).unwrap();
    assert_eq!(collection.total_records(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}
