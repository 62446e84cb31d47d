//! End-to-end tests of the `lz4opt` binary.

use std::fs;
use std::process::Command;

fn lz4opt_bin() -> &'static str {
    env!("CARGO_BIN_EXE_lz4opt")
}

#[test]
fn compress_then_decompress_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let packed = dir.path().join("input.txt.lz4");
    let unpacked = dir.path().join("roundtrip.txt");

    let data = lz4opt::lorem::gen_buffer(40_000, 100);
    fs::write(&input, &data).unwrap();

    let status = Command::new(lz4opt_bin())
        .args(["-z", input.to_str().unwrap(), packed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    assert!(fs::metadata(&packed).unwrap().len() < data.len() as u64);

    let status = Command::new(lz4opt_bin())
        .args(["-d", packed.to_str().unwrap(), unpacked.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&unpacked).unwrap(), data);
}

#[test]
fn verify_flag_checks_the_stream() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let packed = dir.path().join("out.lz4");
    fs::write(&input, lz4opt::lorem::gen_buffer(10_000, 101)).unwrap();

    let status = Command::new(lz4opt_bin())
        .args(["-z", "-c", input.to_str().unwrap(), packed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn raw_and_legacy_modes_roundtrip_through_the_binary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let data = lz4opt::lorem::gen_buffer(20_000, 102);
    fs::write(&input, &data).unwrap();

    for flag in ["-r", "-l"] {
        let packed = dir.path().join(format!("out{}.lz4", flag));
        let unpacked = dir.path().join(format!("back{}.bin", flag));

        let status = Command::new(lz4opt_bin())
            .args([flag, input.to_str().unwrap(), packed.to_str().unwrap()])
            .status()
            .unwrap();
        assert!(status.success(), "compress {}", flag);

        let mut args = vec!["-d"];
        if flag == "-r" {
            args.push("-r");
        }
        args.push(packed.to_str().unwrap());
        args.push(unpacked.to_str().unwrap());
        let status = Command::new(lz4opt_bin()).args(&args).status().unwrap();
        assert!(status.success(), "decompress {}", flag);
        assert_eq!(fs::read(&unpacked).unwrap(), data, "mode {}", flag);
    }
}

#[test]
fn dictionary_option_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let dict = dir.path().join("dict.bin");
    let input = dir.path().join("in.bin");
    let packed = dir.path().join("out.lz4");
    let unpacked = dir.path().join("back.bin");

    let dict_data = lz4opt::lorem::gen_buffer(30_000, 103);
    fs::write(&dict, &dict_data).unwrap();
    fs::write(&input, &dict_data[5_000..25_000]).unwrap();

    let status = Command::new(lz4opt_bin())
        .args([
            "-z",
            "-D",
            dict.to_str().unwrap(),
            input.to_str().unwrap(),
            packed.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(lz4opt_bin())
        .args([
            "-d",
            "-D",
            dict.to_str().unwrap(),
            packed.to_str().unwrap(),
            unpacked.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&unpacked).unwrap(), fs::read(&input).unwrap());
}

#[test]
fn missing_input_exits_with_100() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(lz4opt_bin())
        .args([
            "-z",
            dir.path().join("nope.bin").to_str().unwrap(),
            dir.path().join("out.lz4").to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(100));
}

#[test]
fn bad_usage_exits_with_100() {
    let status = Command::new(lz4opt_bin())
        .args(["-z", "-d", "a", "b"])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(100));

    let status = Command::new(lz4opt_bin()).arg("onlyone").status().unwrap();
    assert_eq!(status.code(), Some(100));
}
