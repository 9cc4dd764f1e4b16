use std::{fs, io::Read, path::Path};

use assert_cmd::{assert::Assert, Command};
use flate2::read::ZlibDecoder;

pub fn tinyvcs(dir: &Path, args: &[&str]) -> Assert {
    Command::cargo_bin("tinyvcs")
        .unwrap()
        .current_dir(dir)
        .args(args)
        .assert()
}

pub fn init_repo() -> tempfile::TempDir {
    let temp = tempfile::tempdir().unwrap();
    tinyvcs(temp.path(), &["init"]).success();
    temp
}

// Returns (kind, payload) of a stored object.
#[allow(dead_code)]
pub fn read_object(dir: &Path, id: &str) -> (String, Vec<u8>) {
    let compressed = fs::read(dir.join(".vcs/objects").join(id)).unwrap();

    let mut raw = Vec::new();
    ZlibDecoder::new(&compressed[..])
        .read_to_end(&mut raw)
        .unwrap();

    let nul = raw.iter().position(|b| *b == 0).unwrap();
    let header = std::str::from_utf8(&raw[..nul]).unwrap();
    let mut parts = header.splitn(2, ' ');
    let kind = parts.next().unwrap().to_string();
    let len: usize = parts.next().unwrap().parse().unwrap();

    let payload = raw[nul + 1..].to_vec();
    assert_eq!(payload.len(), len, "header length mismatch for {}", id);
    (kind, payload)
}

#[allow(dead_code)]
pub fn object_count(dir: &Path) -> usize {
    fs::read_dir(dir.join(".vcs/objects")).unwrap().count()
}

#[allow(dead_code)]
pub fn read_ref(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(".vcs").join(name))
        .unwrap()
        .trim_end()
        .to_string()
}
