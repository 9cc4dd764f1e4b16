use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::ZlibDecoder;

use crate::object::Id;
use crate::repo::{InitOutcome, Repo};

/// A `TempRepo` creates a temporary, empty repository that is deleted
/// when the struct is dropped.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub(crate) struct TempRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    repo: Repo,
}

impl TempRepo {
    pub fn new() -> TempRepo {
        let tempdir = tempfile::tempdir().unwrap();

        let repo = match Repo::init(tempdir.path()).unwrap() {
            InitOutcome::Created(repo) => repo,
            InitOutcome::AlreadyInitialized => panic!("fresh tempdir already initialized"),
        };

        TempRepo { tempdir, repo }
    }

    // Return the path for this repo's root (working directory).
    pub fn path(&self) -> &Path {
        self.repo.work_dir()
    }

    pub fn repo(&self) -> &Repo {
        &self.repo
    }

    // Write a file relative to the working directory.
    pub fn write_file(&self, name: &str, content: &[u8]) -> &TempRepo {
        fs::write(self.path().join(name), content).unwrap();
        self
    }

    // Raw content of a file inside the control directory.
    pub fn read_vcs_file(&self, name: &str) -> String {
        fs::read_to_string(self.repo.vcs_dir().join(name)).unwrap()
    }

    // Decompress a stored object and split it into (kind, payload).
    pub fn read_object(&self, id: &Id) -> (String, Vec<u8>) {
        let compressed = fs::read(self.repo.object_path(id)).unwrap();

        let mut raw = Vec::new();
        ZlibDecoder::new(&compressed[..])
            .read_to_end(&mut raw)
            .unwrap();

        let nul = raw.iter().position(|b| *b == 0).unwrap();
        let header = String::from_utf8(raw[..nul].to_vec()).unwrap();
        let payload = raw[nul + 1..].to_vec();

        let mut parts = header.splitn(2, ' ');
        let kind = parts.next().unwrap().to_string();
        let len: usize = parts.next().unwrap().parse().unwrap();
        assert_eq!(len, payload.len(), "header length disagrees with payload");

        (kind, payload)
    }

    // Number of files stored in the objects directory.
    pub fn object_count(&self) -> usize {
        fs::read_dir(self.repo.objects_dir())
            .unwrap()
            .filter(|e| e.as_ref().unwrap().path().is_file())
            .count()
    }
}
