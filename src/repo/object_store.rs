use std::fs::{self, Metadata};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use flate2::{write::ZlibEncoder, Compression};
use tempfile::NamedTempFile;
use tracing::debug;

use super::{Error, Repo, Result};
use crate::object::{Id, Object};

impl Repo {
    /// Return the directory holding loose objects.
    pub fn objects_dir(&self) -> PathBuf {
        self.vcs_dir.join("objects")
    }

    /// Return the path at which the object with this ID is stored.
    pub fn object_path(&self, id: &Id) -> PathBuf {
        self.objects_dir().join(id.to_string())
    }

    /// Returns true if an object with this ID has been stored.
    pub fn has_object(&self, id: &Id) -> bool {
        self.object_path(id).exists()
    }

    /// Write a loose object (i.e. not in a pack file) to the repo, unless an
    /// object with the same ID is already present.
    ///
    /// Returns the object's ID either way. The compressed bytes go to a
    /// temporary file that is renamed into place once complete.
    pub fn put_loose_object(&self, object: &Object) -> Result<Id> {
        let id = *object.id();
        let object_path = self.object_path(&id);

        if object_path.exists() {
            debug!(%id, kind = %object.kind(), "object already stored");
            return Ok(id);
        }

        let objects_dir = self.objects_dir();
        fs::create_dir_all(&objects_dir)?;

        let mut temp = NamedTempFile::new_in(&objects_dir)?;
        {
            let mut encoder = ZlibEncoder::new(&mut temp, Compression::default());
            object.write_encoded(&mut encoder)?;
            encoder.finish()?;
        }
        temp.persist(&object_path).map_err(|e| e.error)?;

        debug!(%id, kind = %object.kind(), len = object.len(), "stored object");
        Ok(id)
    }

    /// Store the content of a file as a blob and return its ID.
    ///
    /// A missing path, or one that is not a regular file, is reported as
    /// [`Error::FileNotFound`].
    pub fn hash_file(&self, path: &Path) -> Result<Id> {
        let (object, _) = read_blob(path)?;
        self.put_loose_object(&object)
    }
}

// Reads a regular file exactly once and builds its blob, so the ID always
// describes the bytes that will be stored. Also returns the file's metadata.
pub(super) fn read_blob(path: &Path) -> Result<(Object, Metadata)> {
    let not_found = |err: io::Error| match err.kind() {
        ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => err.into(),
    };

    let metadata = fs::metadata(path).map_err(not_found)?;
    if !metadata.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let data = fs::read(path).map_err(not_found)?;
    Ok((Object::blob(data)?, metadata))
}
