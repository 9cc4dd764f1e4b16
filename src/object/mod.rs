//! Represents the concept of an "object" which is a tuple of
//! object type and binary data identified by the hash of the binary data.
//!
//! Every object is encoded as `"<kind> <payload length>\0"` followed by the
//! payload. Its [`Id`] is the SHA-1 of that encoding.

use std::io::{self, Read, Write};

use sha1::{Digest, Sha1};

mod attribution;
pub use attribution::Attribution;

mod commit;
pub use commit::Commit;

mod content_source;
pub use content_source::ContentSource;

mod id;
pub use id::{Id, ParseIdError, ID_LEN};

mod kind;
pub use kind::Kind;

mod tree;
pub use tree::{Tree, TreeEntry};

/// Describes a single object about to be stored in a repository.
///
/// The ID is computed once, when the object is created, and never changes.
pub struct Object {
    id: Id,
    kind: Kind,
    content_source: Box<dyn ContentSource>,
}

impl Object {
    /// Create a new Object, reading the content once to compute its ID.
    ///
    /// Fails with `InvalidData` if the content source yields a different
    /// number of bytes than its `len()` reports.
    pub fn new(kind: Kind, content_source: Box<dyn ContentSource>) -> io::Result<Object> {
        let len = content_source.len();

        let mut hasher = Sha1::new();
        hasher.update(header(kind, len));

        let hashed = {
            let mut reader = content_source.open()?;
            hash_stream(&mut reader, &mut hasher, &mut io::sink())?
        };

        if hashed != len as u64 {
            return Err(length_mismatch(kind, len, hashed));
        }

        Ok(Object {
            id: digest_id(hasher)?,
            kind,
            content_source,
        })
    }

    /// Create a blob object from an in-memory byte buffer.
    pub fn blob(data: Vec<u8>) -> io::Result<Object> {
        Object::new(Kind::Blob, Box::new(data))
    }

    /// Return the ID of the object.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the size (in bytes) of the payload.
    pub fn len(&self) -> usize {
        self.content_source.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a `BufRead` struct which can be used for reading the payload.
    pub fn open(&self) -> io::Result<Box<dyn io::BufRead + '_>> {
        self.content_source.open()
    }

    /// Writes the full encoding (header and payload) to `w`.
    ///
    /// The bytes are hashed as they are written. If they no longer match
    /// this object's ID (the source changed since the object was created),
    /// an `InvalidData` error is returned and the caller must discard
    /// whatever was written.
    pub fn write_encoded(&self, w: &mut dyn Write) -> io::Result<()> {
        let header = header(self.kind, self.len());
        w.write_all(&header)?;

        let mut hasher = Sha1::new();
        hasher.update(&header);

        let written = {
            let mut reader = self.open()?;
            hash_stream(&mut reader, &mut hasher, w)?
        };

        if written != self.len() as u64 {
            return Err(length_mismatch(self.kind, self.len(), written));
        }

        let actual = digest_id(hasher)?;
        if actual != self.id {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{} content changed while writing: expected {}, found {}",
                    self.kind, self.id, actual
                ),
            ));
        }

        Ok(())
    }
}

// Copies `reader` into `w`, feeding every byte to `hasher`. Returns the
// number of bytes copied.
fn hash_stream(reader: &mut dyn Read, hasher: &mut Sha1, w: &mut dyn Write) -> io::Result<u64> {
    let mut buf = [0; 8192];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };

        hasher.update(&buf[..n]);
        w.write_all(&buf[..n])?;
        total += n as u64;
    }
}

fn digest_id(hasher: Sha1) -> io::Result<Id> {
    // The hasher always produces exactly 20 bytes.
    Id::new(hasher.finalize().as_slice()).map_err(|err| io::Error::new(io::ErrorKind::Other, err))
}

fn length_mismatch(kind: Kind, expected: usize, found: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!(
            "{} content changed: expected {} bytes, found {}",
            kind, expected, found
        ),
    )
}

fn header(kind: Kind, len: usize) -> Vec<u8> {
    format!("{} {}\0", kind, len).into_bytes()
}
