use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::layout::PacketType;

/// Output directory holding the persisted collections.
///
/// Each (vehicle, packet type) pair is stored as `<vehicle>_<TAG>.log` and
/// `<vehicle>_<TAG>.json` where `TAG` is the upper-case hex packet tag, e.g.,
/// `SV3-1043_21.log`.
///
/// ```no_run
/// use wgms::archive::Archive;
///
/// let archive = Archive::builder().dir("/data/wgms").build();
/// # let buf: Vec<u8> = Vec::new();
/// let added = archive.process("SV3-1043", &buf).unwrap();
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct Archive {
    #[builder(setter(into))]
    dir: PathBuf,
    /// Also write the JSON export when saving.
    #[builder(default = true)]
    json: bool,
}

impl Archive {
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn log_path(&self, vehicle: &str, typ: PacketType) -> PathBuf {
        self.dir.join(format!("{vehicle}_{typ}.log"))
    }

    #[must_use]
    pub fn json_path(&self, vehicle: &str, typ: PacketType) -> PathBuf {
        self.dir.join(format!("{vehicle}_{typ}.json"))
    }

    /// Open the collection for `vehicle` and `typ`, loading any existing log.
    ///
    /// # Errors
    /// If an existing log cannot be read; see [Collection::load].
    pub fn open(&self, vehicle: &str, typ: PacketType) -> Result<Collection> {
        let mut collection = Collection::new(vehicle, typ);
        let path = self.log_path(vehicle, typ);
        if path.exists() {
            debug!(?path, "loading existing log");
            collection.load(BufReader::new(File::open(&path)?))?;
        }
        Ok(collection)
    }

    /// Persist `collection`. The text log is only written if the collection has
    /// records; the JSON export is always written when enabled.
    ///
    /// # Errors
    /// If either file cannot be created or written.
    pub fn save(&self, collection: &Collection) -> Result<()> {
        let (vehicle, typ) = (collection.vehicle(), collection.packet_type());
        if !collection.is_empty() {
            let path = self.log_path(vehicle, typ);
            debug!(?path, records = collection.len(), "writing log");
            collection.write(BufWriter::new(File::create(&path)?))?;
        }
        if self.json {
            let path = self.json_path(vehicle, typ);
            debug!(?path, records = collection.len(), "writing json");
            collection.write_json(BufWriter::new(File::create(&path)?))?;
        }
        Ok(())
    }

    /// Run one processing cycle for a raw buffer: open the matching collection,
    /// decode the buffer into it, and save it. Returns the number of new records.
    ///
    /// Buffers with an unknown packet type are logged and dropped.
    ///
    /// # Errors
    /// If the buffer is too short for its layout or the collection cannot be loaded or
    /// saved.
    pub fn process(&self, vehicle: &str, buf: &[u8]) -> Result<usize> {
        self.process_at(vehicle, buf, &Utc::now())
    }

    /// Like [Archive::process] but computing latency relative to `now`.
    ///
    /// # Errors
    /// See [Archive::process].
    pub fn process_at(&self, vehicle: &str, buf: &[u8], now: &DateTime<Utc>) -> Result<usize> {
        let typ = match PacketType::of(buf) {
            Ok(typ) => typ,
            Err(Error::UnknownPacketType(tag)) => {
                warn!(vehicle, tag = %format!("{tag:#04x}"), "dropping unknown packet type");
                return Ok(0);
            }
            Err(err) => return Err(err),
        };
        let mut collection = self.open(vehicle, typ)?;
        let added = collection.decode_raw_at(buf, now)?;
        self.save(&collection)?;
        debug!(vehicle, %typ, added, total = collection.len(), "processed");
        Ok(added)
    }
}
