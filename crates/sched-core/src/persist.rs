//! Format dispatch between a schedule and the files it is stored in.
//!
//! A [`Dispatcher`] maps lower-cased file extensions to [`Codec`]s. It picks
//! the codec from the path alone, checks the direction is supported, and
//! hands the work over; it never touches the lecture data itself.
//!
//! # Writes
//!
//! Exports are rendered into a temporary file next to the destination and
//! renamed over it once the codec has finished. A failing codec therefore
//! leaves the destination exactly as it was, and an unsupported extension is
//! rejected before anything is created.

use std::collections::HashMap;
use std::fmt;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::classroom::ClassroomRegistry;
use crate::error::{ScheduleError, ScheduleResult};
use crate::lecture::Lecture;
use crate::period::ValidityPeriod;

/// Everything a codec may need besides the file itself.
#[derive(Debug, Clone, Copy)]
pub struct LoadContext<'a> {
    /// Resolves classroom names to rooms.
    pub registry: &'a ClassroomRegistry,
    /// Format-specific mapping file (column layout for tabular input).
    pub mapping: Option<&'a Path>,
    /// Validity assigned to lectures whose format does not record one.
    pub default_validity: ValidityPeriod,
}

/// One file format's load/export implementation.
pub trait Codec {
    /// Reads every lecture stored at `path`.
    ///
    /// Export-only formats keep the default, which refuses the load.
    fn load(&self, path: &Path, _ctx: &LoadContext<'_>) -> ScheduleResult<Vec<Lecture>> {
        Err(ScheduleError::UnsupportedFormat {
            path: path.to_path_buf(),
        })
    }

    /// Renders `lectures` into `out`.
    fn export(&self, lectures: &[Lecture], out: &mut dyn Write) -> ScheduleResult<()>;

    /// Whether [`load`](Self::load) is implemented.
    fn supports_load(&self) -> bool {
        true
    }
}

/// Registered map from file extension to codec.
#[derive(Default)]
pub struct Dispatcher {
    codecs: HashMap<String, Box<dyn Codec>>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("extensions", &self.extensions())
            .finish()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `codec` for `extension` (matched case-insensitively),
    /// replacing any codec already registered for it.
    pub fn register(&mut self, extension: &str, codec: impl Codec + 'static) -> &mut Self {
        self.codecs
            .insert(extension.to_ascii_lowercase(), Box::new(codec));
        self
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, extension: &str, codec: impl Codec + 'static) -> Self {
        self.register(extension, codec);
        self
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.codecs.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    fn resolve(&self, path: &Path) -> ScheduleResult<&dyn Codec> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .and_then(|ext| self.codecs.get(&ext))
            .map(|codec| &**codec)
            .ok_or_else(|| ScheduleError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    /// Loads the lectures stored at `path`.
    pub fn load(&self, path: &Path, ctx: &LoadContext<'_>) -> ScheduleResult<Vec<Lecture>> {
        let codec = self.resolve(path)?;
        if !codec.supports_load() {
            return Err(ScheduleError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
        if !path.exists() {
            return Err(ScheduleError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let lectures = codec.load(path, ctx)?;
        tracing::debug!(path = %path.display(), count = lectures.len(), "loaded lectures");
        Ok(lectures)
    }

    /// Writes `lectures` to `path`, replacing it atomically.
    pub fn write(&self, lectures: &[Lecture], path: &Path) -> ScheduleResult<()> {
        let codec = self.resolve(path)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut staged = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            codec.export(lectures, &mut writer)?;
            writer.flush()?;
        }
        staged.persist(path).map_err(|err| err.error)?;

        tracing::debug!(path = %path.display(), count = lectures.len(), "exported lectures");
        Ok(())
    }
}
