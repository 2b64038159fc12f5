use std::{fs, io, path::PathBuf};

use diaryface_core::settings::{PARTIAL_INVERSE_KEY, PreferenceStore, Preferences};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(super) enum PrefsFileError {
    Io(io::ErrorKind),
    Malformed,
}

impl From<io::Error> for PrefsFileError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.kind())
    }
}

/// Preferences kept as `<key>=<0|1>` lines in a plain text file.
pub(super) struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub(super) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(super) fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    type Error = PrefsFileError;

    fn load(&mut self) -> Result<Option<Preferences>, Self::Error> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let mut partial_inverse = None;
        for line in contents.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let (key, value) = line.split_once('=').ok_or(PrefsFileError::Malformed)?;
            let key: u32 = key.trim().parse().map_err(|_| PrefsFileError::Malformed)?;
            if key != PARTIAL_INVERSE_KEY {
                continue;
            }

            partial_inverse = Some(match value.trim() {
                "0" => false,
                "1" => true,
                _ => return Err(PrefsFileError::Malformed),
            });
        }

        Ok(partial_inverse.map(Preferences::new))
    }

    fn save(&mut self, preferences: &Preferences) -> Result<(), Self::Error> {
        let contents = format!(
            "{}={}\n",
            PARTIAL_INVERSE_KEY,
            u8::from(preferences.partial_inverse)
        );
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
