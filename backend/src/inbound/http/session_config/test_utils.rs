//! Test utilities for session configuration.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use tempfile::NamedTempFile;

/// Key file in the temp directory, removed on drop.
#[derive(Debug)]
pub(super) struct TempKeyFile(NamedTempFile);

impl TempKeyFile {
    /// Write `len` filler bytes to a uniquely named file.
    pub(super) fn new(len: usize) -> std::io::Result<Self> {
        let mut file = NamedTempFile::new()?;
        file.write_all(&vec![b'a'; len])?;
        file.flush()?;
        Ok(Self(file))
    }

    pub(super) fn path_str(&self) -> String {
        self.0.path().to_string_lossy().into_owned()
    }
}

/// `MockEnv` answering from a fixed map.
pub(super) fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}
