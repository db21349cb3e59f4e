use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Eq, PartialEq)]
pub enum Verdict {
    New,
    Unchanged,
}

// exact string equality, no normalization
pub fn detect(identity: &str, last_seen: &str) -> Verdict {
    if identity == last_seen {
        Verdict::Unchanged
    } else {
        Verdict::New
    }
}

pub struct MarkerStore {
    path: PathBuf,
}

impl MarkerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read(&self) -> Result<String, std::io::Error> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.trim().to_string()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(error) => Err(error),
        }
    }

    pub fn write(&self, identity: &str) -> Result<(), std::io::Error> {
        fs::write(&self.path, identity)
    }
}
