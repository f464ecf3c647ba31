use super::LineSource;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// 読み込みバッファサイズ
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// ローカルファイルシステム上のテキストファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLineSource {
    path: PathBuf,
}

impl FileLineSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイルが存在するか
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl LineSource for FileLineSource {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl From<&Path> for FileLineSource {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for FileLineSource {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}
