use super::LineSource;
use std::io::{self, BufRead, Cursor};

/// メモリ上の行を入力とするソース（テスト・組み込み用）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLineSource {
    name: String,
    text: String,
}

impl MemoryLineSource {
    /// 改行区切りのテキストをそのまま入力にする
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            name: "<memory>".to_string(),
            text: text.into(),
        }
    }

    /// 各要素を1行として入力にする
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref());
            text.push('\n');
        }
        Self::from_text(text)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl LineSource for MemoryLineSource {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.text.as_bytes())))
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}
