use std::io::{self, BufRead};

pub mod file;
pub mod memory;

pub use file::FileLineSource;
pub use memory::MemoryLineSource;

/// 行単位の入力ソースのトレイト
///
/// パイプラインは `open` で得たリーダーから1行ずつ読み出すだけで、
/// エンコーディングやバッファリング方針には関与しない。
pub trait LineSource {
    /// 入力を開いてバッファ付きリーダーを返す
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;

    /// メッセージ用の入力名（ローカルならパス）
    fn describe(&self) -> String;
}

impl<S: LineSource + ?Sized> LineSource for &S {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        (**self).open()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
