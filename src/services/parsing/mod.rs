// 行の変換機能
// CSVフィールド分割とコールバックアダプタ

pub mod callbacks;
pub mod csv_line;

// 公開API
pub use callbacks::{dispatch_line, RawCallback, StructuredCallback};
pub use csv_line::{split_csv_line, CsvLineSplitter};
