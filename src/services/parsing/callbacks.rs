// クロージャを RecordProcessor に変換するアダプタと、行のバリアント別ディスパッチ

use super::csv_line::{split_csv_line, CsvLineSplitter};
use crate::core::{ParseMode, Record, RecordProcessor};

/// `(index, fields, raw)` 形式のクロージャを受け取る構造化コールバック
pub struct StructuredCallback<F>(pub F);

/// `(index, raw)` 形式のクロージャを受け取る生レコードコールバック
pub struct RawCallback<F>(pub F);

impl<F> RecordProcessor for StructuredCallback<F>
where
    F: Fn(u64, &[String], &str) + Send + Sync,
{
    fn process(&self, index: u64, record: Record<'_>) {
        match record {
            Record::Structured { fields, raw } => (self.0)(index, fields, raw),
            Record::Raw { raw } => {
                let fields = split_csv_line(raw);
                (self.0)(index, &fields, raw)
            }
        }
    }
}

impl<F> RecordProcessor for RawCallback<F>
where
    F: Fn(u64, &str) + Send + Sync,
{
    fn process(&self, index: u64, record: Record<'_>) {
        (self.0)(index, record.raw())
    }
}

/// 1行をモードに応じた `Record` にして処理ケイパビリティへ渡す
///
/// CSVモードではワーカー所有の `splitter` で分割する。
pub fn dispatch_line<P>(
    mode: ParseMode,
    index: u64,
    line: &str,
    processor: &P,
    splitter: &mut CsvLineSplitter,
) where
    P: RecordProcessor + ?Sized,
{
    match mode {
        ParseMode::Csv => {
            let fields = splitter.split(line);
            processor.process(index, Record::Structured { fields, raw: line });
        }
        ParseMode::Ndjson => processor.process(index, Record::Raw { raw: line }),
    }
}
