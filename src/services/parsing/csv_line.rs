// CSV 1行分のフィールド分割

use csv_core::{ReadFieldResult, Reader, ReaderBuilder, Terminator};

/// 1行をCSVフィールドに分割するスプリッター
///
/// ダブルクォートで囲まれたフィールド内のカンマは区切りとして扱わず、
/// `""` は1つの `"` に展開される。空行は空文字列1フィールドになる。
/// 入力は改行を含まない1行なので、`\r` も通常の文字としてフィールドに残る。
///
/// ワーカーごとに1つ持ち、パーサー状態とバッファを行をまたいで再利用する。
#[derive(Debug)]
pub struct CsvLineSplitter {
    reader: Reader,
    buffer: Vec<u8>,
    fields: Vec<String>,
}

impl CsvLineSplitter {
    pub fn new() -> Self {
        Self {
            reader: ReaderBuilder::new()
                .terminator(Terminator::Any(b'\n'))
                .build(),
            buffer: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// 1行を分割し、次の呼び出しまで有効なフィールド列を返す
    pub fn split(&mut self, line: &str) -> &[String] {
        self.reader.reset();
        // アンクォート後のフィールドは入力より長くならない
        if self.buffer.len() < line.len() {
            self.buffer.resize(line.len(), 0);
        }

        let mut input = line.as_bytes();
        let mut written = 0;
        let mut count = 0;

        loop {
            let (result, nin, nout) = self
                .reader
                .read_field(input, &mut self.buffer[written..]);
            input = &input[nin..];
            written += nout;

            match result {
                // 次の呼び出しで空の入力を渡し、入力終端を伝える
                ReadFieldResult::InputEmpty => {}
                ReadFieldResult::OutputFull => {
                    let grown = self.buffer.len().max(64) * 2;
                    self.buffer.resize(grown, 0);
                }
                ReadFieldResult::Field { record_end } => {
                    store_field(&mut self.fields, count, &self.buffer[..written]);
                    count += 1;
                    written = 0;
                    if record_end {
                        break;
                    }
                }
                ReadFieldResult::End => break,
            }
        }

        if count == 0 {
            store_field(&mut self.fields, 0, b"");
            count = 1;
        }
        &self.fields[..count]
    }
}

impl Default for CsvLineSplitter {
    fn default() -> Self {
        Self::new()
    }
}

/// `slot` 番目のフィールドを書き換える（既存の `String` の容量を再利用）
fn store_field(fields: &mut Vec<String>, slot: usize, bytes: &[u8]) {
    // 入力は &str で、取り除かれるのはASCIIの `"` だけなので常に有効なUTF-8
    let text = String::from_utf8_lossy(bytes);
    match fields.get_mut(slot) {
        Some(field) => {
            field.clear();
            field.push_str(&text);
        }
        None => fields.push(text.into_owned()),
    }
}

/// 1行をCSVフィールドに分割する（単発呼び出し用）
pub fn split_csv_line(line: &str) -> Vec<String> {
    CsvLineSplitter::new().split(line).to_vec()
}
