// Producer - 入力を1行ずつキューへ配信

use crate::core::{BoundedQueue, ParserError, ParserResult};
use std::io::BufRead;

/// リーダーから1行ずつ読み出してキューへ投入し、投入できた行数を返す
///
/// 入力終端に達するか、`push` がキューのcloseを報告したら戻る。
/// closeされるのはワーカーがpanicした場合だけで、その失敗はPipeline側が返す。
/// キューのclose自体は呼び出し側（Pipeline）の責任。
pub fn run_producer<R>(
    reader: R,
    queue: &BoundedQueue<String>,
    source_name: &str,
) -> ParserResult<u64>
where
    R: BufRead,
{
    let mut lines_pushed = 0u64;

    for line in reader.lines() {
        let line =
            line.map_err(|e| ParserError::read_failed(source_name, lines_pushed + 1, e))?;
        if !queue.push(line) {
            // キューがcloseされた場合は読み込みを中断
            break;
        }
        lines_pushed += 1;
    }

    Ok(lines_pushed)
}
