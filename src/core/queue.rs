// BoundedQueue - 容量制限付きのスレッドセーフFIFO
// Mutex 1つと Condvar 2つ (not_full / not_empty) でブロッキングpush/popとcloseを提供

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

/// ロック内で保護される状態
#[derive(Debug)]
struct QueueState<T> {
    pending: VecDeque<T>,
    closed: bool,
    /// これまでに取り出された要素数（次に払い出す消費インデックス）
    removed: u64,
}

/// 容量制限付きのブロッキングキュー
///
/// - `push` は満杯かつ未closeの間ブロックする（バックプレッシャー）
/// - `pop` は空かつ未closeの間ブロックする
/// - `close` は一方向・冪等で、待機中の全スレッドを起こす
///
/// close後もキューに残っている要素は `pop` で取り出せる（drain-before-stop）。
#[derive(Debug)]
pub struct BoundedQueue<T> {
    state: Mutex<QueueState<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// 指定した容量でキューを作成
    ///
    /// # Panics
    ///
    /// `capacity` が0の場合。容量0のキューは何も受け付けられず必ずデッドロックする。
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "BoundedQueue capacity must be positive");
        Self {
            state: Mutex::new(QueueState {
                pending: VecDeque::with_capacity(capacity.min(4096)),
                closed: false,
                removed: 0,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        }
    }

    /// 末尾に要素を追加する
    ///
    /// 満杯の間はブロックする。closeされていた場合は挿入せずに `false` を返す。
    pub fn push(&self, item: T) -> bool {
        let mut state = self.lock();
        while state.pending.len() >= self.capacity && !state.closed {
            state = self
                .not_full
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        if state.closed {
            return false;
        }
        state.pending.push_back(item);
        drop(state);
        self.not_empty.notify_one();
        true
    }

    /// 先頭の要素を取り出す
    ///
    /// 空の間はブロックする。close済みかつ空になったら `None`。
    pub fn pop(&self) -> Option<T> {
        self.pop_with_sequence().map(|(_, item)| item)
    }

    /// 先頭の要素を消費インデックス付きで取り出す
    ///
    /// インデックスはロック内で払い出されるため、取り出し順（=FIFO順）と一致し、
    /// 0から始まって取り出しごとにちょうど1ずつ増える。
    /// 元のソース上の行番号ではない点に注意。
    pub fn pop_with_sequence(&self) -> Option<(u64, T)> {
        let mut state = self.lock();
        while state.pending.is_empty() && !state.closed {
            state = self
                .not_empty
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        let item = state.pending.pop_front()?;
        let sequence = state.removed;
        state.removed += 1;
        drop(state);
        self.not_full.notify_one();
        Some((sequence, item))
    }

    /// キューをcloseする（冪等・不可逆）
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        drop(state);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// 現在キューに残っている要素数（スナップショット）
    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().pending.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // ワーカーがpanicしてもキュー自体の状態は常に整合しているため、poisonは無視する
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
