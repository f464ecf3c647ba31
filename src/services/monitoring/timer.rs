// ScopedTimer - スコープを抜けたときに経過時間を報告する

use std::time::{Duration, Instant};

/// ドロップ時に `[TIMER] <name> took <ms> ms` を標準エラー出力へ書くタイマー
#[derive(Debug)]
pub struct ScopedTimer {
    name: String,
    start: Instant,
    silent: bool,
}

impl ScopedTimer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            silent: false,
        }
    }

    /// ドロップ時に何も出力しないタイマー
    pub fn silent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            silent: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// 報告用の1行メッセージ
    pub fn message(&self) -> String {
        format!("[TIMER] {} took {} ms", self.name, self.elapsed().as_millis())
    }
}

impl Default for ScopedTimer {
    fn default() -> Self {
        Self::new("timer")
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if !self.silent {
            eprintln!("{}", self.message());
        }
    }
}
