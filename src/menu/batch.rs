//! 批量重新翻译
//!
//! 离线维护操作：遍历某张表中缺少译文的行（`force` 时遍历所有行），
//! 对每一行调用 [`TranslationWriter::translate_and_store`]，行与行之间稍作停顿以避免触发远程限流。

use std::time::{Duration, Instant};

use crate::translation::constants;

use super::adapter::TranslationWriter;
use super::entity::EntityKind;
use super::store::StoreError;

/// 一张表的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub kind: EntityKind,
    /// 处理过的行数
    pub processed: usize,
    pub elapsed: Duration,
}

/// 批量重新翻译驱动
#[derive(Debug, Clone)]
pub struct BatchRetranslator {
    writer: TranslationWriter,
    delay: Duration,
}

impl BatchRetranslator {
    pub fn new(writer: TranslationWriter) -> Self {
        Self {
            writer,
            delay: Duration::from_millis(constants::BATCH_DELAY_MS),
        }
    }

    /// 设置行间停顿
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 处理一张表
    ///
    /// 只有列出行这一步会失败；单行的写回错误已经在 [`TranslationWriter`] 中记录并忽略。
    pub fn run(&self, kind: EntityKind, force: bool) -> Result<BatchReport, StoreError> {
        let started = Instant::now();
        let rows = self.writer.store().list_rows(kind, !force)?;
        let total = rows.len();

        tracing::info!(
            "开始批量翻译 {}：{} 行{}",
            kind.table(),
            total,
            if force { "（强制）" } else { "" }
        );

        let mut processed = 0;
        for (index, row) in rows.iter().enumerate() {
            self.writer
                .translate_and_store(kind, row.id, &row.name, row.description.as_deref());
            processed += 1;

            if index + 1 < total && !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }

        let report = BatchReport {
            kind,
            processed,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            "已翻译表 {} 中的 {} 个条目，耗时 {:?}",
            kind.table(),
            report.processed,
            report.elapsed
        );
        Ok(report)
    }

    /// 按 类别、产品、过敏原、配料 的顺序处理所有表
    pub fn run_all(&self, force: bool) -> Result<Vec<BatchReport>, StoreError> {
        EntityKind::ALL
            .iter()
            .map(|kind| self.run(*kind, force))
            .collect()
    }
}
