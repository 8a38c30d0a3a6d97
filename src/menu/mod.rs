//! 菜单领域
//!
//! 产品、类别、过敏原和配料都有一个源语言名称和可选描述，以及由翻译器填充的译文字段。
//!
//! - **entity**: 实体种类和字段
//! - **store**: 存储接口和 SQLite 实现
//! - **adapter**: 翻译并写回译文
//! - **batch**: 批量重新翻译

pub mod adapter;
pub mod batch;
pub mod entity;
pub mod store;

pub use adapter::TranslationWriter;
pub use batch::{BatchReport, BatchRetranslator};
pub use entity::{EntityKind, EntityRow, LocalizedText, TranslatableEntity, TranslatedFields};
pub use store::{MenuStore, SqliteMenuStore, StoreError};
