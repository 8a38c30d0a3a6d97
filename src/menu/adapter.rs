//! 译文写回
//!
//! 在实体的创建或更新已经提交之后调用：翻译名称（必需）和描述（非空时），
//! 然后把译文写回实体所在的行。写回失败只记录日志，不会影响触发它的主操作。
//!
//! 目标语言取自存储的译文列语言，两者不会错配。

use std::sync::Arc;

use crate::translation::TextTranslator;

use super::entity::{EntityKind, TranslatedFields};
use super::store::MenuStore;

/// 把实体文本翻译并写回存储
#[derive(Clone)]
pub struct TranslationWriter {
    translator: Arc<dyn TextTranslator>,
    store: Arc<dyn MenuStore>,
}

impl std::fmt::Debug for TranslationWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationWriter")
            .field("target_lang", &self.target_lang())
            .finish()
    }
}

impl TranslationWriter {
    pub fn new(translator: Arc<dyn TextTranslator>, store: Arc<dyn MenuStore>) -> Self {
        Self { translator, store }
    }

    pub fn target_lang(&self) -> &str {
        self.store.translation_lang()
    }

    pub fn store(&self) -> &Arc<dyn MenuStore> {
        &self.store
    }

    /// 只翻译，不写回
    pub fn translate_fields(&self, name: &str, description: Option<&str>) -> TranslatedFields {
        let target_lang = self.target_lang();
        let translated_name = self.translator.translate(name, target_lang);

        let translated_description = description
            .filter(|d| !d.trim().is_empty())
            .map(|d| self.translator.translate(d, target_lang));

        TranslatedFields {
            name: translated_name,
            description: translated_description,
        }
    }

    /// 翻译并写回；返回的译文仅供调用方参考
    pub fn translate_and_store(
        &self,
        kind: EntityKind,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> TranslatedFields {
        let fields = self.translate_fields(name, description);

        match self.store.write_translation(kind, id, &fields) {
            Ok(()) => tracing::info!(
                "已保存 {} {} 的译文: {:?}",
                kind,
                id,
                fields.name
            ),
            Err(e) => tracing::error!("保存 {} {} 的译文失败: {}", kind, id, e),
        }

        fields
    }

    pub fn translate_and_store_product(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> TranslatedFields {
        self.translate_and_store(EntityKind::Product, id, name, description)
    }

    pub fn translate_and_store_category(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> TranslatedFields {
        self.translate_and_store(EntityKind::Category, id, name, description)
    }

    pub fn translate_and_store_allergen(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> TranslatedFields {
        self.translate_and_store(EntityKind::Allergen, id, name, description)
    }

    pub fn translate_and_store_ingredient(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> TranslatedFields {
        self.translate_and_store(EntityKind::Ingredient, id, name, description)
    }
}
