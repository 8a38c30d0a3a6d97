//! 可翻译的菜单实体

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::store::StoreError;

/// 实体种类，每种对应一张表
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Product,
    Category,
    Allergen,
    Ingredient,
}

impl EntityKind {
    /// 批量处理的顺序：类别在前，产品随后
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Category,
        EntityKind::Product,
        EntityKind::Allergen,
        EntityKind::Ingredient,
    ];

    /// 数据库表名
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Product => "prodotti",
            EntityKind::Category => "categorie",
            EntityKind::Allergen => "allergeni",
            EntityKind::Ingredient => "ingredienti",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Category => "category",
            EntityKind::Allergen => "allergen",
            EntityKind::Ingredient => "ingredient",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = StoreError;

    /// 接受英文名（单复数）或意大利语表名
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" | "products" | "prodotti" | "prodotto" => Ok(EntityKind::Product),
            "category" | "categories" | "categorie" | "categoria" => Ok(EntityKind::Category),
            "allergen" | "allergens" | "allergeni" | "allergene" => Ok(EntityKind::Allergen),
            "ingredient" | "ingredients" | "ingredienti" | "ingrediente" => {
                Ok(EntityKind::Ingredient)
            }
            _ => Err(StoreError::UnknownEntityKind(s.to_string())),
        }
    }
}

/// 列表查询返回的一行：只包含需要翻译的源字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// 翻译结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslatedFields {
    pub name: String,
    /// 只有源描述非空时才会有译文
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 带有译文字段的完整实体
///
/// 译文字段是派生数据：源字段被编辑而没有重新翻译时，译文可能过期。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableEntity {
    pub kind: EntityKind,
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub name_translated: Option<String>,
    pub description_translated: Option<String>,
    /// 译文字段所用的语言
    pub translation_lang: String,
    pub updated_at: Option<String>,
}

/// 按请求语言选出的名称和描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub name: String,
    pub description: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|v| !v.trim().is_empty())
}

impl TranslatableEntity {
    /// 按语言取名称和描述
    ///
    /// 请求的是译文语言时优先使用非空译文，缺失时退回源字段；其他语言直接返回源字段。
    pub fn localized(&self, lang: &str) -> LocalizedText {
        if lang != self.translation_lang {
            return LocalizedText {
                name: self.name.clone(),
                description: self.description.clone(),
            };
        }

        LocalizedText {
            name: non_blank(&self.name_translated)
                .unwrap_or(&self.name)
                .clone(),
            description: non_blank(&self.description_translated)
                .or(self.description.as_ref())
                .cloned(),
        }
    }

    /// 是否缺少名称译文
    pub fn needs_translation(&self) -> bool {
        non_blank(&self.name_translated).is_none()
    }
}
