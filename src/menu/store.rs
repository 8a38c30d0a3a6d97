//! 菜单存储
//!
//! 翻译子系统对存储层只有三个需求：按 id 写回译文字段、列出待翻译的行、读取单个实体。
//! [`SqliteMenuStore`] 把译文存放在实体所在行的 `nome_<lang>` / `descrizione_<lang>` 列中。

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use super::entity::{EntityKind, EntityRow, TranslatableEntity, TranslatedFields};

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 底层 SQLite 错误
    #[error("sqlite error: {0}")]
    Sqlite(String),

    #[error("menu store lock poisoned")]
    LockPoisoned,

    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),

    /// 写回时没有匹配的行
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("invalid translation language: {0}")]
    InvalidLanguage(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Sqlite(err.to_string())
    }
}

/// 菜单存储接口
pub trait MenuStore: Send + Sync {
    /// 译文字段所属的语言，写回方按这个语言翻译
    fn translation_lang(&self) -> &str;

    /// 写回译文字段并更新修改时间；`fields.description` 为 `None` 时不改动描述译文
    fn write_translation(
        &self,
        kind: EntityKind,
        id: i64,
        fields: &TranslatedFields,
    ) -> Result<(), StoreError>;

    /// 列出某种实体的源字段，`only_missing` 时只列出缺少名称译文的行
    fn list_rows(&self, kind: EntityKind, only_missing: bool) -> Result<Vec<EntityRow>, StoreError>;

    /// 读取单个实体
    fn read_entity(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<Option<TranslatableEntity>, StoreError>;
}

/// SQLite 菜单存储
pub struct SqliteMenuStore {
    connection: Mutex<Connection>,
    translation_lang: String,
}

impl std::fmt::Debug for SqliteMenuStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteMenuStore")
            .field("translation_lang", &self.translation_lang)
            .finish()
    }
}

impl SqliteMenuStore {
    /// 打开数据库文件
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        conn.busy_timeout(Duration::from_secs(5))?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!("journal_mode = {}", mode);
        tracing::debug!("已打开菜单数据库: {}", path.as_ref().display());
        Ok(Self::from_connection(conn))
    }

    /// 内存数据库，用于测试和演示
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            connection: Mutex::new(conn),
            translation_lang: "en".to_string(),
        }
    }

    /// 改用其他语言的译文列（`nome_<lang>`）
    pub fn with_translation_lang(mut self, lang: &str) -> Result<Self, StoreError> {
        let lang = lang.trim().to_lowercase();
        if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(StoreError::InvalidLanguage(lang));
        }
        self.translation_lang = lang;
        Ok(self)
    }

    fn name_column(&self) -> String {
        format!("nome_{}", self.translation_lang)
    }

    fn description_column(&self) -> String {
        format!("descrizione_{}", self.translation_lang)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.connection.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// 创建缺失的表并补齐译文列
    ///
    /// 只是一个方便的初始化步骤，不是迁移系统。
    pub fn ensure_translation_columns(&self) -> Result<(), StoreError> {
        let name_col = self.name_column();
        let desc_col = self.description_column();
        let conn = self.lock()?;

        for kind in EntityKind::ALL {
            let table = kind.table();
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (\
                 id INTEGER PRIMARY KEY AUTOINCREMENT, \
                 nome TEXT NOT NULL, \
                 descrizione TEXT, \
                 {name_col} TEXT, \
                 {desc_col} TEXT, \
                 updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP)"
            ))?;

            let existing: Vec<String> = {
                let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
                let columns = stmt
                    .query_map([], |row| row.get::<_, String>(1))?
                    .collect::<Result<Vec<_>, _>>()?;
                columns
            };

            for column in [name_col.as_str(), desc_col.as_str(), "updated_at"] {
                if !existing.iter().any(|c| c == column) {
                    conn.execute_batch(&format!("ALTER TABLE {table} ADD COLUMN {column} TEXT"))?;
                    tracing::info!("已为表 {} 添加列 {}", table, column);
                }
            }
        }

        Ok(())
    }

    /// 插入一条只有源字段的记录，返回新 id
    pub fn insert_source(
        &self,
        kind: EntityKind,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (nome, descrizione, updated_at) VALUES (?1, ?2, ?3)",
                kind.table()
            ),
            params![name, description, now_marker()],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

/// 修改时间标记
fn now_marker() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

impl MenuStore for SqliteMenuStore {
    fn translation_lang(&self) -> &str {
        &self.translation_lang
    }

    fn write_translation(
        &self,
        kind: EntityKind,
        id: i64,
        fields: &TranslatedFields,
    ) -> Result<(), StoreError> {
        let table = kind.table();
        let name_col = self.name_column();
        let conn = self.lock()?;

        let changed = match &fields.description {
            Some(description) => conn.execute(
                &format!(
                    "UPDATE {table} SET {name_col} = ?1, {} = ?2, updated_at = ?3 WHERE id = ?4",
                    self.description_column()
                ),
                params![fields.name, description, now_marker(), id],
            )?,
            None => conn.execute(
                &format!("UPDATE {table} SET {name_col} = ?1, updated_at = ?2 WHERE id = ?3"),
                params![fields.name, now_marker(), id],
            )?,
        };

        if changed == 0 {
            return Err(StoreError::NotFound { kind, id });
        }
        Ok(())
    }

    fn list_rows(&self, kind: EntityKind, only_missing: bool) -> Result<Vec<EntityRow>, StoreError> {
        let table = kind.table();
        let sql = if only_missing {
            let name_col = self.name_column();
            format!(
                "SELECT id, nome, descrizione FROM {table} \
                 WHERE {name_col} IS NULL OR {name_col} = '' ORDER BY id"
            )
        } else {
            format!("SELECT id, nome, descrizione FROM {table} ORDER BY id")
        };

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(EntityRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn read_entity(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<Option<TranslatableEntity>, StoreError> {
        let sql = format!(
            "SELECT id, nome, descrizione, {}, {}, updated_at FROM {} WHERE id = ?1",
            self.name_column(),
            self.description_column(),
            kind.table()
        );

        let conn = self.lock()?;
        let entity = conn
            .query_row(&sql, params![id], |row| {
                Ok(TranslatableEntity {
                    kind,
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    name_translated: row.get(3)?,
                    description_translated: row.get(4)?,
                    translation_lang: self.translation_lang.clone(),
                    updated_at: row.get(5)?,
                })
            })
            .optional()?;
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteMenuStore {
        let store = SqliteMenuStore::open_in_memory().unwrap();
        store.ensure_translation_columns().unwrap();
        store
    }

    #[test]
    fn test_write_and_read_back() {
        let store = store();
        let id = store
            .insert_source(EntityKind::Category, "Dolci", Some("Fatti in casa"))
            .unwrap();

        store
            .write_translation(
                EntityKind::Category,
                id,
                &TranslatedFields {
                    name: "Desserts".to_string(),
                    description: Some("Homemade".to_string()),
                },
            )
            .unwrap();

        let entity = store.read_entity(EntityKind::Category, id).unwrap().unwrap();
        assert_eq!(entity.name_translated.as_deref(), Some("Desserts"));
        assert_eq!(entity.description_translated.as_deref(), Some("Homemade"));
        assert!(entity.updated_at.is_some());
    }

    #[test]
    fn test_description_untouched_without_translation() {
        let store = store();
        let id = store
            .insert_source(EntityKind::Product, "Tiramisù", None)
            .unwrap();

        store
            .write_translation(
                EntityKind::Product,
                id,
                &TranslatedFields {
                    name: "Tiramisu".to_string(),
                    description: Some("old".to_string()),
                },
            )
            .unwrap();
        store
            .write_translation(
                EntityKind::Product,
                id,
                &TranslatedFields {
                    name: "Tiramisu".to_string(),
                    description: None,
                },
            )
            .unwrap();

        let entity = store.read_entity(EntityKind::Product, id).unwrap().unwrap();
        assert_eq!(entity.description_translated.as_deref(), Some("old"));
    }

    #[test]
    fn test_missing_row_is_reported() {
        let store = store();
        let err = store
            .write_translation(
                EntityKind::Allergen,
                99,
                &TranslatedFields {
                    name: "Gluten".to_string(),
                    description: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 99, .. }));
        assert!(store.read_entity(EntityKind::Allergen, 99).unwrap().is_none());
    }

    #[test]
    fn test_list_rows_filters_missing() {
        let store = store();
        let first = store.insert_source(EntityKind::Ingredient, "aglio", None).unwrap();
        let second = store.insert_source(EntityKind::Ingredient, "olio", None).unwrap();
        store
            .write_translation(
                EntityKind::Ingredient,
                first,
                &TranslatedFields {
                    name: "garlic".to_string(),
                    description: None,
                },
            )
            .unwrap();

        let missing = store.list_rows(EntityKind::Ingredient, true).unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].id, second);

        let all = store.list_rows(EntityKind::Ingredient, false).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_ensure_columns_adds_to_existing_table() {
        let store = SqliteMenuStore::open_in_memory().unwrap();
        {
            let conn = store.lock().unwrap();
            conn.execute_batch(
                "CREATE TABLE prodotti (id INTEGER PRIMARY KEY, nome TEXT NOT NULL, descrizione TEXT)",
            )
            .unwrap();
        }

        store.ensure_translation_columns().unwrap();
        let id = store.insert_source(EntityKind::Product, "Bruschetta", None).unwrap();
        assert!(store
            .read_entity(EntityKind::Product, id)
            .unwrap()
            .unwrap()
            .needs_translation());
    }

    #[test]
    fn test_invalid_translation_lang() {
        let store = SqliteMenuStore::open_in_memory().unwrap();
        assert!(matches!(
            store.with_translation_lang("en; DROP"),
            Err(StoreError::InvalidLanguage(_))
        ));
    }
}
