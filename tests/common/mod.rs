// 集成测试公共模块
//
// 提供测试辅助工具和共享功能：可编程的远程后端、计数翻译器、内存菜单存储。

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use menu_translation::menu::{
    EntityKind, EntityRow, MenuStore, SqliteMenuStore, StoreError, TranslatableEntity,
    TranslatedFields,
};
use menu_translation::translation::{
    FallbackDictionary, TextTranslator, TranslationBackend, TranslationError, TranslationResult,
    Translator,
};

/// 可编程的远程后端，记录每次调用
pub struct MockBackend {
    name: &'static str,
    responses: Mutex<BTreeMap<String, String>>,
    fail_all: AtomicBool,
    calls: AtomicUsize,
}

impl MockBackend {
    /// 所有请求都失败（模拟远程服务不可达）
    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            responses: Mutex::new(BTreeMap::new()),
            fail_all: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        })
    }

    /// 按给定映射返回译文，未知文本返回空结果
    pub fn with_responses(name: &'static str, pairs: &[(&str, &str)]) -> Arc<Self> {
        let responses = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Arc::new(Self {
            name,
            responses: Mutex::new(responses),
            fail_all: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// 让测试保留 `Arc<MockBackend>` 句柄的同时把它交给翻译器
pub struct SharedBackend(pub Arc<MockBackend>);

impl TranslationBackend for SharedBackend {
    fn name(&self) -> &'static str {
        self.0.name
    }

    fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> TranslationResult<String> {
        self.0.calls.fetch_add(1, Ordering::SeqCst);

        if self.0.fail_all.load(Ordering::SeqCst) {
            return Err(TranslationError::NetworkError(
                "connection refused".to_string(),
            ));
        }

        self.0
            .responses
            .lock()
            .unwrap()
            .get(text)
            .cloned()
            .ok_or(TranslationError::EmptyResult)
    }
}

/// 使用内置词典和给定后端构造翻译器
pub fn translator_with(backends: &[Arc<MockBackend>]) -> Translator {
    let boxed = backends
        .iter()
        .map(|b| Box::new(SharedBackend(Arc::clone(b))) as Box<dyn TranslationBackend>)
        .collect();
    Translator::new("it", FallbackDictionary::builtin(), boxed)
}

/// 记录调用次数的翻译器，给文本加上前缀
#[derive(Default)]
pub struct CountingTranslator {
    calls: Mutex<Vec<String>>,
}

impl CountingTranslator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TextTranslator for CountingTranslator {
    fn translate(&self, text: &str, target_lang: &str) -> String {
        self.calls.lock().unwrap().push(text.to_string());
        format!("[{}] {}", target_lang, text.trim())
    }
}

/// 内存菜单存储，可注入写入失败
#[derive(Default)]
pub struct MemoryMenuStore {
    rows: Mutex<BTreeMap<(EntityKind, i64), TranslatableEntity>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryMenuStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 写入时总是报错
    pub fn failing_writes() -> Arc<Self> {
        let store = Self::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        Arc::new(store)
    }

    pub fn insert(&self, kind: EntityKind, id: i64, name: &str, description: Option<&str>) {
        self.rows.lock().unwrap().insert(
            (kind, id),
            TranslatableEntity {
                kind,
                id,
                name: name.to_string(),
                description: description.map(str::to_string),
                name_translated: None,
                description_translated: None,
                translation_lang: "en".to_string(),
                updated_at: None,
            },
        );
    }

    pub fn get(&self, kind: EntityKind, id: i64) -> Option<TranslatableEntity> {
        self.rows.lock().unwrap().get(&(kind, id)).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl MenuStore for MemoryMenuStore {
    fn translation_lang(&self) -> &str {
        "en"
    }

    fn write_translation(
        &self,
        kind: EntityKind,
        id: i64,
        fields: &TranslatedFields,
    ) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Sqlite("database is locked".to_string()));
        }

        let mut rows = self.rows.lock().unwrap();
        let entity = rows
            .get_mut(&(kind, id))
            .ok_or(StoreError::NotFound { kind, id })?;
        entity.name_translated = Some(fields.name.clone());
        if let Some(description) = &fields.description {
            entity.description_translated = Some(description.clone());
        }
        entity.updated_at = Some("now".to_string());
        Ok(())
    }

    fn list_rows(&self, kind: EntityKind, only_missing: bool) -> Result<Vec<EntityRow>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.kind == kind)
            .filter(|e| !only_missing || e.needs_translation())
            .map(|e| EntityRow {
                id: e.id,
                name: e.name.clone(),
                description: e.description.clone(),
            })
            .collect())
    }

    fn read_entity(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<Option<TranslatableEntity>, StoreError> {
        Ok(self.get(kind, id))
    }
}

/// 已建表的内存 SQLite 存储
pub fn sqlite_store() -> Arc<SqliteMenuStore> {
    let store = SqliteMenuStore::open_in_memory().expect("open in-memory sqlite");
    store
        .ensure_translation_columns()
        .expect("create menu tables");
    Arc::new(store)
}
