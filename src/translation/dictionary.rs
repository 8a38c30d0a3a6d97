//! 备用词典
//!
//! 菜单中常见的菜名、类别名和食材名的固定译文，按目标语言分组。
//! 在任何网络请求之前查询；构造后只读。

use std::collections::HashMap;

/// 内置的意大利语 -> 英语词条
const BUILTIN_EN: &[(&str, &str)] = &[
    ("Pizza Margherita", "Pizza Margherita"),
    ("Bruschetta", "Bruschetta"),
    ("Antipasti", "Appetizers"),
    ("Primi Piatti", "First Courses"),
    ("Secondi Piatti", "Main Courses"),
    ("Dolci", "Desserts"),
    ("Bevande", "Beverages"),
    ("pesce", "fish"),
    ("carne", "meat"),
    ("pollo", "chicken"),
    ("verdure", "vegetables"),
    ("formaggio", "cheese"),
    ("pomodoro", "tomato"),
    ("basilico", "basil"),
    ("aglio", "garlic"),
    ("olio", "oil"),
    ("sale", "salt"),
    ("pepe", "pepper"),
    ("pasta", "pasta"),
    ("riso", "rice"),
    ("pane", "bread"),
    ("vino", "wine"),
    ("acqua", "water"),
    ("latte", "milk"),
    ("uova", "eggs"),
    ("burro", "butter"),
    ("zucchero", "sugar"),
    ("farina", "flour"),
];

/// 备用词典：目标语言 -> (原文 -> 译文)
///
/// 查找是精确匹配，区分大小写，与员工录入时的写法一致。
#[derive(Debug, Clone, Default)]
pub struct FallbackDictionary {
    languages: HashMap<String, HashMap<String, String>>,
}

impl FallbackDictionary {
    /// 空词典
    pub fn empty() -> Self {
        Self::default()
    }

    /// 内置词典
    pub fn builtin() -> Self {
        let en = BUILTIN_EN
            .iter()
            .map(|(source, target)| (source.to_string(), target.to_string()))
            .collect();

        Self {
            languages: HashMap::from([("en".to_string(), en)]),
        }
    }

    /// 在内置词典之上合并额外词条，同名词条以额外词条为准
    pub fn with_extra(extra: &HashMap<String, HashMap<String, String>>) -> Self {
        let mut dictionary = Self::builtin();
        for (lang, terms) in extra {
            let table = dictionary.languages.entry(lang.clone()).or_default();
            for (source, target) in terms {
                table.insert(source.clone(), target.clone());
            }
        }
        dictionary
    }

    /// 查找译文
    pub fn lookup(&self, text: &str, target_lang: &str) -> Option<&str> {
        self.languages
            .get(target_lang)
            .and_then(|terms| terms.get(text))
            .map(String::as_str)
    }

    /// 词条总数
    pub fn len(&self) -> usize {
        self.languages.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let dictionary = FallbackDictionary::builtin();

        assert_eq!(
            dictionary.lookup("Pizza Margherita", "en"),
            Some("Pizza Margherita")
        );
        assert_eq!(dictionary.lookup("Antipasti", "en"), Some("Appetizers"));
        assert_eq!(dictionary.lookup("formaggio", "en"), Some("cheese"));
        assert_eq!(dictionary.lookup("Antipasti", "de"), None);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dictionary = FallbackDictionary::builtin();

        assert_eq!(dictionary.lookup("Formaggio", "en"), None);
        assert_eq!(dictionary.lookup("antipasti", "en"), None);
        assert_eq!(dictionary.lookup("Antipasti", "de"), None);
    }

    #[test]
    fn test_extra_terms_override_builtin() {
        let extra = HashMap::from([
            (
                "en".to_string(),
                HashMap::from([
                    ("Tiramisù".to_string(), "Tiramisu".to_string()),
                    ("Dolci".to_string(), "Sweets".to_string()),
                ]),
            ),
            (
                "de".to_string(),
                HashMap::from([("pane".to_string(), "Brot".to_string())]),
            ),
        ]);

        let dictionary = FallbackDictionary::with_extra(&extra);

        assert_eq!(dictionary.lookup("Tiramisù", "en"), Some("Tiramisu"));
        assert_eq!(dictionary.lookup("Dolci", "en"), Some("Sweets"));
        assert_eq!(dictionary.lookup("pane", "de"), Some("Brot"));
        assert_eq!(dictionary.len(), BUILTIN_EN.len() + 2);
    }
}
