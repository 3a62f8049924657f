//! Azure Translator v3 wire format

use crate::error::{TranslatorError, TranslatorResult};
use crate::types::{TextType, TranslateOptions};
use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = "3.0";

/// One chunk of texts bound for every target language
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub texts: Vec<String>,
    pub targets: Vec<String>,
    pub source: Option<String>,
    pub text_type: TextType,
    pub category: Option<String>,
}

/// Body element: `{"Text": "..."}`
#[derive(Debug, Serialize)]
pub struct TextItem<'a> {
    #[serde(rename = "Text")]
    pub text: &'a str,
}

impl BatchRequest {
    pub fn new(texts: Vec<String>, targets: &[String], options: &TranslateOptions) -> Self {
        Self {
            texts,
            targets: targets.to_vec(),
            source: options.source_language().map(str::to_string),
            text_type: options.text_type,
            category: options.category_id().map(str::to_string),
        }
    }

    /// Query string pairs; `to` repeats once per target
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("api-version", API_VERSION.to_string()),
            ("textType", self.text_type.as_str().to_string()),
        ];
        if let Some(source) = &self.source {
            params.push(("from", source.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        params.extend(self.targets.iter().map(|t| ("to", t.clone())));
        params
    }

    pub fn body(&self) -> Vec<TextItem<'_>> {
        self.texts.iter().map(|t| TextItem { text: t }).collect()
    }
}

/// Result for one submitted text
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TranslationItem {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub text: String,
}

/// Parse a 200 response body
pub fn parse_response(body: &str) -> TranslatorResult<Vec<TranslationItem>> {
    serde_json::from_str(body).map_err(|e| TranslatorError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(options: &TranslateOptions) -> BatchRequest {
        BatchRequest::new(
            vec!["Hello".to_string(), "".to_string()],
            &["ja".to_string(), "en".to_string()],
            options,
        )
    }

    #[test]
    fn test_query_params_auto_source() {
        let opts = TranslateOptions::new(["ja", "en"]).with_source("auto");
        let params = request(&opts).query_params();
        assert_eq!(
            params,
            vec![
                ("api-version", "3.0".to_string()),
                ("textType", "plain".to_string()),
                ("to", "ja".to_string()),
                ("to", "en".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_params_with_source_and_category() {
        let opts = TranslateOptions::new(["ja"])
            .with_source("zh-Hant")
            .with_category("cat-123")
            .with_text_type(TextType::Html);
        let params = request(&opts).query_params();
        assert!(params.contains(&("from", "zh-Hant".to_string())));
        assert!(params.contains(&("category", "cat-123".to_string())));
        assert!(params.contains(&("textType", "html".to_string())));
    }

    #[test]
    fn test_body_serialization() {
        let opts = TranslateOptions::new(["ja"]);
        let json = serde_json::to_string(&request(&opts).body()).unwrap();
        assert_eq!(json, r#"[{"Text":"Hello"},{"Text":""}]"#);
    }

    #[test]
    fn test_parse_response() {
        let body = r#"[
            {"detectedLanguage": {"language": "en", "score": 1.0},
             "translations": [{"text": "こんにちは", "to": "ja"}, {"text": "Hello", "to": "en"}]},
            {}
        ]"#;
        let items = parse_response(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].translations[0].to, "ja");
        assert_eq!(items[0].translations[0].text, "こんにちは");
        assert!(items[1].translations.is_empty());
    }

    #[test]
    fn test_parse_malformed_response() {
        let result = parse_response(r#"{"error": "nope"}"#);
        assert!(matches!(result, Err(TranslatorError::MalformedResponse(_))));
    }
}
