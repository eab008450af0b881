use serde::Deserialize;
use serde_json::Value;

use super::error::LookupError;

/// One pronunciation symbol as returned in `baesInfo.symbols`.
#[derive(Debug, Deserialize)]
struct Symbol {
    #[serde(default)]
    ph_en: Option<String>,
    #[serde(default)]
    ph_am: Option<String>,
    parts: Vec<PartMeans>,
}

#[derive(Debug, Deserialize)]
struct PartMeans {
    part: String,
    means: Vec<String>,
}

/// A single (symbol, part of speech) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub part: String,
    pub ph_en: String,
    pub ph_am: String,
    pub means: Vec<String>,
}

impl Definition {
    pub fn label(&self) -> String {
        format!("{}  Eng. [{}] Amr. [{}]", self.part, self.ph_en, self.ph_am)
    }

    pub fn description(&self) -> String {
        self.means.join("; ")
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum WordMeans {
    Found(Vec<Definition>),
    /// `errno` was zero but the payload carried no `symbols` list.
    NoSymbols,
}

fn errno(json: &Value) -> Option<i64> {
    match json.get("errno")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a `getWordMean` response body.
pub fn parse_word_means(body: &str) -> Result<WordMeans, LookupError> {
    let json: Value = serde_json::from_str(body)?;

    let Some(code) = errno(&json) else {
        return Err(LookupError::Mapping("response has no numeric `errno`".into()));
    };
    if code != 0 {
        let message = json
            .get("errmsg")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("Error")
            .to_string();
        return Err(LookupError::Api { code, message });
    }

    let symbols = match json.get("baesInfo").and_then(|b| b.get("symbols")) {
        Some(Value::Null) | None => {
            tracing::info!(payload = %json, "response has no symbols");
            return Ok(WordMeans::NoSymbols);
        }
        Some(s) => s.clone(),
    };

    let symbols: Vec<Symbol> = serde_json::from_value(symbols)
        .map_err(|e| LookupError::Mapping(e.to_string()))?;

    let definitions = symbols
        .into_iter()
        .flat_map(|symbol| {
            let Symbol { ph_en, ph_am, parts } = symbol;
            let ph_en = ph_en.unwrap_or_default();
            let ph_am = ph_am.unwrap_or_default();
            parts.into_iter().map(move |p| Definition {
                part: p.part,
                ph_en: ph_en.clone(),
                ph_am: ph_am.clone(),
                means: p.means,
            })
        })
        .collect();
    Ok(WordMeans::Found(definitions))
}
