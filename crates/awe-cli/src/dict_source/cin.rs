use super::{DictSource, DictSourceError};

/// `.cin` input-method table: `%chardef begin` / `%chardef end` delimit
/// `key word` lines. Other `%` sections and `#` comments are skipped.
pub struct CinSource;

impl DictSource for CinSource {
    fn parse(&self, content: &str) -> Result<Vec<(String, String)>, DictSourceError> {
        let mut pairs = Vec::new();
        let mut in_chardef = false;
        let mut saw_chardef = false;

        for (i, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(directive) = line.strip_prefix('%') {
                let mut parts = directive.split_whitespace();
                if parts.next() == Some("chardef") {
                    match parts.next() {
                        Some("begin") => {
                            in_chardef = true;
                            saw_chardef = true;
                        }
                        Some("end") => in_chardef = false,
                        _ => {
                            return Err(DictSourceError::Parse {
                                line: i + 1,
                                reason: "expected %chardef begin or end".to_string(),
                            })
                        }
                    }
                }
                continue;
            }
            if !in_chardef {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(key), Some(word)) = (fields.next(), fields.next()) else {
                return Err(DictSourceError::Parse {
                    line: i + 1,
                    reason: format!("expected `key word`, got {line:?}"),
                });
            };
            pairs.push((key.to_string(), word.to_string()));
        }

        if in_chardef {
            return Err(DictSourceError::Parse {
                line: content.lines().count(),
                reason: "unterminated %chardef section".to_string(),
            });
        }
        if !saw_chardef {
            return Err(DictSourceError::Parse {
                line: 0,
                reason: "no %chardef section".to_string(),
            });
        }
        Ok(pairs)
    }
}
