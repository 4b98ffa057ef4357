use super::{DictSource, DictSourceError};

/// Word list, one `word[<TAB>frequency]` per line. Words are their own keys;
/// among words sharing a key, higher frequencies are pushed first. A missing
/// frequency counts as zero.
pub struct TsvSource;

impl DictSource for TsvSource {
    fn parse(&self, content: &str) -> Result<Vec<(String, String)>, DictSourceError> {
        let mut words: Vec<(String, u32)> = Vec::new();
        for (i, raw) in content.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let word = fields.next().unwrap_or_default().trim();
            if word.is_empty() {
                return Err(DictSourceError::Parse {
                    line: i + 1,
                    reason: "empty word".to_string(),
                });
            }
            let frequency = match fields.next().map(str::trim) {
                None | Some("") => 0,
                Some(f) => f.parse().map_err(|_| DictSourceError::Parse {
                    line: i + 1,
                    reason: format!("invalid frequency {f:?}"),
                })?,
            };
            words.push((word.to_string(), frequency));
        }
        words.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(words
            .into_iter()
            .map(|(w, _)| (w.clone(), w))
            .collect())
    }
}
