use serde::Deserialize;

/// `/setValue` parameters; the attribute is only stored when both are non-empty.
#[derive(Debug, Default, Deserialize)]
pub struct SetValueParams {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl SetValueParams {
    pub fn attribute(&self) -> Option<(&str, &str)> {
        let key = self.key.as_deref().filter(|k| !k.is_empty())?;
        let value = self.value.as_deref().filter(|v| !v.is_empty())?;
        Some((key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(key: Option<&str>, value: Option<&str>) -> SetValueParams {
        SetValueParams {
            key: key.map(str::to_string),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn attribute_requires_both_parts() {
        assert_eq!(params(Some("k"), Some("v")).attribute(), Some(("k", "v")));
        assert_eq!(params(Some("k"), None).attribute(), None);
        assert_eq!(params(None, Some("v")).attribute(), None);
        assert_eq!(params(Some(""), Some("v")).attribute(), None);
        assert_eq!(params(Some("k"), Some("")).attribute(), None);
    }
}
