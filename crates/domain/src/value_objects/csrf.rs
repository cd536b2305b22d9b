//! Where a page exposes its CSRF token

/// Name of the cookie Django sets the token in
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Name of the hidden form field carrying the token
pub const CSRF_FORM_FIELD: &str = "csrfmiddlewaretoken";

/// Header the vote endpoint reads the token from
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Token candidates scraped from the page.
///
/// Resolution order is the `csrf-token` meta tag, then the form field, then
/// the cookie. Blank values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrfSource {
    pub meta_token: Option<String>,
    pub form_token: Option<String>,
    pub cookie_header: Option<String>,
}

impl CsrfSource {
    pub fn from_meta(token: impl Into<String>) -> Self {
        Self {
            meta_token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn resolve(&self) -> Option<String> {
        non_blank(self.meta_token.as_deref())
            .or_else(|| non_blank(self.form_token.as_deref()))
            .or_else(|| {
                self.cookie_header
                    .as_deref()
                    .and_then(|header| cookie_value(header, CSRF_COOKIE_NAME))
                    .and_then(|v| non_blank(Some(v)))
            })
            .map(str::to_string)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Value of `name` in a `document.cookie` style header.
fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_tag_wins() {
        let source = CsrfSource {
            meta_token: Some("meta".into()),
            form_token: Some("form".into()),
            cookie_header: Some("csrftoken=cookie".into()),
        };
        assert_eq!(source.resolve().as_deref(), Some("meta"));
    }

    #[test]
    fn falls_back_to_form_field_then_cookie() {
        let source = CsrfSource {
            meta_token: Some("   ".into()),
            form_token: Some("form".into()),
            cookie_header: None,
        };
        assert_eq!(source.resolve().as_deref(), Some("form"));

        let source = CsrfSource {
            meta_token: None,
            form_token: Some(String::new()),
            cookie_header: Some("sessionid=abc; csrftoken=cookie; theme=dark".into()),
        };
        assert_eq!(source.resolve().as_deref(), Some("cookie"));
    }

    #[test]
    fn missing_everywhere_is_none() {
        assert_eq!(CsrfSource::default().resolve(), None);
        let source = CsrfSource {
            cookie_header: Some("sessionid=abc; csrftoken=".into()),
            ..CsrfSource::default()
        };
        assert_eq!(source.resolve(), None);
    }
}
