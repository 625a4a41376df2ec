use crate::classify;
use crate::error::Error;
use crate::query::{self, Query, Resolved};
use crate::status;
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Bidirectional lookup between status codes and reason phrases
///
/// All lookup structures are derived once, when the registry is built, and never change
/// afterwards. A registry can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct StatusRegistry {
    messages: BTreeMap<u16, String>,
    index: HashMap<String, u16>,
    codes: Vec<u16>,
    redirect: BTreeSet<u16>,
    empty_body: BTreeSet<u16>,
    retry: BTreeSet<u16>,
    strict_numbers: bool,
}

impl Default for StatusRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusRegistry {
    /// Builds a registry from the built-in [status code table](crate::status::CODES)
    pub fn new() -> Self {
        Self::build(status::CODES.iter().copied())
    }

    /// Builds a registry from a custom table of codes and reason phrases
    ///
    /// The table is trusted as-is: empty phrases are kept, and when two codes share a phrase the
    /// phrase resolves to the higher code. Use
    /// [`RegistryConfig::validate`](crate::RegistryConfig::validate) to reject such tables
    /// instead.
    pub fn build<I, S>(table: I) -> Self
    where
        I: IntoIterator<Item = (u16, S)>,
        S: Into<String>,
    {
        Self::assemble(table, false)
    }

    pub(crate) fn assemble<I, S>(table: I, strict_numbers: bool) -> Self
    where
        I: IntoIterator<Item = (u16, S)>,
        S: Into<String>,
    {
        let messages: BTreeMap<u16, String> = table
            .into_iter()
            .map(|(code, phrase)| (code, phrase.into()))
            .collect();

        let mut index = HashMap::with_capacity(messages.len());

        for (&code, phrase) in messages.iter() {
            if let Some(shadowed) = index.insert(phrase.to_lowercase(), code) {
                log::warn!(
                    code = code,
                    shadowed = shadowed;
                    "Reason phrase {phrase:?} is used by more than one status code"
                );
            }
        }

        let codes = messages.keys().copied().collect();

        let registry = Self {
            messages,
            index,
            codes,
            redirect: classify::REDIRECT_CODES.iter().copied().collect(),
            empty_body: classify::EMPTY_BODY_CODES.iter().copied().collect(),
            retry: classify::RETRY_CODES.iter().copied().collect(),
            strict_numbers,
        };

        log::debug!(
            codes = registry.len(),
            strict_numbers = strict_numbers;
            "Built status registry"
        );

        registry
    }

    /// Resolves a status code to its reason phrase, or a reason phrase to its code
    ///
    /// - A number is looked up as a code. Floats only match if they have no fractional part.
    /// - A string that starts with a number (e.g. `"404"`, or even `"404 Not Found"`) is looked
    ///   up as a code.
    /// - Any other string is looked up as a reason phrase, ignoring case.
    ///
    /// ```
    /// use statuses::{Resolved, StatusRegistry};
    ///
    /// let registry = StatusRegistry::new();
    ///
    /// assert_eq!(registry.resolve(404).unwrap(), Resolved::Message("Not Found"));
    /// assert_eq!(registry.resolve("404").unwrap(), Resolved::Message("Not Found"));
    /// assert_eq!(registry.resolve("not found").unwrap(), Resolved::Code(404));
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::UnknownStatusCode`] if the number is not a known code, and
    /// [`Error::UnknownStatusMessage`] if the string is not a known reason phrase.
    pub fn resolve<'q>(&self, query: impl Into<Query<'q>>) -> Result<Resolved<'_>, Error> {
        match query.into() {
            Query::Code(code) => self.lookup_code(code).map(Resolved::Message),
            Query::Float(number) => {
                let code = if number.fract() == 0.0 {
                    // Saturates, and no code is near the `i64` bounds
                    number as i64
                } else {
                    -1
                };

                self.lookup(code, || number.to_string())
                    .map(Resolved::Message)
            }
            Query::Text(text) => {
                let number = if self.strict_numbers {
                    query::whole_int(text)
                } else {
                    query::leading_int(text)
                };

                match number {
                    Some(int) => self
                        .lookup(int.value(), || int.to_string())
                        .map(Resolved::Message),
                    None => self.code_for(text).map(Resolved::Code),
                }
            }
        }
    }

    /// Like [`resolve`](StatusRegistry::resolve), for values whose type is only known at runtime
    ///
    /// # Errors
    ///
    /// In addition to the errors of `resolve`, returns [`Error::InvalidArgumentType`] if `value`
    /// is neither a number nor a string.
    pub fn resolve_any(&self, value: &dyn Any) -> Result<Resolved<'_>, Error> {
        self.resolve(Query::from_any(value)?)
    }

    /// Returns the code of a reason phrase. The comparison ignores case.
    pub fn code_for(&self, message: &str) -> Result<u16, Error> {
        self.index
            .get(&message.to_lowercase())
            .copied()
            .ok_or_else(|| Error::UnknownStatusMessage(message.to_string()))
    }

    /// Returns the reason phrase of a code
    pub fn message_for(&self, code: u16) -> Result<&str, Error> {
        self.lookup_code(i64::from(code))
    }

    fn lookup_code(&self, code: i64) -> Result<&str, Error> {
        self.lookup(code, || code.to_string())
    }

    // `written` is how the caller wrote the number, for the error
    fn lookup<F>(&self, code: i64, written: F) -> Result<&str, Error>
    where
        F: FnOnce() -> String,
    {
        u16::try_from(code)
            .ok()
            .and_then(|c| self.messages.get(&c))
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownStatusCode(written()))
    }

    /// Returns every known code, in ascending order
    pub fn all_codes(&self) -> &[u16] {
        &self.codes
    }

    /// Iterates over every known code and its reason phrase, in ascending order of code
    pub fn messages(&self) -> impl Iterator<Item = (u16, &str)> + '_ {
        self.messages
            .iter()
            .map(|(code, phrase)| (*code, phrase.as_str()))
    }

    pub fn contains_code(&self, code: u16) -> bool {
        self.messages.contains_key(&code)
    }

    pub fn contains_message(&self, message: &str) -> bool {
        self.index.contains_key(&message.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// See [`classify::is_redirect`]
    pub fn is_redirect(&self, code: u16) -> bool {
        self.redirect.contains(&code)
    }

    /// See [`classify::has_empty_body`]
    pub fn has_empty_body(&self, code: u16) -> bool {
        self.empty_body.contains(&code)
    }

    /// See [`classify::is_retryable`]
    pub fn is_retryable(&self, code: u16) -> bool {
        self.retry.contains(&code)
    }
}

#[cfg(test)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn registry() -> StatusRegistry {
        init_logger();
        StatusRegistry::new()
    }

    #[test]
    fn resolving_codes() {
        let registry = registry();
        assert_eq!(registry.resolve(404), Ok(Resolved::Message("Not Found")));
        assert_eq!(registry.resolve(200u16), Ok(Resolved::Message("OK")));
        assert_eq!(registry.resolve(status::TEAPOT), Ok(Resolved::Message("I'm a Teapot")));
    }

    #[test]
    fn resolving_numeric_strings() {
        let registry = registry();
        assert_eq!(registry.resolve("404"), Ok(Resolved::Message("Not Found")));
        assert_eq!(registry.resolve(" 503"), Ok(Resolved::Message("Service Unavailable")));
    }

    #[test]
    fn resolving_leading_numeric_prefix() {
        let registry = registry();
        assert_eq!(registry.resolve("404 Not Found"), Ok(Resolved::Message("Not Found")));
        assert_eq!(registry.resolve("404abc"), Ok(Resolved::Message("Not Found")));
        assert_eq!(
            registry.resolve("4.5"),
            Err(Error::UnknownStatusCode(String::from("4")))
        );
    }

    #[test]
    fn resolving_messages() {
        let registry = registry();
        assert_eq!(registry.resolve("Not Found"), Ok(Resolved::Code(404)));
        assert_eq!(registry.resolve("not found"), Ok(Resolved::Code(404)));
        assert_eq!(registry.resolve("NOT FOUND"), Ok(Resolved::Code(404)));
        assert_eq!(registry.resolve("i'm a teapot"), Ok(Resolved::Code(418)));
    }

    #[test]
    fn unknown_codes() {
        let registry = registry();
        assert_matches!(registry.resolve(999), Err(Error::UnknownStatusCode(c)) if c == "999");
        assert_matches!(registry.resolve(-1), Err(Error::UnknownStatusCode(c)) if c == "-1");
        assert_matches!(
            registry.resolve(65_936),
            Err(Error::UnknownStatusCode(c)) if c == "65936"
        );
        assert_matches!(registry.resolve("999"), Err(Error::UnknownStatusCode(c)) if c == "999");
        assert_matches!(registry.message_for(306), Err(Error::UnknownStatusCode(c)) if c == "306");

        let err = registry.resolve(999).unwrap_err();
        assert_eq!(err.to_string(), "invalid status code: 999");
    }

    #[test]
    fn unknown_codes_report_the_written_number() {
        let registry = registry();

        let err = registry.resolve("99999999999999999999 Overflow").unwrap_err();
        assert_eq!(err.to_string(), "invalid status code: 99999999999999999999");

        let err = registry.resolve("+0999").unwrap_err();
        assert_eq!(err.to_string(), "invalid status code: 999");
    }

    #[test]
    fn resolving_floats() {
        let registry = registry();
        assert_eq!(registry.resolve(404.0), Ok(Resolved::Message("Not Found")));
        assert_eq!(registry.resolve(200.0f32), Ok(Resolved::Message("OK")));
        assert_matches!(registry.resolve(1.5), Err(Error::UnknownStatusCode(c)) if c == "1.5");
        assert_matches!(
            registry.resolve(404.5),
            Err(Error::UnknownStatusCode(c)) if c == "404.5"
        );
        assert_matches!(registry.resolve(f64::NAN), Err(Error::UnknownStatusCode(c)) if c == "NaN");
        assert_matches!(registry.resolve(f64::INFINITY), Err(Error::UnknownStatusCode(_)));
        assert_matches!(registry.resolve(1e20), Err(Error::UnknownStatusCode(_)));

        let err = registry.resolve(1.5).unwrap_err();
        assert_eq!(err.to_string(), "invalid status code: 1.5");
    }

    #[test]
    fn unknown_messages() {
        let registry = registry();
        assert_matches!(
            registry.resolve("bogus phrase"),
            Err(Error::UnknownStatusMessage(m)) if m == "bogus phrase"
        );
        assert_matches!(registry.code_for(""), Err(Error::UnknownStatusMessage(_)));
        // Phrases must match exactly, not by prefix
        assert_matches!(registry.code_for("Not"), Err(Error::UnknownStatusMessage(_)));

        let err = registry.code_for("Bogus").unwrap_err();
        assert_eq!(err.to_string(), "invalid status message: \"Bogus\"");
    }

    #[test]
    fn resolving_dynamic_values() {
        let registry = registry();
        assert_eq!(registry.resolve_any(&404u16), Ok(Resolved::Message("Not Found")));
        assert_eq!(registry.resolve_any(&"Not Found"), Ok(Resolved::Code(404)));
        assert_eq!(
            registry.resolve_any(&String::from("404")),
            Ok(Resolved::Message("Not Found"))
        );
        assert_eq!(registry.resolve_any(&404.0f64), Ok(Resolved::Message("Not Found")));
        assert_matches!(
            registry.resolve_any(&1.5f64),
            Err(Error::UnknownStatusCode(c)) if c == "1.5"
        );
        assert_matches!(registry.resolve_any(&()), Err(Error::InvalidArgumentType));

        let err = registry.resolve_any(&true).unwrap_err();
        assert_eq!(err.to_string(), "code must be a number or string");
    }

    #[test]
    fn round_trips() {
        let registry = registry();

        for &code in registry.all_codes() {
            let message = registry.message_for(code).unwrap();

            assert_eq!(registry.resolve(message), Ok(Resolved::Code(code)));
            assert_eq!(registry.resolve(code), Ok(Resolved::Message(message)));
            assert_eq!(registry.resolve(&code.to_string()), Ok(Resolved::Message(message)));
            assert_eq!(registry.code_for(&message.to_uppercase()), Ok(code));
        }
    }

    #[test]
    fn all_codes_matches_table() {
        let registry = registry();
        let codes = registry.all_codes();

        assert_eq!(codes.len(), status::CODES.len());
        assert_eq!(registry.len(), status::CODES.len());

        let unique: BTreeSet<u16> = codes.iter().copied().collect();
        assert_eq!(unique.len(), codes.len());

        for (code, _) in status::CODES {
            assert!(unique.contains(code));
        }
    }

    #[test]
    fn messages_iterator() {
        let registry = registry();
        let pairs: Vec<(u16, &str)> = registry.messages().collect();
        assert_eq!(pairs.as_slice(), status::CODES);
    }

    #[test]
    fn membership() {
        let registry = registry();
        assert!(registry.contains_code(404));
        assert!(!registry.contains_code(999));
        assert!(registry.contains_message("gateway timeout"));
        assert!(!registry.contains_message("gateway time-out"));
        assert!(!registry.is_empty());
    }

    #[test]
    fn classification() {
        let registry = registry();
        assert!(registry.is_redirect(301));
        assert!(!registry.is_redirect(200));
        assert!(registry.has_empty_body(204));
        assert!(!registry.has_empty_body(200));
        assert!(registry.is_retryable(503));
        assert!(!registry.is_retryable(404));
        assert!(!registry.is_retryable(999));
    }

    #[test]
    fn classification_ignores_custom_tables() {
        let registry = StatusRegistry::build([(200, "OK")]);
        assert!(registry.is_redirect(301));
        assert!(!registry.contains_code(301));
    }

    #[test]
    fn custom_tables() {
        init_logger();
        let registry = StatusRegistry::build([(299, String::from("Fine")), (200, "OK".into())]);

        assert_eq!(registry.all_codes(), &[200, 299]);
        assert_eq!(registry.resolve("fine"), Ok(Resolved::Code(299)));
        assert_matches!(registry.resolve(404), Err(Error::UnknownStatusCode(_)));
    }

    #[test]
    fn duplicate_phrases_resolve_to_the_later_code() {
        init_logger();
        let registry = StatusRegistry::build([(201, "Same"), (202, "same")]);

        assert_eq!(registry.code_for("SAME"), Ok(202));
        assert_eq!(registry.message_for(201), Ok("Same"));
    }

    #[test]
    fn empty_tables() {
        let registry = StatusRegistry::build(Vec::<(u16, &str)>::new());
        assert!(registry.is_empty());
        assert!(registry.all_codes().is_empty());
        assert_matches!(registry.resolve("OK"), Err(Error::UnknownStatusMessage(_)));
    }

    #[test]
    fn registries_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StatusRegistry>();
    }
}
