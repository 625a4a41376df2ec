use crate::error::Error;
use crate::registry::StatusRegistry;
use crate::status;
use std::collections::{BTreeMap, HashMap};

/// Configuration for a [`StatusRegistry`]
///
/// By default this describes the same registry as [`StatusRegistry::new`].
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    codes: BTreeMap<u16, String>,
    strict_numbers: bool,
    validate: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            codes: status::CODES
                .iter()
                .map(|&(code, phrase)| (code, phrase.to_string()))
                .collect(),
            strict_numbers: false,
            validate: false,
        }
    }
}

impl RegistryConfig {
    /// Creates a configuration using the built-in status code table
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the status code table entirely
    pub fn codes<I, S>(mut self, table: I) -> Self
    where
        I: IntoIterator<Item = (u16, S)>,
        S: Into<String>,
    {
        self.codes = table
            .into_iter()
            .map(|(code, phrase)| (code, phrase.into()))
            .collect();
        self
    }

    /// Adds a status code to the table, replacing its reason phrase if it is already known
    ///
    /// ```
    /// use statuses::{RegistryConfig, Resolved};
    ///
    /// let registry = RegistryConfig::new()
    ///     .with_code(599, "Network Connect Timeout Error")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     registry.resolve(599).unwrap(),
    ///     Resolved::Message("Network Connect Timeout Error")
    /// );
    /// ```
    pub fn with_code(mut self, code: u16, phrase: impl Into<String>) -> Self {
        let phrase = phrase.into();
        if let Some(previous) = self.codes.insert(code, phrase) {
            log::debug!(code = code; "Replaced reason phrase {previous:?}");
        }
        self
    }

    /// Only treat strings as status codes if they consist entirely of an integer
    ///
    /// By default, any string that starts with an integer is a status code, so `"404abc"`
    /// resolves to "Not Found". With strict numbers it is looked up as a reason phrase instead,
    /// and fails.
    pub fn strict_numbers(mut self, strict: bool) -> Self {
        self.strict_numbers = strict;
        self
    }

    /// Check the status code table for empty or duplicate reason phrases when building
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Builds the registry
    ///
    /// # Errors
    ///
    /// Only fails if [validation](RegistryConfig::validate) is enabled: returns
    /// [`Error::EmptyReasonPhrase`] or [`Error::DuplicateReasonPhrase`] for the first offending
    /// code.
    pub fn build(self) -> Result<StatusRegistry, Error> {
        if self.validate {
            validate_table(&self.codes)?;
        }

        Ok(StatusRegistry::assemble(self.codes, self.strict_numbers))
    }
}

fn validate_table(codes: &BTreeMap<u16, String>) -> Result<(), Error> {
    let mut seen: HashMap<String, u16> = HashMap::with_capacity(codes.len());

    for (&code, phrase) in codes.iter() {
        if phrase.trim().is_empty() {
            return Err(Error::EmptyReasonPhrase(code));
        }

        if let Some(&first) = seen.get(&phrase.to_lowercase()) {
            return Err(Error::DuplicateReasonPhrase {
                phrase: phrase.clone(),
                first,
                second: code,
            });
        }

        seen.insert(phrase.to_lowercase(), code);
    }

    Ok(())
}
