//! Raw invocation tokens, recognized tool options and the argument filter.

use crate::endpoint::Endpoint;

/// Flags consumed by bowline itself and never forwarded to the package
/// manager. Matching is exact token equality; `--web-url=x` style tokens are
/// not reserved and pass through untouched.
pub const RESERVED_FLAGS: [&str; 4] = ["--catalog", "-C", "--web-url", "--require-confs"];

/// Tool-internal options parsed out of the raw token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// `--catalog` / `-C`: submit the generated component model to the portal.
    pub catalog: bool,
    /// `--web-url <string>`: overrides the web base path of the generated
    /// loader paths.
    pub web_url: Option<String>,
    /// `--require-confs <paths>`: comma separated list of existing loader
    /// configs to merge, in order.
    pub require_confs: Option<String>,
}

impl InstallOptions {
    /// Paths from `--require-confs`, split on commas, order preserved.
    pub fn require_conf_paths(&self) -> Vec<String> {
        self.require_confs
            .as_deref()
            .map(|raw| raw.split(',').map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// The raw ordered token sequence of one `install` invocation plus the
/// options and endpoint parsed from it. Immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    tokens: Vec<String>,
    options: InstallOptions,
    endpoint: Option<Endpoint>,
}

impl InvocationContext {
    /// Parse the token sequence as received after the `install` subcommand.
    ///
    /// The endpoint is the first token that is neither flag-shaped nor
    /// consumed as the value of a recognized option. Recognized options are
    /// read in their two-token form (`--web-url value`); anything else is
    /// left for the package manager to interpret.
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let mut options = InstallOptions::default();
        let mut endpoint = None;

        let mut iter = tokens.iter();
        while let Some(token) = iter.next() {
            match token.as_str() {
                "--catalog" | "-C" => options.catalog = true,
                "--web-url" => {
                    if let Some(value) = iter.next() {
                        options.web_url = Some(value.clone());
                    }
                }
                "--require-confs" => {
                    if let Some(value) = iter.next() {
                        options.require_confs = Some(value.clone());
                    }
                }
                other => {
                    if endpoint.is_none() && !other.starts_with('-') {
                        endpoint = Some(Endpoint::classify(other));
                    }
                }
            }
        }

        Self {
            tokens,
            options,
            endpoint,
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn options(&self) -> &InstallOptions {
        &self.options
    }

    /// The primary install endpoint, when one was named.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    /// Whether the raw token list carries the catalog flag.
    ///
    /// Read by exact token match, independent of the argument filter: the
    /// flag is excluded from pass-through but still gates submission.
    pub fn catalog_requested(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| t == "--catalog" || t == "-C")
    }

    /// The ordered subsequence of tokens forwarded to the package manager.
    ///
    /// Drops every token exactly equal to a reserved flag name and nothing
    /// else. Values of reserved flags are forwarded unchanged; this filter
    /// does not validate that reserved flags are well formed.
    pub fn forwarded_args(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| !RESERVED_FLAGS.contains(&t.as_str()))
            .cloned()
            .collect()
    }
}
