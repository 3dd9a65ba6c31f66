/// Client hints extracted from `Sec-CH-UA-*` request headers.
///
/// Every field is optional: a header that is absent, or that carries a
/// malformed structured-field value, simply leaves its field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientHints {
    /// CPU architecture from `Sec-CH-UA-Arch` (e.g. `"x86"`, `"arm"`).
    pub architecture: Option<String>,
    /// Architecture bitness from `Sec-CH-UA-Bitness` (e.g. `"64"`).
    pub bitness: Option<String>,
    /// Full browser version from `Sec-CH-UA-Full-Version`.
    pub full_version: Option<String>,
    /// Mobile flag from `Sec-CH-UA-Mobile` (`?1` → true).
    pub mobile: Option<bool>,
    /// Device model from `Sec-CH-UA-Model`.
    pub model: Option<String>,
    /// Platform name from `Sec-CH-UA-Platform` (e.g. `"Windows"`, `"macOS"`).
    pub platform: Option<String>,
    /// Platform version from `Sec-CH-UA-Platform-Version`.
    pub platform_version: Option<String>,
    /// Windows-on-Windows64 flag from `Sec-CH-UA-WoW64`.
    pub wow64: Option<bool>,
}
