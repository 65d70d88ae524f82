//! Container configuration.
//!
//! Options are fixed when a container is created. With the `config`
//! feature they can be loaded from JSON alongside the rest of an
//! application's settings.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::lifetime::Lifetime;
#[cfg(feature = "config")]
use crate::error::{DiError, DiResult};

/// Default maximum nesting of in-progress resolutions per thread.
///
/// Low enough that an unchecked cycle reports `DepthExceeded` well before
/// it exhausts a 2 MiB thread stack in a debug build.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options controlling resolution behavior of a [`Container`](crate::Container).
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, ContainerOptions, Lifetime, Resolver};
///
/// let options = ContainerOptions {
///     default_lifetime: Lifetime::Transient,
///     ..ContainerOptions::default()
/// };
/// let container = Container::with_options(options);
/// container.add_factory(|| String::from("fresh"));
///
/// let a = container.resolve::<String>().unwrap();
/// let b = container.resolve::<String>().unwrap();
/// assert!(!std::sync::Arc::ptr_eq(&a, &b));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    /// Maximum depth of nested resolutions before `DepthExceeded` is reported
    pub max_depth: usize,
    /// Report `Circular` when a container re-enters a key it is already producing
    pub detect_cycles: bool,
    /// Lifetime used by `add_class` / `add_factory`
    pub default_lifetime: Lifetime,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            detect_cycles: true,
            default_lifetime: Lifetime::Singleton,
        }
    }
}

#[cfg(feature = "config")]
impl ContainerOptions {
    /// Parses options from JSON; missing fields keep their defaults.
    ///
    /// ```rust
    /// use ferrous_inject::{ContainerOptions, Lifetime};
    ///
    /// let options = ContainerOptions::from_json(r#"{ "default_lifetime": "transient" }"#).unwrap();
    /// assert_eq!(options.default_lifetime, Lifetime::Transient);
    /// assert_eq!(options.max_depth, 128);
    /// ```
    pub fn from_json(json: &str) -> DiResult<Self> {
        serde_json::from_str(json).map_err(|e| DiError::Config(e.to_string()))
    }

    /// Serializes the options to JSON.
    pub fn to_json(&self) -> DiResult<String> {
        serde_json::to_string(self).map_err(|e| DiError::Config(e.to_string()))
    }
}
