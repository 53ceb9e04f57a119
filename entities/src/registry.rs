//! Route-key to endpoint mapping for every entity type the table hosts.
//!
//! SYSTEM CONTEXT
//! ==============
//! The marketplace backend does not expose a uniform REST shape: users are
//! deleted at `/api/users/delete/{id}` while hotels use `/api/hotels/{id}`.
//! The first path segment of the current page (the route key) selects an
//! [`EntityRoutes`] entry here. Unknown keys resolve to the generic
//! `/api/{key}/{id}` shape, and [`EndpointRegistry::validate`] lets hosts
//! refuse to start when a key they mount would silently hit that fallback.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::record::{Record, RecordId};

const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("route key must be a single non-empty path segment: {0:?}")]
    InvalidKey(String),
    #[error("route key `{0}` is already registered")]
    DuplicateKey(String),
    #[error("template for `{key}` must start with `/` and contain {{id}}: {template}")]
    InvalidTemplate { key: String, template: String },
    #[error("route keys fall through to the generic endpoint: {}", .0.join(", "))]
    Unregistered(Vec<String>),
    #[error("record id {0:?} cannot be used as a path segment")]
    UnsafeId(String),
}

/// What the view action does for an entity type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewRoute {
    /// Navigate to a profile page that loads the record from `fetch` itself.
    Profile { page: String, fetch: String },
    /// Fetch the record from `fetch`, then show it on `page`.
    Detail { page: String, fetch: String },
    /// No dedicated view; open the edit form pre-populated with the row.
    EditForm,
    /// No view action.
    None,
}

/// Endpoint and page templates for one entity type. `{id}` is replaced with
/// the row identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRoutes {
    pub key: String,
    pub label: String,
    pub list: String,
    pub delete: String,
    pub view: ViewRoute,
    pub edit_page: String,
}

impl EntityRoutes {
    /// Generic routes used for keys nobody registered.
    #[must_use]
    pub fn fallback(key: &str) -> Self {
        Self {
            key: key.to_owned(),
            label: key.to_owned(),
            list: format!("/api/{key}"),
            delete: format!("/api/{key}/{ID_PLACEHOLDER}"),
            view: ViewRoute::None,
            edit_page: format!("/{key}/{ID_PLACEHOLDER}/edit"),
        }
    }

    /// Backend path that deletes `id`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnsafeId`] when `id` is empty or a dot segment.
    pub fn delete_path(&self, id: &RecordId) -> Result<String, RegistryError> {
        expand(&self.delete, id)
    }

    /// Backend path for the record detail, when the type has one.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnsafeId`] when `id` is empty or a dot segment.
    pub fn view_fetch_path(&self, id: &RecordId) -> Result<Option<String>, RegistryError> {
        match &self.view {
            ViewRoute::Profile { fetch, .. } | ViewRoute::Detail { fetch, .. } => expand(fetch, id).map(Some),
            ViewRoute::EditForm | ViewRoute::None => Ok(None),
        }
    }

    #[must_use]
    pub fn view_navigation(&self, record: &Record) -> Navigation {
        let id = record.id();
        let target = match &self.view {
            ViewRoute::Profile { page, .. } => expand(page, id).map(Navigation::Page),
            ViewRoute::Detail { page, fetch } => match (expand(fetch, id), expand(page, id)) {
                (Ok(api_path), Ok(page)) => Ok(Navigation::FetchDetail { api_path, page }),
                (Err(err), _) | (_, Err(err)) => Err(err),
            },
            ViewRoute::EditForm => return self.edit_navigation(record),
            ViewRoute::None => Ok(Navigation::Unavailable),
        };
        target.unwrap_or_else(Navigation::Invalid)
    }

    #[must_use]
    pub fn edit_navigation(&self, record: &Record) -> Navigation {
        match expand(&self.edit_page, record.id()) {
            Ok(page) => Navigation::EditForm { page, record: record.clone() },
            Err(err) => Navigation::Invalid(err),
        }
    }

    fn validate_templates(&self) -> Result<(), RegistryError> {
        let mut templates = vec![self.delete.as_str(), self.edit_page.as_str()];
        if let ViewRoute::Profile { page, fetch } | ViewRoute::Detail { page, fetch } = &self.view {
            templates.push(page);
            templates.push(fetch);
        }
        for template in templates {
            if !template.starts_with('/') || !template.contains(ID_PLACEHOLDER) {
                return Err(RegistryError::InvalidTemplate { key: self.key.clone(), template: template.to_owned() });
            }
        }
        if !self.list.starts_with('/') || self.list.contains(ID_PLACEHOLDER) {
            return Err(RegistryError::InvalidTemplate { key: self.key.clone(), template: self.list.clone() });
        }
        Ok(())
    }
}

/// Where a view or edit action sends the user.
#[derive(Clone, Debug, PartialEq)]
pub enum Navigation {
    /// Client-side route change.
    Page(String),
    /// Load `api_path` and present the result on `page`.
    FetchDetail { api_path: String, page: String },
    /// Edit form at `page`, seeded with `record`.
    EditForm { page: String, record: Record },
    Unavailable,
    /// The row id cannot be placed in a path.
    Invalid(RegistryError),
}

/// Lookup table from route key to [`EntityRoutes`].
#[derive(Clone, Debug, Default)]
pub struct EndpointRegistry {
    routes: BTreeMap<String, EntityRoutes>,
}

impl EndpointRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Routes for every entity type the marketplace admin mounts.
    #[must_use]
    pub fn marketplace() -> Self {
        let mut registry = Self::empty();
        for routes in marketplace_routes() {
            registry.routes.insert(routes.key.clone(), routes);
        }
        registry
    }

    /// Add an entity type.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] for malformed keys or templates, or when
    /// the key is already registered.
    pub fn register(&mut self, routes: EntityRoutes) -> Result<(), RegistryError> {
        if routes.key.is_empty() || routes.key.contains('/') {
            return Err(RegistryError::InvalidKey(routes.key));
        }
        routes.validate_templates()?;
        if self.routes.contains_key(&routes.key) {
            return Err(RegistryError::DuplicateKey(routes.key));
        }
        self.routes.insert(routes.key.clone(), routes);
        Ok(())
    }

    /// Check that every key the host routes through the table is explicit.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unregistered`] listing keys that would use
    /// the generic fallback.
    pub fn validate<'a>(&self, hosted_keys: impl IntoIterator<Item = &'a str>) -> Result<(), RegistryError> {
        let missing = hosted_keys
            .into_iter()
            .filter(|key| !self.routes.contains_key(*key))
            .map(str::to_owned)
            .collect::<Vec<_>>();
        if missing.is_empty() { Ok(()) } else { Err(RegistryError::Unregistered(missing)) }
    }

    #[must_use]
    pub fn is_registered(&self, key: &str) -> bool {
        self.routes.contains_key(key)
    }

    /// Routes for `key`, or the generic fallback.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Cow<'_, EntityRoutes> {
        match self.routes.get(key) {
            Some(routes) => Cow::Borrowed(routes),
            None => Cow::Owned(EntityRoutes::fallback(key)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityRoutes> {
        self.routes.values()
    }
}

/// First path segment of a client route, ignoring query and fragment.
#[must_use]
pub fn route_key_from_path(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').find(|segment| !segment.is_empty())
}

/// Substitute `{id}` in `template` with a percent-encoded rendering of `id`.
///
/// Everything outside the URL unreserved set is escaped, so `/` and `\`
/// cannot open a new segment. Ids that are empty or `.`/`..` are refused:
/// URL parsers collapse those segments even when percent-encoded.
///
/// # Errors
///
/// [`RegistryError::UnsafeId`] for empty and dot-segment ids.
pub fn expand(template: &str, id: &RecordId) -> Result<String, RegistryError> {
    let raw = id.to_string();
    if matches!(raw.as_str(), "" | "." | "..") {
        return Err(RegistryError::UnsafeId(raw));
    }
    Ok(template.replace(ID_PLACEHOLDER, &urlencoding::encode(&raw)))
}

fn marketplace_routes() -> Vec<EntityRoutes> {
    vec![
        EntityRoutes {
            key: "users".into(),
            label: "Users".into(),
            list: "/api/users/all".into(),
            delete: "/api/users/delete/{id}".into(),
            view: ViewRoute::Profile { page: "/profile/{id}".into(), fetch: "/api/users/all/{id}".into() },
            edit_page: "/users/{id}/edit".into(),
        },
        EntityRoutes {
            key: "hotels".into(),
            label: "Hotels".into(),
            list: "/api/hotels".into(),
            delete: "/api/hotels/{id}".into(),
            view: ViewRoute::Detail { page: "/hotels/{id}".into(), fetch: "/api/hotels/find/{id}".into() },
            edit_page: "/hotels/{id}/edit".into(),
        },
        EntityRoutes {
            key: "tours".into(),
            label: "Tours".into(),
            list: "/api/tours".into(),
            delete: "/api/tours/{id}".into(),
            view: ViewRoute::Detail { page: "/tours/{id}".into(), fetch: "/api/tours/{id}".into() },
            edit_page: "/tours/{id}/edit".into(),
        },
        EntityRoutes {
            key: "vehicle".into(),
            label: "Vehicles".into(),
            list: "/api/vehicle".into(),
            delete: "/api/vehicle/{id}".into(),
            view: ViewRoute::Detail { page: "/vehicle/{id}".into(), fetch: "/api/vehicle/{id}".into() },
            edit_page: "/vehicle/{id}/edit".into(),
        },
        EntityRoutes {
            key: "restaurant".into(),
            label: "Restaurants".into(),
            list: "/api/restaurant".into(),
            delete: "/api/restaurant/{id}".into(),
            view: ViewRoute::EditForm,
            edit_page: "/restaurant/{id}/edit".into(),
        },
    ]
}
