//! Role resolution: job title → role family → skill template.
//!
//! Titles are normalized ([`normalize_job_title`]) and mapped to a canonical
//! family slug ([`resolve_role_family`]). Templates come from a
//! [`RoleTemplateProvider`]; [`load_role_template`] wraps any provider so that
//! a usable template is always returned.

pub mod builtin;
pub mod phrase;

use std::collections::{BTreeSet, HashMap};
use std::future::Future;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use builtin::GENERIC_FAMILY;
pub use phrase::{Phrase, SkillPattern, match_skill_phrase};

/// Skills expected of a role family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RoleTemplate {
    /// Skills every candidate should show.
    pub must_have: Vec<String>,
    /// Bonus skills.
    pub nice_to_have: Vec<String>,
    /// Tools commonly used in the role. Reported, not scored.
    pub tools: Vec<String>,
}

/// Lowercase, drop everything but letters, digits and spaces, collapse runs of
/// whitespace.
pub fn normalize_job_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical family for a normalized title; `generic_professional` if unknown.
pub fn resolve_role_family(normalized_title: &str) -> &'static str {
    builtin::family_for_title(normalized_title).unwrap_or(GENERIC_FAMILY)
}

/// Like [`resolve_role_family`], but a title that spells out a family the
/// provider serves (`"barista"` for a configured `barista` template) selects
/// that family.
pub fn resolve_with_provider<P: RoleTemplateProvider>(provider: &P, normalized_title: &str) -> String {
    if let Some(family) = builtin::family_for_title(normalized_title) {
        return family.to_string();
    }
    let slug = normalized_title.replace(' ', "_");
    if !slug.is_empty() && provider.families().contains(&slug) {
        slug
    } else {
        GENERIC_FAMILY.to_string()
    }
}

/// Source of role templates keyed by family slug.
pub trait RoleTemplateProvider: Send + Sync {
    /// Load the template for `role_family`, or `None` if this source has none.
    fn load_role_template(
        &self,
        role_family: &str,
    ) -> impl Future<Output = Option<RoleTemplate>> + Send;

    /// Families this source can serve, sorted.
    fn families(&self) -> Vec<String>;
}

/// The embedded template table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRoleTemplates;

impl RoleTemplateProvider for BuiltinRoleTemplates {
    async fn load_role_template(&self, role_family: &str) -> Option<RoleTemplate> {
        builtin::template(role_family)
    }

    fn families(&self) -> Vec<String> {
        let mut names: Vec<String> = builtin::families().map(str::to_string).collect();
        names.sort();
        names
    }
}

/// Templates from configuration layered over the built-in table.
///
/// A configured family replaces the built-in entry of the same name and new
/// names extend the table.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredRoleTemplates {
    overrides: HashMap<String, RoleTemplate>,
}

impl ConfiguredRoleTemplates {
    /// Layer `overrides` over the built-ins.
    pub fn new(overrides: HashMap<String, RoleTemplate>) -> Self {
        Self { overrides }
    }

    /// Returns `true` if `family` has a configured override.
    pub fn is_overridden(&self, family: &str) -> bool {
        self.overrides.contains_key(family)
    }
}

impl RoleTemplateProvider for ConfiguredRoleTemplates {
    async fn load_role_template(&self, role_family: &str) -> Option<RoleTemplate> {
        match self.overrides.get(role_family) {
            Some(template) => Some(template.clone()),
            None => builtin::template(role_family),
        }
    }

    fn families(&self) -> Vec<String> {
        let names: BTreeSet<String> = builtin::families()
            .map(str::to_string)
            .chain(self.overrides.keys().cloned())
            .collect();
        names.into_iter().collect()
    }
}

/// A template together with the family it was actually loaded for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    /// Family whose template is in use. Differs from the request on fallback.
    pub role_family: String,
    /// The template.
    pub template: RoleTemplate,
}

/// Load a template without ever failing.
///
/// Order: the provider, then the built-in entry for the same family, then
/// `generic_professional`. Each fallback is logged as a warning.
pub async fn load_role_template<P: RoleTemplateProvider>(
    provider: &P,
    role_family: &str,
) -> ResolvedTemplate {
    if let Some(template) = provider.load_role_template(role_family).await {
        return ResolvedTemplate {
            role_family: role_family.to_string(),
            template,
        };
    }

    if let Some(template) = builtin::template(role_family) {
        tracing::warn!(role_family, "template provider miss, using built-in template");
        return ResolvedTemplate {
            role_family: role_family.to_string(),
            template,
        };
    }

    tracing::warn!(
        role_family,
        fallback = GENERIC_FAMILY,
        "no template for role family, using generic template"
    );
    ResolvedTemplate {
        role_family: GENERIC_FAMILY.to_string(),
        template: builtin::generic(),
    }
}
